//! In-circuit verification of authentication paths.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::PoseidonConfig;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::path::AuthenticationPath;
use crate::poseidon::poseidon_hash_two_var;

/// Allocated form of an [`AuthenticationPath`]: one sibling and one
/// direction bit per level, all private to the prover.
#[derive(Clone)]
pub struct AuthenticationPathVar {
    siblings: Vec<FpVar<Fr>>,
    directions: Vec<Boolean<Fr>>,
}

impl AuthenticationPathVar {
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        path: &AuthenticationPath,
    ) -> Result<Self, SynthesisError> {
        let siblings = path
            .siblings()
            .iter()
            .map(|sibling| FpVar::new_witness(cs.clone(), || Ok(*sibling)))
            .collect::<Result<Vec<_>, _>>()?;

        let directions = path
            .directions()
            .iter()
            .map(|&is_right| Boolean::new_witness(cs.clone(), || Ok(is_right)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            siblings,
            directions,
        })
    }
}

/// Fold the path over `leaf` inside the circuit, yielding the root.
///
/// Each direction bit selects the operand order for that level's hash,
/// mirroring [`AuthenticationPath::compute_root`].
pub fn compute_root_var(
    cs: ConstraintSystemRef<Fr>,
    config: &PoseidonConfig<Fr>,
    leaf: &FpVar<Fr>,
    path: &AuthenticationPathVar,
) -> Result<FpVar<Fr>, SynthesisError> {
    let mut current = leaf.clone();

    for (sibling, is_right) in path.siblings.iter().zip(path.directions.iter()) {
        let left = is_right.select(sibling, &current)?;
        let right = is_right.select(&current, sibling)?;
        current = poseidon_hash_two_var(cs.clone(), config, &left, &right)?;
    }

    Ok(current)
}

/// Constrain `leaf` to be a member of the tree with root `expected_root`.
pub fn enforce_membership(
    cs: ConstraintSystemRef<Fr>,
    config: &PoseidonConfig<Fr>,
    expected_root: &FpVar<Fr>,
    leaf: &FpVar<Fr>,
    path: &AuthenticationPathVar,
) -> Result<(), SynthesisError> {
    let computed = compute_root_var(cs, config, leaf, path)?;
    computed.enforce_equal(expected_root)
}
