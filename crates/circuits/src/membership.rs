//! Membership circuit for the fixed-capacity tree.
//!
//! Proves knowledge of a leaf and an authentication path that fold to a
//! published root. The root is the only public input; the leaf value, the
//! sibling hashes and the direction bits all stay private.

use ark_bn254::Fr;
use ark_ff::Zero;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use crate::poseidon::poseidon_config;
use crate::tree::{enforce_membership, AuthenticationPath, AuthenticationPathVar, DEPTH};

/// Membership circuit over the depth-3 tree.
#[derive(Clone)]
pub struct MembershipCircuit {
    /// Tree root (public input)
    pub root: Option<Fr>,
    /// Leaf value (witness)
    pub leaf: Option<Fr>,
    /// Authentication path for the leaf (witness)
    pub path: Option<AuthenticationPath>,
}

impl MembershipCircuit {
    /// Create an empty circuit for setup.
    /// Uses dummy values that produce the full constraint structure.
    pub fn empty() -> Self {
        let dummy_path = AuthenticationPath::new([Fr::zero(); DEPTH], [false; DEPTH]);

        Self {
            root: Some(Fr::zero()),
            leaf: Some(Fr::zero()),
            path: Some(dummy_path),
        }
    }

    /// Create a circuit with concrete assignments.
    pub fn new(root: Fr, leaf: Fr, path: AuthenticationPath) -> Self {
        Self {
            root: Some(root),
            leaf: Some(leaf),
            path: Some(path),
        }
    }
}

impl ConstraintSynthesizer<Fr> for MembershipCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let config = poseidon_config();

        let root_var =
            FpVar::new_input(cs.clone(), || self.root.ok_or(SynthesisError::AssignmentMissing))?;

        let leaf_var =
            FpVar::new_witness(cs.clone(), || self.leaf.ok_or(SynthesisError::AssignmentMissing))?;

        let path = self.path.as_ref().ok_or(SynthesisError::AssignmentMissing)?;
        let path_var = AuthenticationPathVar::new_witness(cs.clone(), path)?;

        enforce_membership(cs, &config, &root_var, &leaf_var, &path_var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poseidon::Poseidon;
    use crate::tree::{LeafIndex, MembershipTree};
    use ark_relations::r1cs::ConstraintSystem;

    #[test]
    fn membership_valid() {
        let mut tree = MembershipTree::new(Poseidon::new());
        tree.insert(Fr::from(10u64)).unwrap();
        let index = tree.insert(Fr::from(20u64)).unwrap();

        let path = AuthenticationPath::for_leaf(&tree, index);
        let circuit = MembershipCircuit::new(tree.root(), Fr::from(20u64), path);

        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();

        assert!(cs.is_satisfied().unwrap());
        println!("Membership constraints: {}", cs.num_constraints());
    }

    #[test]
    fn membership_of_sentinel_slot() {
        let mut tree = MembershipTree::new(Poseidon::new());
        tree.insert(Fr::from(10u64)).unwrap();

        // Slot 4 is unfilled, its sentinel value is still a member.
        let index = LeafIndex::new(4).unwrap();
        let path = AuthenticationPath::for_leaf(&tree, index);
        let circuit = MembershipCircuit::new(tree.root(), Fr::zero(), path);

        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();

        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn membership_wrong_leaf() {
        let mut tree = MembershipTree::new(Poseidon::new());
        let index = tree.insert(Fr::from(10u64)).unwrap();

        let path = AuthenticationPath::for_leaf(&tree, index);
        // Claim a value that is not in slot 0.
        let circuit = MembershipCircuit::new(tree.root(), Fr::from(11u64), path);

        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn membership_stale_root() {
        let mut tree = MembershipTree::new(Poseidon::new());
        let index = tree.insert(Fr::from(10u64)).unwrap();
        let stale_root = tree.root();

        tree.insert(Fr::from(20u64)).unwrap();

        // Fresh path against the root from before the second insert.
        let path = AuthenticationPath::for_leaf(&tree, index);
        let circuit = MembershipCircuit::new(stale_root, Fr::from(10u64), path);

        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn empty_circuit_synthesizes() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        MembershipCircuit::empty()
            .generate_constraints(cs.clone())
            .unwrap();

        // The dummy assignment is itself unsatisfiable, only the shape matters.
        assert!(cs.num_constraints() > 0);
    }
}
