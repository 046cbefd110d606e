//! Proof generation for the membership circuit.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use membership_circuits::{
    AuthenticationPath, LeafIndex, MembershipCircuit, MembershipTree, Poseidon,
};

/// Errors during proof generation
#[derive(Error, Debug)]
pub enum ProveError {
    #[error("Proof generation failed: {0}")]
    ProofGeneration(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// A proof with its public inputs
#[derive(Clone)]
pub struct MembershipProof {
    pub proof: Proof<Bn254>,
    pub public_inputs: Vec<Fr>,
}

impl MembershipProof {
    /// Serialize proof to bytes
    pub fn serialize_proof(&self) -> Result<Vec<u8>, ProveError> {
        let mut bytes = Vec::new();
        self.proof
            .serialize_compressed(&mut bytes)
            .map_err(|e| ProveError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Serialize public inputs to bytes (each Fr is 32 bytes)
    pub fn serialize_public_inputs(&self) -> Result<Vec<u8>, ProveError> {
        let mut bytes = Vec::new();
        for input in &self.public_inputs {
            input
                .serialize_compressed(&mut bytes)
                .map_err(|e| ProveError::Serialization(e.to_string()))?;
        }
        Ok(bytes)
    }

    /// Deserialize proof from bytes
    pub fn deserialize_proof(bytes: &[u8]) -> Result<Proof<Bn254>, ProveError> {
        Proof::deserialize_compressed(bytes).map_err(|e| ProveError::Serialization(e.to_string()))
    }
}

/// Prove that the leaf at `index` is part of the tree's current root.
///
/// The authentication path is read out of the tree at call time, so the proof
/// speaks for the state the tree is in right now. The only public input is
/// the root; the leaf value and the path remain hidden.
pub fn prove_membership(
    pk: &ProvingKey<Bn254>,
    tree: &MembershipTree<Poseidon>,
    index: LeafIndex,
) -> Result<MembershipProof, ProveError> {
    let leaf = tree.leaf(index);
    let path = AuthenticationPath::for_leaf(tree, index);
    let root = tree.root();

    let circuit = MembershipCircuit::new(root, leaf, path);

    let mut rng = StdRng::from_entropy();
    let proof = Groth16::<Bn254>::prove(pk, circuit, &mut rng)
        .map_err(|e| ProveError::ProofGeneration(e.to_string()))?;

    Ok(MembershipProof {
        proof,
        public_inputs: vec![root],
    })
}
