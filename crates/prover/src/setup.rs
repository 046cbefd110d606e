//! Trusted setup utilities for generating proving and verifying keys.

use ark_bn254::Bn254;
use ark_groth16::{Groth16, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::rngs::StdRng;
use thiserror::Error;

use membership_circuits::MembershipCircuit;

const PROVING_KEY_FILE: &str = "membership.pk";
const VERIFYING_KEY_FILE: &str = "membership.vk";

/// Errors that can occur during setup
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Circuit setup failed: {0}")]
    CircuitSetup(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
    #[error("Deserialization failed: {0}")]
    Deserialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keys for the membership circuit
#[derive(Clone)]
pub struct MembershipKeys {
    pub proving_key: ProvingKey<Bn254>,
    pub verifying_key: VerifyingKey<Bn254>,
}

impl MembershipKeys {
    /// Serialize proving key to bytes
    pub fn serialize_pk(&self) -> Result<Vec<u8>, SetupError> {
        let mut bytes = Vec::new();
        self.proving_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Serialize verifying key to bytes
    pub fn serialize_vk(&self) -> Result<Vec<u8>, SetupError> {
        let mut bytes = Vec::new();
        self.verifying_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Deserialize proving key from bytes
    pub fn deserialize_pk(bytes: &[u8]) -> Result<ProvingKey<Bn254>, SetupError> {
        ProvingKey::deserialize_compressed(bytes)
            .map_err(|e| SetupError::Deserialization(e.to_string()))
    }

    /// Deserialize verifying key from bytes
    pub fn deserialize_vk(bytes: &[u8]) -> Result<VerifyingKey<Bn254>, SetupError> {
        VerifyingKey::deserialize_compressed(bytes)
            .map_err(|e| SetupError::Deserialization(e.to_string()))
    }

    /// Save both keys to a directory
    pub fn save_to_directory(&self, dir: &std::path::Path) -> Result<(), SetupError> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(PROVING_KEY_FILE), self.serialize_pk()?)?;
        std::fs::write(dir.join(VERIFYING_KEY_FILE), self.serialize_vk()?)?;
        Ok(())
    }

    /// Load both keys from a directory
    pub fn load_from_directory(dir: &std::path::Path) -> Result<Self, SetupError> {
        let proving_key = Self::deserialize_pk(&std::fs::read(dir.join(PROVING_KEY_FILE))?)?;
        let verifying_key = Self::deserialize_vk(&std::fs::read(dir.join(VERIFYING_KEY_FILE))?)?;
        Ok(Self {
            proving_key,
            verifying_key,
        })
    }
}

/// Run trusted setup for the membership circuit.
///
/// The constraint system is fixed by the tree depth, so setup runs on an
/// empty circuit and the keys work for every leaf and fill level.
pub fn setup_membership(rng: &mut StdRng) -> Result<MembershipKeys, SetupError> {
    let circuit = MembershipCircuit::empty();
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(circuit, rng)
        .map_err(|e| SetupError::CircuitSetup(e.to_string()))?;

    Ok(MembershipKeys {
        proving_key: pk,
        verifying_key: vk,
    })
}
