//! Merkle membership tree and the ZK circuit that proves inclusion.
//!
//! This crate provides:
//! - `MembershipTree`: fixed-capacity append-only Merkle tree over BN254
//! - `AuthenticationPath`: per-leaf sibling paths with native verification
//! - `MembershipCircuit`: Groth16-provable inclusion of a leaf under a root

pub mod membership;
pub mod poseidon;
pub mod tree;

#[cfg(test)]
mod tests;

pub use membership::MembershipCircuit;
pub use poseidon::{poseidon_config, poseidon_hash_two, Poseidon};
pub use tree::{
    AuthenticationPath, Compression, LeafIndex, MembershipTree, TreeError, CAPACITY, DEPTH,
    NODE_COUNT, ROOT_INDEX,
};

use ark_bn254::Fr;

/// Common type aliases
pub type ConstraintF = Fr;
