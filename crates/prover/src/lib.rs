//! Proof generation library for the Merkle membership tree.
//!
//! This crate provides utilities for:
//! - Trusted setup (generating proving and verifying keys)
//! - Proof generation from a tree and a leaf index
//! - Local proof verification (for testing)

pub mod prove;
pub mod setup;
pub mod verify;

pub use prove::{prove_membership, MembershipProof, ProveError};
pub use setup::{setup_membership, MembershipKeys, SetupError};
pub use verify::{verify_membership, VerifyError};

use ark_bn254::Fr;

/// Common field type for all operations
pub type ConstraintF = Fr;
