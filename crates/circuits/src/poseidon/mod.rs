//! Poseidon hash function for BN254.
//!
//! One parameter set serves both sides of the proof: [`Poseidon`] hashes
//! natively when the tree is updated, and the gadget in
//! [`poseidon_hash_two_var`] enforces the same permutation inside circuits.

mod config;
mod gadgets;
mod native;


pub use config::poseidon_config;
pub use gadgets::poseidon_hash_two_var;
pub use native::{poseidon_hash_two, Poseidon};
