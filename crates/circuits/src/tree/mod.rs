//! Fixed-capacity Merkle membership tree.
//!
//! This module provides:
//! - The append-only tree store over a flat node array
//! - Authentication path extraction and native verification
//! - In-circuit path verification gadgets

mod gadgets;
mod layout;
mod path;
mod store;


pub use gadgets::{compute_root_var, enforce_membership, AuthenticationPathVar};
pub use layout::{level_offset, level_width, CAPACITY, DEPTH, NODE_COUNT, ROOT_INDEX};
pub use path::AuthenticationPath;
pub use store::{Compression, LeafIndex, MembershipTree, TreeError};
