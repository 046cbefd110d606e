//! Append-only Merkle tree over a flat node array.

use ark_bn254::Fr;
use ark_ff::Zero;
use thiserror::Error;

use super::layout::{level_width, node_index, CAPACITY, DEPTH, NODE_COUNT, ROOT_INDEX};

/// Two-to-one hash used to combine sibling nodes.
///
/// The tree itself is hash-agnostic; circuits and the prover pin this to
/// Poseidon so native and in-circuit roots agree.
pub trait Compression {
    fn compress(&self, left: Fr, right: Fr) -> Fr;
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Every leaf slot is occupied.
    #[error("tree is at capacity ({} leaves)", CAPACITY)]
    CapacityExceeded,
    /// A node or leaf index outside the fixed layout.
    #[error("index {0} is out of range")]
    IndexOutOfRange(usize),
}

/// Leaf slot index, validated to lie in `0..CAPACITY` at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LeafIndex(usize);

impl LeafIndex {
    pub fn new(index: usize) -> Result<Self, TreeError> {
        if index < CAPACITY {
            Ok(Self(index))
        } else {
            Err(TreeError::IndexOutOfRange(index))
        }
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for LeafIndex {
    type Error = TreeError;

    fn try_from(index: usize) -> Result<Self, TreeError> {
        Self::new(index)
    }
}

/// Fixed-capacity Merkle tree with sequential leaf insertion.
///
/// Leaves fill left to right. Unfilled slots hold the sentinel value, so the
/// root is well defined at every fill level. Each insertion rewrites one leaf
/// and the `DEPTH` internal nodes above it; everything else is untouched.
#[derive(Clone)]
pub struct MembershipTree<H: Compression> {
    nodes: [Fr; NODE_COUNT],
    next_index: usize,
    sentinel: Fr,
    hasher: H,
}

impl<H: Compression> MembershipTree<H> {
    /// Empty tree padded with the zero sentinel.
    pub fn new(hasher: H) -> Self {
        Self::with_sentinel(hasher, Fr::zero())
    }

    /// Empty tree padded with a caller-chosen sentinel.
    pub fn with_sentinel(hasher: H, sentinel: Fr) -> Self {
        let mut nodes = [sentinel; NODE_COUNT];
        for level in 0..DEPTH {
            for pos in 0..level_width(level + 1) {
                let left = nodes[node_index(level, 2 * pos)];
                let right = nodes[node_index(level, 2 * pos + 1)];
                nodes[node_index(level + 1, pos)] = hasher.compress(left, right);
            }
        }
        Self {
            nodes,
            next_index: 0,
            sentinel,
            hasher,
        }
    }

    /// Rebuild a tree by inserting `leaves` in order into a fresh tree.
    pub fn from_leaves(hasher: H, leaves: &[Fr]) -> Result<Self, TreeError> {
        let mut tree = Self::new(hasher);
        for &leaf in leaves {
            tree.insert(leaf)?;
        }
        Ok(tree)
    }

    /// Write `value` into the next free slot and refresh the ancestors on its
    /// root path. Fails without touching the tree when all slots are taken.
    pub fn insert(&mut self, value: Fr) -> Result<LeafIndex, TreeError> {
        if self.next_index == CAPACITY {
            return Err(TreeError::CapacityExceeded);
        }
        let index = self.next_index;
        self.nodes[index] = value;

        let mut pos = index;
        for level in 0..DEPTH {
            pos /= 2;
            let left = self.nodes[node_index(level, 2 * pos)];
            let right = self.nodes[node_index(level, 2 * pos + 1)];
            self.nodes[node_index(level + 1, pos)] = self.hasher.compress(left, right);
        }

        self.next_index += 1;
        Ok(LeafIndex(index))
    }

    /// Hash at flat index `index`, any level.
    pub fn node(&self, index: usize) -> Result<Fr, TreeError> {
        self.nodes
            .get(index)
            .copied()
            .ok_or(TreeError::IndexOutOfRange(index))
    }

    /// Leaf value at a validated slot, sentinel if the slot is unfilled.
    pub fn leaf(&self, index: LeafIndex) -> Fr {
        self.nodes[index.as_usize()]
    }

    pub fn root(&self) -> Fr {
        self.nodes[ROOT_INDEX]
    }

    /// The whole node array, leaves first, root last.
    pub fn nodes(&self) -> &[Fr; NODE_COUNT] {
        &self.nodes
    }

    /// Index the next insertion will occupy; equals the number of leaves
    /// inserted so far.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn is_full(&self) -> bool {
        self.next_index == CAPACITY
    }

    pub fn sentinel(&self) -> Fr {
        self.sentinel
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}
