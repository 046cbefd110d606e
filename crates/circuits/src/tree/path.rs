//! Authentication paths from a leaf to the root.

use ark_bn254::Fr;

use super::layout::{is_right_child, node_index, sibling_pos, DEPTH};
use super::store::{Compression, LeafIndex, MembershipTree};

/// The `DEPTH` sibling hashes and direction bits that authenticate one leaf.
///
/// `directions[level]` is true when the node on the leaf's root path is the
/// right child at that level, i.e. the recorded sibling sits on the left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticationPath {
    siblings: [Fr; DEPTH],
    directions: [bool; DEPTH],
}

impl AuthenticationPath {
    pub fn new(siblings: [Fr; DEPTH], directions: [bool; DEPTH]) -> Self {
        Self {
            siblings,
            directions,
        }
    }

    /// Read the path for `leaf` out of the tree's current state.
    ///
    /// Walks one level at a time: record the sibling of the current node and
    /// which side the current node is on, then step to the parent position.
    pub fn for_leaf<H: Compression>(tree: &MembershipTree<H>, leaf: LeafIndex) -> Self {
        let nodes = tree.nodes();
        let mut siblings = [tree.sentinel(); DEPTH];
        let mut directions = [false; DEPTH];

        let mut pos = leaf.as_usize();
        for level in 0..DEPTH {
            siblings[level] = nodes[node_index(level, sibling_pos(pos))];
            directions[level] = is_right_child(pos);
            pos /= 2;
        }

        Self {
            siblings,
            directions,
        }
    }

    /// Fold the path over `leaf`, ordering each pair by the direction bit.
    pub fn compute_root<H: Compression>(&self, leaf: Fr, hasher: &H) -> Fr {
        let mut current = leaf;
        for (sibling, &is_right) in self.siblings.iter().zip(self.directions.iter()) {
            current = if is_right {
                hasher.compress(*sibling, current)
            } else {
                hasher.compress(current, *sibling)
            };
        }
        current
    }

    /// True when folding the path over `leaf` reproduces `expected_root`.
    pub fn verify<H: Compression>(&self, leaf: Fr, expected_root: Fr, hasher: &H) -> bool {
        self.compute_root(leaf, hasher) == expected_root
    }

    pub fn siblings(&self) -> &[Fr; DEPTH] {
        &self.siblings
    }

    pub fn directions(&self) -> &[bool; DEPTH] {
        &self.directions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poseidon::{poseidon_hash_two, Poseidon};
    use ark_ff::Zero;

    fn filled_tree(count: usize) -> MembershipTree<Poseidon> {
        let mut tree = MembershipTree::new(Poseidon::new());
        for i in 0..count {
            tree.insert(Fr::from((i + 1) as u64 * 10)).unwrap();
        }
        tree
    }

    #[test]
    fn leftmost_leaf_has_all_left_directions() {
        let tree = filled_tree(4);
        let path = AuthenticationPath::for_leaf(&tree, LeafIndex::new(0).unwrap());

        assert_eq!(path.directions(), &[false, false, false]);
        assert_eq!(
            path.siblings(),
            &[
                tree.node(1).unwrap(),
                tree.node(9).unwrap(),
                tree.node(13).unwrap()
            ]
        );
    }

    #[test]
    fn rightmost_leaf_has_all_right_directions() {
        let tree = filled_tree(8);
        let index = LeafIndex::new(7).unwrap();
        let path = AuthenticationPath::for_leaf(&tree, index);

        assert_eq!(path.directions(), &[true, true, true]);
        assert_eq!(
            path.siblings(),
            &[
                tree.node(6).unwrap(),
                tree.node(10).unwrap(),
                tree.node(12).unwrap()
            ]
        );
        assert!(path.verify(tree.leaf(index), tree.root(), tree.hasher()));

        // Swap in the leftmost level-1 node for the true sibling.
        let wrong = AuthenticationPath::new(
            [
                tree.node(6).unwrap(),
                tree.node(8).unwrap(),
                tree.node(12).unwrap(),
            ],
            [true, true, true],
        );
        assert!(!wrong.verify(tree.leaf(index), tree.root(), tree.hasher()));
    }

    #[test]
    fn every_leaf_folds_to_the_root() {
        for fill in [0usize, 1, 3, 8] {
            let tree = filled_tree(fill);
            for index in 0..8 {
                let leaf_index = LeafIndex::new(index).unwrap();
                let path = AuthenticationPath::for_leaf(&tree, leaf_index);
                let leaf = tree.leaf(leaf_index);
                assert_eq!(
                    path.compute_root(leaf, tree.hasher()),
                    tree.root(),
                    "leaf {index} with {fill} filled"
                );
            }
        }
    }

    #[test]
    fn sentinel_leaves_are_provable() {
        let tree = filled_tree(2);
        let path = AuthenticationPath::for_leaf(&tree, LeafIndex::new(5).unwrap());
        assert!(path.verify(Fr::zero(), tree.root(), tree.hasher()));
    }

    #[test]
    fn tampered_path_fails_verification() {
        let tree = filled_tree(8);
        let leaf_index = LeafIndex::new(3).unwrap();
        let leaf = tree.leaf(leaf_index);
        let path = AuthenticationPath::for_leaf(&tree, leaf_index);
        assert!(path.verify(leaf, tree.root(), tree.hasher()));

        // Flip one sibling.
        let mut siblings = *path.siblings();
        siblings[1] += Fr::from(1u64);
        let tampered = AuthenticationPath::new(siblings, *path.directions());
        assert!(!tampered.verify(leaf, tree.root(), tree.hasher()));

        // Flip one direction bit.
        let mut directions = *path.directions();
        directions[0] = !directions[0];
        let tampered = AuthenticationPath::new(*path.siblings(), directions);
        assert!(!tampered.verify(leaf, tree.root(), tree.hasher()));

        // Wrong leaf value.
        assert!(!path.verify(leaf + Fr::from(1u64), tree.root(), tree.hasher()));
    }

    #[test]
    fn fold_matches_manual_hashing() {
        let tree = filled_tree(3);
        let leaf_index = LeafIndex::new(1).unwrap();
        let path = AuthenticationPath::for_leaf(&tree, leaf_index);
        let leaf = tree.leaf(leaf_index);

        // Leaf 1 is a right child, then left, then left.
        let level1 = poseidon_hash_two(path.siblings()[0], leaf);
        let level2 = poseidon_hash_two(level1, path.siblings()[1]);
        let root = poseidon_hash_two(level2, path.siblings()[2]);
        assert_eq!(path.compute_root(leaf, tree.hasher()), root);
        assert_eq!(root, tree.root());
    }
}
