//! Durable tree state as a JSON snapshot of the inserted leaves.
//!
//! Only the leaf values are written out; internal nodes are recomputed by
//! replaying the insertions, so a snapshot can never disagree with the hash
//! invariants of the tree it restores.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use membership_circuits::{MembershipTree, Poseidon};

use crate::handlers::{parse_fr, serialize_fr};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize)]
struct TreeSnapshot {
    next_index: usize,
    leaves: Vec<String>,
}

/// Write the tree's inserted leaves to `path`.
pub fn save_tree(path: &Path, tree: &MembershipTree<Poseidon>) -> Result<(), SnapshotError> {
    let snapshot = TreeSnapshot {
        next_index: tree.next_index(),
        leaves: tree.nodes()[..tree.next_index()]
            .iter()
            .map(serialize_fr)
            .collect(),
    };

    std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
    Ok(())
}

/// Rebuild the tree recorded at `path`, or `None` when no snapshot exists.
pub fn load_tree(path: &Path) -> Result<Option<MembershipTree<Poseidon>>, SnapshotError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SnapshotError::Io(e)),
    };

    let snapshot: TreeSnapshot = serde_json::from_str(&data)?;
    if snapshot.leaves.len() != snapshot.next_index {
        return Err(SnapshotError::Invalid(format!(
            "next_index {} does not match {} stored leaves",
            snapshot.next_index,
            snapshot.leaves.len()
        )));
    }

    let leaves = snapshot
        .leaves
        .iter()
        .map(|hex| parse_fr(hex))
        .collect::<Result<Vec<_>, _>>()
        .map_err(SnapshotError::Invalid)?;

    let tree = MembershipTree::from_leaves(Poseidon::new(), &leaves)
        .map_err(|e| SnapshotError::Invalid(e.to_string()))?;
    Ok(Some(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");

        let mut tree = MembershipTree::new(Poseidon::new());
        for value in [10u64, 20, 30] {
            tree.insert(Fr::from(value)).unwrap();
        }
        save_tree(&path, &tree).unwrap();

        let restored = load_tree(&path).unwrap().unwrap();
        assert_eq!(restored.nodes(), tree.nodes());
        assert_eq!(restored.next_index(), 3);
        assert_eq!(restored.root(), tree.root());
    }

    #[test]
    fn empty_tree_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");

        let tree = MembershipTree::new(Poseidon::new());
        save_tree(&path, &tree).unwrap();

        let restored = load_tree(&path).unwrap().unwrap();
        assert_eq!(restored.next_index(), 0);
        assert_eq!(restored.root(), tree.root());
    }

    #[test]
    fn missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_tree(&path).unwrap().is_none());
    }

    #[test]
    fn corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(load_tree(&path), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn inconsistent_leaf_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        std::fs::write(&path, r#"{"next_index": 2, "leaves": []}"#).unwrap();

        assert!(matches!(load_tree(&path), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn oversized_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");

        let leaves: Vec<String> = (0..9)
            .map(|i| serialize_fr(&Fr::from(i as u64)))
            .collect();
        let json = serde_json::json!({ "next_index": 9, "leaves": leaves });
        std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        assert!(matches!(load_tree(&path), Err(SnapshotError::Invalid(_))));
    }
}
