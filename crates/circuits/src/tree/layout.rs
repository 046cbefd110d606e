//! Flat-array layout of the fixed-depth tree.
//!
//! All 15 nodes live in one array, level by level: leaves first, then each
//! internal level, then the root. A node is addressed by its level (0 =
//! leaves) and its position within that level; the flat index is the level's
//! offset plus the position.

/// Number of hash levels between a leaf and the root.
pub const DEPTH: usize = 3;

/// Number of leaf slots.
pub const CAPACITY: usize = 1 << DEPTH;

/// Total number of nodes across all levels.
pub const NODE_COUNT: usize = 2 * CAPACITY - 1;

/// Flat index of the root, the last slot in the array.
pub const ROOT_INDEX: usize = NODE_COUNT - 1;

/// Number of nodes on a level. Level 0 is the leaves, level `DEPTH` the root.
pub const fn level_width(level: usize) -> usize {
    CAPACITY >> level
}

/// Offset of a level's slice in the flat array: the sum of the widths of all
/// levels below it. For depth 3 this is [0, 8, 12, 14].
pub const fn level_offset(level: usize) -> usize {
    let mut offset = 0;
    let mut l = 0;
    while l < level {
        offset += level_width(l);
        l += 1;
    }
    offset
}

/// Flat index of the node at `pos` within `level`.
pub const fn node_index(level: usize, pos: usize) -> usize {
    level_offset(level) + pos
}

/// Position of a node's sibling within the same level.
pub const fn sibling_pos(pos: usize) -> usize {
    pos ^ 1
}

/// Whether the node at `pos` is the right child of its parent.
pub const fn is_right_child(pos: usize) -> bool {
    pos & 1 == 1
}
