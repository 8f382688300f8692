//! One-based coordinates for tree-sitter positions.

use tree_sitter::{Node, Point};

/// Converts a zero-based tree-sitter point into one-based `(line, column)`,
/// saturating at `u32::MAX`.
#[must_use]
pub fn point_to_one_based(point: Point) -> (u32, u32) {
    (one_based(point.row), one_based(point.column))
}

/// One-based line on which `node` starts.
#[must_use]
pub fn line_of(node: Node<'_>) -> u32 {
    one_based(node.start_position().row)
}

fn one_based(offset: usize) -> u32 {
    u32::try_from(offset.saturating_add(1)).unwrap_or(u32::MAX)
}
