//! Layout estimation: depth and per-level breadth of a derivation tree.

use std::collections::VecDeque;

use tracing::instrument;

use crate::domain::tree::DerivTree;

/// Depth and breadth statistics for a built tree.
///
/// `depth` counts populated levels (a lone root measures 1), `max_width` is
/// the largest node count found on any single level. Both are at least 1 for
/// any built tree; only a hand-assembled tree without a root measures zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStats {
    pub depth: usize,
    pub max_width: usize,
}

impl LayoutStats {
    /// Measure a tree by level-order traversal.
    #[instrument(level = "debug", skip(tree))]
    pub fn measure(tree: &DerivTree) -> Self {
        let widths = level_widths(tree);
        Self {
            depth: widths.len(),
            max_width: widths.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Per-level node counts, index 0 = root level.
///
/// O(n) in tree nodes, which can exceed the input step count because shared
/// intermediates are re-expanded per branch.
pub fn level_widths(tree: &DerivTree) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    let mut queue = VecDeque::new();
    if let Some(root) = tree.root() {
        queue.push_back((root, 0usize));
    }

    while let Some((idx, depth)) = queue.pop_front() {
        let Some(node) = tree.get_node(idx) else {
            continue;
        };
        if widths.len() <= depth {
            widths.resize(depth + 1, 0);
        }
        widths[depth] += 1;

        if let Some((left, right)) = node.children {
            queue.push_back((left, depth + 1));
            queue.push_back((right, depth + 1));
        }
    }

    widths
}
