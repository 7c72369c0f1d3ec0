//! Arena-based derivation trees.

use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

/// Tree node in the arena-based derivation structure.
///
/// A node either has exactly zero children (a raw/base element, or a name
/// with no earlier producing step) or exactly two (a production). The
/// `Option<(Index, Index)>` encodes that invariant in the type; the pair is
/// ordered `(left, right)` as given by the originating step.
#[derive(Debug, Clone)]
pub struct DerivNode {
    /// Element name this node represents
    pub name: String,
    /// Left and right operand subtrees, `None` for leaves
    pub children: Option<(Index, Index)>,
}

impl DerivNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Arena-based binary tree representing one derivation.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. The tree is built bottom-up (children are inserted before their
/// parent) and is not mutated after construction; if the same source step is
/// reachable from two branches it is present as two independent subtree
/// instances, never as a shared node.
#[derive(Debug, Default)]
pub struct DerivTree {
    arena: Arena<DerivNode>,
    root: Option<Index>,
}

impl DerivTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a childless node for a base/raw element name.
    #[instrument(level = "trace", skip(self))]
    pub fn add_leaf(&mut self, name: String) -> Index {
        self.arena.insert(DerivNode {
            name,
            children: None,
        })
    }

    /// Insert a production node over two already-inserted subtrees.
    #[instrument(level = "trace", skip(self))]
    pub fn add_production(&mut self, name: String, left: Index, right: Index) -> Index {
        self.arena.insert(DerivNode {
            name,
            children: Some((left, right)),
        })
    }

    /// Mark the node representing the final step's result as the root.
    pub fn set_root(&mut self, idx: Index) {
        self.root = Some(idx);
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&DerivNode> {
        self.arena.get(idx)
    }

    /// Total number of nodes. Exceeds the step count whenever a shared
    /// intermediate element was re-expanded into separate subtrees.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Preorder iterator over `(Index, &DerivNode)`, left subtree first.
    pub fn iter(&self) -> TreeIter<'_> {
        TreeIter::new(self)
    }

    /// Collects the names of all leaf nodes, in left-to-right order.
    ///
    /// These are the derivation's raw inputs: every name that had no earlier
    /// producing step. Duplicates are kept; one base element may feed many
    /// branches.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_names(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(idx) {
            match node.children {
                None => leaves.push(node.name.clone()),
                Some((left, right)) => {
                    self.collect_leaves(left, leaves);
                    self.collect_leaves(right, leaves);
                }
            }
        }
    }

    /// Render the tree for terminal display.
    ///
    /// Returns `None` for a tree without a root (never the case for a built
    /// tree).
    pub fn display_tree(&self) -> Option<Tree<String>> {
        self.root.map(|root| self.to_display_tree(root))
    }

    fn to_display_tree(&self, idx: Index) -> Tree<String> {
        let Some(node) = self.get_node(idx) else {
            return Tree::new(String::new());
        };
        match node.children {
            None => Tree::new(node.name.clone()),
            Some((left, right)) => Tree::new(node.name.clone()).with_leaves(vec![
                self.to_display_tree(left),
                self.to_display_tree(right),
            ]),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, idx: Index) -> fmt::Result {
        let Some(node) = self.get_node(idx) else {
            return Ok(());
        };
        write!(f, "{}", node.name)?;
        if let Some((left, right)) = node.children {
            write!(f, "(")?;
            self.fmt_node(f, left)?;
            write!(f, ", ")?;
            self.fmt_node(f, right)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Nested one-line form, e.g. `stone(earth, pressure(air, air))`.
///
/// Structurally identical trees produce identical strings, which makes this
/// the cheapest determinism check.
impl fmt::Display for DerivTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_node(f, root),
            None => write!(f, "(empty)"),
        }
    }
}

pub struct TreeIter<'a> {
    tree: &'a DerivTree,
    stack: Vec<Index>,
}

impl<'a> TreeIter<'a> {
    fn new(tree: &'a DerivTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = (Index, &'a DerivNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(idx) {
                // Push right before left for left-to-right traversal
                if let Some((left, right)) = node.children {
                    self.stack.push(right);
                    self.stack.push(left);
                }
                return Some((idx, node));
            }
        }
        None
    }
}
