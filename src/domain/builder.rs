//! Tree builder: reconstructs derivation trees from flat step sequences.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::step::Step;
use crate::domain::tree::DerivTree;

/// Constructs derivation trees from ordered step sequences.
///
/// The result of the final step is the derivation target. Operand names are
/// resolved against earlier steps only, scanning backwards, right operand
/// before left, so the same input always yields the same tree.
pub struct TreeBuilder<'a> {
    steps: &'a [Step],
}

impl<'a> TreeBuilder<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Self { steps }
    }

    /// Build the derivation tree for the whole sequence.
    ///
    /// Expansion starts at the last step and threads a consumed-index
    /// watermark through operand resolution: each backward scan only sees
    /// steps strictly below what the branches to its right already claimed.
    /// An intermediate element derived more than once is materialized as
    /// separate subtrees, so the node count can exceed the step count.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptySequence`] when there are no steps, since
    /// there is no final step to anchor the root.
    #[instrument(level = "debug", skip(self), fields(steps = self.steps.len()))]
    pub fn build(&self) -> DomainResult<DerivTree> {
        if self.steps.is_empty() {
            return Err(DomainError::EmptySequence);
        }

        let mut tree = DerivTree::new();
        let (root, _) = self.expand_step(&mut tree, self.steps.len() - 1);
        tree.set_root(root);
        Ok(tree)
    }

    /// Expand the step at `index` into a production node.
    ///
    /// Returns the node together with the lowest step index consumed
    /// anywhere in its subtree. The right operand resolves first against
    /// steps before `index`; the left operand then scans below whatever the
    /// right side consumed.
    fn expand_step(&self, tree: &mut DerivTree, index: usize) -> (Index, usize) {
        let step = &self.steps[index];

        let (right, right_consumed) = self.resolve_operand(tree, &step.right, index);
        let (left, left_consumed) = self.resolve_operand(tree, &step.left, right_consumed);

        let consumed = left_consumed.min(right_consumed);
        let node = tree.add_production(step.result.clone(), left, right);
        (node, consumed)
    }

    /// Resolve an operand name against steps strictly before `before`.
    ///
    /// The nearest earlier step producing `name` is expanded recursively. A
    /// name no earlier step produced is a base element: it becomes a leaf
    /// and leaves the consumed watermark unchanged.
    fn resolve_operand(&self, tree: &mut DerivTree, name: &str, before: usize) -> (Index, usize) {
        for i in (0..before).rev() {
            if self.steps[i].result == name {
                return self.expand_step(tree, i);
            }
        }
        (tree.add_leaf(name.to_string()), before)
    }
}
