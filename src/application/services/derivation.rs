//! Derivation planning service
//!
//! Orchestrates the core pipeline: parsed steps in, built tree plus layout
//! statistics out, with an optional fit-to-viewport scale and an icon table
//! for the rendering collaborator.

use std::sync::Arc;

use itertools::Itertools;
use tracing::debug;

use crate::application::services::icons::IconService;
use crate::application::ApplicationResult;
use crate::domain::{
    fit_scale, DerivTree, LayoutStats, NodeFootprint, Step, TreeBuilder, Viewport,
};

/// One planned render: the reconstructed tree and everything the renderer
/// needs to place it.
#[derive(Debug)]
pub struct RenderPlan {
    pub tree: DerivTree,
    pub stats: LayoutStats,
    /// Present when the plan was made for a concrete viewport
    pub scale: Option<f64>,
}

/// Service producing render plans from step sequences.
pub struct DerivationService {
    icons: Arc<IconService>,
    footprint: NodeFootprint,
}

impl DerivationService {
    /// Create a new derivation service.
    pub fn new(icons: Arc<IconService>, footprint: NodeFootprint) -> Self {
        Self { icons, footprint }
    }

    /// Build the tree for `steps` and measure its layout.
    pub fn plan(&self, steps: &[Step]) -> ApplicationResult<RenderPlan> {
        debug!("plan: {} steps", steps.len());
        let tree = TreeBuilder::new(steps).build()?;
        let stats = LayoutStats::measure(&tree);
        debug!(
            "plan: {} nodes, depth {}, max width {}",
            tree.node_count(),
            stats.depth,
            stats.max_width
        );
        Ok(RenderPlan {
            tree,
            stats,
            scale: None,
        })
    }

    /// Build a plan scaled to fit a concrete viewport.
    pub fn plan_for_viewport(
        &self,
        steps: &[Step],
        viewport: Viewport,
    ) -> ApplicationResult<RenderPlan> {
        let mut plan = self.plan(steps)?;
        plan.scale = Some(self.scale_for(plan.stats, viewport));
        Ok(plan)
    }

    /// Scale factor for already-measured stats under the service footprint.
    pub fn scale_for(&self, stats: LayoutStats, viewport: Viewport) -> f64 {
        fit_scale(stats, viewport, self.footprint)
    }

    /// Icon paths for every distinct element in the tree, in first-seen
    /// preorder position.
    pub fn icon_table(&self, tree: &DerivTree) -> Vec<(String, String)> {
        self.icons.ensure_loaded();
        tree.iter()
            .map(|(_, node)| node.name.clone())
            .unique()
            .map(|name| {
                let path = self.icons.resolve(&name);
                (name, path)
            })
            .collect()
    }

    /// The per-node footprint this service plans with.
    pub fn footprint(&self) -> NodeFootprint {
        self.footprint
    }
}
