//! Fit-to-viewport scale factor derived from layout statistics.

use crate::domain::layout::LayoutStats;

/// Fixed safety margin so a fitted tree never touches the viewport edge.
pub const FIT_MARGIN: f64 = 0.9;

/// Per-node rendering footprint, in abstract length units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeFootprint {
    pub width: f64,
    pub height: f64,
}

impl Default for NodeFootprint {
    fn default() -> Self {
        Self {
            width: 170.0,
            height: 80.0,
        }
    }
}

/// Viewport dimensions reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Scale factor that fits `max_width` columns and `depth` rows of nodes into
/// the viewport, shrunk by [`FIT_MARGIN`].
///
/// Callers pass stats measured from a built tree, so `depth` and `max_width`
/// are both at least 1.
pub fn fit_scale(stats: LayoutStats, viewport: Viewport, footprint: NodeFootprint) -> f64 {
    let scale_x = viewport.width / (footprint.width * stats.max_width as f64);
    let scale_y = viewport.height / (footprint.height * stats.depth as f64);
    scale_x.min(scale_y) * FIT_MARGIN
}
