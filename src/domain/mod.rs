//! Domain layer: step parsing, tree building, and layout math
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod layout;
pub mod scale;
pub mod step;
pub mod tree;

pub use builder::TreeBuilder;
pub use error::{DomainError, DomainResult};
pub use layout::{level_widths, LayoutStats};
pub use scale::{fit_scale, NodeFootprint, Viewport, FIT_MARGIN};
pub use step::{parse_sequence, Step};
pub use tree::{DerivNode, DerivTree};
