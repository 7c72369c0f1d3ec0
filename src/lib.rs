//! alchetree: derivation-tree reconstruction and layout estimation
//!
//! Rebuilds the full derivation tree behind an ordered list of combination
//! steps ("A + B = C") and estimates what it takes to draw it: depth,
//! per-level widths, and a scale factor that fits a target viewport.
//!
//! Layered layout:
//! - `domain`: pure core (step parsing, tree building, layout, scale)
//! - `application`: services orchestrating the core
//! - `infrastructure`: filesystem boundary and dependency wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult};
pub use domain::{
    fit_scale, level_widths, parse_sequence, DerivTree, DomainError, LayoutStats, NodeFootprint,
    Step, TreeBuilder, Viewport,
};
pub use infrastructure::ServiceContainer;
