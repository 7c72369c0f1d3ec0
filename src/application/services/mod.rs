//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod derivation;
mod icons;
mod rebuild;
mod sequence;

pub use derivation::{DerivationService, RenderPlan};
pub use icons::{icon_key, IconService};
pub use rebuild::{RebuildCoordinator, RebuildTicket};
pub use sequence::{SearchRecord, SequenceService};
