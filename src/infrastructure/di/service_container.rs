//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DerivationService, IconService, SequenceService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Icon lookup service, shared with the derivation service
    pub icons: Arc<IconService>,

    /// Step sequence ingestion
    pub sequences: SequenceService,

    /// Tree building, layout, and scaling
    pub derivation: DerivationService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        let icons = Arc::new(IconService::new(
            settings.icon_dir(),
            settings.icons.fallback.clone(),
        ));
        let sequences = SequenceService::new(Arc::clone(&fs));
        let derivation = DerivationService::new(Arc::clone(&icons), settings.footprint());

        Self {
            settings,
            fs,
            icons,
            sequences,
            derivation,
        }
    }
}
