//! Icon lookup service
//!
//! Maps element names to icon asset paths. The table is an explicitly
//! constructed instance (no module-level cache), populated lazily from an
//! asset directory; population is guarded and idempotent, so redundant
//! triggers run the scan at most once.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filename suffix the asset convention uses for element icons.
const ICON_SUFFIX: &str = "_2.svg";

/// Lookup key for an element name: lowercase, spaces as underscores.
pub fn icon_key(element: &str) -> String {
    element.to_lowercase().replace(' ', "_")
}

/// Service resolving element names to icon asset paths.
///
/// Missing mappings are non-fatal by contract: lookups fall back to the
/// configured fallback path and emit one warning per distinct key.
pub struct IconService {
    dir: Option<PathBuf>,
    fallback: String,
    table: Mutex<Option<HashMap<String, String>>>,
    warned: Mutex<HashSet<String>>,
}

impl IconService {
    /// Create a new icon service over an optional asset directory.
    pub fn new(dir: Option<PathBuf>, fallback: String) -> Self {
        Self {
            dir,
            fallback,
            table: Mutex::new(None),
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// Populate the lookup table if it has not been populated yet.
    ///
    /// Safe to call repeatedly and from multiple threads; the directory scan
    /// runs at most once per instance. A missing or unreadable directory
    /// yields an empty table and a warning, never an error.
    pub fn ensure_loaded(&self) {
        let mut table = self.table.lock().unwrap();
        if table.is_some() {
            return;
        }
        *table = Some(self.scan());
    }

    fn scan(&self) -> HashMap<String, String> {
        let Some(dir) = &self.dir else {
            debug!("scan: no icon directory configured");
            return HashMap::new();
        };
        if !dir.is_dir() {
            warn!("icon directory not found: {}", dir.display());
            return HashMap::new();
        }

        let mut table = HashMap::new();
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if let Some(base) = name.strip_suffix(ICON_SUFFIX) {
                table.insert(
                    base.to_lowercase(),
                    entry.path().to_string_lossy().to_string(),
                );
            }
        }
        debug!("scan: {} icons from {}", table.len(), dir.display());
        table
    }

    /// Resolve an element name to an icon path.
    ///
    /// Loads the table on first use. Unknown names resolve to the fallback
    /// path with one warning per distinct key.
    pub fn resolve(&self, element: &str) -> String {
        self.ensure_loaded();
        let key = icon_key(element);

        let table = self.table.lock().unwrap();
        if let Some(path) = table.as_ref().and_then(|t| t.get(&key)) {
            return path.clone();
        }
        drop(table);

        let mut warned = self.warned.lock().unwrap();
        if warned.insert(key) {
            warn!("no icon for element {:?}, using fallback", element);
        }
        self.fallback.clone()
    }

    /// The configured fallback path.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Keys resolved to the fallback so far, sorted.
    pub fn missing(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.warned.lock().unwrap().iter().cloned().collect();
        keys.sort();
        keys
    }
}
