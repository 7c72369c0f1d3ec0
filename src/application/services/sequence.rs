//! Step sequence ingestion
//!
//! Loads ordered step sequences from plain step logs (one "A + B = C" per
//! line) and from search-service JSON payloads, single outcome or multi-path
//! batch.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::application::error_ext::IoResultExt;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Step;
use crate::infrastructure::traits::FileSystem;

/// One search result normalized from a JSON payload.
///
/// Plain step logs and single-outcome payloads carry no metadata; batch
/// records may carry the search runtime and visited-node count alongside
/// their step list.
#[derive(Debug, Clone)]
pub struct SearchRecord {
    /// Raw step lines, in discovery order
    pub steps: Vec<String>,
    /// Runtime as reported by the search service, opaque
    pub runtime: Option<String>,
    /// Number of nodes the search visited
    pub nodes_visited: Option<u64>,
}

impl SearchRecord {
    /// Parse this record's raw lines into steps, numbering from 1.
    pub fn parse_steps(&self) -> ApplicationResult<Vec<Step>> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                Step::parse(raw).map_err(|e| ApplicationError::Sequence {
                    line: i + 1,
                    source: e,
                })
            })
            .collect()
    }
}

/// Single search outcome: `{"found": bool, "steps": [...]}`.
#[derive(Debug, Deserialize)]
struct SearchOutcome {
    found: bool,
    steps: Vec<String>,
}

/// Service for loading step sequences from files and payloads.
pub struct SequenceService {
    fs: Arc<dyn FileSystem>,
}

impl SequenceService {
    /// Create a new sequence service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load a plain step log, one step per line.
    pub fn load_plain(&self, path: &Path) -> ApplicationResult<Vec<Step>> {
        debug!("load_plain: path={}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read step log", path)?;
        Self::parse_lines(&content)
    }

    /// Load search records from a JSON payload file.
    pub fn load_records(&self, path: &Path) -> ApplicationResult<Vec<SearchRecord>> {
        debug!("load_records: path={}", path.display());
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read search payload", path)?;
        Self::parse_payload(&content)
    }

    /// Parse plain step-log text.
    ///
    /// Blank lines are skipped; any other malformed line aborts the whole
    /// load with its 1-based line number. A partial sequence would
    /// misrepresent the derivation, so there is no skip-and-continue mode.
    pub fn parse_lines(content: &str) -> ApplicationResult<Vec<Step>> {
        let mut steps = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let step = Step::parse(line).map_err(|e| ApplicationError::Sequence {
                line: number + 1,
                source: e,
            })?;
            steps.push(step);
        }
        debug!("parse_lines: {} steps", steps.len());
        Ok(steps)
    }

    /// Parse a search-service JSON payload into records.
    ///
    /// Accepts either a single outcome object (`{"found": .., "steps": ..}`)
    /// or a batch array of records, each carrying one `PathN` key with the
    /// step list plus optional `Runtime` and `NodesVisited` metadata.
    pub fn parse_payload(content: &str) -> ApplicationResult<Vec<SearchRecord>> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ApplicationError::Payload {
                message: e.to_string(),
            })?;

        match value {
            Value::Object(_) => Ok(vec![Self::parse_outcome(value)?]),
            Value::Array(records) => {
                let mut out = Vec::with_capacity(records.len());
                for (i, record) in records.into_iter().enumerate() {
                    out.push(Self::parse_record(record, i + 1)?);
                }
                debug!("parse_payload: {} batch records", out.len());
                Ok(out)
            }
            _ => Err(ApplicationError::Payload {
                message: "expected an object or an array at top level".to_string(),
            }),
        }
    }

    fn parse_outcome(value: Value) -> ApplicationResult<SearchRecord> {
        let outcome: SearchOutcome =
            serde_json::from_value(value).map_err(|e| ApplicationError::Payload {
                message: e.to_string(),
            })?;
        if !outcome.found {
            return Err(ApplicationError::NoPathFound);
        }
        if outcome.steps.is_empty() {
            return Err(ApplicationError::EmptyPayload);
        }
        Ok(SearchRecord {
            steps: outcome.steps,
            runtime: None,
            nodes_visited: None,
        })
    }

    fn parse_record(value: Value, number: usize) -> ApplicationResult<SearchRecord> {
        let Value::Object(map) = value else {
            return Err(ApplicationError::Payload {
                message: format!("record {} is not an object", number),
            });
        };

        let steps_key = map
            .keys()
            .find(|k| k.starts_with("Path"))
            .cloned()
            .ok_or_else(|| ApplicationError::Payload {
                message: format!("record {} has no Path key", number),
            })?;

        let steps = string_array(&map[&steps_key]).ok_or_else(|| ApplicationError::Payload {
            message: format!("record {}: {} is not a string array", number, steps_key),
        })?;

        // Metadata arrives as singleton string arrays; tolerate absence and
        // unparseable values the way the original consumer did.
        let runtime = map
            .get("Runtime")
            .and_then(|v| string_array(v))
            .and_then(|v| v.into_iter().next());
        let nodes_visited = map
            .get("NodesVisited")
            .and_then(|v| string_array(v))
            .and_then(|v| v.into_iter().next())
            .and_then(|s| s.parse::<u64>().ok());

        Ok(SearchRecord {
            steps,
            runtime,
            nodes_visited,
        })
    }
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    items
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}
