//! Catalog loading
//!
//! Reads node definitions from a JSON file (an array of definitions, or a
//! map keyed by node name), merges the builtin synthetic definitions ahead
//! of them, and reports data-integrity anomalies without failing the load.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::catalog::defs::{builtin_node_defs, NodeDefinition};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Accepted on-disk shapes for a catalog file
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<NodeDefinition>),
    ByName(BTreeMap<String, NodeDefinition>),
}

impl CatalogFile {
    fn into_defs(self) -> Vec<NodeDefinition> {
        match self {
            CatalogFile::List(defs) => defs,
            CatalogFile::ByName(map) => map
                .into_iter()
                .map(|(key, def)| {
                    // The name field wins; a disagreeing key is a
                    // data-integrity anomaly worth surfacing.
                    if key != def.name {
                        warn!(
                            key = %key,
                            name = %def.name,
                            "Catalog map key disagrees with entry name"
                        );
                    }
                    def
                })
                .collect(),
        }
    }
}

/// Load a catalog from a JSON file, builtins merged in first
pub fn load_catalog(path: &Path) -> Result<Vec<NodeDefinition>, CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&raw)?;
    let loaded = file.into_defs();
    if loaded.is_empty() {
        warn!(path = %path.display(), "Catalog file contains no definitions");
    }

    Ok(merge_builtins(loaded))
}

/// Prepend builtin definitions and drop duplicate names, keeping the first
/// occurrence. Integrity anomalies are logged, never fatal.
pub fn merge_builtins(loaded: Vec<NodeDefinition>) -> Vec<NodeDefinition> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut defs = Vec::with_capacity(loaded.len() + 3);

    for def in builtin_node_defs().into_iter().chain(loaded) {
        if !seen.insert(def.name.clone()) {
            warn!(name = %def.name, "Duplicate node definition dropped");
            continue;
        }
        if !def.outputs_are_consistent() {
            // The offending entry stays searchable; the OutputType filter
            // fails soft on it separately.
            warn!(
                name = %def.name,
                "Node definition has inconsistent output declarations"
            );
        }
        defs.push(def);
    }

    defs
}
