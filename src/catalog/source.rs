//! Provenance classification for node definitions
//!
//! Maps a definition's `source_module` to a human-readable source label.
//! The Source filter extracts these labels, so the mapping has to be stable
//! for the lifetime of a catalog load.

use std::fmt;

/// Where a node definition came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSource {
    /// Shipped with the host application
    Core,
    /// Provided by an installed extension pack
    Custom(String),
    /// Module string present but unrecognized
    Unknown,
}

impl NodeSource {
    /// Classify a raw `source_module` string
    pub fn classify(module: &str) -> Self {
        if module == "nodes" || module.starts_with("extras") {
            NodeSource::Core
        } else if let Some(rest) = module.strip_prefix("custom_nodes.") {
            if rest.is_empty() {
                NodeSource::Unknown
            } else {
                NodeSource::Custom(rest.to_string())
            }
        } else {
            NodeSource::Unknown
        }
    }

    /// Human-readable label shown in filter options
    pub fn display_text(&self) -> String {
        match self {
            NodeSource::Core => "Core".to_string(),
            NodeSource::Custom(pack) => pack.clone(),
            NodeSource::Unknown => "Unknown".to_string(),
        }
    }
}

impl fmt::Display for NodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}
