//! Node-definition catalog: data model, provenance classification and loading

pub mod defs;
pub mod loader;
pub mod source;

pub use defs::{builtin_node_defs, InputDecl, InputGroups, NodeDefinition, Outputs, TypeDescriptor};
pub use loader::{load_catalog, CatalogError};
pub use source::NodeSource;
