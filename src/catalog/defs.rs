//! Node definition data model
//!
//! A catalog is an ordered sequence of `NodeDefinition` records. It is
//! read-only for the lifetime of one search service instance; reflecting a
//! changed catalog means constructing a fresh service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type tag used for inputs declared as an inline choice list
pub const COMBO_TYPE: &str = "COMBO";

/// A type descriptor on an input declaration: either a plain type tag or an
/// inline list of enumerated choices (a widget-backed combo input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDescriptor {
    Tag(String),
    Choices(Vec<serde_json::Value>),
}

impl TypeDescriptor {
    /// The type tag; inline choice lists normalize to `"COMBO"`.
    pub fn tag(&self) -> &str {
        match self {
            TypeDescriptor::Tag(tag) => tag,
            TypeDescriptor::Choices(_) => COMBO_TYPE,
        }
    }
}

/// One declared input parameter: `[descriptor, spec]` on the wire, with the
/// spec object optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputDecl {
    WithSpec(TypeDescriptor, serde_json::Value),
    Bare((TypeDescriptor,)),
}

impl InputDecl {
    pub fn descriptor(&self) -> &TypeDescriptor {
        match self {
            InputDecl::WithSpec(descriptor, _) => descriptor,
            InputDecl::Bare((descriptor,)) => descriptor,
        }
    }
}

/// Declared inputs, split into required and optional groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputGroups {
    #[serde(default)]
    pub required: BTreeMap<String, InputDecl>,
    #[serde(default)]
    pub optional: BTreeMap<String, InputDecl>,
}

impl InputGroups {
    /// Iterate every declared input, required then optional
    pub fn iter_all(&self) -> impl Iterator<Item = (&String, &InputDecl)> {
        self.required.iter().chain(self.optional.iter())
    }
}

/// One output slot: a plain type tag, or a one-element tuple whose first
/// element is the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputDescriptor {
    Tag(String),
    Tuple(Vec<serde_json::Value>),
}

impl OutputDescriptor {
    /// The output's type tag, if the descriptor is well formed
    pub fn tag(&self) -> Option<&str> {
        match self {
            OutputDescriptor::Tag(tag) => Some(tag),
            OutputDescriptor::Tuple(values) => values.first().and_then(|v| v.as_str()),
        }
    }
}

/// Declared outputs. Some catalog sources ship a non-sequence `outputs`
/// field; `Malformed` captures that value so one bad entry never fails
/// deserialization of the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outputs {
    List(Vec<OutputDescriptor>),
    Malformed(serde_json::Value),
}

impl Default for Outputs {
    fn default() -> Self {
        Outputs::List(Vec::new())
    }
}

impl Outputs {
    /// The output list, or `None` when the field was malformed
    pub fn as_list(&self) -> Option<&[OutputDescriptor]> {
        match self {
            Outputs::List(list) => Some(list),
            Outputs::Malformed(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_list().map_or(0, <[OutputDescriptor]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single catalog record
///
/// `name` is the unique key within one catalog load. `output_names` and
/// `output_is_list` run parallel to `outputs`; a length mismatch is a
/// data-integrity problem of the external source and only draws a warning
/// from the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inputs: InputGroups,
    #[serde(default)]
    pub outputs: Outputs,
    #[serde(default)]
    pub output_names: Vec<String>,
    #[serde(default)]
    pub output_is_list: Vec<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_module: Option<String>,
}

impl NodeDefinition {
    /// Check the parallel-sequence invariant on outputs
    pub fn outputs_are_consistent(&self) -> bool {
        match self.outputs.as_list() {
            Some(list) => {
                list.len() == self.output_names.len() && list.len() == self.output_is_list.len()
            }
            None => false,
        }
    }
}

fn builtin(
    name: &str,
    display_name: &str,
    description: &str,
    inputs: InputGroups,
    outputs: Vec<OutputDescriptor>,
    output_names: Vec<&str>,
    output_is_list: Vec<bool>,
) -> NodeDefinition {
    NodeDefinition {
        name: name.to_string(),
        display_name: display_name.to_string(),
        category: "utils".to_string(),
        description: description.to_string(),
        inputs,
        outputs: Outputs::List(outputs),
        output_names: output_names.into_iter().map(String::from).collect(),
        output_is_list,
        source_module: Some("nodes".to_string()),
    }
}

/// Synthetic built-in definitions every catalog presents to users.
///
/// These are merged ahead of the file-supplied entries by the loader; the
/// search core never generates them itself.
pub fn builtin_node_defs() -> Vec<NodeDefinition> {
    let reroute_inputs = InputGroups {
        required: [(
            String::new(),
            InputDecl::Bare((TypeDescriptor::Tag("*".to_string()),)),
        )]
        .into_iter()
        .collect(),
        optional: BTreeMap::new(),
    };

    vec![
        builtin(
            "PrimitiveNode",
            "Primitive",
            "Primitive values like numbers, strings, and booleans.",
            InputGroups::default(),
            vec![OutputDescriptor::Tag("*".to_string())],
            vec!["connect to widget input"],
            vec![false],
        ),
        builtin(
            "Reroute",
            "Reroute",
            "Reroute the connection to another node.",
            reroute_inputs,
            vec![OutputDescriptor::Tag("*".to_string())],
            vec![""],
            vec![false],
        ),
        builtin(
            "Note",
            "Note",
            "Node that adds notes to your project.",
            InputGroups::default(),
            vec![],
            vec![],
            vec![],
        ),
    ]
}
