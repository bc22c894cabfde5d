//! Domain types for checklist graphs.
//!
//! These types mirror the JSON shape a node-graph renderer works with:
//! nodes carry an opaque position and a `data` payload, edges are
//! `source -> target` pairs where the target depends on the source.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Node type assigned when a snapshot omits it.
pub const DEFAULT_NODE_TYPE: &str = "custom";

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Canvas coordinate of a node. Owned by the renderer; the core only stores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Create a position from its coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// User-editable payload of a node.
///
/// `checked` is set by the user. Whether the node is disabled is derived
/// from its ancestors and never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    /// Text shown on the node
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,

    /// Whether the checklist item is ticked
    #[serde(default, deserialize_with = "null_as_default")]
    pub checked: bool,

    /// Free-form notes shown in the detail panel
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
}

/// A checklist item placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Renderer node type
    #[serde(
        rename = "type",
        default = "default_node_type",
        deserialize_with = "node_type_or_default"
    )]
    pub node_type: String,

    /// Canvas position
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: Position,

    /// Label, checked flag and details
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: NodeData,

    /// Renderer fields the core does not interpret (size, selection flags, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// Create an unchecked node with empty details
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            node_type: DEFAULT_NODE_TYPE.to_string(),
            position,
            data: NodeData {
                label: label.into(),
                checked: false,
                details: String::new(),
            },
            extra: Map::new(),
        }
    }

    /// Builder-style helper setting the checked flag
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.data.checked = checked;
        self
    }
}

/// Directed dependency: `target` depends on `source`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Renderer edge id, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Node that must be checked first
    pub source: NodeId,

    /// Node that depends on `source`
    pub target: NodeId,

    /// Renderer fields the core does not interpret (handles, styling, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    /// Create an edge without an id
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            extra: Map::new(),
        }
    }
}

/// Pan offset and zoom level of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Horizontal pan offset
    pub x: f64,
    /// Vertical pan offset
    pub y: f64,
    /// Zoom factor
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

fn default_node_type() -> String {
    DEFAULT_NODE_TYPE.to_string()
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn node_type_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|t| !t.is_empty())
        .unwrap_or_else(default_node_type))
}
