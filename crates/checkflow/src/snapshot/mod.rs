//! JSON snapshot codec.
//!
//! A snapshot is a single pretty-printed JSON document:
//!
//! ```json
//! {
//!   "nodes": [
//!     {
//!       "id": "node_0",
//!       "type": "custom",
//!       "position": { "x": 0.0, "y": 0.0 },
//!       "data": { "label": "Start", "checked": false, "details": "" }
//!     }
//!   ],
//!   "edges": [ { "id": "edge_node_0-node_1", "source": "node_0", "target": "node_1" } ],
//!   "viewport": { "x": 0.0, "y": 0.0, "zoom": 1.0 }
//! }
//! ```
//!
//! Node `data` only ever carries `label`, `checked` and `details`. The
//! derived disabled flag and any handler names are dropped on decode and
//! never written on encode.
//!
//! # Decoding Fallbacks
//!
//! | Missing or null    | Becomes            |
//! |--------------------|--------------------|
//! | `data.label`       | `""`               |
//! | `data.checked`     | `false`            |
//! | `data.details`     | `""`               |
//! | `type`             | `"custom"`         |
//! | `edges`            | no edges           |
//! | `viewport`         | `{0, 0, 1}`        |
//!
//! A document that fails to parse, lacks a `nodes` array, or contains an
//! edge without `source`/`target` is rejected as a whole.

pub mod file;

use crate::domain::{null_as_default, Edge, Node, Viewport};
use crate::error::{Result, SnapshotError};
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};

pub use file::{read_snapshot, write_snapshot_atomic, EXPORT_FILE_NAME};

/// Decoded snapshot contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Nodes in store order
    pub nodes: Vec<Node>,

    /// Edges as stored
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<Edge>,

    /// Canvas viewport
    #[serde(default, deserialize_with = "null_as_default")]
    pub viewport: Viewport,
}

/// Borrowed view of the graph used for encoding without cloning
#[derive(Serialize)]
struct SnapshotRef<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    viewport: &'a Viewport,
}

/// Encode the graph as pretty-printed JSON.
///
/// Output is deterministic: encoding the same graph twice yields identical text.
///
/// # Errors
///
/// Returns `SnapshotError::Serialization` if a node position or the viewport
/// holds a non-finite number. JSON has no NaN or infinity, and `serde_json`
/// would write `null`, which `decode` rejects.
pub fn encode(nodes: &[Node], edges: &[Edge], viewport: &Viewport) -> Result<String> {
    ensure_finite(nodes, viewport)?;
    let snapshot = SnapshotRef {
        nodes,
        edges,
        viewport,
    };
    let json = serde_json::to_string_pretty(&snapshot).map_err(SnapshotError::Serialization)?;
    Ok(json)
}

fn ensure_finite(nodes: &[Node], viewport: &Viewport) -> Result<()> {
    let bad_node = nodes
        .iter()
        .find(|node| !(node.position.x.is_finite() && node.position.y.is_finite()));
    let message = if let Some(node) = bad_node {
        format!(
            "node {} has a non-finite position ({}, {})",
            node.id, node.position.x, node.position.y
        )
    } else if [viewport.x, viewport.y, viewport.zoom]
        .iter()
        .any(|v| !v.is_finite())
    {
        format!(
            "viewport has a non-finite value ({}, {}) zoom {}",
            viewport.x, viewport.y, viewport.zoom
        )
    } else {
        return Ok(());
    };
    Err(SnapshotError::Serialization(serde_json::Error::custom(message)).into())
}

/// Decode a snapshot document, applying field fallbacks.
///
/// # Errors
///
/// Returns `SnapshotError::Malformed` if the text is not a valid snapshot.
pub fn decode(text: &str) -> Result<Snapshot> {
    let snapshot = serde_json::from_str(text).map_err(SnapshotError::Malformed)?;
    Ok(snapshot)
}
