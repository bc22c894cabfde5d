//! Presentation adapter.
//!
//! Merges the engine's disabled set into per-node view data for the
//! renderer and the detail panel. View nodes are rebuilt from scratch after
//! every graph change and are never persisted.

use crate::domain::{Edge, Node, NodeId, Position};
use crate::engine;
use serde::Serialize;

/// Node data as the renderer sees it, including the derived lock state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewNodeData {
    /// Text shown on the node
    pub label: String,
    /// Whether the item is ticked
    pub checked: bool,
    /// Detail panel notes
    pub details: String,
    /// Whether an ancestor is unchecked
    pub is_disabled: bool,
}

/// A store node plus its computed `is_disabled` flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    /// Node id
    pub id: NodeId,
    /// Renderer node type
    #[serde(rename = "type")]
    pub node_type: String,
    /// Canvas position
    pub position: Position,
    /// Payload with the derived flag
    pub data: ViewNodeData,
}

impl ViewNode {
    fn from_node(node: &Node, is_disabled: bool) -> Self {
        Self {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            position: node.position,
            data: ViewNodeData {
                label: node.data.label.clone(),
                checked: node.data.checked,
                details: node.data.details.clone(),
                is_disabled,
            },
        }
    }

    /// Shorthand for `data.is_disabled`
    pub fn is_disabled(&self) -> bool {
        self.data.is_disabled
    }
}

/// Build one view node per store node, preserving order.
pub fn build_view(nodes: &[Node], edges: &[Edge]) -> Vec<ViewNode> {
    let disabled = engine::disabled_nodes(nodes, edges);
    nodes
        .iter()
        .map(|node| ViewNode::from_node(node, disabled.contains(&node.id)))
        .collect()
}
