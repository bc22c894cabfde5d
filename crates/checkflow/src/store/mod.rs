//! Graph store: the raw, user-edited state of a checklist graph.
//!
//! The store holds the node list, the edge list, the viewport and the node
//! id counter. It never stores whether a node is disabled; that is derived
//! by [`crate::engine`] and merged in by [`crate::view`].
//!
//! # Mutation Semantics
//!
//! - Field setters touch exactly one field of one node and have no side
//!   effects on other nodes.
//! - Edges are appended as given: duplicates and self-loops are accepted.
//! - [`GraphStore::restore`] swaps the whole graph at once and repositions
//!   the id counter past every restored `node_<n>` id.
//!
//! # Example
//!
//! ```
//! use checkflow::domain::Position;
//! use checkflow::store::GraphStore;
//!
//! let mut store = GraphStore::new();
//! let first = store.add_node(Some("Gather input".to_string()), Position::default()).id.clone();
//! let second = store.add_node(None, Position::new(0.0, 120.0)).id.clone();
//! store.connect(first.clone(), second.clone());
//! store.set_checked(&first, true)?;
//!
//! assert_eq!(store.nodes().len(), 2);
//! assert_eq!(store.node(&second).unwrap().data.label, "Node node_1");
//! # Ok::<(), checkflow::error::Error>(())
//! ```

pub mod id;

use crate::domain::{Edge, Node, NodeData, NodeId, Position, Viewport, DEFAULT_NODE_TYPE};
use crate::error::{Error, Result};
use id::NodeIdCounter;
use serde_json::Map;
use std::collections::HashSet;
use tracing::{debug, warn};

/// In-memory checklist graph
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    viewport: Viewport,
    ids: NodeIdCounter,
    node_type: String,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    /// Create an empty store that creates `custom` nodes
    pub fn new() -> Self {
        Self::with_node_type(DEFAULT_NODE_TYPE)
    }

    /// Create an empty store whose new nodes get the given renderer type
    pub fn with_node_type(node_type: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
            ids: NodeIdCounter::new(),
            node_type: node_type.into(),
        }
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Look up a node by id
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Suffix the next generated node id will use
    pub fn next_id_suffix(&self) -> u64 {
        self.ids.peek()
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|node| &node.id == id)
            .ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    /// Set the checked flag of one node.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if no node has this id.
    pub fn set_checked(&mut self, id: &NodeId, checked: bool) -> Result<()> {
        self.node_mut(id)?.data.checked = checked;
        debug!(node = %id, checked, "Updated checked flag");
        Ok(())
    }

    /// Replace the label of one node.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if no node has this id.
    pub fn set_label(&mut self, id: &NodeId, label: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.data.label = label.into();
        debug!(node = %id, "Updated label");
        Ok(())
    }

    /// Replace the details text of one node.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if no node has this id.
    pub fn set_details(&mut self, id: &NodeId, details: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.data.details = details.into();
        debug!(node = %id, "Updated details");
        Ok(())
    }

    /// Move a node to a new canvas position.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if no node has this id.
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> Result<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Create an unchecked node with a fresh `node_<n>` id.
    ///
    /// Without a label the node is labelled `Node <id>`.
    pub fn add_node(&mut self, label: Option<String>, position: Position) -> &Node {
        let id = self.ids.next_id();
        let label = label.unwrap_or_else(|| format!("Node {id}"));
        debug!(node = %id, "Added node");

        self.nodes.push(Node {
            id,
            node_type: self.node_type.clone(),
            position,
            data: NodeData {
                label,
                checked: false,
                details: String::new(),
            },
            extra: Map::new(),
        });
        &self.nodes[self.nodes.len() - 1]
    }

    /// Append an edge making `target` depend on `source`.
    ///
    /// Endpoints are not validated and existing edges are not deduplicated.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> &Edge {
        debug!(%source, %target, "Connected nodes");
        self.edges.push(Edge {
            id: Some(format!("edge_{source}-{target}")),
            source,
            target,
            extra: Map::new(),
        });
        &self.edges[self.edges.len() - 1]
    }

    /// Remove every edge from `source` to `target`, returning how many were removed.
    pub fn disconnect(&mut self, source: &NodeId, target: &NodeId) -> usize {
        let before = self.edges.len();
        self.edges
            .retain(|edge| !(&edge.source == source && &edge.target == target));
        let removed = before - self.edges.len();
        debug!(%source, %target, removed, "Disconnected nodes");
        removed
    }

    /// Delete nodes together with every edge touching them.
    ///
    /// Unknown ids are ignored. Returns the number of nodes removed.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        let doomed: HashSet<&NodeId> = ids.iter().collect();
        let before = self.nodes.len();
        self.nodes.retain(|node| !doomed.contains(&node.id));
        self.edges
            .retain(|edge| !doomed.contains(&edge.source) && !doomed.contains(&edge.target));
        let removed = before - self.nodes.len();
        debug!(removed, "Removed nodes");
        removed
    }

    /// Record a pan/zoom change from the renderer
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace the entire graph with restored state.
    ///
    /// Edges pointing at ids that are not among `nodes` are kept as they
    /// are and logged. The id counter moves one past the largest restored
    /// `node_<n>` suffix.
    pub fn restore(&mut self, nodes: Vec<Node>, edges: Vec<Edge>, viewport: Viewport) {
        let known: HashSet<&NodeId> = nodes.iter().map(|node| &node.id).collect();
        for edge in &edges {
            for endpoint in [&edge.source, &edge.target] {
                if !known.contains(endpoint) {
                    warn!(
                        source = %edge.source,
                        target = %edge.target,
                        missing = %endpoint,
                        "Restored edge references unknown node"
                    );
                }
            }
        }

        self.ids.advance_past(nodes.iter().map(|node| &node.id));
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            next_id = self.ids.peek(),
            "Restored graph state"
        );

        self.nodes = nodes;
        self.edges = edges;
        self.viewport = viewport;
    }
}
