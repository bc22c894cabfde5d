//! Ancestor-based disablement.
//!
//! A node is **disabled** while at least one of its ancestors is unchecked.
//! Ancestors are found by walking edges backwards: the parents of `X` are the
//! sources of every edge whose target is `X`, and so on transitively.
//!
//! # Edge Direction
//!
//! Edges point from **prerequisite -> dependent** (`source -> target`), so:
//!
//! - `Direction::Incoming` from a node yields its parents
//! - `Direction::Outgoing` from a node yields the nodes that depend on it
//!
//! # Cycles and Dangling Edges
//!
//! Every traversal tracks the nodes it has already expanded, so cycles and
//! self-loops terminate. A parent's checked flag is read before that guard,
//! which makes a node on a cycle its own ancestor: with `A -> B -> A` and `A`
//! unchecked, both `A` and `B` are disabled.
//!
//! An edge whose source is not in the node set cannot block anything. It is
//! logged with `warn!` and skipped; the remaining parents are still evaluated.
//! An edge whose target is missing has no effect on any existing node.
//!
//! Both entry points are pure functions of the slices they receive.

use crate::domain::{Edge, Node, NodeId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Borrowed dependency graph built from a node/edge snapshot.
struct DependencyGraph<'a> {
    /// Nodes are the store's nodes, edges run prerequisite -> dependent.
    graph: DiGraph<&'a Node, ()>,

    /// First node index for each id.
    node_map: HashMap<&'a NodeId, NodeIndex>,

    /// Edge sources with no node record, keyed by the target they point at.
    missing_parents: HashMap<NodeIndex, Vec<&'a NodeId>>,
}

impl<'a> DependencyGraph<'a> {
    fn build(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_map = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let index = graph.add_node(node);
            node_map.entry(&node.id).or_insert(index);
        }

        let mut missing_parents: HashMap<NodeIndex, Vec<&'a NodeId>> = HashMap::new();
        for edge in edges {
            let Some(&target) = node_map.get(&edge.target) else {
                debug!(source = %edge.source, target = %edge.target, "Ignoring edge to unknown node");
                continue;
            };
            match node_map.get(&edge.source) {
                Some(&source) => {
                    graph.add_edge(source, target, ());
                }
                None => missing_parents.entry(target).or_default().push(&edge.source),
            }
        }

        Self {
            graph,
            node_map,
            missing_parents,
        }
    }

    fn warn_missing_parents(&self, index: NodeIndex) {
        if let Some(parents) = self.missing_parents.get(&index) {
            let node_id = &self.graph[index].id;
            for parent_id in parents {
                warn!(parent = %parent_id, node = %node_id, "Parent node not found");
            }
        }
    }

    fn is_unchecked(&self, index: NodeIndex) -> bool {
        !self.graph[index].data.checked
    }
}

/// Determine whether a single node is disabled.
///
/// Walks the ancestors of `node_id` breadth-first and stops at the first
/// unchecked one. Returns `false` for nodes without incoming edges and for
/// ids that are not in `nodes`.
///
/// # Example
///
/// ```
/// use checkflow::domain::{Edge, Node, Position};
/// use checkflow::engine::is_disabled;
///
/// let nodes = vec![
///     Node::new("a", "Prepare", Position::default()),
///     Node::new("b", "Ship", Position::default()).with_checked(true),
/// ];
/// let edges = vec![Edge::new("a", "b")];
///
/// assert!(is_disabled(&"b".into(), &nodes, &edges));
/// assert!(!is_disabled(&"a".into(), &nodes, &edges));
/// ```
pub fn is_disabled(node_id: &NodeId, nodes: &[Node], edges: &[Edge]) -> bool {
    let deps = DependencyGraph::build(nodes, edges);
    let Some(&start) = deps.node_map.get(node_id) else {
        return false;
    };

    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        deps.warn_missing_parents(current);

        for parent in deps.graph.neighbors_directed(current, Direction::Incoming) {
            if deps.is_unchecked(parent) {
                return true;
            }
            // Already expanded: its ancestors are queued or done
            if visited.insert(parent) {
                queue.push_back(parent);
            }
        }
    }

    false
}

/// Compute the set of disabled node ids for the whole graph.
///
/// Instead of walking up from every node, this sweeps forward from every
/// unchecked node: anything reachable through at least one edge has an
/// unchecked ancestor. Each node and edge is visited at most once, so a full
/// recompute is O(V + E).
///
/// The result always agrees with [`is_disabled`] evaluated per node.
pub fn disabled_nodes(nodes: &[Node], edges: &[Edge]) -> HashSet<NodeId> {
    let deps = DependencyGraph::build(nodes, edges);

    for &target in deps.missing_parents.keys() {
        deps.warn_missing_parents(target);
    }

    let mut disabled = HashSet::new();
    let mut expanded = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = deps
        .graph
        .node_indices()
        .filter(|&index| deps.is_unchecked(index))
        .collect();

    while let Some(current) = queue.pop_front() {
        if !expanded.insert(current) {
            continue;
        }
        for child in deps.graph.neighbors_directed(current, Direction::Outgoing) {
            disabled.insert(deps.graph[child].id.clone());
            if !expanded.contains(&child) {
                queue.push_back(child);
            }
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        disabled = disabled.len(),
        "Recomputed disabled nodes"
    );

    disabled
}
