//! Sequential node ID generation.
//!
//! Node ids have the form `node_<n>` where `n` comes from a counter owned by
//! the [`GraphStore`](super::GraphStore). The counter only moves forward
//! while the graph is edited; a snapshot restore repositions it one past the
//! largest suffix among the restored ids so new nodes never collide with
//! them.
//!
//! # Example
//!
//! ```
//! use checkflow::domain::NodeId;
//! use checkflow::store::id::NodeIdCounter;
//!
//! let mut ids = NodeIdCounter::new();
//! assert_eq!(ids.next_id().as_str(), "node_0");
//!
//! let restored = [NodeId::from("node_5"), NodeId::from("intro")];
//! ids.advance_past(restored.iter());
//! assert_eq!(ids.next_id().as_str(), "node_6");
//! ```

use crate::domain::NodeId;

/// Prefix of every generated node id
pub const NODE_ID_PREFIX: &str = "node_";

/// Monotonic counter producing `node_<n>` identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIdCounter {
    next: u64,
}

impl NodeIdCounter {
    /// Create a counter starting at `node_0`
    pub fn new() -> Self {
        Self::default()
    }

    /// The suffix the next generated id will use
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Produce the next id and advance the counter
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(format!("{NODE_ID_PREFIX}{}", self.next));
        self.next = self.next.saturating_add(1);
        id
    }

    /// Reposition the counter after a restore.
    ///
    /// Sets the counter to one past the largest numeric suffix found among
    /// `ids`, or back to zero when none of them is a generated id.
    pub fn advance_past<'a>(&mut self, ids: impl Iterator<Item = &'a NodeId>) {
        self.next = ids
            .filter_map(parse_suffix)
            .max()
            .map_or(0, |max| max.saturating_add(1));
    }
}

/// Extract `n` from an id of the exact form `node_<digits>`.
pub fn parse_suffix(id: &NodeId) -> Option<u64> {
    let digits = id.as_str().strip_prefix(NODE_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
