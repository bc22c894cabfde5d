//! Editor session: the contract between the core and a renderer.
//!
//! The renderer receives [`ViewNode`]s and edges and reports user input back
//! as [`Action`]s. The editor applies each action to its [`GraphStore`] and
//! rebuilds the view whenever nodes or edges changed, so the view always
//! reflects the current disabled state.
//!
//! Import and export failures are reported twice: as an `Err` to the caller
//! and as a [`Notification`] meant to be shown to the user. A failed import
//! leaves the graph, viewport and selection exactly as they were.
//!
//! # Example
//!
//! ```
//! use checkflow::domain::Position;
//! use checkflow::editor::{Action, Editor};
//!
//! let mut editor = Editor::default();
//! editor.dispatch(Action::AddNode { label: Some("Plan".into()), position: Position::default() })?;
//! editor.dispatch(Action::AddNode { label: Some("Build".into()), position: Position::default() })?;
//! editor.dispatch(Action::Connect { source: "node_0".into(), target: "node_1".into() })?;
//!
//! assert!(editor.view_node(&"node_1".into()).unwrap().is_disabled());
//!
//! editor.dispatch(Action::CheckChange { id: "node_0".into(), checked: true })?;
//! assert!(!editor.view_node(&"node_1".into()).unwrap().is_disabled());
//! # Ok::<(), checkflow::error::Error>(())
//! ```

use crate::domain::{Edge, NodeId, Position, Viewport};
use crate::error::{Error, Result, SnapshotError};
use crate::snapshot::{self, Snapshot};
use crate::store::GraphStore;
use crate::view::{build_view, ViewNode};
use std::path::Path;
use tracing::{debug, error, info};

/// User input reported by the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Checkbox toggled on a node
    CheckChange {
        /// Target node
        id: NodeId,
        /// New checked state
        checked: bool,
    },

    /// Label text edited on a node
    LabelChange {
        /// Target node
        id: NodeId,
        /// New label
        label: String,
    },

    /// Details edited in the detail panel
    DetailsChange {
        /// Target node
        id: NodeId,
        /// New details text
        details: String,
    },

    /// "Add node" pressed
    AddNode {
        /// Label, or `None` for the generated default
        label: Option<String>,
        /// Where the node should appear
        position: Position,
    },

    /// Connection dragged from `source` to `target`
    Connect {
        /// Prerequisite node
        source: NodeId,
        /// Dependent node
        target: NodeId,
    },

    /// Connection deleted
    Disconnect {
        /// Prerequisite node
        source: NodeId,
        /// Dependent node
        target: NodeId,
    },

    /// Nodes deleted on the canvas
    RemoveNodes(Vec<NodeId>),

    /// Node dragged to a new position
    MoveNode {
        /// Target node
        id: NodeId,
        /// New position
        position: Position,
    },

    /// Node clicked
    SelectNode(NodeId),

    /// Background clicked
    ClearSelection,

    /// Canvas panned or zoomed
    SetViewport(Viewport),
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Operation completed
    Info,
    /// Operation failed; state was left unchanged
    Error,
}

/// A message the renderer should surface to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Human-readable text
    pub message: String,
}

impl Notification {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Message shown after a successful import
pub const RESTORED_MESSAGE: &str = "Graph state restored.";

/// Message shown when an import file cannot be parsed
pub const PARSE_FAILED_MESSAGE: &str = "Failed to read or parse the file.";

/// Message shown when an import file cannot be read
pub const READ_FAILED_MESSAGE: &str = "Failed to read the file.";

/// An editing session over one graph
#[derive(Debug)]
pub struct Editor {
    store: GraphStore,
    view: Vec<ViewNode>,
    selected: Option<NodeId>,
    notifications: Vec<Notification>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(GraphStore::new())
    }
}

impl Editor {
    /// Start a session over an existing store
    pub fn new(store: GraphStore) -> Self {
        let mut editor = Self {
            store,
            view: Vec::new(),
            selected: None,
            notifications: Vec::new(),
        };
        editor.refresh();
        editor
    }

    /// The underlying store
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// View nodes in store order
    pub fn view_nodes(&self) -> &[ViewNode] {
        &self.view
    }

    /// Edges as handed to the renderer
    pub fn edges(&self) -> &[Edge] {
        self.store.edges()
    }

    /// Look up one view node
    pub fn view_node(&self, id: &NodeId) -> Option<&ViewNode> {
        self.view.iter().find(|node| &node.id == id)
    }

    /// The selected node, as shown in the detail panel
    pub fn selected_node(&self) -> Option<&ViewNode> {
        self.selected.as_ref().and_then(|id| self.view_node(id))
    }

    /// Pending notifications, oldest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn refresh(&mut self) {
        self.view = build_view(self.store.nodes(), self.store.edges());
    }

    fn require_node(&self, id: &NodeId) -> Result<&ViewNode> {
        self.view_node(id)
            .ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    /// Apply one renderer action.
    ///
    /// # Errors
    ///
    /// - `Error::NodeNotFound` if the action names an unknown node
    ///   (except `RemoveNodes`, which ignores unknown ids)
    /// - `Error::NodeDisabled` for a `CheckChange` on a disabled node
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!(?action, "Dispatching action");
        match action {
            Action::CheckChange { id, checked } => {
                if self.require_node(&id)?.is_disabled() {
                    return Err(Error::NodeDisabled(id));
                }
                self.store.set_checked(&id, checked)?;
            }
            Action::LabelChange { id, label } => self.store.set_label(&id, label)?,
            Action::DetailsChange { id, details } => self.store.set_details(&id, details)?,
            Action::AddNode { label, position } => {
                self.store.add_node(label, position);
            }
            Action::Connect { source, target } => {
                self.store.connect(source, target);
            }
            Action::Disconnect { source, target } => {
                self.store.disconnect(&source, &target);
            }
            Action::RemoveNodes(ids) => {
                self.store.remove_nodes(&ids);
                if self.selected.as_ref().is_some_and(|sel| ids.contains(sel)) {
                    self.selected = None;
                }
            }
            Action::MoveNode { id, position } => self.store.move_node(&id, position)?,
            Action::SelectNode(id) => {
                self.require_node(&id)?;
                self.selected = Some(id);
                return Ok(());
            }
            Action::ClearSelection => {
                self.selected = None;
                return Ok(());
            }
            Action::SetViewport(viewport) => {
                self.store.set_viewport(viewport);
                return Ok(());
            }
        }

        self.refresh();
        Ok(())
    }

    /// Encode the current graph as a snapshot document.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Serialization` if encoding fails.
    pub fn export(&self) -> Result<String> {
        snapshot::encode(
            self.store.nodes(),
            self.store.edges(),
            &self.store.viewport(),
        )
    }

    /// Export the current graph to a `.json` file.
    ///
    /// # Errors
    ///
    /// Fails if encoding or the atomic write fails; an error notification is
    /// queued as well.
    pub async fn export_to(&mut self, path: &Path) -> Result<()> {
        let result = match self.export() {
            Ok(document) => snapshot::write_snapshot_atomic(path, &document).await,
            Err(e) => Err(e),
        };
        match &result {
            Ok(()) => info!(path = %path.display(), "Exported graph state"),
            Err(e) => {
                error!(error = %e, "Failed to export graph state");
                self.notifications
                    .push(Notification::error(format!("Failed to save the file: {e}")));
            }
        }
        result
    }

    /// Replace the graph with a decoded snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.store
            .restore(snapshot.nodes, snapshot.edges, snapshot.viewport);
        self.selected = None;
        self.refresh();
    }

    /// Decode `text` and replace the graph with it.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Malformed` and queues an error notification
    /// if the text is not a valid snapshot; the graph is left untouched.
    pub fn import_str(&mut self, text: &str) -> Result<()> {
        match snapshot::decode(text) {
            Ok(decoded) => {
                info!(nodes = decoded.nodes.len(), "Imported graph state");
                self.restore(decoded);
                self.notifications.push(Notification::info(RESTORED_MESSAGE));
                Ok(())
            }
            Err(e) => {
                self.report_import_failure(&e);
                Err(e)
            }
        }
    }

    /// Read a `.json` snapshot file and replace the graph with it.
    ///
    /// # Errors
    ///
    /// Fails on unsupported extensions, read errors and malformed content.
    /// In every case the graph is left untouched and an error notification
    /// is queued.
    pub async fn import_file(&mut self, path: &Path) -> Result<()> {
        match snapshot::read_snapshot(path).await {
            Ok(decoded) => {
                info!(
                    path = %path.display(),
                    nodes = decoded.nodes.len(),
                    "Imported graph state"
                );
                self.restore(decoded);
                self.notifications.push(Notification::info(RESTORED_MESSAGE));
                Ok(())
            }
            Err(e) => {
                self.report_import_failure(&e);
                Err(e)
            }
        }
    }

    fn report_import_failure(&mut self, e: &Error) {
        error!(error = %e, "Failed to import graph state");
        let message = match e {
            Error::Snapshot(SnapshotError::Read { .. }) => READ_FAILED_MESSAGE.to_string(),
            Error::Snapshot(SnapshotError::UnsupportedFile(_)) => e.to_string(),
            _ => PARSE_FAILED_MESSAGE.to_string(),
        };
        self.notifications.push(Notification::error(message));
    }
}
