//! Error types for checkflow operations.

use crate::domain::NodeId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for checkflow operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Snapshot encoding, decoding, or file transfer failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// No node with this id exists in the graph.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The node is locked because one of its ancestors is unchecked.
    #[error("Node {0} is disabled: an ancestor is still unchecked")]
    NodeDisabled(NodeId),
}

/// Errors raised while reading or writing snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid JSON or does not have the snapshot shape.
    #[error("Malformed snapshot: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The graph could not be serialized.
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Only `.json` files can be imported or exported.
    #[error("Unsupported snapshot file '{}': expected a .json file", .0.display())]
    UnsupportedFile(PathBuf),

    /// The snapshot file could not be read.
    #[error("Failed to read snapshot file '{}': {source}", path.display())]
    Read {
        /// File that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The snapshot file could not be written.
    #[error("Failed to write snapshot file '{}': {source}", path.display())]
    Write {
        /// File that failed to write
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Errors raised while locating or loading workspace configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.checkflow/` directory was found walking up from the working directory.
    #[error("Not a checkflow workspace (or any parent directory). Run 'checkflow init' first")]
    NotInitialized,

    /// `init` found an existing `.checkflow/` directory.
    #[error("Checkflow is already initialized in this directory. Found existing '{}'", .0.display())]
    AlreadyInitialized(PathBuf),

    /// The configuration file is not valid YAML or has the wrong shape.
    #[error("Configuration error: {0}")]
    Yaml(String),

    /// A configuration value failed validation.
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// A specialized Result type for checkflow operations.
pub type Result<T> = std::result::Result<T, Error>;
