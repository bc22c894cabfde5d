//! Implementation of the `init` command.
//!
//! This module handles initialization of a new checkflow workspace, creating
//! the `.checkflow/` directory with configuration and an empty graph.

use crate::domain::DEFAULT_NODE_TYPE;
use crate::error::{ConfigError, Result};
use crate::snapshot::{self, EXPORT_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the checkflow directory
pub const CHECKFLOW_DIR_NAME: &str = ".checkflow";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the working graph state file
pub const STATE_FILE_NAME: &str = "flow-state.json";

/// Maximum length of a node type name
pub const MAX_NODE_TYPE_LENGTH: usize = 32;

/// Maximum directory depth to traverse when searching for the workspace root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for checkflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckflowConfig {
    /// Renderer type assigned to new nodes
    #[serde(rename = "node-type")]
    pub node_type: String,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Default file name for `export`
    #[serde(rename = "export-file", default = "default_export_file")]
    pub export_file: String,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Snapshot file holding the working graph, relative to the workspace root
    #[serde(rename = "state-file")]
    pub state_file: String,
}

fn default_export_file() -> String {
    EXPORT_FILE_NAME.to_string()
}

impl CheckflowConfig {
    /// Create a new configuration with the given node type
    pub fn new(node_type: &str) -> Self {
        Self {
            node_type: node_type.to_string(),
            storage: StorageConfig {
                state_file: format!("{CHECKFLOW_DIR_NAME}/{STATE_FILE_NAME}"),
            },
            export_file: default_export_file(),
        }
    }

    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        validate_node_type(&config.node_type)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Yaml(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Absolute path of the state file for a workspace rooted at `root_dir`
    pub fn state_path(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.storage.state_file)
    }
}

impl Default for CheckflowConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_TYPE)
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created checkflow directory
    pub checkflow_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created state file
    pub state_file: PathBuf,
    /// Node type written to the config
    pub node_type: String,
}

/// Validate a node type name.
///
/// Requirements:
/// - 1-32 characters
/// - ASCII letters, digits, `-` and `_` only
///
/// Note: Expects pre-trimmed input.
pub fn validate_node_type(node_type: &str) -> Result<()> {
    if node_type.is_empty() {
        return Err(ConfigError::Invalid("Node type cannot be empty".to_string()).into());
    }

    if node_type.len() > MAX_NODE_TYPE_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "Node type cannot exceed {MAX_NODE_TYPE_LENGTH} characters"
        ))
        .into());
    }

    if !node_type
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Invalid(
            "Node type must contain only alphanumeric characters, '-' or '_'".to_string(),
        )
        .into());
    }

    Ok(())
}

/// Initialize a new checkflow workspace in the given directory.
///
/// # Errors
///
/// Returns an error if:
/// - The `.checkflow/` directory already exists
/// - The node type is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, node_type: Option<&str>) -> Result<InitResult> {
    let node_type = node_type.unwrap_or(DEFAULT_NODE_TYPE).trim();
    validate_node_type(node_type)?;

    let checkflow_dir = base_dir.join(CHECKFLOW_DIR_NAME);
    if is_initialized(base_dir) {
        return Err(ConfigError::AlreadyInitialized(checkflow_dir).into());
    }

    fs::create_dir_all(&checkflow_dir).await?;

    let config_file = checkflow_dir.join(CONFIG_FILE_NAME);
    let config = CheckflowConfig::new(node_type);
    config.save(&config_file).await?;

    // Start from an empty graph with the default viewport
    let state_file = config.state_path(base_dir);
    let empty = snapshot::encode(&[], &[], &Default::default())?;
    snapshot::write_snapshot_atomic(&state_file, &empty).await?;

    Ok(InitResult {
        checkflow_dir,
        config_file,
        state_file,
        node_type: node_type.to_string(),
    })
}

/// Check if a directory has been initialized with checkflow.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(CHECKFLOW_DIR_NAME).exists()
}

/// Find the workspace root by searching up the directory tree.
///
/// Returns the directory containing `.checkflow/`, or `None` if none is
/// found within the depth limit.
pub fn find_checkflow_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(CHECKFLOW_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
