//! Application context for CLI command execution.
//!
//! The `App` struct locates the workspace, loads the configuration and the
//! working graph, and writes the graph back after mutating commands.
//!
//! # Example
//!
//! ```no_run
//! use checkflow::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} nodes", app.editor().view_nodes().len());
//!     Ok(())
//! }
//! ```

use crate::commands::init::{
    find_checkflow_root, CheckflowConfig, CHECKFLOW_DIR_NAME, CONFIG_FILE_NAME,
};
use crate::editor::Editor;
use crate::error::{ConfigError, Error, Result};
use crate::snapshot;
use crate::store::GraphStore;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    /// Editing session over the working graph
    editor: Editor,

    /// Directory containing `.checkflow/`
    root_dir: PathBuf,

    /// Loaded configuration
    config: CheckflowConfig,
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for `.checkflow/`, loads the
    /// configuration, and restores the working graph from the state file.
    /// A missing state file yields an empty graph.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No checkflow workspace is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The state file exists but cannot be read or decoded
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        Self::load(working_dir, false).await
    }

    /// Like [`App::from_directory`], but an unreadable state file yields an
    /// empty graph instead of an error.
    ///
    /// Used by `import`, which replaces the working graph anyway and must be
    /// able to overwrite a damaged state file.
    ///
    /// # Errors
    ///
    /// Returns an error if no workspace is found or the configuration
    /// cannot be loaded.
    pub async fn from_directory_replacing_state(working_dir: &Path) -> Result<Self> {
        Self::load(working_dir, true).await
    }

    async fn load(working_dir: &Path, discard_broken_state: bool) -> Result<Self> {
        let root_dir = find_checkflow_root(working_dir).ok_or(ConfigError::NotInitialized)?;
        let config_path = root_dir.join(CHECKFLOW_DIR_NAME).join(CONFIG_FILE_NAME);
        let config = CheckflowConfig::load(&config_path).await?;

        let mut editor = Editor::new(GraphStore::with_node_type(&config.node_type));
        let state_path = config.state_path(&root_dir);
        if state_path.exists() {
            match snapshot::read_snapshot(&state_path).await {
                Ok(snapshot) => editor.restore(snapshot),
                Err(Error::Snapshot(e)) if discard_broken_state => {
                    warn!(
                        path = %state_path.display(),
                        error = %e,
                        "Ignoring unreadable state file"
                    );
                }
                Err(e) => return Err(e),
            }
        } else {
            debug!(path = %state_path.display(), "No state file yet, starting empty");
        }

        Ok(Self {
            editor,
            root_dir,
            config,
        })
    }

    /// The editing session
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Mutable access to the editing session
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// The loaded configuration
    pub fn config(&self) -> &CheckflowConfig {
        &self.config
    }

    /// Directory containing `.checkflow/`
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Path of the working state file
    pub fn state_path(&self) -> PathBuf {
        self.config.state_path(&self.root_dir)
    }

    /// Write the working graph back to the state file.
    ///
    /// This should be called after any mutating operation.
    pub async fn save(&self) -> Result<()> {
        let document = self.editor.export()?;
        snapshot::write_snapshot_atomic(&self.state_path(), &document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use crate::domain::Position;
    use crate::editor::Action;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_app_from_initialized_directory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), Some("step")).await.unwrap();

        let app = App::from_directory(temp_dir.path()).await.unwrap();

        assert_eq!(app.config().node_type, "step");
        assert!(app.editor().view_nodes().is_empty());
        assert!(app.state_path().ends_with("flow-state.json"));
    }

    #[tokio::test]
    async fn test_app_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), None).await.unwrap();

        let sub_dir = temp_dir.path().join("docs").join("plans");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let app = App::from_directory(&sub_dir).await.unwrap();
        assert_eq!(app.root_dir(), temp_dir.path());
    }

    #[tokio::test]
    async fn test_app_from_uninitialized_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = App::from_directory(temp_dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Not a checkflow workspace"));
    }

    #[tokio::test]
    async fn test_app_save_and_reload_keeps_id_sequence() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), None).await.unwrap();

        let mut app = App::from_directory(temp_dir.path()).await.unwrap();
        for _ in 0..3 {
            app.editor_mut()
                .dispatch(Action::AddNode {
                    label: None,
                    position: Position::default(),
                })
                .unwrap();
        }
        app.save().await.unwrap();

        let mut reloaded = App::from_directory(temp_dir.path()).await.unwrap();
        assert_eq!(reloaded.editor().view_nodes().len(), 3);
        reloaded
            .editor_mut()
            .dispatch(Action::AddNode {
                label: None,
                position: Position::default(),
            })
            .unwrap();
        assert_eq!(reloaded.editor().view_nodes()[3].id.as_str(), "node_3");
    }

    #[tokio::test]
    async fn test_broken_state_blocks_normal_load_but_not_replacement() {
        let temp_dir = TempDir::new().unwrap();
        let result = init::init(temp_dir.path(), None).await.unwrap();
        let broken = r#"{"nodes":[{"id":"node_0","position":{"x":null,"y":0}}]}"#;
        std::fs::write(&result.state_file, broken).unwrap();

        assert!(App::from_directory(temp_dir.path()).await.is_err());

        let mut app = App::from_directory_replacing_state(temp_dir.path())
            .await
            .unwrap();
        assert!(app.editor().view_nodes().is_empty());

        app.editor_mut()
            .import_str(r#"{"nodes":[{"id":"node_4","position":{"x":1,"y":2},"data":{}}]}"#)
            .unwrap();
        app.save().await.unwrap();

        let reloaded = App::from_directory(temp_dir.path()).await.unwrap();
        assert_eq!(reloaded.editor().view_nodes()[0].id.as_str(), "node_4");
    }

    #[tokio::test]
    async fn test_replacing_state_still_requires_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let err = App::from_directory_replacing_state(temp_dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotInitialized)));
    }
}
