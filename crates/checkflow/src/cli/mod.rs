//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for checkflow using clap's
//! derive API. Each command has its own argument struct with validation.
//!
//! # Commands
//!
//! - `init`: Initialize a checkflow workspace
//! - `add`, `remove`: Create and delete nodes
//! - `connect`, `disconnect`: Manage dependency edges
//! - `check`, `uncheck`, `label`, `details`, `move`: Edit a node
//! - `list`, `show`, `info`: Inspect the graph
//! - `viewport`: Read or change the canvas pan and zoom
//! - `export`, `import`: Exchange snapshot files
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! checkflow add --label "Write draft"
//! checkflow add --label "Review" --x 200
//! checkflow connect node_0 node_1
//! checkflow check node_0
//! checkflow list --disabled
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    AddArgs, DetailsArgs, EdgeArgs, ExportArgs, ImportArgs, InfoArgs, InitArgs, LabelArgs,
    ListArgs, MoveArgs, NodeArgs, RemoveArgs, ViewportArgs,
};

pub use validators::{validate_coordinate, validate_label, validate_node_id, validate_zoom};

/// Checkflow - checklist flows with dependency locking
///
/// Nodes stay locked until every node they depend on is checked.
/// The working graph is stored in `.checkflow/flow-state.json`.
#[derive(Parser, Debug)]
#[command(name = "checkflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new checkflow workspace
    ///
    /// Creates the `.checkflow/` directory with configuration and an empty
    /// graph state.
    Init(InitArgs),

    /// Show workspace information
    Info(InfoArgs),

    /// Add a node to the graph
    Add(AddArgs),

    /// Add a dependency edge (the target stays locked until the source is checked)
    Connect(EdgeArgs),

    /// Remove every edge from source to target
    Disconnect(EdgeArgs),

    /// Mark a node as done
    ///
    /// Locked nodes cannot be checked.
    Check(NodeArgs),

    /// Mark a node as not done
    ///
    /// Unchecking locks every node downstream of it again.
    Uncheck(NodeArgs),

    /// Change the label of a node
    Label(LabelArgs),

    /// Change the details text of a node
    Details(DetailsArgs),

    /// Move a node on the canvas
    Move(MoveArgs),

    /// Delete nodes and every edge touching them
    Remove(RemoveArgs),

    /// List nodes with their lock state
    List(ListArgs),

    /// Show a node with its dependencies and dependents
    Show(NodeArgs),

    /// Show or change the canvas viewport
    Viewport(ViewportArgs),

    /// Export the graph to a snapshot file
    Export(ExportArgs),

    /// Replace the graph with a snapshot file
    Import(ImportArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse from an iterator of arguments (useful for testing)
    ///
    /// # Errors
    ///
    /// Returns a clap error if the arguments are invalid.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the parsed command
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace cannot be loaded, the action is
    /// rejected, or the state file cannot be written.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Checkflow dependency-aware checklists");
            println!("Use --help for more information");
            return Ok(());
        };

        if let Commands::Init(args) = command {
            return execute::execute_init(args).await;
        }

        let current_dir = std::env::current_dir()?;
        let mut app = if let Commands::Import(_) = command {
            App::from_directory_replacing_state(&current_dir).await?
        } else {
            App::from_directory(&current_dir).await?
        };
        match command {
            Commands::Init(_) => Ok(()),
            Commands::Info(args) => execute::execute_info(&app, args, output_mode),
            Commands::Add(args) => execute::execute_add(&mut app, args, output_mode).await,
            Commands::Connect(args) => execute::execute_connect(&mut app, args, output_mode).await,
            Commands::Disconnect(args) => {
                execute::execute_disconnect(&mut app, args, output_mode).await
            }
            Commands::Check(args) => {
                execute::execute_set_checked(&mut app, args, true, output_mode).await
            }
            Commands::Uncheck(args) => {
                execute::execute_set_checked(&mut app, args, false, output_mode).await
            }
            Commands::Label(args) => execute::execute_label(&mut app, args, output_mode).await,
            Commands::Details(args) => execute::execute_details(&mut app, args, output_mode).await,
            Commands::Move(args) => execute::execute_move(&mut app, args, output_mode).await,
            Commands::Remove(args) => execute::execute_remove(&mut app, args, output_mode).await,
            Commands::List(args) => execute::execute_list(&app, args, output_mode),
            Commands::Show(args) => execute::execute_show(&app, args, output_mode),
            Commands::Viewport(args) => {
                execute::execute_viewport(&mut app, args, output_mode).await
            }
            Commands::Export(args) => execute::execute_export(&mut app, args, output_mode).await,
            Commands::Import(args) => execute::execute_import(&mut app, args, output_mode).await,
        }
    }
}
