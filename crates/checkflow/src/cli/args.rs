//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::validators::{
    validate_coordinate, validate_label, validate_node_id, validate_node_type, validate_zoom,
};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Renderer node type for new nodes (default: "custom")
    #[arg(short = 't', long = "node-type", value_parser = validate_node_type)]
    pub node_type: Option<String>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `add` command
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Node label (defaults to "Node <id>")
    #[arg(short, long, value_parser = validate_label)]
    pub label: Option<String>,

    /// Horizontal canvas position
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        value_parser = validate_coordinate
    )]
    pub x: f64,

    /// Vertical canvas position
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        value_parser = validate_coordinate
    )]
    pub y: f64,
}

/// Arguments for the `connect` and `disconnect` commands
#[derive(Parser, Debug, Clone)]
pub struct EdgeArgs {
    /// Prerequisite node
    #[arg(value_parser = validate_node_id)]
    pub source: String,

    /// Node that depends on the source
    #[arg(value_parser = validate_node_id)]
    pub target: String,
}

/// Arguments for commands that address a single node (`check`, `uncheck`, `show`)
#[derive(Parser, Debug, Clone)]
pub struct NodeArgs {
    /// Node ID
    #[arg(value_parser = validate_node_id)]
    pub node_id: String,
}

/// Arguments for the `label` command
#[derive(Parser, Debug, Clone)]
pub struct LabelArgs {
    /// Node ID
    #[arg(value_parser = validate_node_id)]
    pub node_id: String,

    /// New label
    #[arg(value_parser = validate_label)]
    pub label: String,
}

/// Arguments for the `details` command
#[derive(Parser, Debug, Clone)]
pub struct DetailsArgs {
    /// Node ID
    #[arg(value_parser = validate_node_id)]
    pub node_id: String,

    /// New details text (use an empty string to clear)
    pub details: String,
}

/// Arguments for the `move` command
#[derive(Parser, Debug, Clone)]
pub struct MoveArgs {
    /// Node ID
    #[arg(value_parser = validate_node_id)]
    pub node_id: String,

    /// Horizontal canvas position
    #[arg(long, allow_negative_numbers = true, value_parser = validate_coordinate)]
    pub x: f64,

    /// Vertical canvas position
    #[arg(long, allow_negative_numbers = true, value_parser = validate_coordinate)]
    pub y: f64,
}

/// Arguments for the `remove` command
#[derive(Parser, Debug, Clone)]
pub struct RemoveArgs {
    /// Node IDs to delete, with every edge touching them
    #[arg(required = true, value_parser = validate_node_id)]
    pub node_ids: Vec<String>,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only show locked nodes
    #[arg(long, conflicts_with = "enabled")]
    pub disabled: bool,

    /// Only show nodes that can be checked
    #[arg(long)]
    pub enabled: bool,
}

/// Arguments for the `viewport` command
#[derive(Parser, Debug, Clone)]
pub struct ViewportArgs {
    /// Horizontal pan offset
    #[arg(long, allow_negative_numbers = true, value_parser = validate_coordinate)]
    pub x: Option<f64>,

    /// Vertical pan offset
    #[arg(long, allow_negative_numbers = true, value_parser = validate_coordinate)]
    pub y: Option<f64>,

    /// Zoom factor
    #[arg(long, value_parser = validate_zoom)]
    pub zoom: Option<f64>,
}

/// Arguments for the `export` command
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Output file (default: the configured export file, "flow-state.json")
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

/// Arguments for the `import` command
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// Snapshot file to restore (.json)
    pub file: std::path::PathBuf,
}
