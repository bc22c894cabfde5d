//! Output formatting for CLI commands.
//!
//! Everything can be printed either as human-readable text or as JSON for
//! programmatic use. Text output honors `NO_COLOR`, `CHECKFLOW_COLOR`,
//! `CHECKFLOW_ASCII` and `CHECKFLOW_MAX_WIDTH`.

pub mod color;

use crate::domain::Edge;
use crate::editor::{Notification, NotificationLevel};
use crate::view::ViewNode;
use color::{bold, colored_state_icon, colorize_id, colorize_state, dimmed, NodeState};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, success};

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `CHECKFLOW_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `CHECKFLOW_ASCII`: Set to "1" or "true" for ASCII-only icons
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `CHECKFLOW_COLOR`: Set to "0" or "false" to disable colors
    pub fn from_env() -> Self {
        let max_width = match env::var("CHECKFLOW_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "CHECKFLOW_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = env::var("CHECKFLOW_ASCII")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("CHECKFLOW_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print a list of view nodes in the specified format
pub fn print_nodes(nodes: &[&ViewNode], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_nodes_text(&mut handle, nodes, &config),
        OutputMode::Json => write_json(&mut handle, &nodes),
    }
}

/// Print one node with its neighbors and details (for the show command)
pub fn print_node_details(node: &ViewNode, edges: &[Edge], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_node_details_text(&mut handle, node, edges, &config),
        OutputMode::Json => {
            let (parents, children) = neighbors(node, edges);
            write_json(
                &mut handle,
                &serde_json::json!({
                    "node": node,
                    "parents": parents,
                    "children": children,
                }),
            )
        }
    }
}

/// Print queued editor notifications to stderr
pub fn print_notifications(notifications: &[Notification]) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    let config = OutputConfig::from_env();

    for note in notifications {
        let text = match note.level {
            NotificationLevel::Info => success(&note.message, &config),
            NotificationLevel::Error => error(&note.message, &config),
        };
        writeln!(handle, "{text}")?;
    }
    Ok(())
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

/// Ids of the nodes directly before and after `node`, in edge order.
fn neighbors<'a>(node: &ViewNode, edges: &'a [Edge]) -> (Vec<&'a str>, Vec<&'a str>) {
    let parents = edges
        .iter()
        .filter(|e| e.target == node.id)
        .map(|e| e.source.as_str())
        .collect();
    let children = edges
        .iter()
        .filter(|e| e.source == node.id)
        .map(|e| e.target.as_str())
        .collect();
    (parents, children)
}

fn format_node_line(node: &ViewNode, config: &OutputConfig) -> String {
    let state = NodeState::of(node);
    format!(
        "{} {} {}",
        colored_state_icon(state, config),
        colorize_id(node.id.as_str(), config),
        node.data.label
    )
}

fn print_nodes_text<W: Write>(
    w: &mut W,
    nodes: &[&ViewNode],
    config: &OutputConfig,
) -> io::Result<()> {
    if nodes.is_empty() {
        writeln!(w, "No nodes found.")?;
        return Ok(());
    }

    for node in nodes {
        writeln!(w, "{}", format_node_line(node, config))?;
    }

    let locked = nodes.iter().filter(|n| n.is_disabled()).count();
    writeln!(w)?;
    writeln!(
        w,
        "{}",
        dimmed(
            &format!("{} node(s), {} locked", nodes.len(), locked),
            config
        )
    )
}

fn print_node_details_text<W: Write>(
    w: &mut W,
    node: &ViewNode,
    edges: &[Edge],
    config: &OutputConfig,
) -> io::Result<()> {
    let width = config.max_width.min(get_terminal_width());
    let state = NodeState::of(node);
    let (parents, children) = neighbors(node, edges);

    writeln!(w, "{}", format_node_line(node, config))?;
    writeln!(
        w,
        "  {} {}",
        dimmed("State:", config),
        colorize_state(state, config)
    )?;
    writeln!(
        w,
        "  {} ({}, {})",
        dimmed("Position:", config),
        node.position.x,
        node.position.y
    )?;

    for (title, ids, arrow) in [("Depends on", &parents, "←"), ("Unlocks", &children, "→")] {
        if ids.is_empty() {
            continue;
        }
        writeln!(w)?;
        writeln!(w, "{}:", bold(title, config))?;
        for id in ids {
            writeln!(w, "  {} {}", dimmed(arrow, config), colorize_id(id, config))?;
        }
    }

    if !node.data.details.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Details", config))?;
        for line in wrap_text(&node.data.details, width.saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }

    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}
