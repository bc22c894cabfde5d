//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Checked: green  (checked nodes, completed actions)
//!   - Error/Locked:    red    (disabled nodes, failures)
//!   - Info/Reference:  cyan   (node ids)
//!   - Muted:           dimmed (field labels, connectors)
//!   - Emphasis:        bold   (section headers)

use crate::view::ViewNode;
use colored::Colorize;

use super::OutputConfig;

/// Display state of a node, derived from its view data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Ticked and not locked
    Checked,
    /// Not ticked, can be ticked
    Open,
    /// Locked by an unchecked ancestor
    Locked,
}

impl NodeState {
    /// Classify a view node. Locked wins over checked.
    pub fn of(node: &ViewNode) -> Self {
        if node.is_disabled() {
            Self::Locked
        } else if node.data.checked {
            Self::Checked
        } else {
            Self::Open
        }
    }

    /// Lowercase name used in text output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::Open => "open",
            Self::Locked => "locked",
        }
    }
}

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Colorize a node ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Apply color to the state name.
pub(crate) fn colorize_state(state: NodeState, config: &OutputConfig) -> String {
    let text = state.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match state {
        NodeState::Checked => text.green().to_string(),
        NodeState::Open => text.white().to_string(),
        NodeState::Locked => text.red().to_string(),
    }
}

/// Get a colored state icon, with ASCII fallback support.
pub(crate) fn colored_state_icon(state: NodeState, config: &OutputConfig) -> String {
    let icon = if config.use_ascii {
        match state {
            NodeState::Checked => "[x]",
            NodeState::Open => "[ ]",
            NodeState::Locked => "[-]",
        }
    } else {
        match state {
            NodeState::Checked => "☑",
            NodeState::Open => "☐",
            NodeState::Locked => "⊘",
        }
    };

    if !config.use_colors {
        return icon.to_string();
    }

    match state {
        NodeState::Checked => icon.green().to_string(),
        NodeState::Open => icon.white().to_string(),
        NodeState::Locked => icon.red().to_string(),
    }
}

/// Dim text (field labels, arrows).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Bold text (section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
