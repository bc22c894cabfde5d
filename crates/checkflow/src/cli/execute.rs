//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{
    AddArgs, DetailsArgs, EdgeArgs, ExportArgs, ImportArgs, InfoArgs, InitArgs, LabelArgs,
    ListArgs, MoveArgs, NodeArgs, RemoveArgs, ViewportArgs,
};
use crate::app::App;
use crate::domain::{NodeId, Position, Viewport};
use crate::editor::Action;
use crate::output::{self, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!(
            "Initializing checkflow workspace{}...",
            args.node_type
                .as_ref()
                .map(|t| format!(" with node type '{t}'"))
                .unwrap_or_default()
        );
    }

    let result = init::init(&current_dir, args.node_type.as_deref()).await?;

    if !args.quiet {
        println!("Initialized checkflow in {}", result.checkflow_dir.display());
        println!("  Config: {}", result.config_file.display());
        println!("  State: {}", result.state_file.display());
        println!("  Node type: {}", result.node_type);
    }

    Ok(())
}

/// Execute the info command
pub fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let editor = app.editor();
    let nodes = editor.view_nodes();
    let (checked, locked) = nodes.iter().fold((0, 0), |(c, l), node| {
        (
            c + usize::from(node.data.checked),
            l + usize::from(node.is_disabled()),
        )
    });
    let viewport = editor.store().viewport();
    let next_id = format!("node_{}", editor.store().next_id_suffix());

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "state_path": app.state_path().display().to_string(),
                "node_type": app.config().node_type,
                "next_id": next_id,
                "nodes": {
                    "total": nodes.len(),
                    "checked": checked,
                    "locked": locked,
                },
                "edges": editor.edges().len(),
                "viewport": viewport,
            }))?;
        }
        OutputMode::Text => {
            println!("State file:  {}", app.state_path().display());
            println!("Node type:   {}", app.config().node_type);
            println!("Next id:     {next_id}");
            println!();
            println!("Nodes:");
            println!("  Total:    {}", nodes.len());
            println!("  Checked:  {checked}");
            println!("  Locked:   {locked}");
            println!("Edges:      {}", editor.edges().len());
            println!(
                "Viewport:   ({}, {}) zoom {}",
                viewport.x, viewport.y, viewport.zoom
            );
        }
    }

    Ok(())
}

/// Execute the add command
pub async fn execute_add(app: &mut App, args: &AddArgs, output_mode: OutputMode) -> Result<()> {
    app.editor_mut().dispatch(Action::AddNode {
        label: args.label.clone(),
        position: Position::new(args.x, args.y),
    })?;
    app.save().await?;

    let editor = app.editor();
    let added = editor
        .store()
        .nodes()
        .last()
        .and_then(|node| editor.view_node(&node.id));
    match (output_mode, added) {
        (OutputMode::Json, Some(node)) => output::print_json(node)?,
        (OutputMode::Text, Some(node)) => {
            println!("Added {}: {}", node.id, node.data.label);
        }
        (_, None) => {}
    }
    Ok(())
}

/// Execute the connect command
pub async fn execute_connect(
    app: &mut App,
    args: &EdgeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let source = NodeId::new(&args.source);
    let target = NodeId::new(&args.target);
    require_node(app, &source)?;
    require_node(app, &target)?;

    app.editor_mut().dispatch(Action::Connect {
        source: source.clone(),
        target: target.clone(),
    })?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => {
            let edge = app.editor().edges().last();
            output::print_json(&edge)?;
        }
        OutputMode::Text => {
            println!("Connected {source} → {target}");
            if app
                .editor()
                .view_node(&target)
                .is_some_and(|node| node.is_disabled())
            {
                println!("  {target} is now locked until {source} is checked");
            }
        }
    }
    Ok(())
}

/// Execute the disconnect command
pub async fn execute_disconnect(
    app: &mut App,
    args: &EdgeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let source = NodeId::new(&args.source);
    let target = NodeId::new(&args.target);
    let before = app.editor().edges().len();

    app.editor_mut().dispatch(Action::Disconnect {
        source: source.clone(),
        target: target.clone(),
    })?;
    let removed = before - app.editor().edges().len();
    if removed > 0 {
        app.save().await?;
    }

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "source": source,
            "target": target,
            "removed": removed,
        }))?,
        OutputMode::Text if removed == 0 => {
            println!("No edge from {source} to {target}");
        }
        OutputMode::Text => println!("Disconnected {source} → {target}"),
    }
    Ok(())
}

/// Execute the check and uncheck commands
pub async fn execute_set_checked(
    app: &mut App,
    args: &NodeArgs,
    checked: bool,
    output_mode: OutputMode,
) -> Result<()> {
    let id = NodeId::new(&args.node_id);
    app.editor_mut().dispatch(Action::CheckChange {
        id: id.clone(),
        checked,
    })?;
    app.save().await?;

    let verb = if checked { "Checked" } else { "Unchecked" };
    print_node_result(app, &id, output_mode, verb)
}

/// Execute the label command
pub async fn execute_label(app: &mut App, args: &LabelArgs, output_mode: OutputMode) -> Result<()> {
    let id = NodeId::new(&args.node_id);
    app.editor_mut().dispatch(Action::LabelChange {
        id: id.clone(),
        label: args.label.clone(),
    })?;
    app.save().await?;
    print_node_result(app, &id, output_mode, "Relabeled")
}

/// Execute the details command
pub async fn execute_details(
    app: &mut App,
    args: &DetailsArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let id = NodeId::new(&args.node_id);
    app.editor_mut().dispatch(Action::DetailsChange {
        id: id.clone(),
        details: args.details.clone(),
    })?;
    app.save().await?;
    print_node_result(app, &id, output_mode, "Updated details of")
}

/// Execute the move command
pub async fn execute_move(app: &mut App, args: &MoveArgs, output_mode: OutputMode) -> Result<()> {
    let id = NodeId::new(&args.node_id);
    app.editor_mut().dispatch(Action::MoveNode {
        id: id.clone(),
        position: Position::new(args.x, args.y),
    })?;
    app.save().await?;
    print_node_result(app, &id, output_mode, "Moved")
}

/// Execute the remove command
pub async fn execute_remove(
    app: &mut App,
    args: &RemoveArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let ids: Vec<NodeId> = args.node_ids.iter().map(NodeId::new).collect();
    let before = app.editor().store().nodes().len();

    app.editor_mut().dispatch(Action::RemoveNodes(ids.clone()))?;
    let removed = before - app.editor().store().nodes().len();
    if removed > 0 {
        app.save().await?;
    }

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "requested": ids,
            "removed": removed,
        }))?,
        OutputMode::Text => {
            println!("Removed {removed} of {} node(s)", ids.len());
        }
    }
    Ok(())
}

/// Execute the list command
pub fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let nodes: Vec<_> = app
        .editor()
        .view_nodes()
        .iter()
        .filter(|node| match (args.disabled, args.enabled) {
            (true, _) => node.is_disabled(),
            (_, true) => !node.is_disabled(),
            _ => true,
        })
        .collect();

    output::print_nodes(&nodes, output_mode)?;
    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &App, args: &NodeArgs, output_mode: OutputMode) -> Result<()> {
    let id = NodeId::new(&args.node_id);
    let node = require_node(app, &id)?;
    output::print_node_details(node, app.editor().edges(), output_mode)?;
    Ok(())
}

/// Execute the viewport command.
///
/// Without any flag the current viewport is printed unchanged.
pub async fn execute_viewport(
    app: &mut App,
    args: &ViewportArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let current = app.editor().store().viewport();
    let updated = Viewport {
        x: args.x.unwrap_or(current.x),
        y: args.y.unwrap_or(current.y),
        zoom: args.zoom.unwrap_or(current.zoom),
    };

    if updated != current {
        app.editor_mut().dispatch(Action::SetViewport(updated))?;
        app.save().await?;
    }

    match output_mode {
        OutputMode::Json => output::print_json(&updated)?,
        OutputMode::Text => println!(
            "Viewport: ({}, {}) zoom {}",
            updated.x, updated.y, updated.zoom
        ),
    }
    Ok(())
}

/// Execute the export command
pub async fn execute_export(
    app: &mut App,
    args: &ExportArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let path = match &args.output {
        Some(path) => path.clone(),
        None => std::env::current_dir()?.join(&app.config().export_file),
    };

    let result = app.editor_mut().export_to(&path).await;
    output::print_notifications(&app.editor_mut().take_notifications())?;
    result?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "nodes": app.editor().store().nodes().len(),
            "edges": app.editor().edges().len(),
        }))?,
        OutputMode::Text => println!("Exported graph to {}", path.display()),
    }
    Ok(())
}

/// Execute the import command.
///
/// The working state is only overwritten when the file was restored.
pub async fn execute_import(
    app: &mut App,
    args: &ImportArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let result = app.editor_mut().import_file(&args.file).await;
    output::print_notifications(&app.editor_mut().take_notifications())?;
    result?;
    app.save().await?;

    if output_mode == OutputMode::Json {
        output::print_json(&serde_json::json!({
            "path": args.file.display().to_string(),
            "nodes": app.editor().store().nodes().len(),
            "edges": app.editor().edges().len(),
        }))?;
    }
    Ok(())
}

fn require_node<'a>(app: &'a App, id: &NodeId) -> Result<&'a crate::view::ViewNode> {
    app.editor()
        .view_node(id)
        .ok_or_else(|| crate::error::Error::NodeNotFound(id.clone()).into())
}

fn print_node_result(app: &App, id: &NodeId, output_mode: OutputMode, verb: &str) -> Result<()> {
    let node = require_node(app, id)?;
    match output_mode {
        OutputMode::Json => output::print_json(node)?,
        OutputMode::Text => println!("{verb} {}: {}", node.id, node.data.label),
    }
    Ok(())
}
