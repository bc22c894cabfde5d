//! Integration tests for the checkflow CLI.
//!
//! These tests verify the end-to-end behavior of the CLI commands against a
//! workspace in a temporary directory.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{add_node, is_locked, list_json, run_checkflow_in_dir, run_ok};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory with an initialized checkflow workspace
#[fixture]
fn initialized_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    run_ok(temp.path(), &["init", "--quiet"]);
    temp
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_cli_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    let stdout = run_ok(temp.path(), &["--help"]);
    for command in ["init", "add", "connect", "check", "list", "export", "import"] {
        assert!(stdout.contains(command), "help should mention {command}");
    }
}

#[rstest]
fn test_init_creates_workspace(temp_dir: TempDir) {
    let stdout = run_ok(temp_dir.path(), &["init", "--node-type", "step"]);
    assert!(stdout.contains("Initialized checkflow"));

    let config = std::fs::read_to_string(temp_dir.path().join(".checkflow/config.yaml")).unwrap();
    assert!(config.contains("node-type: step"));

    let state = std::fs::read_to_string(temp_dir.path().join(".checkflow/flow-state.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(value["nodes"], serde_json::json!([]));
    assert_eq!(value["viewport"]["zoom"], 1.0);
}

#[rstest]
fn test_init_twice_fails(initialized_dir: TempDir) {
    let output = run_checkflow_in_dir(initialized_dir.path(), &["init"]);
    assert!(!output.status.success());
}

#[rstest]
fn test_command_outside_workspace_fails(temp_dir: TempDir) {
    let output = run_checkflow_in_dir(temp_dir.path(), &["list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("checkflow init"));
}

// ============================================================================
// Editing
// ============================================================================

#[rstest]
fn test_add_assigns_sequential_ids(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    assert_eq!(add_node(dir, "Draft"), "node_0");
    assert_eq!(add_node(dir, "Review"), "node_1");

    let stdout = run_ok(dir, &["add"]);
    assert!(stdout.contains("node_2: Node node_2"));
}

#[rstest]
fn test_dependency_locks_until_checked(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let draft = add_node(dir, "Draft");
    let review = add_node(dir, "Review");
    let publish = add_node(dir, "Publish");
    run_ok(dir, &["connect", &draft, &review]);
    run_ok(dir, &["connect", &review, &publish]);

    assert!(!is_locked(dir, &draft));
    assert!(is_locked(dir, &review));
    assert!(is_locked(dir, &publish));

    run_ok(dir, &["check", &draft]);
    assert!(!is_locked(dir, &review));
    assert!(is_locked(dir, &publish));

    run_ok(dir, &["check", &review]);
    assert!(!is_locked(dir, &publish));

    // Unchecking the root locks everything downstream again
    run_ok(dir, &["uncheck", &draft]);
    assert!(is_locked(dir, &review));
    assert!(is_locked(dir, &publish));
}

#[rstest]
fn test_check_locked_node_fails(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let a = add_node(dir, "A");
    let b = add_node(dir, "B");
    run_ok(dir, &["connect", &a, &b]);

    let output = run_checkflow_in_dir(dir, &["check", &b]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("disabled"));

    let node = list_json(dir).into_iter().find(|n| n["id"] == b.as_str()).unwrap();
    assert_eq!(node["data"]["checked"], false);
}

#[rstest]
#[case::check(&["check", "node_9"])]
#[case::label(&["label", "node_9", "text"])]
#[case::show(&["show", "node_9"])]
#[case::connect(&["connect", "node_9", "node_0"])]
fn test_unknown_node_fails(initialized_dir: TempDir, #[case] args: &[&str]) {
    add_node(initialized_dir.path(), "Only");
    let output = run_checkflow_in_dir(initialized_dir.path(), args);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("node_9"));
}

#[rstest]
fn test_label_details_and_move(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let id = add_node(dir, "Old");
    run_ok(dir, &["label", &id, "New"]);
    run_ok(dir, &["details", &id, "Some notes"]);
    run_ok(dir, &["move", &id, "--x", "-15", "--y", "30"]);

    let stdout = run_ok(dir, &["show", &id, "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["node"]["data"]["label"], "New");
    assert_eq!(value["node"]["data"]["details"], "Some notes");
    assert_eq!(value["node"]["position"]["x"], -15.0);
    assert_eq!(value["node"]["position"]["y"], 30.0);
}

#[rstest]
fn test_remove_drops_touching_edges(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let a = add_node(dir, "A");
    let b = add_node(dir, "B");
    let c = add_node(dir, "C");
    run_ok(dir, &["connect", &a, &b]);
    run_ok(dir, &["connect", &b, &c]);

    run_ok(dir, &["remove", &b]);
    let ids: Vec<_> = list_json(dir).iter().map(|n| n["id"].clone()).collect();
    assert_eq!(ids, [serde_json::json!(a), serde_json::json!(c)]);
    assert!(!is_locked(dir, &c));
}

#[rstest]
fn test_disconnect_unlocks(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let a = add_node(dir, "A");
    let b = add_node(dir, "B");
    run_ok(dir, &["connect", &a, &b]);
    assert!(is_locked(dir, &b));

    let stdout = run_ok(dir, &["disconnect", &a, &b]);
    assert!(stdout.contains("Disconnected"));
    assert!(!is_locked(dir, &b));

    let stdout = run_ok(dir, &["disconnect", &a, &b]);
    assert!(stdout.contains("No edge"));
}

// ============================================================================
// Listing
// ============================================================================

#[rstest]
fn test_list_text_and_filters(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let a = add_node(dir, "Root");
    let b = add_node(dir, "Leaf");
    run_ok(dir, &["connect", &a, &b]);

    let stdout = run_ok(dir, &["list"]);
    assert!(stdout.contains("[ ] node_0 Root"));
    assert!(stdout.contains("[-] node_1 Leaf"));
    assert!(stdout.contains("2 node(s), 1 locked"));

    let locked = run_ok(dir, &["list", "--disabled"]);
    assert!(!locked.contains("Root"));
    assert!(locked.contains("Leaf"));

    let open = run_ok(dir, &["list", "--enabled"]);
    assert!(open.contains("Root"));
    assert!(!open.contains("Leaf"));
}

#[rstest]
fn test_list_empty(initialized_dir: TempDir) {
    let stdout = run_ok(initialized_dir.path(), &["list"]);
    assert!(stdout.contains("No nodes found."));
}

#[rstest]
fn test_show_lists_neighbors(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let a = add_node(dir, "A");
    let b = add_node(dir, "B");
    let c = add_node(dir, "C");
    run_ok(dir, &["connect", &a, &b]);
    run_ok(dir, &["connect", &b, &c]);

    let stdout = run_ok(dir, &["show", &b, "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["parents"], serde_json::json!([a]));
    assert_eq!(value["children"], serde_json::json!([c]));

    let text = run_ok(dir, &["show", &b]);
    assert!(text.contains("Depends on"));
    assert!(text.contains("Unlocks"));
    assert!(text.contains("locked"));
}

#[rstest]
fn test_viewport_updates_partially(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    run_ok(dir, &["viewport", "--x", "10", "--zoom", "2"]);
    let stdout = run_ok(dir, &["viewport", "--y", "-5", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "x": 10.0, "y": -5.0, "zoom": 2.0 }));
}

#[rstest]
fn test_info_reports_counts(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let a = add_node(dir, "A");
    let b = add_node(dir, "B");
    run_ok(dir, &["connect", &a, &b]);
    run_ok(dir, &["check", &a]);

    let stdout = run_ok(dir, &["info", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["nodes"]["total"], 2);
    assert_eq!(value["nodes"]["checked"], 1);
    assert_eq!(value["nodes"]["locked"], 0);
    assert_eq!(value["edges"], 1);
    assert_eq!(value["next_id"], "node_2");
}

// ============================================================================
// Export and Import
// ============================================================================

#[rstest]
fn test_export_writes_default_file(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    add_node(dir, "A");

    let stdout = run_ok(dir, &["export"]);
    assert!(stdout.contains("flow-state.json"));

    let text = std::fs::read_to_string(dir.join("flow-state.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["nodes"][0]["id"], "node_0");
    assert!(value["nodes"][0]["data"].get("isDisabled").is_none());
    assert!(!dir.join("flow-state.json.tmp").exists());
}

#[rstest]
fn test_export_then_import_into_new_workspace(initialized_dir: TempDir, temp_dir: TempDir) {
    let source = initialized_dir.path();
    let a = add_node(source, "A");
    let b = add_node(source, "B");
    run_ok(source, &["connect", &a, &b]);
    let file = source.join("shared.json");
    run_ok(source, &["export", "-o", file.to_str().unwrap()]);

    let target = temp_dir.path();
    run_ok(target, &["init", "--quiet"]);
    let output = run_checkflow_in_dir(target, &["import", file.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Graph state restored."));

    assert!(is_locked(target, &b));
    // The id sequence continues after the restored nodes
    assert_eq!(add_node(target, "C"), "node_2");
}

#[rstest]
fn test_import_restores_legacy_fields(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let file = dir.join("legacy.json");
    std::fs::write(
        &file,
        r#"{"nodes":[{"id":"node_5","position":{"x":0,"y":0},"data":{"label":null}}]}"#,
    )
    .unwrap();

    run_ok(dir, &["import", file.to_str().unwrap()]);
    let nodes = list_json(dir);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["type"], "custom");
    assert_eq!(nodes[0]["data"]["label"], "");
    assert_eq!(nodes[0]["data"]["checked"], false);
    assert_eq!(add_node(dir, "Next"), "node_6");
}

#[rstest]
fn test_import_malformed_keeps_state(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    add_node(dir, "Keep me");
    let file = dir.join("broken.json");
    std::fs::write(&file, "{ not json").unwrap();

    let output = run_checkflow_in_dir(dir, &["import", file.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read or parse the file."));

    let nodes = list_json(dir);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["data"]["label"], "Keep me");
}

#[rstest]
fn test_import_rejects_non_json_extension(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let file = dir.join("graph.txt");
    std::fs::write(&file, r#"{"nodes":[]}"#).unwrap();

    let output = run_checkflow_in_dir(dir, &["import", file.to_str().unwrap()]);
    assert!(!output.status.success());
}

// ============================================================================
// State File Integrity
// ============================================================================

#[rstest]
#[case::add_nan(&["add", "--x", "NaN"])]
#[case::add_infinite(&["add", "--y", "inf"])]
#[case::move_nan(&["move", "node_0", "--x", "NaN", "--y", "0"])]
#[case::viewport_infinite(&["viewport", "--x", "-inf"])]
fn test_non_finite_coordinates_rejected(initialized_dir: TempDir, #[case] args: &[&str]) {
    let dir = initialized_dir.path();
    add_node(dir, "Anchor");

    let output = run_checkflow_in_dir(dir, args);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("finite"));

    // The workspace still loads and is unchanged
    let nodes = list_json(dir);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["position"]["x"], 0.0);
}

#[rstest]
fn test_import_replaces_unreadable_state(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    std::fs::write(dir.join(".checkflow/flow-state.json"), "{ truncated").unwrap();
    assert!(!run_checkflow_in_dir(dir, &["list"]).status.success());

    let file = dir.join("good.json");
    std::fs::write(
        &file,
        r#"{"nodes":[{"id":"node_3","position":{"x":0,"y":0},"data":{"label":"Saved"}}]}"#,
    )
    .unwrap();
    let output = run_checkflow_in_dir(dir, &["import", file.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "import failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let nodes = list_json(dir);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["data"]["label"], "Saved");
    assert_eq!(add_node(dir, "Next"), "node_4");
}

#[rstest]
fn test_failed_import_over_unreadable_state_leaves_file(initialized_dir: TempDir) {
    let dir = initialized_dir.path();
    let state = dir.join(".checkflow/flow-state.json");
    std::fs::write(&state, "{ truncated").unwrap();

    let file = dir.join("also-bad.json");
    std::fs::write(&file, "[]").unwrap();
    let output = run_checkflow_in_dir(dir, &["import", file.to_str().unwrap()]);
    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&state).unwrap(), "{ truncated");
}
