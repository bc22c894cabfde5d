//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// Run the checkflow binary in the specified directory.
///
/// Colors and Unicode icons are turned off so assertions can match plain text.
pub fn run_checkflow_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_checkflow"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("CHECKFLOW_ASCII", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute checkflow binary")
}

/// Run a command and assert that it succeeded, returning stdout.
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_checkflow_in_dir(dir, args);
    assert!(
        output.status.success(),
        "checkflow {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Add a node with the given label and return the id assigned to it.
pub fn add_node(dir: &Path, label: &str) -> String {
    let stdout = run_ok(dir, &["add", "--label", label, "--json"]);
    let node: serde_json::Value = serde_json::from_str(&stdout).expect("add should print JSON");
    node["id"].as_str().expect("node should have an id").to_string()
}

/// Read the `list --json` output as a JSON array.
pub fn list_json(dir: &Path) -> Vec<serde_json::Value> {
    let stdout = run_ok(dir, &["list", "--json"]);
    serde_json::from_str(&stdout).expect("list should print a JSON array")
}

/// Lock state of one node as reported by `list --json`.
pub fn is_locked(dir: &Path, id: &str) -> bool {
    list_json(dir)
        .iter()
        .find(|n| n["id"] == id)
        .and_then(|n| n["data"]["isDisabled"].as_bool())
        .unwrap_or_else(|| panic!("node {id} not listed"))
}
