//! Binary harness.
//!
//! # What this covers
//!
//! - `topix check` prints the hierarchy report as JSON.
//! - `topix query` prints the topic graph as JSON.
//! - Load and query errors exit non-zero.
//! - `check` validates the hierarchy once per run.
//!
//! Each run uses a fresh temporary working directory so no local
//! `topix.toml` is picked up.
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};

fn topix(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_topix"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("run topix")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "topix failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn check_prints_the_hierarchy_report() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_export(dir.path(), POVERTY_EXPORT);
    let report = stdout_json(&topix(dir.path(), &["check", "--data", data.to_str().unwrap()]));
    assert_eq!(report["concepts"], 6);
    assert_eq!(report["roots"], 3);
    assert_eq!(report["max_depth"], 2);
}

#[test]
fn query_prints_the_topic_graph() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_export(dir.path(), POVERTY_EXPORT);
    let graph = stdout_json(&topix(
        dir.path(),
        &["query", "Armut", "--lang", "DE", "--data", data.to_str().unwrap()],
    ));
    let nodes = graph["@graph"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[1]["name"], "ARMUT");
}

#[test]
fn short_query_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_export(dir.path(), POVERTY_EXPORT);
    let output = topix(dir.path(), &["query", "po", "--data", data.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn cyclic_export_fails_check() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_export(dir.path(), CYCLIC_EXPORT);
    let output = topix(dir.path(), &["check", "--data", data.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cycle"));
}

#[test]
fn check_warns_about_dangling_parents_once() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_export(dir.path(), DANGLING_EXPORT);
    let output = topix(dir.path(), &["check", "--data", data.to_str().unwrap()]);
    let report = stdout_json(&output);
    assert_eq!(report["roots"], 1);
    assert_eq!(report["dangling"], serde_json::json!([["child", "gone"]]));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("parents absent from the export").count(),
        1,
        "{stderr}"
    );
}
