//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory and a
//! small catalog, and check its outputs.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const CATALOG: &str = r#"[
  {"id": 1, "name": "Spring Venture Challenge", "category": "College", "region": "Northeast",
   "date": "2025-06-01", "deadline": "2025-05-01", "prize": "$25,000", "location": "New York, NY",
   "link": "https://example.org/svc", "coordinates": [40.7128, -74.0060], "mode": "In-Person",
   "organizer": {"name": "Venture Lab"}},
  {"id": 2, "name": "Virtual Pitch Sprint", "category": "College",
   "date": "06/28/2025", "deadline": "06/20/2025", "prize": "$2,500", "location": "Online",
   "link": "https://example.org/vps", "mode": "Virtual", "organizer": {"name": "Remote Ventures"}},
  {"id": 3, "name": "Summer Founders Cup", "category": "Open", "region": "West",
   "date": "2025-07-10", "deadline": "2025-06-01", "prize": "$10,000", "location": "Los Angeles, CA",
   "link": "https://example.org/sfc", "coordinates": [34.0522, -118.2437], "mode": "Hybrid",
   "organizer": {"name": "Founders Guild"}}
]"#;

struct Sandbox {
    home: TempDir,
    catalog: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let catalog = home.path().join("competitions.json");
        std::fs::write(&catalog, CATALOG).unwrap();
        Self { home, catalog }
    }

    fn catalog(&self) -> &str {
        self.catalog.to_str().unwrap()
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        run_cli(self.home.path(), args)
    }
}

fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pitchpost"))
        .args(args)
        .env("PITCHPOST_HOME", home)
        .env_remove("PITCHPOST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

fn ids(bucket: &serde_json::Value) -> Vec<u64> {
    bucket
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["event"]["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn test_board_json_buckets() {
    let sb = Sandbox::new();
    let (stdout, stderr, code) = sb.run(&[
        "board", "--catalog", sb.catalog(), "--today", "2025-06-21", "--json",
    ]);
    assert_eq!(code, 0, "board failed: {stderr}");
    let board = parse_json(&stdout);
    assert!(ids(&board["openForApplication"]).is_empty());
    assert_eq!(ids(&board["upcomingClosed"]), vec![2, 3]);
    assert_eq!(ids(&board["past"]), vec![1]);
}

#[test]
fn test_board_tag_filter() {
    let sb = Sandbox::new();
    let (stdout, _, code) = sb.run(&[
        "board", "--catalog", sb.catalog(), "--today", "2025-06-15", "--tag", "Virtual", "--json",
    ]);
    assert_eq!(code, 0);
    let board = parse_json(&stdout);
    assert_eq!(ids(&board["openForApplication"]), vec![2]);
    assert!(ids(&board["upcomingClosed"]).is_empty());
}

#[test]
fn test_board_with_position_adds_distances() {
    let sb = Sandbox::new();
    let (stdout, _, code) = sb.run(&[
        "board", "--catalog", sb.catalog(), "--today", "2025-06-15", "--near", "40.7128,-74.0060",
        "--json",
    ]);
    assert_eq!(code, 0);
    let board = parse_json(&stdout);
    let past = &board["past"][0];
    assert_eq!(past["distanceMiles"].as_f64(), Some(0.0));
    assert!(board["openForApplication"][0].get("distanceMiles").is_none());
}

#[test]
fn test_board_text_output() {
    let sb = Sandbox::new();
    let (stdout, _, code) = sb.run(&["board", "--catalog", sb.catalog(), "--today", "2025-06-15"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Open for application (1)"));
    assert!(stdout.contains("Past (1)"));
}

#[test]
fn test_interest_toggle_and_board_narrowing() {
    let sb = Sandbox::new();
    let (stdout, _, code) = sb.run(&["interest", "toggle", "3", "to-apply"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("added toApply"));

    let (stdout, _, code) = sb.run(&[
        "board", "--catalog", sb.catalog(), "--today", "2025-06-15", "--interest", "to-apply",
        "--json",
    ]);
    assert_eq!(code, 0);
    let board = parse_json(&stdout);
    assert_eq!(ids(&board["upcomingClosed"]), vec![3]);
    assert!(ids(&board["openForApplication"]).is_empty());

    let (stdout, _, code) = sb.run(&["interest", "toggle", "3", "to-apply"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("removed toApply"));

    let (stdout, _, _) = sb.run(&["interest", "list", "--json"]);
    let labels = parse_json(&stdout);
    assert!(labels["toApply"].as_array().unwrap().is_empty());
}

#[test]
fn test_event_show_countdown() {
    let sb = Sandbox::new();
    let (stdout, _, code) = sb.run(&[
        "event", "show", "2", "--catalog", sb.catalog(), "--today", "2025-06-19", "--json",
    ]);
    assert_eq!(code, 0);
    let out = parse_json(&stdout);
    assert_eq!(out["state"], "openForApplication");
    assert_eq!(out["countdown"]["daysRemaining"], 1);
    assert_eq!(out["countdown"]["text"], "Deadline to apply in 1 day");
}

#[test]
fn test_event_show_unknown_id_fails() {
    let sb = Sandbox::new();
    let (_, stderr, code) = sb.run(&["event", "show", "42", "--catalog", sb.catalog()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no event with id 42"));
}

#[test]
fn test_nearby_ranks_by_distance() {
    let sb = Sandbox::new();
    let (stdout, _, code) = sb.run(&[
        "nearby", "--near", "34.0522,-118.2437", "--catalog", sb.catalog(), "--json",
    ]);
    assert_eq!(code, 0);
    let ranked = parse_json(&stdout);
    let order: Vec<u64> = ranked
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["eventId"].as_u64().unwrap())
        .collect();
    assert_eq!(order, vec![3, 1]);
}

#[test]
fn test_map_lists_only_located_events() {
    let sb = Sandbox::new();
    let (stdout, _, code) = sb.run(&["map", "--catalog", sb.catalog(), "--json"]);
    assert_eq!(code, 0);
    let out = parse_json(&stdout);
    assert_eq!(out["markers"].as_array().unwrap().len(), 2);
    assert!(out["markers"][0]["eventId"].is_u64());
    assert_eq!(out["center"][0].as_f64(), Some(39.8283));
}

#[test]
fn test_config_set_and_get() {
    let sb = Sandbox::new();
    let (_, _, code) = sb.run(&["config", "set", "filter.window", "thisYear"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = sb.run(&["config", "get", "filter.window"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "thisYear");

    let (_, _, code) = sb.run(&["config", "set", "filter.window", "lastWeek"]);
    assert_ne!(code, 0);
}

#[test]
fn test_missing_catalog_fails() {
    let sb = Sandbox::new();
    let (_, stderr, code) = sb.run(&["board", "--catalog", "/nonexistent/catalog.json"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}
