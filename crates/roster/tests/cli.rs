//! End-to-end tests for the `roster` command over files on disk.

use std::fs;
use std::path::Path;

use clap::Parser;
use roster::cli::{run, Args, UsageError};
use roster::view::ViewError;
use tempfile::TempDir;

const RECORDS: &str = r#"[
  {"name": "Player A", "district": "Warangal", "rating": 1510},
  {"name": "Player B", "district": "Hyderabad", "rating": null},
  {"name": "Player C", "district": "Warangal", "rating": 1620},
  {"name": "Player D", "district": "Hyderabad", "rating": 1440},
  {"name": "Player E", "district": "Warangal", "rating": 1380}
]"#;

const VIEW: &str = r#"
title: Registered players
page_size: 2
default_sort: name
columns:
  - field: name
    label: Player
    sortable: true
  - field: district
    options: [Hyderabad, Warangal]
  - field: rating
    sortable: true
    format: "{{ value if value is not none else 'unrated' }}"
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("players.json"), RECORDS).unwrap();
        fs::write(dir.path().join("players.yaml"), VIEW).unwrap();
        Fixture { dir }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn run(&self, extra: &[&str]) -> anyhow::Result<String> {
        let records = self.path("players.json");
        let view = self.path("players.yaml");
        let mut argv = vec!["roster", records.as_str(), "--view", view.as_str()];
        argv.extend_from_slice(extra);
        run(&Args::try_parse_from(argv).unwrap())
    }
}

#[test]
fn first_page_uses_view_defaults() {
    let fx = Fixture::new();
    let out = fx.run(&[]).unwrap();

    assert!(out.starts_with("Registered players\n"));
    assert!(out.contains("Player A"));
    assert!(out.contains("Player B"));
    assert!(!out.contains("Player C"));
    assert!(out.contains("unrated"));
    assert!(out.contains("Showing 1–2 of 5"));
    assert!(out.ends_with("‹ prev | [1] 2 3 | next ›"));
}

#[test]
fn filter_sort_and_page_as_json() {
    let fx = Fixture::new();
    let out = fx
        .run(&["-f", "district=Warangal", "-s", "rating:desc", "-p", "2", "-o", "json"])
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["total_matches"], 3);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["rows"].as_array().unwrap().len(), 1);
    assert_eq!(json["rows"][0]["name"], "Player E");
    assert_eq!(json["summary"], "Showing 3–3 of 3");
}

#[test]
fn page_past_the_end_is_empty() {
    let fx = Fixture::new();
    let out = fx.run(&["-p", "9"]).unwrap();
    assert!(out.contains("(no matching records)"));
    assert!(out.contains("Showing 0 of 5"));
}

#[test]
fn option_outside_the_list_is_rejected() {
    let fx = Fixture::new();
    let err = fx.run(&["-f", "district=Karimnagar"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<UsageError>(),
        Some(UsageError::View(ViewError::InvalidOption { .. }))
    ));
}

#[test]
fn unsortable_column_is_rejected() {
    let fx = Fixture::new();
    let err = fx.run(&["-s", "district"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot sort by 'district': not a sortable column"
    );
}

#[test]
fn inferred_view_without_definition() {
    let fx = Fixture::new();
    let records = fx.path("players.json");
    let args = Args::try_parse_from(["roster", records.as_str(), "-q", "hyderabad"]).unwrap();
    let out = run(&args).unwrap();

    assert!(out.contains("Player B"));
    assert!(out.contains("Player D"));
    assert!(out.contains("Showing 1–2 of 2"));
}

#[test]
fn unreadable_inputs_are_not_usage_errors() {
    let fx = Fixture::new();
    let missing = fx.path("missing.json");
    let args = Args::try_parse_from(["roster", missing.as_str()]).unwrap();
    let err = run(&args).unwrap_err();
    assert!(err.downcast_ref::<UsageError>().is_none());
    assert!(err.to_string().contains("failed to read records"));

    let bad = fx.path("bad.json");
    fs::write(Path::new(&bad), "{\"name\": \"not a list\"}").unwrap();
    let args = Args::try_parse_from(["roster", bad.as_str()]).unwrap();
    let err = run(&args).unwrap_err();
    assert!(err.to_string().contains("JSON array"));
}
