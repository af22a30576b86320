#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PAGE: &str = r#"
entity = "parties"
module = "Parties"
search_fields = ["name", "createdBy.name"]
items_per_page = 2

[[facets]]
key = "status"
label = "Status"

[[facets]]
key = "category"
kind = "nested"
path = "interest"
field = "category"

[[columns]]
header = "Name"
field = "name"
"#;

const PARTIES: &str = r#"[
  { "_id": "p1", "name": "Acme Traders", "status": "Active", "createdBy": { "name": "Ravi" },
    "interest": [{ "category": "Electronics" }] },
  { "_id": "p2", "name": "Bolt & Co", "status": "Lead", "createdBy": { "name": "Anita" },
    "interest": [] },
  { "_id": "p3", "name": "Acme Exports", "status": "Active", "createdBy": { "name": "Anita" },
    "interest": [{ "category": "Furniture" }] }
]"#;

fn listview_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("listview"));
    cmd.env_remove("RUST_LOG")
        .env_remove("LISTVIEW_ITEMS_PER_PAGE")
        .env_remove("LISTVIEW_UTC_OFFSET_MINUTES")
        .env_remove("LISTVIEW_DATE_FORMAT");
    cmd
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("parties.json");
    let page = temp.path().join("parties.toml");
    fs::write(&data, PARTIES).unwrap();
    fs::write(&page, PAGE).unwrap();
    (temp, data, page)
}

fn source_args<'a>(data: &'a Path, page: &'a Path) -> [&'a str; 4] {
    [
        "--data",
        data.to_str().unwrap(),
        "--page-config",
        page.to_str().unwrap(),
    ]
}

#[test]
fn test_list_first_page() {
    let (_temp, data, page) = setup();
    listview_cmd()
        .arg("list")
        .args(source_args(&data, &page))
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Traders"))
        .stdout(predicate::str::contains("Bolt & Co"))
        .stdout(predicate::str::contains("Acme Exports").not())
        .stdout(predicate::str::contains("Page 1 of 2 · 3 item(s)"));
}

#[test]
fn test_list_search_and_facet_as_json() {
    let (_temp, data, page) = setup();
    let output = listview_cmd()
        .arg("list")
        .args(source_args(&data, &page))
        .args(["--search", "acme", "--facet", "category=Furniture", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["total_items"], 1);
    assert_eq!(view["items"][0]["_id"], "p3");
}

#[test]
fn test_not_specified_facet() {
    let (_temp, data, page) = setup();
    listview_cmd()
        .arg("list")
        .args(source_args(&data, &page))
        .args(["-f", "category=Not Specified"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bolt & Co"))
        .stdout(predicate::str::contains("Acme").not());
}

#[test]
fn test_facets_lists_options() {
    let (_temp, data, page) = setup();
    listview_cmd()
        .arg("facets")
        .args(source_args(&data, &page))
        .assert()
        .success()
        .stdout(predicate::str::contains("Status\n  Active\n  Lead\n"))
        .stdout(predicate::str::contains(
            "category\n  Electronics\n  Furniture\n  Not Specified\n",
        ));
}

#[test]
fn test_export_selected() {
    let (_temp, data, page) = setup();
    let output = listview_cmd()
        .arg("export")
        .args(source_args(&data, &page))
        .args(["--select", "p2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let table: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(table["headers"], serde_json::json!(["S.No.", "Name"]));
    assert_eq!(table["rows"], serde_json::json!([["1", "Bolt & Co"]]));
}

#[test]
fn test_delete_rewrites_data_file() {
    let (_temp, data, page) = setup();
    listview_cmd()
        .arg("delete")
        .args(source_args(&data, &page))
        .args(["p1", "p3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 item(s): p1, p3"));

    let remaining: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_eq!(remaining[0]["_id"], "p2");
}

#[test]
fn test_delete_repeated_id_deletes_once() {
    let (_temp, data, page) = setup();
    listview_cmd()
        .arg("delete")
        .args(source_args(&data, &page))
        .args(["p1", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 item(s): p1"));

    let remaining: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&data).unwrap()).unwrap();
    assert_eq!(remaining.as_array().unwrap().len(), 2);
}

#[test]
fn test_delete_unknown_id_fails() {
    let (_temp, data, page) = setup();
    listview_cmd()
        .arg("delete")
        .args(source_args(&data, &page))
        .arg("ghost")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Entity not found: ghost"));
    assert_eq!(fs::read_to_string(&data).unwrap(), PARTIES);
}

#[test]
fn test_permissions_block_delete() {
    let (temp, data, page) = setup();
    let perms = temp.path().join("perms.json");
    fs::write(&perms, r#"{ "Parties": ["view"] }"#).unwrap();

    listview_cmd()
        .arg("delete")
        .args(source_args(&data, &page))
        .args(["--permissions", perms.to_str().unwrap(), "p1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied: Parties/delete"));
}

#[test]
fn test_settings_file_changes_page_size() {
    let (temp, data, _) = setup();
    let page = temp.path().join("plain.toml");
    fs::write(&page, "entity = \"parties\"\nsearch_fields = [\"name\"]\n").unwrap();
    let settings = temp.path().join("listview.toml");
    fs::write(&settings, "items_per_page = 1\n").unwrap();

    listview_cmd()
        .arg("list")
        .args(source_args(&data, &page))
        .args(["--config", settings.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 3"));
}

#[test]
fn test_missing_page_config_fails() {
    let (temp, data, _) = setup();
    listview_cmd()
        .arg("list")
        .args(source_args(&data, &temp.path().join("nope.toml")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read page config"));
}
