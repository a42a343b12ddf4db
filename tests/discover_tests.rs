//! Discover command integration tests

mod common;

use predicates::prelude::*;

use common::{TestWorkspace, chart_ci_cmd};

#[test]
fn test_discover_prints_listing() {
    let workspace = TestWorkspace::new();
    workspace.create_chart("web");
    workspace.create_chart("api");
    workspace.write_file("charts/web/charts/redis/Chart.yaml", "name: redis\n");

    chart_ci_cmd()
        .arg("discover")
        .arg("--workspace")
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("api:\n  dir: charts/api\n  relativePath: charts/api"))
        .stdout(predicate::str::contains("web:\n  dir: charts/web"))
        .stdout(predicate::str::contains("redis").not());
}

#[test]
fn test_discover_writes_output_file() {
    let workspace = TestWorkspace::new();
    workspace.create_chart("web");

    chart_ci_cmd()
        .args(["discover", "-o", "charts.yaml"])
        .arg("--workspace")
        .arg(&workspace.path)
        .assert()
        .success();

    let listing = workspace.read_file("charts.yaml");
    assert!(listing.contains("web:"));
    assert!(listing.contains("relativePath: charts/web"));
}

#[cfg(unix)]
#[test]
fn test_discovered_listing_drives_a_run() {
    let workspace = TestWorkspace::new();
    workspace.create_chart("web");
    workspace.create_chart("api");

    chart_ci_cmd()
        .args(["discover", "-o", "charts.yaml"])
        .arg("--workspace")
        .arg(&workspace.path)
        .assert()
        .success();

    workspace.cmd().arg("validate").assert().success();
    let summary = workspace.read_file("summary.md");
    let api_row = summary.find("| api |").unwrap();
    let web_row = summary.find("| web |").unwrap();
    assert!(api_row < web_row);
}

#[test]
fn test_discover_duplicate_chart_names() {
    let workspace = TestWorkspace::new();
    workspace.create_chart("web");
    workspace.write_file("legacy/web/Chart.yaml", "name: web\n");

    chart_ci_cmd()
        .arg("discover")
        .arg("--workspace")
        .arg(&workspace.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid chart listing"));
}
