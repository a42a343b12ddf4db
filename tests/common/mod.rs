//! Common test utilities for chart-ci integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Environment variables that would leak the outer CI job into a test run
const CI_ENV: &[&str] = &[
    "GITHUB_WORKSPACE",
    "GITHUB_STEP_SUMMARY",
    "GITHUB_ACTIONS",
    "GITHUB_TOKEN",
    "CHART_CI_LISTING",
    "CHART_CI_CHANGED_ONLY",
    "CHART_CI_BASE_BRANCH",
    "CHART_CI_COMPARE_BRANCH",
    "CHART_CI_SOURCE_REPO",
    "CHART_CI_TARGET_REPO",
    "CHART_CI_SEQUENTIAL",
    "HELM_BIN",
    "RUST_LOG",
];

/// Stand-in for helm: logs its arguments, then answers from files in the
/// chart directory (`fake-stderr`, `fake-exit`)
const FAKE_HELM: &str = r#"#!/bin/sh
echo "$*" >> "__LOG__"
dir=""
for arg in "$@"; do
  if [ -d "$arg" ]; then dir="$arg"; fi
done
if [ -f "$dir/fake-stderr" ]; then cat "$dir/fake-stderr" >&2; fi
if [ -f "$dir/fake-exit" ]; then exit "$(cat "$dir/fake-exit")"; fi
exit 0
"#;

/// A test workspace for integration tests
pub struct TestWorkspace {
    /// Temporary directory, removed on drop
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
    /// Helper directory outside the workspace (fake helm, its log)
    tools: TempDir,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let tools = TempDir::new().expect("Failed to create tools directory");
        let path = temp.path().to_path_buf();
        Self { temp, path, tools }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create `charts/<id>` with a Chart.yaml
    pub fn create_chart(&self, id: &str) {
        self.write_file(
            &format!("charts/{id}/Chart.yaml"),
            &format!("apiVersion: v2\nname: {id}\nversion: 0.1.0\n"),
        );
    }

    /// Give a chart a `tests` directory so helm unittest runs for it
    pub fn add_tests_dir(&self, id: &str) {
        self.write_file(
            &format!("charts/{id}/tests/deployment_test.yaml"),
            "suite: deployment\n",
        );
    }

    /// Write `charts.yaml` listing `ids` under `charts/`
    pub fn write_listing(&self, ids: &[&str]) {
        let listing: String = ids
            .iter()
            .map(|id| format!("{id}:\n  dir: charts/{id}\n  relativePath: charts/{id}\n"))
            .collect();
        self.write_file("charts.yaml", &listing);
    }

    /// Make the fake helm exit with `code` for chart `id`, printing `stderr`
    pub fn fail_chart(&self, id: &str, code: i32, stderr: &str) {
        self.write_file(&format!("charts/{id}/fake-exit"), &code.to_string());
        self.write_file(&format!("charts/{id}/fake-stderr"), stderr);
    }

    fn helm_log(&self) -> PathBuf {
        self.tools.path().join("helm.log")
    }

    /// Install the fake helm script and return its path
    #[cfg(unix)]
    pub fn fake_helm(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.tools.path().join("helm");
        let body = FAKE_HELM.replace("__LOG__", &self.helm_log().display().to_string());
        std::fs::write(&script, body).expect("Failed to write fake helm");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake helm executable");
        script
    }

    /// Argument lines the fake helm was called with, in any order
    pub fn helm_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.helm_log())
            .map(|log| log.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Turn the workspace into a git repository with everything committed
    /// on a `base` branch
    pub fn init_git(&self) -> git2::Repository {
        let repo = git2::Repository::init(&self.path).expect("Failed to init repository");
        commit_all(&repo, "Initial commit");
        {
            let head = repo
                .head()
                .and_then(|h| h.peel_to_commit())
                .expect("Failed to read HEAD");
            repo.branch("base", &head, false)
                .expect("Failed to create base branch");
        }
        repo
    }

    /// Summary file path handed to the binary
    pub fn summary_path(&self) -> PathBuf {
        self.path.join("summary.md")
    }

    /// chart-ci command for this workspace with a clean CI environment
    #[cfg(unix)]
    pub fn cmd(&self) -> Command {
        let mut cmd = chart_ci_cmd();
        cmd.arg("--workspace")
            .arg(&self.path)
            .arg("--helm")
            .arg(self.fake_helm())
            .arg("--summary-file")
            .arg(self.summary_path());
        cmd
    }
}

/// Commit every file of the work tree on HEAD
#[allow(dead_code)]
pub fn commit_all(repo: &git2::Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("Failed to stage files");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let sig = git2::Signature::now("Test", "test@test.com").expect("Failed to create signature");
    let parents: Vec<git2::Commit> = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Failed to commit")
}

/// chart-ci binary with CI variables from the outer environment removed
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn chart_ci_cmd() -> Command {
    let mut cmd = Command::cargo_bin("chart-ci").expect("Failed to find chart-ci binary");
    for name in CI_ENV {
        cmd.env_remove(name);
    }
    cmd
}
