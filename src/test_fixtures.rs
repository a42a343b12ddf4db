//! Test fixtures shared by unit tests.
//!
//! - [`ScriptedTool`]: a [`ChartTool`] that answers from a per-chart script
//!   and records every invocation
//! - [`chart_in`]: a chart directory inside a temp dir
//! - [`commit_files`]: write files and commit them to a git repository

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

use crate::domain::{ChartEntry, Functionality};
use crate::error::{Result, tool};
use crate::helm::{ChartTool, ToolOutput};

#[derive(Debug, Clone)]
enum Scripted {
    Output(ToolOutput),
    Unlaunchable,
}

/// Fake chart tool with scripted outcomes per chart id
///
/// Charts without a script succeed.
#[derive(Debug, Default)]
pub struct ScriptedTool {
    outcomes: HashMap<String, Scripted>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(self, chart: &str) -> Self {
        self.script(chart, Scripted::Output(ToolOutput::success()))
    }

    pub fn exit(self, chart: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.script(chart, Scripted::Output(ToolOutput::exit(code, stdout, stderr)))
    }

    /// Process terminated by a signal (no exit code)
    pub fn killed(self, chart: &str) -> Self {
        self.script(chart, Scripted::Output(ToolOutput::default()))
    }

    pub fn unlaunchable(self, chart: &str) -> Self {
        self.script(chart, Scripted::Unlaunchable)
    }

    /// Sleep before answering for `chart`, to shuffle completion order
    pub fn delay(mut self, chart: &str, millis: u64) -> Self {
        self.delays
            .insert(chart.to_string(), Duration::from_millis(millis));
        self
    }

    fn script(mut self, chart: &str, outcome: Scripted) -> Self {
        self.outcomes.insert(chart.to_string(), outcome);
        self
    }

    pub fn invocations(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// (chart id, flags) per invocation, in call order
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn invoked_charts(&self) -> Vec<String> {
        let mut charts: Vec<String> = self.calls().into_iter().map(|(id, _)| id).collect();
        charts.sort();
        charts
    }
}

impl ChartTool for ScriptedTool {
    fn invoke(
        &self,
        chart_id: &str,
        _chart_dir: &Path,
        _functionality: Functionality,
        flags: &[String],
    ) -> Result<ToolOutput> {
        if let Some(delay) = self.delays.get(chart_id) {
            std::thread::sleep(*delay);
        }
        self.calls
            .lock()
            .unwrap()
            .push((chart_id.to_string(), flags.to_vec()));
        match self.outcomes.get(chart_id) {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::Unlaunchable) => Err(tool::launch_failed(
                "helm",
                chart_id,
                "No such file or directory",
            )),
            None => Ok(ToolOutput::success()),
        }
    }
}

/// Create `charts/<id>` inside `temp` and return its listing entry
pub fn chart_in(temp: &TempDir, id: &str) -> ChartEntry {
    let relative_path = format!("charts/{id}");
    let dir = temp.path().join(&relative_path);
    std::fs::create_dir_all(&dir).unwrap();
    ChartEntry::new(id, dir, relative_path)
}

/// Write `files` into the work tree and commit them on HEAD
pub fn commit_files(repo: &Repository, message: &str, files: &[(&str, &str)]) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        let full = workdir.join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(&full, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Test", "test@test.com").unwrap();
    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}
