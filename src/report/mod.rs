//! Run report: status table, legend and verdict
//!
//! The [`Report`] is plain data built from the ordered chart results.
//! Rendering it as markdown for the job summary and delivering it lives in
//! [`sink`].

pub mod sink;

use std::fmt::Write;

use serde::Serialize;

use crate::config::CHART_CONFIG_FILE;
use crate::domain::{ChartResult, ChartStatus, Functionality};

pub use sink::ReportSink;

/// Every status, in legend order
const STATUSES: [ChartStatus; 5] = [
    ChartStatus::Passed,
    ChartStatus::Updated,
    ChartStatus::Failed,
    ChartStatus::Skipped,
    ChartStatus::Disabled,
];

/// Glyph shown in the status column
pub fn glyph(status: ChartStatus) -> &'static str {
    match status {
        ChartStatus::Passed => "✅",
        ChartStatus::Updated => "🔄",
        ChartStatus::Failed => "❌",
        ChartStatus::Skipped => "⏭️",
        ChartStatus::Disabled => "🚫",
    }
}

fn legend_text(status: ChartStatus, functionality: Functionality) -> String {
    match status {
        ChartStatus::Passed => "passed".to_string(),
        ChartStatus::Updated => "dependencies updated".to_string(),
        ChartStatus::Failed => "failed (see details below)".to_string(),
        ChartStatus::Skipped => "skipped, nothing to run (no `tests` directory)".to_string(),
        ChartStatus::Disabled => format!(
            "disabled with `{}: {{ enabled: false }}` in the chart's `{CHART_CONFIG_FILE}`",
            functionality.name()
        ),
    }
}

/// Escape `|` so a value cannot split a table row
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Backtick fence longer than any backtick run in `text`
fn fence_for(text: &str) -> String {
    let longest = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub chart: String,
    pub glyph: &'static str,
    pub relative_path: String,
}

/// Overall outcome of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Success,
    /// Ids of the failed charts, in working-set order
    Failure(Vec<String>),
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Success)
    }
}

/// Report for one functionality over one working set
#[derive(Debug, Clone)]
pub struct Report {
    pub functionality: Functionality,
    pub rows: Vec<ReportRow>,
    /// `(glyph, explanation)` for every status
    pub legend: Vec<(&'static str, String)>,
    pub verdict: Verdict,
    /// `(in scope, total)` when change filtering was applied
    pub scope: Option<(usize, usize)>,
    results: Vec<ChartResult>,
}

/// Build the report for ordered `results`
pub fn build(
    functionality: Functionality,
    results: &[ChartResult],
    scope: Option<(usize, usize)>,
) -> Report {
    let rows = results
        .iter()
        .map(|result| ReportRow {
            chart: result.chart.clone(),
            glyph: glyph(result.status),
            relative_path: result.relative_path.clone(),
        })
        .collect();

    let legend = STATUSES
        .iter()
        .map(|status| (glyph(*status), legend_text(*status, functionality)))
        .collect();

    let failed: Vec<String> = results
        .iter()
        .filter(|r| r.is_failure())
        .map(|r| r.chart.clone())
        .collect();
    let verdict = if failed.is_empty() {
        Verdict::Success
    } else {
        Verdict::Failure(failed)
    };

    Report {
        functionality,
        rows,
        legend,
        verdict,
        scope,
        results: results.to_vec(),
    }
}

impl Report {
    #[cfg(test)]
    pub fn results(&self) -> &[ChartResult] {
        &self.results
    }

    /// Render as GitHub-flavored markdown
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "## {}\n", self.functionality.title());

        if let Some((in_scope, total)) = self.scope {
            let _ = writeln!(out, "{in_scope} of {total} charts in scope (changed charts only).\n");
        }

        if self.rows.is_empty() {
            let message = if self.scope.is_some() {
                "No charts changed, nothing to do."
            } else {
                "No charts listed, nothing to do."
            };
            let _ = writeln!(out, "{message}\n");
            return out;
        }

        let verdict = match &self.verdict {
            Verdict::Success => "All charts succeeded.".to_string(),
            Verdict::Failure(charts) => format!("Charts failed: {}", charts.join(", ")),
        };
        let _ = writeln!(out, "{verdict}\n");

        out.push_str("| Chart | Status | Path |\n");
        out.push_str("| --- | :---: | --- |\n");
        for row in &self.rows {
            let _ = writeln!(
                out,
                "| {} | {} | `{}` |",
                escape_cell(&row.chart),
                row.glyph,
                escape_cell(&row.relative_path)
            );
        }
        out.push('\n');

        for result in self.results.iter().filter(|r| r.is_failure()) {
            let reason = result.reason.as_deref().unwrap_or("unknown error").trim_end();
            let fence = fence_for(reason);
            let _ = writeln!(
                out,
                "<details>\n<summary>{} {}</summary>\n\n{fence}\n{reason}\n{fence}\n\n</details>\n",
                glyph(ChartStatus::Failed),
                escape_html(&result.chart),
            );
        }

        out.push_str("**Legend**\n\n");
        for (glyph, text) in &self.legend {
            let _ = writeln!(out, "- {glyph} {text}");
        }
        out.push('\n');
        out
    }

    /// Machine-readable summary
    pub fn summary(&self) -> RunSummary {
        let mut counts = StatusCounts::default();
        for result in &self.results {
            match result.status {
                ChartStatus::Passed => counts.passed += 1,
                ChartStatus::Updated => counts.updated += 1,
                ChartStatus::Failed => counts.failed += 1,
                ChartStatus::Skipped => counts.skipped += 1,
                ChartStatus::Disabled => counts.disabled += 1,
            }
        }
        RunSummary {
            functionality: self.functionality,
            success: self.verdict.is_success(),
            in_scope: self.scope.map(|(n, _)| n),
            total: self.scope.map(|(_, m)| m),
            counts,
            results: self.results.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub passed: usize,
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
    pub disabled: usize,
}

/// JSON document written by `--json-summary`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub functionality: Functionality,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_scope: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub counts: StatusCounts,
    pub results: Vec<ChartResult>,
}
