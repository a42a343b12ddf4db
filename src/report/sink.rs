//! Report delivery: job summary file, console mirror, JSON summary and
//! workflow annotations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use console::Style;
use tracing::{debug, info};

use super::{Report, Verdict, glyph};
use crate::error::Result;
use crate::error::report::write_failed;

/// Where the report goes
#[derive(Debug, Clone, Default)]
pub struct ReportSink {
    /// Markdown file the report is appended to (stdout when `None`)
    summary_file: Option<PathBuf>,
    json_summary: Option<PathBuf>,
    /// Emit `::error::` workflow commands
    annotate: bool,
}

impl ReportSink {
    pub fn new(summary_file: Option<PathBuf>, json_summary: Option<PathBuf>) -> Self {
        Self {
            summary_file,
            json_summary,
            annotate: std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true"),
        }
    }

    #[cfg(test)]
    fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Deliver the report
    pub fn publish(&self, report: &Report) -> Result<()> {
        let markdown = report.to_markdown();
        match &self.summary_file {
            Some(path) => {
                append(path, &markdown)?;
                info!(path = %path.display(), "report appended to job summary");
                print_console(report);
            }
            None => print!("{markdown}"),
        }

        if let Some(path) = &self.json_summary {
            let json = serde_json::to_string_pretty(&report.summary())?;
            std::fs::write(path, json + "\n")
                .map_err(|e| write_failed(path.display().to_string(), e.to_string()))?;
            debug!(path = %path.display(), "JSON summary written");
        }

        if let Verdict::Failure(charts) = &report.verdict {
            if self.annotate {
                println!("{}", annotation(report, charts));
            }
        }
        Ok(())
    }
}

fn append(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| write_failed(path.display().to_string(), e.to_string()))?;
    file.write_all(content.as_bytes())
        .map_err(|e| write_failed(path.display().to_string(), e.to_string()))
}

fn annotation(report: &Report, charts: &[String]) -> String {
    format!(
        "::error title={}::Charts failed: {}",
        report.functionality.title(),
        charts.join(", ")
    )
}

/// Short mirror of the table for the job log
fn print_console(report: &Report) {
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    println!("{}", bold.apply_to(report.functionality.title()));
    for row in &report.rows {
        println!(
            "  {} {} {}",
            row.glyph,
            Style::new().bold().yellow().apply_to(&row.chart),
            dim.apply_to(&row.relative_path)
        );
    }
    match &report.verdict {
        Verdict::Success if report.rows.is_empty() => {
            println!("  {}", dim.apply_to("nothing to do"));
        }
        Verdict::Success => println!("  {}", Style::new().green().apply_to("all charts succeeded")),
        Verdict::Failure(charts) => println!(
            "  {} {}",
            glyph(crate::domain::ChartStatus::Failed),
            Style::new().red().bold().apply_to(charts.join(", "))
        ),
    }
}
