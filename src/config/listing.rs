//! Chart listing (`charts.yaml`)
//!
//! The listing maps each chart identifier to its directory and its path
//! relative to the workspace root:
//!
//! ```yaml
//! ingress:
//!   dir: charts/ingress
//!   relativePath: charts/ingress
//! ```
//!
//! Entry order in the file is the order charts are processed and reported in.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::domain::ChartEntry;
use crate::error::{Result, listing};

/// Default listing file name, relative to the workspace root
pub const DEFAULT_LISTING_FILE: &str = "charts.yaml";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingRecord {
    dir: PathBuf,
    relative_path: String,
}

/// Ordered set of charts known to the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartListing {
    charts: Vec<ChartEntry>,
}

impl ChartListing {
    pub fn new(charts: Vec<ChartEntry>) -> Self {
        Self { charts }
    }

    /// Load the listing file, resolving relative `dir` entries against `workspace_root`
    pub fn load(path: &Path, workspace_root: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| listing::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content, workspace_root)
            .map_err(|reason| listing::parse_failed(path.display().to_string(), reason))
    }

    /// Parse listing YAML; the error is a human-readable reason
    pub fn from_yaml(content: &str, workspace_root: &Path) -> std::result::Result<Self, String> {
        let mapping: Option<Mapping> = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        let Some(mapping) = mapping else {
            return Ok(Self::default());
        };

        let mut charts = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let id = match key {
                Value::String(id) => id,
                other => return Err(format!("chart identifier must be a string, got {other:?}")),
            };
            let record: ListingRecord =
                serde_yaml::from_value(value).map_err(|e| format!("chart '{id}': {e}"))?;
            let dir = if record.dir.is_absolute() {
                record.dir
            } else {
                workspace_root.join(record.dir)
            };
            charts.push(ChartEntry::new(id, dir, record.relative_path));
        }

        Ok(Self { charts })
    }

    /// Serialize the listing, writing `dir` relative to the workspace root
    pub fn to_yaml(&self, workspace_root: &Path) -> Result<String> {
        let mut mapping = Mapping::new();
        for chart in &self.charts {
            let dir = chart
                .dir
                .strip_prefix(workspace_root)
                .map_or_else(|_| chart.dir.clone(), Path::to_path_buf);
            let record = ListingRecord {
                dir,
                relative_path: chart.relative_path.clone(),
            };
            mapping.insert(
                Value::String(chart.id.clone()),
                serde_yaml::to_value(record)?,
            );
        }
        Ok(serde_yaml::to_string(&mapping)?)
    }

    pub fn charts(&self) -> &[ChartEntry] {
        &self.charts
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}
