//! Per-chart configuration (`.chart-ci.yaml`)
//!
//! Each functionality has its own section with an `enabled` switch and a
//! typed set of options that map onto helm flags:
//!
//! ```yaml
//! validate:
//!   options:
//!     skip-crds: true
//!     dependency-update: false
//! dependency-update:
//!   enabled: false
//! test:
//!   enabled: true
//!   options:
//!     update-snapshot: true
//! ```
//!
//! A missing file, a missing section or a missing `enabled` key all fall
//! back to the caller's default. A file that does not parse is logged and
//! treated as missing.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::Functionality;

/// File name looked up in each chart directory
pub const CHART_CONFIG_FILE: &str = ".chart-ci.yaml";

/// Switch plus options for one functionality
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureSettings<O> {
    pub enabled: Option<bool>,
    pub options: O,
}

/// Options for `helm template`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidateOptions {
    pub skip_crds: bool,
    pub skip_tests: bool,
    pub include_crds: bool,
    pub dependency_update: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            skip_crds: false,
            skip_tests: false,
            include_crds: false,
            dependency_update: true,
        }
    }
}

impl ValidateOptions {
    fn flags(&self) -> Vec<String> {
        [
            (self.skip_crds, "--skip-crds"),
            (self.skip_tests, "--skip-tests"),
            (self.include_crds, "--include-crds"),
            (self.dependency_update, "--dependency-update"),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, flag)| flag.to_string())
        .collect()
    }
}

/// `helm dependency update` takes no per-chart options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DependencyUpdateOptions {}

/// Options for `helm unittest`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TestOptions {
    pub update_snapshot: bool,
}

impl TestOptions {
    fn flags(&self) -> Vec<String> {
        if self.update_snapshot {
            vec!["--update-snapshot".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Parsed `.chart-ci.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChartConfig {
    pub validate: FeatureSettings<ValidateOptions>,
    pub dependency_update: FeatureSettings<DependencyUpdateOptions>,
    pub test: FeatureSettings<TestOptions>,
}

impl ChartConfig {
    /// Load configuration from a chart directory
    ///
    /// Never fails: missing or malformed files yield the default configuration.
    pub fn load(chart_dir: &Path) -> Self {
        let path = chart_dir.join(CHART_CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no chart configuration, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read chart configuration, using defaults");
                return Self::default();
            }
        };

        Self::from_yaml(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "malformed chart configuration, using defaults");
            Self::default()
        })
    }

    /// Parse configuration YAML; an empty document is the default configuration
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let config: Option<Self> = serde_yaml::from_str(yaml)?;
        Ok(config.unwrap_or_default())
    }

    pub fn is_enabled(&self, functionality: Functionality, default: bool) -> bool {
        let enabled = match functionality {
            Functionality::Validate => self.validate.enabled,
            Functionality::DependencyUpdate => self.dependency_update.enabled,
            Functionality::Test => self.test.enabled,
        };
        enabled.unwrap_or(default)
    }

    /// Tool flags for a functionality, in a fixed order
    pub fn flags(&self, functionality: Functionality) -> Vec<String> {
        match functionality {
            Functionality::Validate => self.validate.options.flags(),
            Functionality::DependencyUpdate => Vec::new(),
            Functionality::Test => self.test.options.flags(),
        }
    }
}
