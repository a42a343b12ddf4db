//! The operations chart-ci runs on a chart

use std::fmt;

use serde::Serialize;

/// One of the operations that can be enabled or disabled per chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Functionality {
    /// Render manifests with `helm template`
    Validate,
    /// Refresh `Chart.lock` with `helm dependency update`
    DependencyUpdate,
    /// Run `helm unittest`
    Test,
}

impl Functionality {
    /// Stable name, also used as the section key in per-chart configuration
    pub fn name(self) -> &'static str {
        match self {
            Functionality::Validate => "validate",
            Functionality::DependencyUpdate => "dependency-update",
            Functionality::Test => "test",
        }
    }

    /// Heading used in the job summary
    pub fn title(self) -> &'static str {
        match self {
            Functionality::Validate => "Chart validation",
            Functionality::DependencyUpdate => "Chart dependency update",
            Functionality::Test => "Chart unit tests",
        }
    }
}

impl fmt::Display for Functionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
