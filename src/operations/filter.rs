//! Narrows the listed charts down to the working set

use std::collections::HashSet;

use crate::domain::ChartEntry;

/// Charts to process in this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingSet {
    /// Change detection is off: every listed chart
    All(Vec<ChartEntry>),
    /// Listed charts that are in the changed-set, in listing order
    Changed {
        charts: Vec<ChartEntry>,
        total: usize,
    },
    /// Change detection is on and nothing changed; the run is a no-op
    NothingChanged { total: usize },
}

impl WorkingSet {
    pub fn charts(&self) -> &[ChartEntry] {
        match self {
            WorkingSet::All(charts) | WorkingSet::Changed { charts, .. } => charts,
            WorkingSet::NothingChanged { .. } => &[],
        }
    }

    /// `(in scope, total)` when change filtering was applied
    pub fn scope(&self) -> Option<(usize, usize)> {
        match self {
            WorkingSet::All(_) => None,
            WorkingSet::Changed { charts, total } => Some((charts.len(), *total)),
            WorkingSet::NothingChanged { total } => Some((0, *total)),
        }
    }
}

/// Select the working set from all listed charts
///
/// `changed` is `None` when change detection is disabled. A changed-set
/// that shares no chart with the listing counts as nothing changed.
pub fn select(all: &[ChartEntry], changed: Option<&HashSet<String>>) -> WorkingSet {
    let Some(changed) = changed else {
        return WorkingSet::All(all.to_vec());
    };

    let charts: Vec<ChartEntry> = all
        .iter()
        .filter(|chart| changed.contains(&chart.id))
        .cloned()
        .collect();

    if charts.is_empty() {
        WorkingSet::NothingChanged { total: all.len() }
    } else {
        WorkingSet::Changed {
            charts,
            total: all.len(),
        }
    }
}
