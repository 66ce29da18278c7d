//! Search instrumentation: node counters and the post-run report.

use std::fmt;
use std::time::Duration;

use crate::board::Action;

/// Node counters collected while a search expands states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeCounts {
    /// Successor states produced by applying an action.
    pub generated: u64,
    /// States whose legal actions were queried.
    pub evaluated: u64,
}

/// Counters plus wall-clock time of one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub counts: NodeCounts,
    pub elapsed: Duration,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Execution time in seconds: {:.2} | Nodes generated: {} | Nodes evaluated: {}",
            self.elapsed.as_secs_f64(),
            self.counts.generated,
            self.counts.evaluated
        )
    }
}

/// Result of one search run.
///
/// `path` is `None` when the goal was not found; `Some(vec![])` means the
/// initial state already was the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub algorithm: &'static str,
    pub path: Option<Vec<Action>>,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}
