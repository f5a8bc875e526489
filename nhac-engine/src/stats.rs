//! Search statistics tracking.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

/// Counters collected during one root search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Every call of the recursive search, root included
    pub nodes: u64,

    /// Nodes scored by the static evaluator (depth cutoff, decided, or no moves)
    pub leaves: u64,

    /// Leaves where someone had already completed a line
    pub terminal_leaves: u64,

    /// Interior nodes where the mover had no legal move
    pub stalemates: u64,

    /// Nodes where alpha reached beta
    pub cutoffs: u64,

    /// Candidate moves skipped because of those cutoffs
    pub moves_pruned: u64,

    /// Wall time of the search
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get nodes searched per second
    pub fn nodes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }

    /// Share of generated candidates never searched, as a percentage.
    pub fn pruned_pct(&self) -> f64 {
        let seen = self.nodes.saturating_sub(1) + self.moves_pruned;
        if seen > 0 {
            100.0 * self.moves_pruned as f64 / seen as f64
        } else {
            0.0
        }
    }

    /// Emit the counters as one `info` event.
    pub fn log_summary(&self) {
        info!(
            nodes = self.nodes,
            leaves = self.leaves,
            terminal = self.terminal_leaves,
            stalemates = self.stalemates,
            cutoffs = self.cutoffs,
            pruned_pct = self.pruned_pct(),
            nodes_per_sec = self.nodes_per_sec().round(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "search finished"
        );
    }
}
