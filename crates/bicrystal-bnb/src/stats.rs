// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use bicrystal_core::num::saturating::SaturatingAddVal;
use bicrystal_search::stats::{OracleStatistics, OracleStatisticsBuilder};
use std::time::Duration;

/// Counters collected during one backtracking search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineStatistics {
    /// Search nodes entered, the root included.
    pub nodes_explored: u64,
    /// Decision levels undone.
    pub backtracks: u64,
    /// Variables fixed by propagation rather than by a decision.
    pub propagations: u64,
    /// Propagation dead ends.
    pub conflicts: u64,
    /// Deepest decision level reached.
    pub max_depth: u64,
    /// Total time spent in the search.
    pub time_total: Duration,
}

impl EngineStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add_val(1);
    }

    #[inline]
    pub fn on_propagation(&mut self) {
        self.propagations = self.propagations.saturating_add_val(1);
    }

    #[inline]
    pub fn on_conflict(&mut self) {
        self.conflicts = self.conflicts.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// The backend-neutral view reported through `OracleOutcome`.
    pub fn to_oracle_statistics(&self) -> OracleStatistics {
        OracleStatisticsBuilder::new()
            .nodes(self.nodes_explored)
            .backtracks(self.backtracks)
            .propagations(self.propagations)
            .conflicts(self.conflicts)
            .max_depth(self.max_depth)
            .solve_duration(self.time_total)
            .build()
    }
}

impl std::fmt::Display for EngineStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Backtracking Engine Statistics:")?;
        writeln!(f, "  Nodes explored:    {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:        {}", self.backtracks)?;
        writeln!(f, "  Propagations:      {}", self.propagations)?;
        writeln!(f, "  Conflicts:         {}", self.conflicts)?;
        writeln!(f, "  Max depth reached: {}", self.max_depth)?;
        writeln!(f, "  Total time:        {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_conversion() {
        let mut stats = EngineStatistics::default();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_backtrack();
        stats.on_propagation();
        stats.on_conflict();
        stats.on_depth_update(4);
        stats.on_depth_update(2);
        stats.set_total_time(Duration::from_millis(5));

        let oracle = stats.to_oracle_statistics();
        assert_eq!(oracle.nodes, 2);
        assert_eq!(oracle.backtracks, 1);
        assert_eq!(oracle.propagations, 1);
        assert_eq!(oracle.conflicts, 1);
        assert_eq!(oracle.max_depth, 4);
        assert_eq!(oracle.solve_duration, Duration::from_millis(5));
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = EngineStatistics {
            nodes_explored: u64::MAX,
            ..Default::default()
        };
        stats.on_node_explored();
        assert_eq!(stats.nodes_explored, u64::MAX);
    }
}
