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

/// Counters reported by a backend after one `solve`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OracleStatistics {
    /// Search nodes (decisions) explored.
    pub nodes: u64,
    /// Decisions undone after a conflict.
    pub backtracks: u64,
    /// Variables fixed by propagation.
    pub propagations: u64,
    /// Dead ends reached.
    pub conflicts: u64,
    /// Deepest decision level reached.
    pub max_depth: u64,
    /// Wall-clock time of the solve.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for OracleStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Oracle Statistics:")?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Backtracks: {}", self.backtracks)?;
        writeln!(f, "  Propagations: {}", self.propagations)?;
        writeln!(f, "  Conflicts: {}", self.conflicts)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `OracleStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OracleStatisticsBuilder {
    statistics: OracleStatistics,
}

impl OracleStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn nodes(mut self, nodes: u64) -> Self {
        self.statistics.nodes = nodes;
        self
    }

    #[inline]
    pub fn backtracks(mut self, backtracks: u64) -> Self {
        self.statistics.backtracks = backtracks;
        self
    }

    #[inline]
    pub fn propagations(mut self, propagations: u64) -> Self {
        self.statistics.propagations = propagations;
        self
    }

    #[inline]
    pub fn conflicts(mut self, conflicts: u64) -> Self {
        self.statistics.conflicts = conflicts;
        self
    }

    #[inline]
    pub fn max_depth(mut self, max_depth: u64) -> Self {
        self.statistics.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.statistics.solve_duration = solve_duration;
        self
    }

    #[inline]
    pub fn build(self) -> OracleStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builder_sets_every_field() {
        let stats = OracleStatisticsBuilder::new()
            .nodes(10)
            .backtracks(4)
            .propagations(31)
            .conflicts(5)
            .max_depth(7)
            .solve_duration(Duration::from_millis(1500))
            .build();

        assert_eq!(stats.nodes, 10);
        assert_eq!(stats.backtracks, 4);
        assert_eq!(stats.propagations, 31);
        assert_eq!(stats.conflicts, 5);
        assert_eq!(stats.max_depth, 7);
        assert_eq!(stats.solve_duration, Duration::from_millis(1500));
    }

    #[test]
    fn test_display_lists_fields() {
        let rendered = OracleStatisticsBuilder::new()
            .nodes(3)
            .solve_duration(Duration::from_millis(1234))
            .build()
            .to_string();
        assert!(rendered.starts_with("Oracle Statistics:"));
        assert!(rendered.contains("Nodes: 3"));
        assert!(rendered.contains("Solve Duration (secs): 1.234"));
    }
}
