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

use crate::enumerate::ConfigurationRecord;
use bicrystal_core::num::saturating::SaturatingAddVal;
use serde::Serialize;
use std::time::Duration;

/// Counters of one exploration run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExplorationStatistics {
    /// Oracle queries spent finding the ceiling.
    pub ceiling_queries: u64,
    /// Oracle queries spent classifying candidates.
    pub enumeration_queries: u64,
    pub feasible: u64,
    pub infeasible: u64,
    /// Worker threads used for enumeration.
    pub workers: usize,
    pub elapsed: Duration,
}

impl ExplorationStatistics {
    #[inline]
    pub fn on_ceiling_queries(&mut self, queries: u64) {
        self.ceiling_queries = self.ceiling_queries.saturating_add_val(queries);
    }

    /// Counts one query per record and splits them by verdict.
    pub fn on_records(&mut self, records: &[ConfigurationRecord]) {
        for record in records {
            self.enumeration_queries = self.enumeration_queries.saturating_add_val(1);
            if record.is_feasible() {
                self.feasible = self.feasible.saturating_add_val(1);
            } else {
                self.infeasible = self.infeasible.saturating_add_val(1);
            }
        }
    }

    #[inline]
    pub fn total_queries(&self) -> u64 {
        self.ceiling_queries.saturating_add_val(self.enumeration_queries)
    }
}

impl std::fmt::Display for ExplorationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Exploration Statistics:")?;
        writeln!(f, "  Ceiling queries:     {}", self.ceiling_queries)?;
        writeln!(f, "  Enumeration queries: {}", self.enumeration_queries)?;
        writeln!(f, "  Feasible:            {}", self.feasible)?;
        writeln!(f, "  Infeasible:          {}", self.infeasible)?;
        writeln!(f, "  Workers:             {}", self.workers)?;
        writeln!(f, "  Elapsed:             {:.2?}", self.elapsed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bicrystal_model::{triple::CounterTriple, witness::WitnessGrid};

    #[test]
    fn test_records_split_by_verdict() {
        let records = vec![
            ConfigurationRecord {
                triple: CounterTriple::new(0, 0, 0),
                witness: None,
            },
            ConfigurationRecord {
                triple: CounterTriple::new(1, 0, 0),
                witness: Some(WitnessGrid::new(2)),
            },
            ConfigurationRecord {
                triple: CounterTriple::new(1, 0, 1),
                witness: None,
            },
        ];

        let mut stats = ExplorationStatistics::default();
        stats.on_ceiling_queries(5);
        stats.on_records(&records);
        assert_eq!(stats.enumeration_queries, 3);
        assert_eq!(stats.feasible, 1);
        assert_eq!(stats.infeasible, 2);
        assert_eq!(stats.total_queries(), 8);
        assert!(stats.to_string().starts_with("Exploration Statistics:"));
    }
}
