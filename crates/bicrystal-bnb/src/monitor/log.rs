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

use crate::{
    branching::Decision, monitor::tree_search_monitor::TreeSearchMonitor, state::SearchState,
    stats::EngineStatistics,
};
use bicrystal_model::program::BinaryProgram;
use bicrystal_search::{assignment::Assignment, monitor::search_monitor::SearchCommand};
use std::time::{Duration, Instant};
use tracing::debug;

/// Emits a `debug!` progress line at most once per `log_interval`.
///
/// The clock is read only on steps where `nodes & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
        }
    }

    fn log_line(&mut self, state: &SearchState, statistics: &EngineStatistics) {
        let now = Instant::now();
        debug!(
            elapsed_secs = now.duration_since(self.start_time).as_secs_f32(),
            nodes = statistics.nodes_explored,
            assigned = state.num_assigned(),
            max_depth = statistics.max_depth,
            backtracks = statistics.backtracks,
            conflicts = statistics.conflicts,
            "search progress"
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {:.1}s, clock_check_mask: {})",
            self.log_interval.as_secs_f32(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, program: &BinaryProgram, _statistics: &EngineStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        debug!(
            variables = program.num_variables(),
            constraints = program.num_constraints(),
            "search started"
        );
    }

    fn on_step(&mut self, state: &SearchState, statistics: &EngineStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, statistics);
        }
    }

    fn on_descend(&mut self, _state: &SearchState, _decision: Decision, _statistics: &EngineStatistics) {}

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &EngineStatistics) {}

    fn on_solution_found(&mut self, _assignment: &Assignment, statistics: &EngineStatistics) {
        debug!(nodes = statistics.nodes_explored, "solution found");
    }

    fn on_exit_search(&mut self, statistics: &EngineStatistics) {
        debug!(
            nodes = statistics.nodes_explored,
            backtracks = statistics.backtracks,
            propagations = statistics.propagations,
            conflicts = statistics.conflicts,
            elapsed = ?statistics.time_total,
            "search finished"
        );
    }

    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &EngineStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
}
