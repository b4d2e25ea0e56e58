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

use crate::{branching::Decision, state::SearchState, stats::EngineStatistics};
use bicrystal_model::program::BinaryProgram;
use bicrystal_search::{assignment::Assignment, monitor::search_monitor::SearchCommand};

/// Lifecycle hooks of the backtracking engine.
pub trait TreeSearchMonitor {
    fn name(&self) -> &str;

    fn on_enter_search(&mut self, program: &BinaryProgram, statistics: &EngineStatistics);

    fn on_step(&mut self, state: &SearchState, statistics: &EngineStatistics);

    fn on_descend(&mut self, state: &SearchState, decision: Decision, statistics: &EngineStatistics);

    fn on_backtrack(&mut self, state: &SearchState, statistics: &EngineStatistics);

    fn on_solution_found(&mut self, assignment: &Assignment, statistics: &EngineStatistics);

    fn on_exit_search(&mut self, statistics: &EngineStatistics);

    fn search_command(&mut self, state: &SearchState, statistics: &EngineStatistics)
    -> SearchCommand;
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
