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

//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget on a single `solve`. The clock is read only
//! when `steps & clock_check_mask == 0`; the default mask (`0x3FFF`) reads it
//! about every 16k nodes. The budget restarts in `on_enter_search`, so one
//! monitor can be reused across queries.
//!
//! ```rust
//! use bicrystal_search::monitor::time_limit::TimeLimitMonitor;
//! use bicrystal_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
//! use std::time::Duration;
//!
//! let mut monitor = TimeLimitMonitor::new(Duration::from_secs(5));
//! monitor.on_step();
//! assert_eq!(monitor.search_command(), SearchCommand::Continue);
//! ```

use crate::{
    assignment::Assignment,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
};
use bicrystal_model::program::BinaryProgram;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: Duration,
    start_time: Instant,
}

impl TimeLimitMonitor {
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _program: &BinaryProgram) {
        self.start_time = Instant::now();
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _assignment: &Assignment) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mask() {
        assert_eq!(TimeLimitMonitor::DEFAULT_STEP_CLOCK_CHECK_MASK, 0x3FFF);
    }

    #[test]
    fn test_terminates_after_limit_on_check_step() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_millis(10));
        monitor.start_time = Instant::now() - Duration::from_millis(50);
        monitor.steps = 0;
        match monitor.search_command() {
            SearchCommand::Terminate(reason) => assert!(reason.contains("time limit")),
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_clock_between_check_steps() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_millis(1));
        monitor.start_time = Instant::now() - Duration::from_millis(50);
        monitor.steps = 1;
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_zero_mask_checks_every_step() {
        let mut monitor = TimeLimitMonitor::with_clock_check_mask(Duration::from_millis(1), 0);
        monitor.start_time = Instant::now() - Duration::from_millis(50);
        monitor.steps = 12345;
        assert!(matches!(
            monitor.search_command(),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_enter_search_restarts_the_budget() {
        let mut monitor = TimeLimitMonitor::with_clock_check_mask(Duration::from_secs(60), 0);
        monitor.start_time = Instant::now() - Duration::from_secs(120);
        monitor.steps = 77;
        monitor.on_enter_search(&BinaryProgram::new());
        assert_eq!(monitor.steps, 0);
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }
}
