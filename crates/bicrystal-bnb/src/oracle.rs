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

//! # Backtracking Oracle
//!
//! `BacktrackingOracle` owns a `BinaryProgram` and decides it on demand.
//! Every `solve` is an independent search: the partial assignment is
//! rebuilt from the current bounds, all rows are propagated at the root,
//! and the search then alternates between descending on a decision and
//! backtracking over the trail.
//!
//! ```rust
//! use bicrystal_bnb::oracle::BacktrackingOracle;
//! use bicrystal_model::program::{BinaryProgram, Sense, Term};
//! use bicrystal_search::oracle::FeasibilityOracle;
//!
//! let mut program = BinaryProgram::new();
//! let a = program.add_variable();
//! let b = program.add_variable();
//! let row = program.add_constraint(vec![Term::new(a, 1), Term::new(b, 1)], Sense::Equal, 2);
//!
//! let mut oracle = BacktrackingOracle::new(program);
//! assert!(oracle.solve().is_optimal());
//!
//! oracle.set_constraint_rhs(row, 3);
//! assert!(oracle.solve().is_infeasible());
//! ```

use crate::{
    branching::{Decision, FirstUnassigned, VariableSelector},
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogMonitor,
        tree_search_monitor::TreeSearchMonitor, wrapper::WrapperMonitor,
    },
    propagation::Propagator,
    stack::DecisionStack,
    state::SearchState,
    stats::EngineStatistics,
    trail::SearchTrail,
};
use bicrystal_model::{
    index::{ConstraintIndex, VariableIndex},
    program::BinaryProgram,
};
use bicrystal_search::{
    assignment::Assignment,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor,
        search_monitor::SearchCommand, time_limit::TimeLimitMonitor,
    },
    oracle::FeasibilityOracle,
    result::OracleOutcome,
};
use std::{
    sync::{Arc, atomic::AtomicBool},
    time::{Duration, Instant},
};

/// Exhaustive 0/1 feasibility oracle.
pub struct BacktrackingOracle {
    program: BinaryProgram,
    propagator: Propagator,
    selector: FirstUnassigned,
    state: SearchState,
    trail: SearchTrail,
    stack: DecisionStack,
    time_limit: Option<Duration>,
    interrupt: Option<Arc<AtomicBool>>,
    log_interval: Option<Duration>,
    clock_check_mask: u64,
}

impl std::fmt::Debug for BacktrackingOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacktrackingOracle")
            .field("num_variables", &self.program.num_variables())
            .field("num_constraints", &self.program.num_constraints())
            .field("selector", &self.selector.name())
            .field("time_limit", &self.time_limit)
            .field("interrupt", &self.interrupt.is_some())
            .field("log_interval", &self.log_interval)
            .finish()
    }
}

impl BacktrackingOracle {
    const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    /// Takes ownership of `program`. Terms are indexed once here; later
    /// changes go through `set_constraint_rhs` and `set_variable_lower_bound`.
    pub fn new(program: BinaryProgram) -> Self {
        let propagator = Propagator::new(&program);
        let state = SearchState::new(&program);
        let mut trail = SearchTrail::new();
        trail.ensure_capacity(program.num_variables());
        let mut stack = DecisionStack::new();
        stack.ensure_capacity(program.num_variables());

        Self {
            program,
            propagator,
            selector: FirstUnassigned,
            state,
            trail,
            stack,
            time_limit: None,
            interrupt: None,
            log_interval: None,
            clock_check_mask: Self::DEFAULT_CLOCK_CHECK_MASK,
        }
    }

    /// Bounds every `solve` by `time_limit` of wall-clock time.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Stops any running `solve` once `flag` is raised.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Logs search progress through `tracing` every `interval`.
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    /// The clock is read only on steps whose count has no bit of `mask` set.
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Runs one search with an explicit monitor.
    pub fn solve_with_monitor<M>(&mut self, monitor: &mut M) -> OracleOutcome
    where
        M: TreeSearchMonitor,
    {
        SearchSession {
            program: &self.program,
            propagator: &mut self.propagator,
            selector: &mut self.selector,
            state: &mut self.state,
            trail: &mut self.trail,
            stack: &mut self.stack,
            monitor,
            stats: EngineStatistics::default(),
            start_time: Instant::now(),
        }
        .run()
    }
}

impl FeasibilityOracle for BacktrackingOracle {
    fn name(&self) -> &str {
        "BacktrackingOracle"
    }

    #[inline]
    fn program(&self) -> &BinaryProgram {
        &self.program
    }

    #[inline]
    fn set_constraint_rhs(&mut self, constraint: ConstraintIndex, rhs: i64) {
        self.program.set_rhs(constraint, rhs);
    }

    #[inline]
    fn set_variable_lower_bound(&mut self, variable: VariableIndex, bound: bool) {
        self.program.set_lower_bound(variable, bound);
    }

    fn solve(&mut self) -> OracleOutcome {
        let interrupt = self.interrupt.clone();
        let mut limits = CompositeMonitor::new();
        if let Some(limit) = self.time_limit {
            limits.add_monitor(TimeLimitMonitor::with_clock_check_mask(
                limit,
                self.clock_check_mask,
            ));
        }
        if let Some(flag) = interrupt.as_deref() {
            limits.add_monitor(InterruptMonitor::new(flag));
        }

        let mut monitor = CompositeTreeSearchMonitor::new();
        monitor.add_monitor(WrapperMonitor::new(&mut limits));
        if let Some(interval) = self.log_interval {
            monitor.add_monitor(LogMonitor::new(interval, 4095));
        }

        self.solve_with_monitor(&mut monitor)
    }
}

enum Termination {
    Solution(Vec<bool>),
    Infeasible,
    Aborted(String),
}

/// One run of the search over borrowed engine buffers.
struct SearchSession<'a, M> {
    program: &'a BinaryProgram,
    propagator: &'a mut Propagator,
    selector: &'a mut dyn VariableSelector,
    state: &'a mut SearchState,
    trail: &'a mut SearchTrail,
    stack: &'a mut DecisionStack,
    monitor: &'a mut M,
    stats: EngineStatistics,
    start_time: Instant,
}

impl<M> SearchSession<'_, M>
where
    M: TreeSearchMonitor,
{
    fn run(mut self) -> OracleOutcome {
        self.monitor.on_enter_search(self.program, &self.stats);

        let termination = if self.initialize() {
            self.search()
        } else {
            Termination::Infeasible
        };

        self.stats.set_total_time(self.start_time.elapsed());
        let outcome = match termination {
            Termination::Solution(bits) => {
                debug_assert!(
                    self.program.is_satisfied_by(&bits),
                    "backtracking search returned an assignment violating {:?}",
                    self.program.violated_constraints(&bits)
                );
                let assignment = Assignment::from_bits(&bits);
                self.monitor.on_solution_found(&assignment, &self.stats);
                OracleOutcome::optimal(assignment, self.stats.to_oracle_statistics())
            }
            Termination::Infeasible => {
                OracleOutcome::infeasible(self.stats.to_oracle_statistics())
            }
            Termination::Aborted(reason) => {
                OracleOutcome::aborted(reason, self.stats.to_oracle_statistics())
            }
        };
        self.monitor.on_exit_search(&self.stats);
        outcome
    }

    /// Applies the bounds and propagates every row at the root. Returns
    /// `false` if the root is already infeasible.
    fn initialize(&mut self) -> bool {
        self.state.reset(self.program);
        self.trail.clear();
        self.stack.clear();
        self.propagator.clear_queue();

        self.trail.push_frame();
        self.stats.on_node_explored();

        for variable in VariableIndex::range(self.program.num_variables()) {
            let lower = self.program.lower_bound(variable);
            let upper = self.program.upper_bound(variable);
            if lower && !upper {
                return false;
            }
            if lower || !upper {
                self.propagator
                    .assign(self.state, self.trail, variable, lower);
            }
        }

        self.propagator.enqueue_all(self.program.num_constraints());
        if self
            .propagator
            .propagate(self.program, self.state, self.trail, &mut self.stats)
            .is_err()
        {
            self.stats.on_conflict();
            return false;
        }

        self.stack.push_frame();
        self.branch();
        true
    }

    fn search(&mut self) -> Termination {
        if self.state.is_complete() {
            return Termination::Solution(self.state.to_bits());
        }

        loop {
            self.monitor.on_step(self.state, &self.stats);
            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(self.state, &self.stats)
            {
                return Termination::Aborted(reason);
            }

            let Some(decision) = self.stack.pop() else {
                if self.stack.depth() <= 1 {
                    return Termination::Infeasible;
                }
                self.backtrack_step();
                continue;
            };

            self.descend(decision);
            if self
                .propagator
                .propagate(self.program, self.state, self.trail, &mut self.stats)
                .is_err()
            {
                self.stats.on_conflict();
                self.backtrack_step();
                continue;
            }

            if self.state.is_complete() {
                return Termination::Solution(self.state.to_bits());
            }
            self.branch();
        }
    }

    /// Opens both alternatives for the next free variable, value one on top.
    fn branch(&mut self) {
        if let Some(variable) = self.selector.select(self.state) {
            self.stack.push(Decision::new(variable, false));
            self.stack.push(Decision::new(variable, true));
        }
    }

    fn descend(&mut self, decision: Decision) {
        self.trail.push_frame();
        self.stack.push_frame();
        self.stats.on_node_explored();
        self.stats.on_depth_update(self.stack.depth() as u64);

        self.propagator
            .assign(self.state, self.trail, decision.variable(), decision.value());
        self.monitor.on_descend(self.state, decision, &self.stats);
    }

    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        let propagator = &*self.propagator;
        let state = &mut *self.state;
        self.trail.backtrack(|variable| propagator.unassign(state, variable));
        self.stack.pop_frame();
        self.monitor.on_backtrack(self.state, &self.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bicrystal_model::{
        builder::{LatticeModelBuilder, LatticeModelLayout},
        program::{Sense, Term},
        triple::CounterTriple,
        witness::WitnessGrid,
    };
    use bicrystal_search::result::{OracleResult, TerminationReason};
    use proptest::prelude::*;

    fn v(i: usize) -> VariableIndex {
        VariableIndex::new(i)
    }

    fn program_with(rows: &[(Vec<(usize, i64)>, Sense, i64)], num_variables: usize) -> BinaryProgram {
        let mut program = BinaryProgram::new();
        for _ in 0..num_variables {
            program.add_variable();
        }
        for (terms, sense, rhs) in rows {
            program.add_constraint(
                terms.iter().map(|&(i, a)| Term::new(v(i), a)).collect(),
                *sense,
                *rhs,
            );
        }
        program
    }

    fn brute_force_feasible(program: &BinaryProgram) -> bool {
        let n = program.num_variables();
        (0u32..(1 << n)).any(|mask| {
            let bits: Vec<bool> = (0..n).map(|i| mask & (1 << i) != 0).collect();
            program.is_satisfied_by(&bits)
        })
    }

    #[test]
    fn test_empty_program_is_feasible() {
        let mut oracle = BacktrackingOracle::new(BinaryProgram::new());
        let outcome = oracle.solve();
        assert!(outcome.is_optimal());
        assert_eq!(outcome.reason, TerminationReason::OptimalityProven);
    }

    #[test]
    fn test_exactly_k_of_n() {
        let row = (vec![(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)], Sense::Equal, 2);
        let mut oracle = BacktrackingOracle::new(program_with(&[row], 5));
        match oracle.solve().result {
            OracleResult::Optimal(assignment) => {
                let ones = assignment.to_bits().iter().filter(|&&b| b).count();
                assert_eq!(ones, 2);
            }
            other => panic!("expected Optimal, got {other}"),
        }

        oracle.set_constraint_rhs(ConstraintIndex::new(0), 6);
        let outcome = oracle.solve();
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.reason, TerminationReason::InfeasibilityProven);
    }

    #[test]
    fn test_lower_bounds_are_respected_and_resettable() {
        // x0 + x1 <= 1
        let row = (vec![(0, 1), (1, 1)], Sense::LessEqual, 1);
        let mut oracle = BacktrackingOracle::new(program_with(&[row], 2));
        oracle.set_variable_lower_bound(v(1), true);
        match oracle.solve().result {
            OracleResult::Optimal(assignment) => {
                assert!(assignment.is_one(v(1)));
                assert!(!assignment.is_one(v(0)));
            }
            other => panic!("expected Optimal, got {other}"),
        }

        oracle.set_variable_lower_bound(v(0), true);
        assert!(oracle.solve().is_infeasible());

        oracle.set_variable_lower_bound(v(0), false);
        oracle.set_variable_lower_bound(v(1), false);
        assert!(oracle.solve().is_optimal());
    }

    #[test]
    fn test_parity_needs_backtracking() {
        // x0 + x1 + x2 = 2 and x0 + x1 <= 1 and x2 + x3 >= 2 and x0 - x1 >= 0.
        let rows = [
            (vec![(0, 1), (1, 1), (2, 1)], Sense::Equal, 2),
            (vec![(0, 1), (1, 1)], Sense::LessEqual, 1),
            (vec![(2, 1), (3, 1)], Sense::GreaterEqual, 2),
            (vec![(0, 1), (1, -1)], Sense::GreaterEqual, 0),
        ];
        let mut oracle = BacktrackingOracle::new(program_with(&rows, 4));
        match oracle.solve().result {
            OracleResult::Optimal(assignment) => {
                assert_eq!(assignment.to_bits(), vec![true, false, true, true]);
            }
            other => panic!("expected Optimal, got {other}"),
        }
    }

    #[test]
    fn test_raised_interrupt_aborts_with_unknown() {
        let flag = Arc::new(AtomicBool::new(true));
        let row = (vec![(0, 1), (1, 1), (2, 1)], Sense::Equal, 1);
        let mut oracle =
            BacktrackingOracle::new(program_with(&[row], 3)).with_interrupt(flag.clone());
        let outcome = oracle.solve();
        assert!(outcome.is_unknown());
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("interrupt signal received".to_string())
        );
    }

    #[test]
    fn test_exhausted_time_limit_aborts_with_unknown() {
        let row = (vec![(0, 1), (1, 1), (2, 1)], Sense::Equal, 1);
        let mut oracle =
            BacktrackingOracle::new(program_with(&[row], 3))
            .with_time_limit(Duration::ZERO)
            .with_clock_check_mask(0);
        let outcome = oracle.solve();
        assert!(outcome.is_unknown());
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("time limit reached".to_string())
        );
    }

    #[test]
    fn test_progress_logging_does_not_change_verdict() {
        let (layout, oracle) = lattice_oracle(4, 3);
        let mut oracle = oracle.with_log_interval(Duration::ZERO);
        assert!(decide(&layout, &mut oracle, CounterTriple::new(3, 1, 1)).is_optimal());
        assert!(decide(&layout, &mut oracle, CounterTriple::new(0, 0, 0)).is_infeasible());
    }

    fn lattice_oracle(side: usize, num_solute: usize) -> (LatticeModelLayout, BacktrackingOracle) {
        let model = LatticeModelBuilder::new(side, num_solute)
            .build()
            .expect("valid lattice parameters");
        let (layout, program) = model.into_parts();
        (layout, BacktrackingOracle::new(program))
    }

    fn decide(
        layout: &LatticeModelLayout,
        oracle: &mut BacktrackingOracle,
        triple: CounterTriple,
    ) -> OracleOutcome {
        for (row, rhs) in layout.counter_targets(triple) {
            oracle.set_constraint_rhs(row, rhs);
        }
        oracle.solve()
    }

    #[test]
    fn test_small_lattice_queries() {
        let (layout, mut oracle) = lattice_oracle(4, 3);

        assert!(decide(&layout, &mut oracle, CounterTriple::new(0, 0, 0)).is_infeasible());
        assert!(decide(&layout, &mut oracle, CounterTriple::new(2, 1, 0)).is_optimal());
        assert!(decide(&layout, &mut oracle, CounterTriple::new(3, 2, 1)).is_optimal());
        assert!(decide(&layout, &mut oracle, CounterTriple::new(0, 0, 4)).is_infeasible());
    }

    #[test]
    fn test_lattice_solution_reproduces_its_counters() {
        let (layout, mut oracle) = lattice_oracle(4, 3);
        let triple = CounterTriple::new(2, 1, 1);
        let OracleResult::Optimal(assignment) = decide(&layout, &mut oracle, triple).result else {
            panic!("expected (2, 1, 1) to be feasible");
        };

        let lattice = layout.lattice();
        let mut grid = WitnessGrid::new(lattice.side());
        for site in lattice.sites() {
            grid.set_site(site, assignment.is_one(layout.site_variable(site)));
        }
        assert_eq!(grid.num_occupied(), 3);
        assert_eq!(grid.counters(lattice), triple);
    }

    #[test]
    fn test_hint_bounds_keep_feasible_triple_feasible() {
        let (layout, mut oracle) = lattice_oracle(4, 3);
        let [first, second] = layout.hint_sites();
        oracle.set_variable_lower_bound(layout.site_variable(first), true);
        oracle.set_variable_lower_bound(layout.site_variable(second), true);
        assert!(decide(&layout, &mut oracle, CounterTriple::new(2, 1, 0)).is_optimal());
    }

    fn row_strategy(n: usize) -> impl Strategy<Value = (Vec<(usize, i64)>, Sense, i64)> {
        (
            prop::collection::vec((0..n, -3i64..=3), 1..=n),
            prop_oneof![
                Just(Sense::Equal),
                Just(Sense::LessEqual),
                Just(Sense::GreaterEqual)
            ],
            -4i64..=6,
        )
    }

    fn program_strategy() -> impl Strategy<Value = BinaryProgram> {
        (1usize..=7).prop_flat_map(|n| {
            prop::collection::vec(row_strategy(n), 0..6).prop_map(move |rows| program_with(&rows, n))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_agrees_with_brute_force(program in program_strategy()) {
            let expected = brute_force_feasible(&program);
            let mut oracle = BacktrackingOracle::new(program.clone());
            let outcome = oracle.solve();
            match outcome.result {
                OracleResult::Optimal(assignment) => {
                    prop_assert!(expected);
                    prop_assert!(program.is_satisfied_by(&assignment.to_bits()));
                }
                OracleResult::Infeasible => prop_assert!(!expected),
                OracleResult::Unknown => prop_assert!(false, "complete search returned Unknown"),
            }
        }
    }
}
