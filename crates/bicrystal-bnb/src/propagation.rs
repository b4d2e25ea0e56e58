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

//! # Row Propagation
//!
//! For a row `Σ aᵢ·xᵢ ⋈ b` let `min` and `max` be the smallest and largest
//! activity still reachable under the current partial assignment.
//!
//! - Upper side (`<=` and `=`): `min > b` is a conflict. A free `xᵢ` with
//!   `aᵢ > 0` and `min + aᵢ > b` must be zero; with `aᵢ < 0` and
//!   `min - aᵢ > b` it must be one.
//! - Lower side (`>=` and `=`): `max < b` is a conflict. A free `xᵢ` with
//!   `aᵢ > 0` and `max - aᵢ < b` must be one; with `aᵢ < 0` and
//!   `max + aᵢ < b` it must be zero.
//!
//! Fixing a variable re-queues every row it occurs in, and the queue is
//! drained to a fixpoint. Once all variables are fixed `min == max`, so a
//! complete assignment without conflict satisfies every row.

use crate::{stats::EngineStatistics, state::SearchState, trail::SearchTrail};
use bicrystal_model::{
    index::{ConstraintIndex, VariableIndex},
    program::BinaryProgram,
};
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// A variable's appearance in a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub row: ConstraintIndex,
    pub coefficient: i64,
}

/// A row whose activity range cannot meet its right-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub row: ConstraintIndex,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conflict on {}", self.row)
    }
}

#[derive(Debug, Clone)]
pub struct Propagator {
    occurrences: Vec<SmallVec<[Occurrence; 4]>>,
    queue: VecDeque<ConstraintIndex>,
    queued: FixedBitSet,
}

impl Propagator {
    /// Builds the occurrence lists of `program`. The term structure must not
    /// change afterwards; right-hand sides and bounds may.
    pub fn new(program: &BinaryProgram) -> Self {
        let mut occurrences = vec![SmallVec::new(); program.num_variables()];
        for (r, row) in program.constraints().iter().enumerate() {
            for term in row.terms() {
                if term.coefficient != 0 {
                    occurrences[term.variable.get()].push(Occurrence {
                        row: ConstraintIndex::new(r),
                        coefficient: term.coefficient,
                    });
                }
            }
        }

        Self {
            occurrences,
            queue: VecDeque::with_capacity(program.num_constraints()),
            queued: FixedBitSet::with_capacity(program.num_constraints()),
        }
    }

    /// Rows containing `variable`.
    #[inline]
    pub fn occurrences(&self, variable: VariableIndex) -> &[Occurrence] {
        &self.occurrences[variable.get()]
    }

    #[inline]
    fn enqueue(&mut self, row: ConstraintIndex) {
        if !self.queued.put(row.get()) {
            self.queue.push_back(row);
        }
    }

    /// Queues every row, as needed at the root of a search.
    pub fn enqueue_all(&mut self, num_rows: usize) {
        for r in 0..num_rows {
            self.enqueue(ConstraintIndex::new(r));
        }
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.queued.clear();
    }

    /// Fixes `variable`, records it on the trail, updates the activity ranges
    /// and queues the affected rows.
    pub fn assign(
        &mut self,
        state: &mut SearchState,
        trail: &mut SearchTrail,
        variable: VariableIndex,
        value: bool,
    ) {
        state.fix(variable, value);
        trail.push(variable);

        for k in 0..self.occurrences[variable.get()].len() {
            let Occurrence { row, coefficient } = self.occurrences[variable.get()][k];
            let (min_delta, max_delta) = match (value, coefficient > 0) {
                (true, true) => (coefficient, 0),
                (true, false) => (0, coefficient),
                (false, true) => (0, -coefficient),
                (false, false) => (-coefficient, 0),
            };
            state.shift_activity(row, min_delta, max_delta);
            self.enqueue(row);
        }
    }

    /// Frees `variable` and restores the activity ranges.
    pub fn unassign(&self, state: &mut SearchState, variable: VariableIndex) {
        let value = state.free(variable);
        for &Occurrence { row, coefficient } in &self.occurrences[variable.get()] {
            let (min_delta, max_delta) = match (value, coefficient > 0) {
                (true, true) => (-coefficient, 0),
                (true, false) => (0, -coefficient),
                (false, true) => (0, coefficient),
                (false, false) => (coefficient, 0),
            };
            state.shift_activity(row, min_delta, max_delta);
        }
    }

    /// Drains the queue to a fixpoint.
    ///
    /// # Errors
    ///
    /// Returns the first row found unsatisfiable; the queue is emptied and
    /// fixings made so far stay on the trail for the caller to undo.
    pub fn propagate(
        &mut self,
        program: &BinaryProgram,
        state: &mut SearchState,
        trail: &mut SearchTrail,
        stats: &mut EngineStatistics,
    ) -> Result<(), Conflict> {
        while let Some(row) = self.queue.pop_front() {
            self.queued.set(row.get(), false);
            if let Err(conflict) = self.propagate_row(program, state, trail, stats, row) {
                self.clear_queue();
                return Err(conflict);
            }
        }
        Ok(())
    }

    fn propagate_row(
        &mut self,
        program: &BinaryProgram,
        state: &mut SearchState,
        trail: &mut SearchTrail,
        stats: &mut EngineStatistics,
        row: ConstraintIndex,
    ) -> Result<(), Conflict> {
        let constraint = program.constraint(row);
        let rhs = constraint.rhs();
        let upper = constraint.sense().has_upper_side();
        let lower = constraint.sense().has_lower_side();

        for term in constraint.terms() {
            if (upper && state.min_activity(row) > rhs) || (lower && state.max_activity(row) < rhs)
            {
                return Err(Conflict { row });
            }
            if term.coefficient == 0 || state.is_assigned(term.variable) {
                continue;
            }

            let a = term.coefficient;
            let (min, max) = (state.min_activity(row), state.max_activity(row));
            let forced = if upper && a > 0 && min + a > rhs {
                Some(false)
            } else if upper && a < 0 && min - a > rhs {
                Some(true)
            } else if lower && a > 0 && max - a < rhs {
                Some(true)
            } else if lower && a < 0 && max + a < rhs {
                Some(false)
            } else {
                None
            };

            if let Some(value) = forced {
                stats.on_propagation();
                self.assign(state, trail, term.variable, value);
            }
        }

        if (upper && state.min_activity(row) > rhs) || (lower && state.max_activity(row) < rhs) {
            return Err(Conflict { row });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bicrystal_model::program::{Sense, Term};

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

    struct Fixture {
        program: BinaryProgram,
        state: SearchState,
        trail: SearchTrail,
        stats: EngineStatistics,
        propagator: Propagator,
    }

    impl Fixture {
        fn new(program: BinaryProgram) -> Self {
            let state = SearchState::new(&program);
            let propagator = Propagator::new(&program);
            let mut trail = SearchTrail::new();
            trail.push_frame();
            Self {
                program,
                state,
                trail,
                stats: EngineStatistics::default(),
                propagator,
            }
        }

        fn assign(&mut self, i: usize, value: bool) {
            self.propagator
                .assign(&mut self.state, &mut self.trail, v(i), value);
        }

        fn propagate(&mut self) -> Result<(), Conflict> {
            self.propagator.enqueue_all(self.program.num_constraints());
            self.propagator.propagate(
                &self.program,
                &mut self.state,
                &mut self.trail,
                &mut self.stats,
            )
        }
    }

    #[test]
    fn test_cardinality_row_fixes_the_rest_to_zero() {
        // x0 + x1 + x2 = 1 with x0 = 1.
        let mut f = Fixture::new(program_with(&[(vec![(0, 1), (1, 1), (2, 1)], Sense::Equal, 1)], 3));
        f.assign(0, true);
        assert_eq!(f.propagate(), Ok(()));
        assert_eq!(f.state.value(v(1)), Some(false));
        assert_eq!(f.state.value(v(2)), Some(false));
        assert_eq!(f.stats.propagations, 2);
    }

    #[test]
    fn test_and_linearization_propagates_both_ways() {
        // y <= a, y <= b, y >= a + b - 1 over (a, b, y) = (0, 1, 2).
        let rows = [
            (vec![(2, 1), (0, -1)], Sense::LessEqual, 0),
            (vec![(2, 1), (1, -1)], Sense::LessEqual, 0),
            (vec![(2, 1), (0, -1), (1, -1)], Sense::GreaterEqual, -1),
        ];

        let mut f = Fixture::new(program_with(&rows, 3));
        f.assign(0, true);
        f.assign(1, true);
        assert_eq!(f.propagate(), Ok(()));
        assert_eq!(f.state.value(v(2)), Some(true));

        let mut f = Fixture::new(program_with(&rows, 3));
        f.assign(2, true);
        assert_eq!(f.propagate(), Ok(()));
        assert_eq!(f.state.value(v(0)), Some(true));
        assert_eq!(f.state.value(v(1)), Some(true));

        let mut f = Fixture::new(program_with(&rows, 3));
        f.assign(0, false);
        assert_eq!(f.propagate(), Ok(()));
        assert_eq!(f.state.value(v(2)), Some(false));
        assert_eq!(f.state.value(v(1)), None);
    }

    #[test]
    fn test_conflict_is_reported() {
        let mut f = Fixture::new(program_with(&[(vec![(0, 1), (1, 1)], Sense::GreaterEqual, 3)], 2));
        assert_eq!(
            f.propagate(),
            Err(Conflict {
                row: ConstraintIndex::new(0)
            })
        );
    }

    #[test]
    fn test_unassign_restores_activity() {
        let mut f = Fixture::new(program_with(&[(vec![(0, 2), (1, -3)], Sense::LessEqual, 5)], 2));
        let row = ConstraintIndex::new(0);
        let before = (f.state.min_activity(row), f.state.max_activity(row));
        f.assign(0, true);
        f.assign(1, false);
        assert_eq!((f.state.min_activity(row), f.state.max_activity(row)), (2, 2));

        let Fixture {
            trail,
            propagator,
            state,
            ..
        } = &mut f;
        trail.backtrack(|x| propagator.unassign(state, x));
        assert_eq!((f.state.min_activity(row), f.state.max_activity(row)), before);
        assert_eq!(f.state.num_assigned(), 0);
    }
}
