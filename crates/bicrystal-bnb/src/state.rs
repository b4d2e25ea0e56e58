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

use bicrystal_model::{
    index::{ConstraintIndex, VariableIndex},
    program::BinaryProgram,
};
use fixedbitset::FixedBitSet;

/// A partial 0/1 assignment together with the reachable activity range of
/// every row.
///
/// For row `r`, `min_activity(r)` is the activity if every free variable
/// takes the value that minimizes it, `max_activity(r)` likewise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    assigned: FixedBitSet,
    ones: FixedBitSet,
    num_assigned: usize,
    min_activity: Vec<i64>,
    max_activity: Vec<i64>,
}

impl SearchState {
    pub fn new(program: &BinaryProgram) -> Self {
        let mut state = Self::default();
        state.reset(program);
        state
    }

    /// Unassigns every variable and recomputes the activity ranges.
    pub fn reset(&mut self, program: &BinaryProgram) {
        let n = program.num_variables();
        if self.assigned.len() == n {
            self.assigned.clear();
            self.ones.clear();
        } else {
            self.assigned = FixedBitSet::with_capacity(n);
            self.ones = FixedBitSet::with_capacity(n);
        }
        self.num_assigned = 0;

        self.min_activity.clear();
        self.max_activity.clear();
        for row in program.constraints() {
            let (lo, hi) = row
                .terms()
                .iter()
                .fold((0i64, 0i64), |(lo, hi), t| {
                    if t.coefficient < 0 {
                        (lo + t.coefficient, hi)
                    } else {
                        (lo, hi + t.coefficient)
                    }
                });
            self.min_activity.push(lo);
            self.max_activity.push(hi);
        }
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.assigned.len()
    }

    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    /// Returns `true` once every variable is fixed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.num_variables()
    }

    #[inline]
    pub fn is_assigned(&self, variable: VariableIndex) -> bool {
        self.assigned.contains(variable.get())
    }

    /// The fixed value of a variable, if any.
    #[inline]
    pub fn value(&self, variable: VariableIndex) -> Option<bool> {
        self.is_assigned(variable)
            .then(|| self.ones.contains(variable.get()))
    }

    #[inline]
    pub fn first_unassigned(&self) -> Option<VariableIndex> {
        self.assigned.zeroes().next().map(VariableIndex::new)
    }

    #[inline]
    pub fn min_activity(&self, row: ConstraintIndex) -> i64 {
        self.min_activity[row.get()]
    }

    #[inline]
    pub fn max_activity(&self, row: ConstraintIndex) -> i64 {
        self.max_activity[row.get()]
    }

    /// The assignment as 0/1 values; free variables read as zero.
    pub fn to_bits(&self) -> Vec<bool> {
        (0..self.num_variables())
            .map(|i| self.ones.contains(i))
            .collect()
    }

    #[inline]
    pub(crate) fn fix(&mut self, variable: VariableIndex, value: bool) {
        debug_assert!(
            !self.is_assigned(variable),
            "called `SearchState::fix` on already assigned {}",
            variable
        );
        self.assigned.insert(variable.get());
        self.ones.set(variable.get(), value);
        self.num_assigned += 1;
    }

    /// Frees a variable and returns the value it had.
    #[inline]
    pub(crate) fn free(&mut self, variable: VariableIndex) -> bool {
        debug_assert!(
            self.is_assigned(variable),
            "called `SearchState::free` on unassigned {}",
            variable
        );
        let value = self.ones.contains(variable.get());
        self.assigned.set(variable.get(), false);
        self.ones.set(variable.get(), false);
        self.num_assigned -= 1;
        value
    }

    #[inline]
    pub(crate) fn shift_activity(&mut self, row: ConstraintIndex, min_delta: i64, max_delta: i64) {
        self.min_activity[row.get()] += min_delta;
        self.max_activity[row.get()] += max_delta;
    }
}
