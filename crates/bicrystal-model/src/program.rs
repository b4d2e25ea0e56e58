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

//! # Binary Programs
//!
//! `BinaryProgram` is the solver-facing view of a model: binary variables
//! with lower/upper bounds and linear rows `Σ aᵢ·xᵢ (= | <= | >=) b` with
//! integer coefficients. The objective is identically zero (a pure
//! feasibility problem) and is therefore not stored.
//!
//! Only two kinds of mutation exist after construction: right-hand sides of
//! rows and bounds of variables. Term structure is fixed, which lets search
//! backends precompute occurrence lists once.

use crate::index::{ConstraintIndex, VariableIndex};

/// Relation between the row activity and the right-hand side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sense {
    Equal,
    LessEqual,
    GreaterEqual,
}

impl Sense {
    /// Returns `true` if the row bounds its activity from above.
    #[inline]
    pub fn has_upper_side(&self) -> bool {
        matches!(self, Sense::Equal | Sense::LessEqual)
    }

    /// Returns `true` if the row bounds its activity from below.
    #[inline]
    pub fn has_lower_side(&self) -> bool {
        matches!(self, Sense::Equal | Sense::GreaterEqual)
    }
}

impl std::fmt::Display for Sense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sense::Equal => write!(f, "="),
            Sense::LessEqual => write!(f, "<="),
            Sense::GreaterEqual => write!(f, ">="),
        }
    }
}

/// One `coefficient * variable` summand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Term {
    pub variable: VariableIndex,
    pub coefficient: i64,
}

impl Term {
    #[inline]
    pub const fn new(variable: VariableIndex, coefficient: i64) -> Self {
        Self {
            variable,
            coefficient,
        }
    }
}

/// A linear row over binary variables.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LinearConstraint {
    terms: Vec<Term>,
    sense: Sense,
    rhs: i64,
}

impl LinearConstraint {
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[inline]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    #[inline]
    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// Evaluates `Σ aᵢ·xᵢ` for a full 0/1 assignment.
    pub fn activity(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|t| values[t.variable.get()])
            .map(|t| t.coefficient)
            .sum()
    }

    /// Returns `true` if the row holds under `values`.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let activity = self.activity(values);
        match self.sense {
            Sense::Equal => activity == self.rhs,
            Sense::LessEqual => activity <= self.rhs,
            Sense::GreaterEqual => activity >= self.rhs,
        }
    }
}

impl std::fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            write!(f, "0")?;
        }
        for (i, term) in self.terms.iter().enumerate() {
            let sign = if term.coefficient < 0 { "-" } else { "+" };
            if i == 0 {
                if term.coefficient < 0 {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {sign} ")?;
            }
            write!(f, "{}·x{}", term.coefficient.abs(), term.variable.get())?;
        }
        write!(f, " {} {}", self.sense, self.rhs)
    }
}

/// A 0/1 feasibility program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinaryProgram {
    lower_bounds: Vec<bool>,
    upper_bounds: Vec<bool>,
    constraints: Vec<LinearConstraint>,
}

impl BinaryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a free binary variable.
    pub fn add_variable(&mut self) -> VariableIndex {
        let index = VariableIndex::new(self.lower_bounds.len());
        self.lower_bounds.push(false);
        self.upper_bounds.push(true);
        index
    }

    /// Adds a row and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if a term refers to a variable that does not exist.
    pub fn add_constraint(&mut self, terms: Vec<Term>, sense: Sense, rhs: i64) -> ConstraintIndex {
        for term in &terms {
            assert!(
                term.variable.get() < self.num_variables(),
                "called `BinaryProgram::add_constraint` with {} but only {} variables exist",
                term.variable,
                self.num_variables()
            );
        }
        let index = ConstraintIndex::new(self.constraints.len());
        self.constraints.push(LinearConstraint { terms, sense, rhs });
        index
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.lower_bounds.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    #[inline]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    #[inline]
    pub fn constraint(&self, index: ConstraintIndex) -> &LinearConstraint {
        &self.constraints[index.get()]
    }

    #[inline]
    pub fn lower_bound(&self, variable: VariableIndex) -> bool {
        self.lower_bounds[variable.get()]
    }

    #[inline]
    pub fn upper_bound(&self, variable: VariableIndex) -> bool {
        self.upper_bounds[variable.get()]
    }

    /// Replaces the right-hand side of a row.
    #[inline]
    pub fn set_rhs(&mut self, index: ConstraintIndex, rhs: i64) {
        self.constraints[index.get()].rhs = rhs;
    }

    /// Sets the lower bound of a variable; `true` fixes it to one.
    #[inline]
    pub fn set_lower_bound(&mut self, variable: VariableIndex, bound: bool) {
        self.lower_bounds[variable.get()] = bound;
    }

    /// Sets the upper bound of a variable; `false` fixes it to zero.
    #[inline]
    pub fn set_upper_bound(&mut self, variable: VariableIndex, bound: bool) {
        self.upper_bounds[variable.get()] = bound;
    }

    /// Returns `true` if `values` respects every bound and every row.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold one entry per variable.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        assert_eq!(
            values.len(),
            self.num_variables(),
            "called `BinaryProgram::is_satisfied_by` with {} values for {} variables",
            values.len(),
            self.num_variables()
        );
        let within_bounds = values
            .iter()
            .zip(self.lower_bounds.iter().zip(&self.upper_bounds))
            .all(|(&v, (&lb, &ub))| (v || !lb) && (!v || ub));
        within_bounds && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }

    /// Handles of rows violated by `values`, in index order.
    pub fn violated_constraints(&self, values: &[bool]) -> Vec<ConstraintIndex> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied_by(values))
            .map(|(i, _)| ConstraintIndex::new(i))
            .collect()
    }
}

impl std::fmt::Display for BinaryProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "BinaryProgram({} variables, {} constraints)",
            self.num_variables(),
            self.num_constraints()
        )?;
        for (i, c) in self.constraints.iter().enumerate() {
            writeln!(f, "  c{i}: {c}")?;
        }
        Ok(())
    }
}
