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

//! # Feasibility Oracle
//!
//! The single boundary between exploration and a 0/1 solver. An oracle is a
//! stateful object: right-hand sides and lower bounds persist across calls
//! to `solve` until they are overwritten, exactly like a solver model kept
//! alive between re-solves. Callers that need "fresh parameters per query"
//! enforce that one level up.
//!
//! Implementations must be deterministic and complete: for a 0/1 program
//! they answer `Optimal` or `Infeasible` unless stopped from outside.

use crate::result::OracleOutcome;
use bicrystal_model::{
    index::{ConstraintIndex, VariableIndex},
    program::BinaryProgram,
};

pub trait FeasibilityOracle {
    /// A short human-readable backend name.
    fn name(&self) -> &str;

    /// The program as currently parameterized.
    fn program(&self) -> &BinaryProgram;

    /// Replaces the right-hand side of a row.
    fn set_constraint_rhs(&mut self, constraint: ConstraintIndex, rhs: i64);

    /// Sets a variable's lower bound; `true` forces it to one.
    fn set_variable_lower_bound(&mut self, variable: VariableIndex, bound: bool);

    /// Decides feasibility of the current program.
    fn solve(&mut self) -> OracleOutcome;
}

impl std::fmt::Debug for dyn FeasibilityOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FeasibilityOracle({})", self.name())
    }
}

impl<O> FeasibilityOracle for Box<O>
where
    O: FeasibilityOracle + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn program(&self) -> &BinaryProgram {
        (**self).program()
    }

    fn set_constraint_rhs(&mut self, constraint: ConstraintIndex, rhs: i64) {
        (**self).set_constraint_rhs(constraint, rhs)
    }

    fn set_variable_lower_bound(&mut self, variable: VariableIndex, bound: bool) {
        (**self).set_variable_lower_bound(variable, bound)
    }

    fn solve(&mut self) -> OracleOutcome {
        (**self).solve()
    }
}
