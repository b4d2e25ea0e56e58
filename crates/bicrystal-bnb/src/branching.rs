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

//! # Branching
//!
//! A `Decision` fixes one variable to one value. At every node the search
//! asks a `VariableSelector` for the next free variable and opens two
//! alternatives for it, value one first.

use crate::state::SearchState;
use bicrystal_model::index::VariableIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    variable: VariableIndex,
    value: bool,
}

impl Decision {
    #[inline]
    pub const fn new(variable: VariableIndex, value: bool) -> Self {
        Self { variable, value }
    }

    #[inline]
    pub fn variable(&self) -> VariableIndex {
        self.variable
    }

    #[inline]
    pub fn value(&self) -> bool {
        self.value
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.variable, u8::from(self.value))
    }
}

/// Chooses the variable to branch on.
pub trait VariableSelector {
    fn name(&self) -> &str;

    /// Returns a free variable, or `None` if every variable is fixed.
    fn select(&mut self, state: &SearchState) -> Option<VariableIndex>;
}

impl std::fmt::Debug for dyn VariableSelector + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VariableSelector({})", self.name())
    }
}

/// Branches on the free variable with the smallest index.
///
/// Lattice programs number site variables before bond variables, so this
/// decides occupancies and lets propagation settle the bonds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirstUnassigned;

impl VariableSelector for FirstUnassigned {
    fn name(&self) -> &str {
        "FirstUnassigned"
    }

    #[inline]
    fn select(&mut self, state: &SearchState) -> Option<VariableIndex> {
        state.first_unassigned()
    }
}
