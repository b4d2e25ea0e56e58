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

//! # Lattice Oracle
//!
//! Binds a `FeasibilityOracle` backend to the layout of the lattice model it
//! was built from, so callers speak in counter triples instead of rows and
//! variables.
//!
//! Parameters and queries are an explicit pair: `set_parameters` writes the
//! three counter right-hand sides and both hint bounds, and `query` consumes
//! them. A second `query` without new parameters fails with
//! `ExploreError::StaleParameters`, so no answer can ever depend on values
//! left over from an earlier question.

use crate::error::ExploreError;
use bicrystal_model::{
    builder::{LatticeModel, LatticeModelLayout},
    program::BinaryProgram,
    triple::CounterTriple,
    witness::WitnessGrid,
};
use bicrystal_search::{
    assignment::Assignment,
    oracle::FeasibilityOracle,
    result::{OracleResult, TerminationReason},
};

/// Everything one query writes into the backend.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct QueryParameters {
    triple: CounterTriple,
    hints: [bool; 2],
}

impl QueryParameters {
    /// Parameters for `triple`, with the pruning hints derived from it:
    /// the lower interface hint site is forced when `ngb >= 1`, the upper one
    /// when `ngb >= 2` and `kgb >= 1`.
    #[inline]
    pub fn for_triple(triple: CounterTriple) -> Self {
        Self {
            triple,
            hints: [triple.ngb >= 1, triple.ngb >= 2 && triple.kgb >= 1],
        }
    }

    /// Parameters for `triple` with both hint bounds released.
    #[inline]
    pub fn without_hints(triple: CounterTriple) -> Self {
        Self {
            triple,
            hints: [false, false],
        }
    }

    #[inline]
    pub fn triple(&self) -> CounterTriple {
        self.triple
    }

    /// Lower bounds of the two hint sites, in `LatticeModelLayout::hint_sites`
    /// order.
    #[inline]
    pub fn hints(&self) -> [bool; 2] {
        self.hints
    }
}

/// A backend answer, lifted to the lattice.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum QueryVerdict {
    Feasible(WitnessGrid),
    Infeasible,
    /// The backend gave up without a proof. Carries its stated reason.
    ProtocolError(String),
}

impl QueryVerdict {
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, QueryVerdict::Feasible(_))
    }

    /// Turns a verdict into `Some(witness)` or `None`; a protocol error
    /// becomes `ExploreError::OracleProtocolViolation` for `triple`.
    pub fn into_feasibility(
        self,
        triple: CounterTriple,
    ) -> Result<Option<WitnessGrid>, ExploreError> {
        match self {
            QueryVerdict::Feasible(witness) => Ok(Some(witness)),
            QueryVerdict::Infeasible => Ok(None),
            QueryVerdict::ProtocolError(reason) => {
                Err(ExploreError::OracleProtocolViolation { triple, reason })
            }
        }
    }
}

impl std::fmt::Display for QueryVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryVerdict::Feasible(_) => write!(f, "feasible"),
            QueryVerdict::Infeasible => write!(f, "infeasible"),
            QueryVerdict::ProtocolError(reason) => write!(f, "protocol error ({reason})"),
        }
    }
}

/// A backend plus the meaning of its rows and variables.
#[derive(Debug)]
pub struct LatticeOracle<O> {
    layout: LatticeModelLayout,
    backend: O,
    pending: Option<CounterTriple>,
    pruning_hints: bool,
    num_queries: u64,
}

impl<O> LatticeOracle<O>
where
    O: FeasibilityOracle,
{
    /// Wraps `backend`, which must have been built from the program of the
    /// model `layout` describes.
    pub fn new(layout: LatticeModelLayout, backend: O) -> Self {
        debug_assert_eq!(
            backend.program().num_variables(),
            layout.lattice().num_sites() + layout.lattice().num_bonds(),
            "called `LatticeOracle::new` with a backend of a different model"
        );
        Self {
            layout,
            backend,
            pending: None,
            pruning_hints: true,
            num_queries: 0,
        }
    }

    /// Splits `model` and hands its program to `make_backend`.
    pub fn from_model<F>(model: LatticeModel, make_backend: F) -> Self
    where
        F: FnOnce(BinaryProgram) -> O,
    {
        let (layout, program) = model.into_parts();
        Self::new(layout, make_backend(program))
    }

    /// Whether `ask` derives hint bounds from the triple.
    pub fn with_pruning_hints(mut self, enabled: bool) -> Self {
        self.pruning_hints = enabled;
        self
    }

    #[inline]
    pub fn layout(&self) -> &LatticeModelLayout {
        &self.layout
    }

    #[inline]
    pub fn backend(&self) -> &O {
        &self.backend
    }

    #[inline]
    pub fn pruning_hints(&self) -> bool {
        self.pruning_hints
    }

    #[inline]
    pub fn num_queries(&self) -> u64 {
        self.num_queries
    }

    /// The parameters `ask` would use for `triple`.
    #[inline]
    pub fn parameters_for(&self, triple: CounterTriple) -> QueryParameters {
        if self.pruning_hints {
            QueryParameters::for_triple(triple)
        } else {
            QueryParameters::without_hints(triple)
        }
    }

    /// Writes all three counter targets and both hint bounds.
    pub fn set_parameters(&mut self, parameters: QueryParameters) {
        for (row, rhs) in self.layout.counter_targets(parameters.triple) {
            self.backend.set_constraint_rhs(row, rhs);
        }
        for (site, bound) in self.layout.hint_sites().into_iter().zip(parameters.hints) {
            self.backend
                .set_variable_lower_bound(self.layout.site_variable(site), bound);
        }
        self.pending = Some(parameters.triple);
    }

    /// Decides the parameters written by the last `set_parameters`.
    ///
    /// # Errors
    ///
    /// `ExploreError::StaleParameters` if they were already consumed.
    pub fn query(&mut self) -> Result<QueryVerdict, ExploreError> {
        let triple = self.pending.take().ok_or(ExploreError::StaleParameters)?;
        self.num_queries += 1;

        let outcome = self.backend.solve();
        let verdict = match outcome.result {
            OracleResult::Optimal(assignment) => {
                QueryVerdict::Feasible(self.witness_from(&assignment))
            }
            OracleResult::Infeasible => QueryVerdict::Infeasible,
            OracleResult::Unknown => QueryVerdict::ProtocolError(match outcome.reason {
                TerminationReason::Aborted(reason) => reason,
                other => format!("unknown result with termination reason {other}"),
            }),
        };

        if let QueryVerdict::Feasible(witness) = &verdict {
            debug_assert_eq!(
                witness.counters(self.layout.lattice()),
                triple,
                "backend returned a witness of a different triple"
            );
        }
        Ok(verdict)
    }

    /// `set_parameters` for `triple` followed by `query`.
    pub fn ask(&mut self, triple: CounterTriple) -> Result<QueryVerdict, ExploreError> {
        self.set_parameters(self.parameters_for(triple));
        self.query()
    }

    /// `ask`, with a protocol error turned into
    /// `ExploreError::OracleProtocolViolation`.
    pub fn classify(&mut self, triple: CounterTriple) -> Result<Option<WitnessGrid>, ExploreError> {
        self.ask(triple)?.into_feasibility(triple)
    }

    fn witness_from(&self, assignment: &Assignment) -> WitnessGrid {
        let lattice = self.layout.lattice();
        let mut grid = WitnessGrid::new(lattice.side());
        for site in lattice.sites() {
            grid.set_site(site, assignment.rounded(self.layout.site_variable(site)) == 1);
        }
        grid
    }
}
