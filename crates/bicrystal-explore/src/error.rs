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

use bicrystal_core::math::hull::HullError;
use bicrystal_model::{error::ModelError, triple::CounterTriple};
use thiserror::Error;

/// Everything that aborts an exploration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExploreError {
    /// Invalid lattice side or solute count.
    #[error("configuration error: {0}")]
    Configuration(#[from] ModelError),
    /// The backend answered neither feasible nor infeasible.
    #[error("oracle protocol violation at {triple}: {reason}")]
    OracleProtocolViolation { triple: CounterTriple, reason: String },
    /// The ceiling search found no feasible-then-infeasible boundary.
    #[error("no bulk-bond ceiling found within {trials} trial(s)")]
    SearchExhausted { trials: usize },
    /// Too few affinely independent feasible triples for a 3-D hull.
    #[error(
        "insufficient points for a convex hull: {points} distinct triple(s) of affine dimension {dimension}"
    )]
    InsufficientPoints { points: usize, dimension: usize },
    /// Hull coordinates outside the exact range.
    #[error("hull computation failed: {0}")]
    Hull(HullError),
    /// `query` was called without `set_parameters` since the last query.
    #[error("query issued without fresh parameters")]
    StaleParameters,
}

impl From<HullError> for ExploreError {
    fn from(error: HullError) -> Self {
        match error {
            HullError::InsufficientPoints { points, dimension } => {
                ExploreError::InsufficientPoints { points, dimension }
            }
            other => ExploreError::Hull(other),
        }
    }
}
