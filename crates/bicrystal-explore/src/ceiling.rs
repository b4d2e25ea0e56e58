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

//! # Ceiling Search
//!
//! Finds `kc_max`, the largest bulk-bond count any placement reaches while
//! the interface stays empty (`ngb = kgb = 0`). Probes run upwards from
//! `kc = 0`. Small counts can be infeasible too (a few solutes cannot avoid
//! touching each other), so infeasible probes are skipped until the first
//! feasible one; after that the first infeasible probe ends the scan.

use crate::{error::ExploreError, oracle::LatticeOracle};
use bicrystal_model::triple::CounterTriple;
use bicrystal_search::oracle::FeasibilityOracle;
use tracing::{debug, info};

/// The probe budget for `num_solute` solutes: one more than the largest bond
/// count they could form.
#[inline]
pub fn ceiling_trials(num_solute: usize) -> usize {
    3 * num_solute + 1
}

/// Scans `kc = 0, 1, ...` for at most `max_trials` probes and returns the
/// last feasible `kc` before the first infeasible one.
///
/// # Errors
///
/// - `ExploreError::OracleProtocolViolation` if a probe is undecided.
/// - `ExploreError::SearchExhausted` if the budget runs out before a
///   feasible probe is followed by an infeasible one.
pub fn find_ceiling<O>(
    oracle: &mut LatticeOracle<O>,
    max_trials: usize,
) -> Result<usize, ExploreError>
where
    O: FeasibilityOracle,
{
    let mut last_feasible = None;

    for kc in 0..max_trials {
        let triple = CounterTriple::new(0, 0, kc);
        let feasible = oracle.classify(triple)?.is_some();
        debug!(kc, feasible, "ceiling probe");

        match (feasible, last_feasible) {
            (true, _) => last_feasible = Some(kc),
            (false, Some(kc_max)) => {
                info!(kc_max, probes = kc + 1, "bulk-bond ceiling found");
                return Ok(kc_max);
            }
            (false, None) => {}
        }
    }

    Err(ExploreError::SearchExhausted { trials: max_trials })
}
