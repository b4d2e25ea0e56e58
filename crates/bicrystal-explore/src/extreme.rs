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

//! # Extreme-Point Extraction
//!
//! Reduces the feasible triples to the vertices of their convex hull in
//! `(ngb, kgb, kc)` space. Every other feasible triple is a convex
//! combination of the extreme ones.

use crate::{enumerate::FeasibleSet, error::ExploreError};
use bicrystal_core::math::hull::{ConvexHull, DegeneracyPolicy};
use bicrystal_model::{triple::CounterTriple, witness::WitnessGrid};
use serde::Serialize;
use tracing::{info, warn};

/// An extreme triple with the occupancy that realizes it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ExtremeConfiguration {
    pub triple: CounterTriple,
    pub witness: WitnessGrid,
}

/// The hull vertices among `triples`, ascending.
///
/// # Errors
///
/// `ExploreError::InsufficientPoints` for an empty input, or under
/// `DegeneracyPolicy::Reject` for inputs that do not span 3-space.
pub fn extreme_points(
    triples: &[CounterTriple],
    policy: DegeneracyPolicy,
) -> Result<Vec<CounterTriple>, ExploreError> {
    let points: Vec<_> = triples.iter().map(CounterTriple::to_point).collect();
    let hull = ConvexHull::compute(&points, policy)?;

    // The hull sorts and deduplicates exactly like this, so indices agree.
    let mut sorted = triples.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if hull.dimension() < 3 {
        warn!(
            dimension = hull.dimension(),
            points = sorted.len(),
            "feasible triples do not span 3-space; reporting the lower-dimensional hull"
        );
    }

    let extreme: Vec<CounterTriple> = hull.vertex_indices().iter().map(|&i| sorted[i]).collect();
    info!(num_extreme = extreme.len(), "extreme points found");
    Ok(extreme)
}

/// `extreme_points` of a feasible set, each joined with its witness.
///
/// # Errors
///
/// As `extreme_points`.
pub fn extreme_configurations(
    feasible: &FeasibleSet,
    policy: DegeneracyPolicy,
) -> Result<Vec<ExtremeConfiguration>, ExploreError> {
    let triples: Vec<CounterTriple> = feasible.triples().collect();
    let extreme = extreme_points(&triples, policy)?;

    Ok(extreme
        .into_iter()
        .filter_map(|triple| {
            feasible.witness(&triple).map(|witness| ExtremeConfiguration {
                triple,
                witness: witness.clone(),
            })
        })
        .collect())
}
