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

//! # Configuration Enumerator
//!
//! `CandidateSpace` lists every counter triple worth asking about, and
//! `enumerate` classifies each of them with exactly one oracle query.
//!
//! The candidate domain for a lattice of side `n`, `s` solutes and ceiling
//! `kc_max`:
//!
//! - `ngb` in `0..=2n`,
//! - `kgb` in `0..=ngb - 1` (at least `0..=0`), or `0..=2n` when `ngb = 2n`,
//! - `kc` in `0..=min(3s - kgb, kc_max)`.
//!
//! Iteration order is lexicographic in `(ngb, kgb, kc)`.

use crate::{error::ExploreError, oracle::LatticeOracle};
use bicrystal_model::{triple::CounterTriple, witness::WitnessGrid};
use bicrystal_search::oracle::FeasibilityOracle;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// The bounded set of candidate triples.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct CandidateSpace {
    side: usize,
    num_solute: usize,
    kc_max: usize,
}

impl CandidateSpace {
    #[inline]
    pub fn new(side: usize, num_solute: usize, kc_max: usize) -> Self {
        Self {
            side,
            num_solute,
            kc_max,
        }
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn num_solute(&self) -> usize {
        self.num_solute
    }

    #[inline]
    pub fn kc_max(&self) -> usize {
        self.kc_max
    }

    /// The number of interface sites, also the number of interface bonds.
    #[inline]
    pub fn num_interface(&self) -> usize {
        2 * self.side
    }

    /// Largest `kgb` enumerated for `ngb`.
    #[inline]
    pub fn kgb_max(&self, ngb: usize) -> usize {
        if ngb == self.num_interface() {
            ngb
        } else {
            ngb.saturating_sub(1)
        }
    }

    /// Number of `kc` values enumerated for `kgb`; zero when `kgb` alone
    /// exceeds the bond budget of the solutes.
    #[inline]
    pub fn num_kc(&self, kgb: usize) -> usize {
        match (3 * self.num_solute).checked_sub(kgb) {
            Some(bond_budget) => bond_budget.min(self.kc_max) + 1,
            None => 0,
        }
    }

    /// Number of candidates, without iterating.
    pub fn len(&self) -> usize {
        (0..=self.num_interface())
            .map(|ngb| (0..=self.kgb_max(ngb)).map(|kgb| self.num_kc(kgb)).sum::<usize>())
            .sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `triple` lies in the space.
    pub fn contains(&self, triple: &CounterTriple) -> bool {
        triple.ngb <= self.num_interface()
            && triple.kgb <= self.kgb_max(triple.ngb)
            && triple.kc < self.num_kc(triple.kgb)
    }

    /// All candidates in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = CounterTriple> + '_ {
        (0..=self.num_interface()).flat_map(move |ngb| {
            (0..=self.kgb_max(ngb)).flat_map(move |kgb| {
                (0..self.num_kc(kgb)).map(move |kc| CounterTriple::new(ngb, kgb, kc))
            })
        })
    }
}

/// The classification of one candidate.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ConfigurationRecord {
    pub triple: CounterTriple,
    /// Present exactly when the triple is feasible.
    pub witness: Option<WitnessGrid>,
}

impl ConfigurationRecord {
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.witness.is_some()
    }
}

/// The feasible triples of a finished enumeration, each with its witness.
///
/// Built once and never extended.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FeasibleSet {
    witnesses: BTreeMap<CounterTriple, WitnessGrid>,
}

impl FeasibleSet {
    /// Collects the feasible records.
    pub fn from_records(records: &[ConfigurationRecord]) -> Self {
        records
            .iter()
            .filter_map(|r| r.witness.clone().map(|w| (r.triple, w)))
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.witnesses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.witnesses.is_empty()
    }

    #[inline]
    pub fn contains(&self, triple: &CounterTriple) -> bool {
        self.witnesses.contains_key(triple)
    }

    #[inline]
    pub fn witness(&self, triple: &CounterTriple) -> Option<&WitnessGrid> {
        self.witnesses.get(triple)
    }

    /// Feasible triples in ascending order.
    pub fn triples(&self) -> impl Iterator<Item = CounterTriple> + '_ {
        self.witnesses.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CounterTriple, &WitnessGrid)> {
        self.witnesses.iter()
    }
}

impl FromIterator<(CounterTriple, WitnessGrid)> for FeasibleSet {
    fn from_iter<I: IntoIterator<Item = (CounterTriple, WitnessGrid)>>(iter: I) -> Self {
        Self {
            witnesses: iter.into_iter().collect(),
        }
    }
}

/// Classifies every candidate of `space` with one query each.
///
/// # Errors
///
/// The first `ExploreError::OracleProtocolViolation` aborts the whole
/// enumeration.
pub fn enumerate<O>(
    oracle: &mut LatticeOracle<O>,
    space: &CandidateSpace,
) -> Result<Vec<ConfigurationRecord>, ExploreError>
where
    O: FeasibilityOracle,
{
    let total = space.len();
    let mut records = Vec::with_capacity(total);

    for (i, triple) in space.iter().enumerate() {
        let witness = oracle.classify(triple)?;
        log_classification(i, total, &triple, witness.is_some());
        records.push(ConfigurationRecord { triple, witness });
    }

    let num_feasible = records.iter().filter(|r| r.is_feasible()).count();
    info!(num_feasible, total, "enumeration finished");
    Ok(records)
}

#[inline]
pub(crate) fn log_classification(i: usize, total: usize, triple: &CounterTriple, feasible: bool) {
    info!(
        "config: {:>5} / {:>5} ngb={:>3} kgb={:>3} kc={:>3} status: {}",
        i,
        total,
        triple.ngb,
        triple.kgb,
        triple.kc,
        if feasible { "  feasible" } else { "infeasible" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bicrystal_bnb::oracle::BacktrackingOracle;
    use bicrystal_model::builder::LatticeModelBuilder;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_kgb_bounds() {
        let space = CandidateSpace::new(4, 3, 3);
        assert_eq!(space.kgb_max(0), 0);
        assert_eq!(space.kgb_max(1), 0);
        assert_eq!(space.kgb_max(5), 4);
        assert_eq!(space.kgb_max(8), 8);
    }

    #[test]
    fn test_kc_bounds() {
        let space = CandidateSpace::new(4, 3, 3);
        assert_eq!(space.num_kc(0), 4);
        assert_eq!(space.num_kc(7), 3);
        assert_eq!(space.num_kc(8), 2);
        assert_eq!(space.num_kc(9), 1);
        assert_eq!(space.num_kc(10), 0);
    }

    #[test]
    fn test_small_space_count() {
        // ngb = 0..=8 contribute 4, 4, 8, 12, 16, 20, 24, 28 and 33.
        let space = CandidateSpace::new(4, 3, 3);
        assert_eq!(space.len(), 149);
        assert_eq!(space.iter().count(), 149);
        assert_eq!(space.iter().next(), Some(CounterTriple::new(0, 0, 0)));
        assert_eq!(space.iter().last(), Some(CounterTriple::new(8, 8, 1)));
    }

    #[test]
    fn test_side_three_count() {
        // 2n = 6, s = 2, kc_max = 2: kc has 3 values for kgb <= 4, 2 for kgb = 5
        // and 1 for kgb = 6.
        let space = CandidateSpace::new(3, 2, 2);
        let expected = 3 + 3 + 6 + 9 + 12 + 15 + (5 * 3 + 2 + 1);
        assert_eq!(space.len(), expected);
    }

    #[test]
    fn test_records_feed_feasible_set() {
        let model = LatticeModelBuilder::new(4, 3).build().unwrap();
        let mut oracle = LatticeOracle::from_model(model, BacktrackingOracle::new);
        let space = CandidateSpace::new(4, 3, 3);

        let records = enumerate(&mut oracle, &space).unwrap();
        assert_eq!(records.len(), 149);
        assert_eq!(oracle.num_queries(), 149);

        let feasible = FeasibleSet::from_records(&records);
        assert_eq!(feasible.len(), 18);
        assert!(!feasible.contains(&CounterTriple::new(0, 0, 0)));
        assert!(feasible.contains(&CounterTriple::new(2, 1, 0)));
        for (triple, witness) in feasible.iter() {
            assert!(space.contains(triple));
            assert_eq!(witness.counters(oracle.layout().lattice()), *triple);
            assert_eq!(witness.num_occupied(), 3);
        }
    }

    proptest! {
        #[test]
        fn prop_iteration_matches_domain(side in 2usize..7, num_solute in 0usize..6, kc_max in 0usize..12) {
            let space = CandidateSpace::new(side, num_solute, kc_max);
            let triples: Vec<CounterTriple> = space.iter().collect();
            prop_assert_eq!(triples.len(), space.len());

            let unique: HashSet<CounterTriple> = triples.iter().copied().collect();
            prop_assert_eq!(unique.len(), triples.len());
            prop_assert!(triples.windows(2).all(|w| w[0] < w[1]));

            for ngb in 0..=2 * side + 1 {
                for kgb in 0..=2 * side + 1 {
                    for kc in 0..=kc_max + 1 {
                        let t = CounterTriple::new(ngb, kgb, kc);
                        let in_domain = ngb <= 2 * side
                            && (kgb < ngb.max(1) || (ngb == 2 * side && kgb <= ngb))
                            && kc <= kc_max
                            && kgb + kc <= 3 * num_solute;
                        prop_assert_eq!(space.contains(&t), in_domain);
                        prop_assert_eq!(unique.contains(&t), in_domain);
                    }
                }
            }
        }
    }
}
