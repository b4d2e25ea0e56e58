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

//! # Parallel Enumeration
//!
//! An oracle is shared mutable state, so parallel enumeration never shares
//! one: every worker builds its own backend through a factory and owns it
//! for the whole run. Candidates are dealt out round-robin (worker `w` takes
//! candidates `w`, `w + k`, `w + 2k`, ...) and the records are put back into
//! enumeration order afterwards.
//!
//! A failing worker raises a shared stop flag; the others finish their
//! current query and return. The reported error is the one with the
//! smallest candidate position among those observed.

use crate::{
    enumerate::{CandidateSpace, ConfigurationRecord, log_classification},
    error::ExploreError,
    oracle::LatticeOracle,
};
use bicrystal_model::triple::CounterTriple;
use bicrystal_search::oracle::FeasibilityOracle;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

type WorkerResult = Result<Vec<(usize, ConfigurationRecord)>, (usize, ExploreError)>;

/// Classifies every candidate of `space` on `workers` threads.
///
/// `make_oracle(w)` builds the private oracle of worker `w` on that worker's
/// thread. A factory error counts as a failure at the worker's first
/// candidate position.
///
/// # Errors
///
/// The first (by candidate position) factory error or
/// `ExploreError::OracleProtocolViolation`.
///
/// # Panics
///
/// Panics if `workers` is zero, or if a worker thread panics.
pub fn enumerate_parallel<O, F>(
    make_oracle: F,
    space: &CandidateSpace,
    workers: usize,
) -> Result<Vec<ConfigurationRecord>, ExploreError>
where
    O: FeasibilityOracle,
    F: Fn(usize) -> Result<LatticeOracle<O>, ExploreError> + Sync,
{
    assert!(
        workers > 0,
        "called `enumerate_parallel` with zero workers"
    );

    let candidates: Vec<CounterTriple> = space.iter().collect();
    let total = candidates.len();
    let stop_signal = AtomicBool::new(false);
    info!(total, workers, "parallel enumeration started");

    let mut results = Vec::with_capacity(workers);
    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let make_oracle = &make_oracle;
            let candidates = &candidates;
            let stop_signal = &stop_signal;
            handles.push(scope.spawn(move || {
                run_worker(worker, workers, make_oracle, candidates, stop_signal)
            }));
        }
        for handle in handles {
            results.push(handle.join().expect("enumeration worker thread panicked"));
        }
    });

    merge(results, total)
}

fn run_worker<O, F>(
    worker: usize,
    workers: usize,
    make_oracle: &F,
    candidates: &[CounterTriple],
    stop_signal: &AtomicBool,
) -> WorkerResult
where
    O: FeasibilityOracle,
    F: Fn(usize) -> Result<LatticeOracle<O>, ExploreError>,
{
    let mut oracle = make_oracle(worker).map_err(|e| {
        stop_signal.store(true, Ordering::Relaxed);
        (worker, e)
    })?;

    let total = candidates.len();
    let mut records = Vec::with_capacity(total / workers + 1);
    for (i, &triple) in candidates.iter().enumerate().skip(worker).step_by(workers) {
        if stop_signal.load(Ordering::Relaxed) {
            debug!(worker, "worker stopped by a sibling failure");
            break;
        }
        match oracle.classify(triple) {
            Ok(witness) => {
                log_classification(i, total, &triple, witness.is_some());
                records.push((i, ConfigurationRecord { triple, witness }));
            }
            Err(error) => {
                stop_signal.store(true, Ordering::Relaxed);
                return Err((i, error));
            }
        }
    }
    Ok(records)
}

fn merge(results: Vec<WorkerResult>, total: usize) -> Result<Vec<ConfigurationRecord>, ExploreError> {
    let mut slots: Vec<Option<ConfigurationRecord>> = vec![None; total];
    let mut first_error: Option<(usize, ExploreError)> = None;

    for result in results {
        match result {
            Ok(records) => {
                for (i, record) in records {
                    slots[i] = Some(record);
                }
            }
            Err((i, error)) => {
                if first_error.as_ref().is_none_or(|(j, _)| i < *j) {
                    first_error = Some((i, error));
                }
            }
        }
    }

    if let Some((_, error)) = first_error {
        return Err(error);
    }

    let records: Vec<ConfigurationRecord> = slots.into_iter().flatten().collect();
    debug_assert_eq!(
        records.len(),
        total,
        "parallel enumeration lost candidates without reporting an error"
    );
    let num_feasible = records.iter().filter(|r| r.is_feasible()).count();
    info!(num_feasible, total, "enumeration finished");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::enumerate;
    use bicrystal_bnb::oracle::BacktrackingOracle;
    use bicrystal_model::{builder::LatticeModelBuilder, error::ModelError};

    fn factory(
        side: usize,
        num_solute: usize,
    ) -> impl Fn(usize) -> Result<LatticeOracle<BacktrackingOracle>, ExploreError> + Sync {
        move |_| {
            let model = LatticeModelBuilder::new(side, num_solute).build()?;
            Ok(LatticeOracle::from_model(model, BacktrackingOracle::new))
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let space = CandidateSpace::new(4, 3, 3);
        let make = factory(4, 3);

        let mut oracle = make(0).unwrap();
        let sequential = enumerate(&mut oracle, &space).unwrap();
        let parallel = enumerate_parallel(&make, &space, 3).unwrap();

        let triples = |records: &[ConfigurationRecord]| -> Vec<(CounterTriple, bool)> {
            records.iter().map(|r| (r.triple, r.is_feasible())).collect()
        };
        assert_eq!(triples(&parallel), triples(&sequential));
    }

    #[test]
    fn test_more_workers_than_candidates() {
        let space = CandidateSpace::new(2, 0, 0);
        let records = enumerate_parallel(factory(2, 0), &space, 64).unwrap();
        assert_eq!(records.len(), space.len());
    }

    #[test]
    fn test_factory_error_aborts() {
        let space = CandidateSpace::new(4, 3, 3);
        let result = enumerate_parallel(factory(1, 3), &space, 2);
        assert_eq!(
            result,
            Err(ExploreError::Configuration(ModelError::InvalidSide { side: 1 }))
        );
    }

    #[test]
    #[should_panic(expected = "zero workers")]
    fn test_zero_workers_panics() {
        let space = CandidateSpace::new(4, 3, 3);
        let _ = enumerate_parallel(factory(4, 3), &space, 0);
    }
}
