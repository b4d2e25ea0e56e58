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

//! # Explorer
//!
//! Runs the whole pipeline for one `ExplorerConfig`:
//!
//! 1. build the lattice model and a backend for it,
//! 2. find the bulk-bond ceiling,
//! 3. classify every candidate triple (on one or more workers),
//! 4. reduce the feasible triples to their extreme points.
//!
//! Failures in steps 1 to 3 abort the run. A failing hull does not: the
//! report then carries the feasible set and the hull error text.

use crate::{
    ceiling::{ceiling_trials, find_ceiling},
    enumerate::{CandidateSpace, FeasibleSet, enumerate},
    error::ExploreError,
    extreme::extreme_configurations,
    oracle::LatticeOracle,
    parallel::enumerate_parallel,
    report::{ExplorationReport, HullSummary},
    stats::ExplorationStatistics,
};
use bicrystal_bnb::oracle::BacktrackingOracle;
use bicrystal_core::math::hull::DegeneracyPolicy;
use bicrystal_model::{
    builder::LatticeModelBuilder, error::ModelError, lattice::Lattice, program::BinaryProgram,
    triple::CounterTriple,
};
use bicrystal_search::oracle::FeasibilityOracle;
use serde::Serialize;
use std::{
    sync::{Arc, atomic::AtomicBool},
    time::{Duration, Instant},
};
use tracing::{info, warn};

/// Validated parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    side: usize,
    num_solute: usize,
    pruning_hints: bool,
    symmetry_breaking: bool,
    query_time_limit: Option<Duration>,
    progress_log_interval: Option<Duration>,
    workers: usize,
    degeneracy: DegeneracyPolicy,
}

impl ExplorerConfig {
    #[inline]
    pub fn builder(side: usize, num_solute: usize) -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::new(side, num_solute)
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
    pub fn pruning_hints(&self) -> bool {
        self.pruning_hints
    }

    #[inline]
    pub fn symmetry_breaking(&self) -> bool {
        self.symmetry_breaking
    }

    #[inline]
    pub fn query_time_limit(&self) -> Option<Duration> {
        self.query_time_limit
    }

    /// How often a running backtracking query logs its progress.
    #[inline]
    pub fn progress_log_interval(&self) -> Option<Duration> {
        self.progress_log_interval
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    #[inline]
    pub fn degeneracy(&self) -> DegeneracyPolicy {
        self.degeneracy
    }
}

/// Builds an `ExplorerConfig`. Hints and symmetry breaking start enabled,
/// with one worker, no time limit and `DegeneracyPolicy::Reduce`.
#[derive(Debug, Clone)]
pub struct ExplorerConfigBuilder {
    side: usize,
    num_solute: usize,
    pruning_hints: bool,
    symmetry_breaking: bool,
    query_time_limit: Option<Duration>,
    progress_log_interval: Option<Duration>,
    workers: usize,
    degeneracy: DegeneracyPolicy,
}

impl ExplorerConfigBuilder {
    pub fn new(side: usize, num_solute: usize) -> Self {
        Self {
            side,
            num_solute,
            pruning_hints: true,
            symmetry_breaking: true,
            query_time_limit: None,
            progress_log_interval: None,
            workers: 1,
            degeneracy: DegeneracyPolicy::Reduce,
        }
    }

    pub fn pruning_hints(mut self, enabled: bool) -> Self {
        self.pruning_hints = enabled;
        self
    }

    pub fn symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Bounds every oracle query. An exceeded limit aborts the run with
    /// `ExploreError::OracleProtocolViolation`.
    pub fn query_time_limit(mut self, limit: Duration) -> Self {
        self.query_time_limit = Some(limit);
        self
    }

    /// Lets every backtracking query emit a `debug!` progress event at most
    /// once per `interval`.
    pub fn progress_log_interval(mut self, interval: Duration) -> Self {
        self.progress_log_interval = Some(interval);
        self
    }

    /// Worker threads for enumeration; zero is treated as one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn degeneracy(mut self, policy: DegeneracyPolicy) -> Self {
        self.degeneracy = policy;
        self
    }

    /// # Errors
    ///
    /// `ExploreError::Configuration` for a side below 2 or more solutes than
    /// sites.
    pub fn build(self) -> Result<ExplorerConfig, ExploreError> {
        let lattice = Lattice::new(self.side)?;
        if self.num_solute > lattice.num_sites() {
            return Err(ModelError::InvalidSoluteCount {
                num_solute: self.num_solute,
                num_sites: lattice.num_sites(),
            }
            .into());
        }

        Ok(ExplorerConfig {
            side: self.side,
            num_solute: self.num_solute,
            pruning_hints: self.pruning_hints,
            symmetry_breaking: self.symmetry_breaking,
            query_time_limit: self.query_time_limit,
            progress_log_interval: self.progress_log_interval,
            workers: self.workers,
            degeneracy: self.degeneracy,
        })
    }
}

/// A triple whose classification depends on the pruning devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HintMismatch {
    pub triple: CounterTriple,
    /// Verdict with the configured hints and symmetry row.
    pub pruned: bool,
    /// Verdict with neither.
    pub plain: bool,
}

/// The result of classifying every candidate with and without the pruning
/// hints and the symmetry row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintAudit {
    pub kc_max: usize,
    pub num_candidates: usize,
    pub mismatches: Vec<HintMismatch>,
}

impl HintAudit {
    /// `true` if pruning never changed a verdict.
    #[inline]
    pub fn is_sound(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl std::fmt::Display for HintAudit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "hint audit: {} candidates up to kc={}, {} mismatch(es)",
            self.num_candidates,
            self.kc_max,
            self.mismatches.len()
        )?;
        for m in &self.mismatches {
            writeln!(
                f,
                "  {}: pruned {}, plain {}",
                m.triple,
                feasibility(m.pruned),
                feasibility(m.plain)
            )?;
        }
        Ok(())
    }
}

fn feasibility(feasible: bool) -> &'static str {
    if feasible { "feasible" } else { "infeasible" }
}

/// Drives one exploration.
#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Explorer {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            interrupt: None,
        }
    }

    /// Lets `flag` stop every running query. The stopped query surfaces as
    /// an `OracleProtocolViolation`.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    #[inline]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// A fresh model wrapped around a backend made by `make_backend`.
    ///
    /// # Errors
    ///
    /// `ExploreError::Configuration` if the model cannot be built.
    pub fn build_oracle_with<O, F>(&self, make_backend: F) -> Result<LatticeOracle<O>, ExploreError>
    where
        O: FeasibilityOracle,
        F: FnOnce(BinaryProgram) -> O,
    {
        let model = LatticeModelBuilder::new(self.config.side, self.config.num_solute)
            .symmetry_breaking(self.config.symmetry_breaking)
            .build()?;
        Ok(LatticeOracle::from_model(model, make_backend)
            .with_pruning_hints(self.config.pruning_hints))
    }

    /// `build_oracle_with` using the backtracking backend.
    pub fn build_oracle(&self) -> Result<LatticeOracle<BacktrackingOracle>, ExploreError> {
        self.build_oracle_with(|program| self.backtracking(program))
    }

    fn backtracking(&self, program: BinaryProgram) -> BacktrackingOracle {
        let mut backend = BacktrackingOracle::new(program);
        if let Some(limit) = self.config.query_time_limit {
            backend = backend.with_time_limit(limit);
        }
        if let Some(flag) = &self.interrupt {
            backend = backend.with_interrupt(Arc::clone(flag));
        }
        if let Some(interval) = self.config.progress_log_interval {
            backend = backend.with_log_interval(interval);
        }
        backend
    }

    /// Runs the pipeline on the backtracking backend.
    ///
    /// # Errors
    ///
    /// See `run_with`.
    pub fn run(&self) -> Result<ExplorationReport, ExploreError> {
        self.run_with(|program| self.backtracking(program))
    }

    /// Runs the pipeline on backends made by `make_backend`, one per worker.
    ///
    /// # Errors
    ///
    /// `Configuration`, `OracleProtocolViolation` or `SearchExhausted` from
    /// the model, ceiling and enumeration stages. Hull failures are recorded
    /// in the report instead.
    pub fn run_with<O, F>(&self, make_backend: F) -> Result<ExplorationReport, ExploreError>
    where
        O: FeasibilityOracle,
        F: Fn(BinaryProgram) -> O + Sync,
    {
        let start_time = Instant::now();
        let config = &self.config;
        info!(
            side = config.side,
            num_solute = config.num_solute,
            workers = config.workers,
            pruning_hints = config.pruning_hints,
            "exploration started"
        );

        let mut oracle = self.build_oracle_with(&make_backend)?;
        let kc_max = find_ceiling(&mut oracle, ceiling_trials(config.num_solute))?;
        info!("max. kc: {kc_max}");

        let mut statistics = ExplorationStatistics {
            workers: config.workers,
            ..Default::default()
        };
        statistics.on_ceiling_queries(oracle.num_queries());

        let space = CandidateSpace::new(config.side, config.num_solute, kc_max);
        let records = if config.workers > 1 {
            drop(oracle);
            enumerate_parallel(
                |_| self.build_oracle_with(&make_backend),
                &space,
                config.workers,
            )?
        } else {
            enumerate(&mut oracle, &space)?
        };
        statistics.on_records(&records);

        let feasible = FeasibleSet::from_records(&records);
        info!("num. feasible: {}", feasible.len());
        let hull = match extreme_configurations(&feasible, config.degeneracy) {
            Ok(configurations) => HullSummary::Extreme { configurations },
            Err(error) => {
                warn!(%error, "extreme-point extraction failed; keeping the feasible set");
                HullSummary::Failed {
                    error: error.to_string(),
                }
            }
        };
        statistics.elapsed = start_time.elapsed();

        Ok(ExplorationReport {
            side: config.side,
            num_solute: config.num_solute,
            pruning_hints: config.pruning_hints,
            symmetry_breaking: config.symmetry_breaking,
            degeneracy: config.degeneracy,
            kc_max,
            num_candidates: space.len(),
            records,
            hull,
            statistics,
        })
    }

    /// Classifies every candidate twice, with the configured pruning and on
    /// a plain model, on the backtracking backend.
    ///
    /// # Errors
    ///
    /// See `audit_hints_with`.
    pub fn audit_hints(&self) -> Result<HintAudit, ExploreError> {
        self.audit_hints_with(|program| self.backtracking(program))
    }

    /// Classifies every candidate twice and lists the triples whose verdicts
    /// differ: once with the configured hints and symmetry row, once on a
    /// model with neither. The ceiling comes from the plain model.
    ///
    /// # Errors
    ///
    /// Any error of the ceiling search or of a query.
    pub fn audit_hints_with<O, F>(&self, make_backend: F) -> Result<HintAudit, ExploreError>
    where
        O: FeasibilityOracle,
        F: Fn(BinaryProgram) -> O,
    {
        let mut pruned = self.build_oracle_with(&make_backend)?;
        let model = LatticeModelBuilder::new(self.config.side, self.config.num_solute)
            .symmetry_breaking(false)
            .build()?;
        let mut plain = LatticeOracle::from_model(model, &make_backend).with_pruning_hints(false);

        let kc_max = find_ceiling(&mut plain, ceiling_trials(self.config.num_solute))?;
        let space = CandidateSpace::new(self.config.side, self.config.num_solute, kc_max);

        let mut mismatches = Vec::new();
        for triple in space.iter() {
            let with_pruning = pruned.classify(triple)?.is_some();
            let without_pruning = plain.classify(triple)?.is_some();
            if with_pruning != without_pruning {
                warn!(%triple, with_pruning, without_pruning, "pruning changed a verdict");
                mismatches.push(HintMismatch {
                    triple,
                    pruned: with_pruning,
                    plain: without_pruning,
                });
            }
        }

        info!(
            candidates = space.len(),
            mismatches = mismatches.len(),
            "hint audit finished"
        );
        Ok(HintAudit {
            kc_max,
            num_candidates: space.len(),
            mismatches,
        })
    }
}
