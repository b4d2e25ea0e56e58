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

//! # Bicrystal Explore
//!
//! Which `(ngb, kgb, kc)` counter triples can a fixed number of solutes
//! realize on a periodic square lattice split by a grain boundary? This
//! crate answers that by asking a `FeasibilityOracle` one triple at a time.
//!
//! ## Pipeline
//!
//! - `ceiling`: the largest bulk-bond count `kc_max` reachable with an empty
//!   interface, found by an upward scan.
//! - `enumerate`: the bounded `CandidateSpace` and its one-query-per-triple
//!   classification into `ConfigurationRecord`s and a `FeasibleSet`.
//! - `parallel`: the same classification over independent per-worker oracles.
//! - `extreme`: the convex-hull vertices of the feasible triples.
//! - `explorer`: `ExplorerConfig` and `Explorer`, which chain the above and
//!   produce an `ExplorationReport`.
//!
//! ## Oracle discipline
//!
//! `LatticeOracle` turns triples into right-hand sides and hint bounds and
//! refuses to answer a query twice on the same parameters. Undecided backend
//! answers are never read as feasible or infeasible: they abort the run as
//! `ExploreError::OracleProtocolViolation`.
//!
//! ```rust
//! use bicrystal_explore::explorer::{Explorer, ExplorerConfig};
//!
//! let config = ExplorerConfig::builder(4, 3).build().unwrap();
//! let report = Explorer::new(config).run().unwrap();
//! assert_eq!(report.kc_max, 3);
//! assert_eq!(report.num_feasible(), 18);
//! ```

pub mod ceiling;
pub mod enumerate;
pub mod error;
pub mod explorer;
pub mod extreme;
pub mod oracle;
pub mod parallel;
pub mod report;
pub mod stats;
