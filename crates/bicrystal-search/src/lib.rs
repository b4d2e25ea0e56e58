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

//! # Bicrystal Search
//!
//! The contract between configuration-space exploration and whatever decides
//! feasibility of a 0/1 program.
//!
//! ## Modules
//!
//! - `oracle`: the `FeasibilityOracle` trait. An oracle owns a
//!   `BinaryProgram`, accepts new right-hand sides and variable lower bounds,
//!   and answers `solve()` with an `OracleOutcome`.
//! - `result`: `OracleResult` (`Optimal`, `Infeasible`, `Unknown`),
//!   `TerminationReason` and `OracleOutcome`.
//! - `assignment`: per-variable solution values as an external solver reports
//!   them.
//! - `stats`: `OracleStatistics` and its builder.
//! - `monitor`: lifecycle hooks and termination control for search backends
//!   (time limits, interrupts, composites).
//!
//! Only `Optimal` and `Infeasible` are definite answers. Everything else,
//! including a search stopped by a monitor, is `Unknown`, and it is up to the
//! caller to decide that this is fatal.

pub mod assignment;
pub mod monitor;
pub mod oracle;
pub mod result;
pub mod stats;
