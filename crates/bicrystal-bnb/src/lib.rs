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

//! Bicrystal-BnB: exhaustive backtracking over 0/1 programs
//!
//! The reference `FeasibilityOracle` backend. It decides a `BinaryProgram`
//! by depth-first search with bound propagation and needs no external
//! solver. It is not a MIP solver: there is no relaxation and no cutting,
//! only fixing, propagating and undoing.
//!
//! Core flow
//! - Hand a `BinaryProgram` to `BacktrackingOracle::new`.
//! - Optionally choose a `branching::VariableSelector`, a per-query time
//!   limit, a shared interrupt flag and a progress log interval.
//! - Re-target right-hand sides and lower bounds through the
//!   `FeasibilityOracle` trait and call `solve`.
//!
//! Design highlights
//! - Every row keeps its minimum and maximum reachable activity under the
//!   current partial assignment. They change in O(occurrences) per fixing
//!   and make both conflict detection and implied fixings O(row length).
//! - State is mutated in place and restored through a frame-structured
//!   trail; pending decisions live on a frame-structured stack.
//! - Values are tried one before zero, so occupancy-style programs reach
//!   witnesses quickly.
//!
//! Guarantees
//! - Complete: without a monitor-requested stop the result is `Optimal` or
//!   `Infeasible`, never `Unknown`.
//! - Deterministic for a deterministic selector.
//!
//! Module map
//! - `oracle`: `BacktrackingOracle` and the search session.
//! - `branching`: decisions and the variable selector.
//! - `propagation`: occurrence lists and the row propagator.
//! - `monitor`: tree-search monitors (log, composite, adapter).
//! - `state`: partial assignment and row activities.
//! - `stats`: counters and timing.

pub mod branching;
pub mod monitor;
pub mod oracle;
pub mod propagation;
mod stack;
pub mod state;
pub mod stats;
mod trail;
