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

//! # Bicrystal Model
//!
//! The domain model of a two-grain square lattice and its 0/1 encoding.
//!
//! ## Architecture
//!
//! * **`lattice`**: the periodic `n x n` site grid, its three bond families and
//!   the grain-boundary interface rows.
//! * **`triple`**: `CounterTriple`, the (interface occupancy, interface bonds,
//!   bulk bonds) class of a configuration.
//! * **`witness`**: `WitnessGrid`, a concrete occupancy that re-derives its own
//!   counters without consulting any solver.
//! * **`program`**: `BinaryProgram`, binary variables with bounds and integer
//!   linear rows whose right-hand sides can be changed between solves.
//! * **`builder`**: `LatticeModelBuilder`, which encodes a lattice as a
//!   `BinaryProgram` and hands out the handles of the adjustable rows.
//! * **`index`**: typed indices for sites, bonds, variables and constraints.
//!
//! Builders validate eagerly; once a `LatticeModel` exists, only the counter
//! right-hand sides and variable lower bounds are meant to change.

pub mod builder;
pub mod error;
pub mod index;
pub mod lattice;
pub mod program;
pub mod triple;
pub mod witness;
