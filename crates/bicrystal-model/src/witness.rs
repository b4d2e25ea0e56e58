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

//! # Witness Grids
//!
//! A `WitnessGrid` is the occupancy returned with a feasible answer. It is
//! deliberately independent of the program that produced it: `counters`
//! recounts the triple from the grid and the lattice geometry alone, which is
//! what makes a witness checkable.

use crate::{index::SiteIndex, lattice::Lattice, triple::CounterTriple};
use fixedbitset::FixedBitSet;
use serde::{Serialize, Serializer, ser::SerializeSeq};

/// An `n x n` binary occupancy, stored row-major.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct WitnessGrid {
    side: usize,
    occupied: FixedBitSet,
}

impl WitnessGrid {
    /// An empty grid of side `side`.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            occupied: FixedBitSet::with_capacity(side * side),
        }
    }

    /// Builds a grid from rows of 0/1 values.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square.
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[u8]>,
    {
        let side = rows.len();
        let mut grid = Self::new(side);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            assert_eq!(
                values.len(),
                side,
                "called `WitnessGrid::from_rows` with row {} of length {} in a grid of side {}",
                row,
                values.len(),
                side
            );
            for (col, &v) in values.iter().enumerate() {
                grid.set(row, col, v != 0);
            }
        }
        grid
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, occupied: bool) {
        debug_assert!(
            row < self.side && col < self.side,
            "called `WitnessGrid::set` with ({}, {}) on a grid of side {}",
            row,
            col,
            self.side
        );
        self.occupied.set(row * self.side + col, occupied);
    }

    #[inline]
    pub fn set_site(&mut self, site: SiteIndex, occupied: bool) {
        self.occupied.set(site.get(), occupied);
    }

    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.occupied.contains(row * self.side + col)
    }

    #[inline]
    pub fn is_site_occupied(&self, site: SiteIndex) -> bool {
        self.occupied.contains(site.get())
    }

    /// Number of occupied sites.
    #[inline]
    pub fn num_occupied(&self) -> usize {
        self.occupied.count_ones(..)
    }

    /// Rows as 0/1 vectors.
    pub fn rows(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..self.side).map(move |row| {
            (0..self.side)
                .map(|col| u8::from(self.is_occupied(row, col)))
                .collect()
        })
    }

    /// Recounts the counter triple of this occupancy on `lattice`.
    ///
    /// # Panics
    ///
    /// Panics if the grid and the lattice have different sides.
    pub fn counters(&self, lattice: &Lattice) -> CounterTriple {
        assert_eq!(
            self.side,
            lattice.side(),
            "called `WitnessGrid::counters` with a lattice of side {} on a grid of side {}",
            lattice.side(),
            self.side
        );

        let ngb = lattice
            .interface_sites()
            .filter(|&s| self.is_site_occupied(s))
            .count();

        let mut kgb = 0;
        let mut kc = 0;
        for bond in lattice.bonds() {
            if self.is_site_occupied(bond.source()) && self.is_site_occupied(bond.target()) {
                if bond.is_interface() {
                    kgb += 1;
                } else {
                    kc += 1;
                }
            }
        }

        CounterTriple::new(ngb, kgb, kc)
    }
}

impl std::fmt::Display for WitnessGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl Serialize for WitnessGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.side))?;
        for row in self.rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}
