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

//! # Periodic Square Lattice with a Grain Boundary
//!
//! An `n x n` grid of sites with periodic boundaries in both directions.
//! Every site emits three bonds, to its right neighbour, to the neighbour in
//! the next row, and to the diagonal neighbour in the next row, so the lattice
//! has exactly `3n²` directed bonds and every unordered neighbour pair of
//! those three families appears once.
//!
//! The grain boundary sits between row `gb = n/2 - 1` and row `gb + 1`. Both
//! rows are *interface rows*; a bond is an *interface bond* when it starts in
//! row `gb` and ends in row `gb + 1`. Everything else is bulk.

use crate::{
    error::ModelError,
    index::{BondIndex, SiteIndex},
};

/// Bond displacement vectors as `(Δcol, Δrow)`.
pub const BOND_DISPLACEMENTS: [(usize, usize); 3] = [(1, 0), (0, 1), (1, 1)];

/// Whether a bond crosses the grain boundary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum BondKind {
    Interface,
    Bulk,
}

impl std::fmt::Display for BondKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BondKind::Interface => write!(f, "interface"),
            BondKind::Bulk => write!(f, "bulk"),
        }
    }
}

/// One of the two mirror halves of the lattice.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LatticeHalf {
    Lower,
    Upper,
}

/// A directed nearest-neighbour bond between two sites.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Bond {
    from: SiteIndex,
    to: SiteIndex,
    kind: BondKind,
}

impl Bond {
    #[inline]
    pub fn source(&self) -> SiteIndex {
        self.from
    }

    #[inline]
    pub fn target(&self) -> SiteIndex {
        self.to
    }

    #[inline]
    pub fn kind(&self) -> BondKind {
        self.kind
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == BondKind::Interface
    }
}

/// The lattice geometry. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    side: usize,
    gb_row: usize,
    bonds: Vec<Bond>,
}

impl Lattice {
    /// Builds the lattice of side `side`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidSide` if `side < 2`, since two distinct
    /// interface rows are required.
    pub fn new(side: usize) -> Result<Self, ModelError> {
        if side < 2 {
            return Err(ModelError::InvalidSide { side });
        }

        let gb_row = side / 2 - 1;
        let mut bonds = Vec::with_capacity(3 * side * side);
        for row in 0..side {
            for col in 0..side {
                for (dcol, drow) in BOND_DISPLACEMENTS {
                    let to_row = (row + drow) % side;
                    let to_col = (col + dcol) % side;
                    let kind = if row == gb_row && to_row == gb_row + 1 {
                        BondKind::Interface
                    } else {
                        BondKind::Bulk
                    };
                    bonds.push(Bond {
                        from: SiteIndex::new(row * side + col),
                        to: SiteIndex::new(to_row * side + to_col),
                        kind,
                    });
                }
            }
        }

        Ok(Self {
            side,
            gb_row,
            bonds,
        })
    }

    /// The side length `n`.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// The lower interface row `gb`; the upper one is `gb + 1`.
    #[inline]
    pub fn gb_row(&self) -> usize {
        self.gb_row
    }

    #[inline]
    pub fn num_sites(&self) -> usize {
        self.side * self.side
    }

    #[inline]
    pub fn num_bonds(&self) -> usize {
        self.bonds.len()
    }

    /// The number of interface sites, `2n`.
    #[inline]
    pub fn num_interface_sites(&self) -> usize {
        2 * self.side
    }

    /// The number of interface bonds, `2n`.
    #[inline]
    pub fn num_interface_bonds(&self) -> usize {
        2 * self.side
    }

    /// The number of bulk bonds, `3n² - 2n`.
    #[inline]
    pub fn num_bulk_bonds(&self) -> usize {
        self.num_bonds() - self.num_interface_bonds()
    }

    /// Returns the row-major index of the site at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either coordinate is out of range.
    #[inline]
    pub fn site_index(&self, row: usize, col: usize) -> SiteIndex {
        debug_assert!(
            row < self.side && col < self.side,
            "called `Lattice::site_index` with ({}, {}) on a lattice of side {}",
            row,
            col,
            self.side
        );
        SiteIndex::new(row * self.side + col)
    }

    /// Returns `(row, col)` of a site.
    #[inline]
    pub fn site_coordinates(&self, site: SiteIndex) -> (usize, usize) {
        (site.get() / self.side, site.get() % self.side)
    }

    /// All sites in row-major order.
    #[inline]
    pub fn sites(&self) -> impl DoubleEndedIterator<Item = SiteIndex> + ExactSizeIterator {
        SiteIndex::range(self.num_sites())
    }

    #[inline]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Returns the bond at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn bond(&self, index: BondIndex) -> Bond {
        self.bonds[index.get()]
    }

    /// Bonds together with their indices.
    pub fn indexed_bonds(&self) -> impl Iterator<Item = (BondIndex, &Bond)> {
        self.bonds
            .iter()
            .enumerate()
            .map(|(i, b)| (BondIndex::new(i), b))
    }

    /// Returns `true` if the site lies in one of the two interface rows.
    #[inline]
    pub fn is_interface_site(&self, site: SiteIndex) -> bool {
        let (row, _) = self.site_coordinates(site);
        row == self.gb_row || row == self.gb_row + 1
    }

    /// Sites of both interface rows, lower row first.
    pub fn interface_sites(&self) -> impl Iterator<Item = SiteIndex> + '_ {
        self.sites().filter(|&s| self.is_interface_site(s))
    }

    /// The image of `site` under the point reflection that swaps the two
    /// interface rows: row `r` goes to `(2·gb + 1 - r) mod n`, column `c` to
    /// `-c mod n`. The reflection maps bonds onto bonds and keeps their kind.
    #[inline]
    pub fn mirror_site(&self, site: SiteIndex) -> SiteIndex {
        let n = self.side;
        let (row, col) = self.site_coordinates(site);
        let row = (2 * self.gb_row + 1 + n - row) % n;
        self.site_index(row, (n - col) % n)
    }

    /// The half of the lattice `site` belongs to for symmetry breaking.
    ///
    /// Rows `0..=gb` form the lower half and their mirror images
    /// `gb+1..=2·gb+1` the upper one. For odd `n` the last row is its own
    /// mirror image and belongs to neither.
    #[inline]
    pub fn half(&self, site: SiteIndex) -> Option<LatticeHalf> {
        let (row, _) = self.site_coordinates(site);
        if row <= self.gb_row {
            Some(LatticeHalf::Lower)
        } else if row <= 2 * self.gb_row + 1 {
            Some(LatticeHalf::Upper)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lattice(side: {}, sites: {}, bonds: {}, interface rows: {}/{})",
            self.side,
            self.num_sites(),
            self.num_bonds(),
            self.gb_row,
            self.gb_row + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_side_below_two() {
        assert_eq!(Lattice::new(0), Err(ModelError::InvalidSide { side: 0 }));
        assert_eq!(Lattice::new(1), Err(ModelError::InvalidSide { side: 1 }));
        assert!(Lattice::new(2).is_ok());
    }

    #[test]
    fn test_interface_rows() {
        assert_eq!(Lattice::new(4).unwrap().gb_row(), 1);
        assert_eq!(Lattice::new(5).unwrap().gb_row(), 1);
        assert_eq!(Lattice::new(12).unwrap().gb_row(), 5);
        assert_eq!(Lattice::new(2).unwrap().gb_row(), 0);
    }

    #[test]
    fn test_bond_counts() {
        for side in 2..=9 {
            let lattice = Lattice::new(side).unwrap();
            assert_eq!(lattice.num_bonds(), 3 * side * side);
            let interface = lattice.bonds().iter().filter(|b| b.is_interface()).count();
            assert_eq!(interface, lattice.num_interface_bonds());
            assert_eq!(lattice.interface_sites().count(), lattice.num_interface_sites());
        }
    }

    #[test]
    fn test_interface_bonds_connect_the_two_interface_rows() {
        let lattice = Lattice::new(6).unwrap();
        for bond in lattice.bonds().iter().filter(|b| b.is_interface()) {
            let (from_row, _) = lattice.site_coordinates(bond.source());
            let (to_row, _) = lattice.site_coordinates(bond.target());
            assert_eq!(from_row, 2);
            assert_eq!(to_row, 3);
        }
    }

    #[test]
    fn test_bonds_wrap_periodically() {
        let lattice = Lattice::new(4).unwrap();
        let corner = lattice.site_index(3, 3);
        let targets: Vec<SiteIndex> = lattice
            .bonds()
            .iter()
            .filter(|b| b.source() == corner)
            .map(|b| b.target())
            .collect();
        assert_eq!(
            targets,
            vec![
                lattice.site_index(3, 0),
                lattice.site_index(0, 3),
                lattice.site_index(0, 0)
            ]
        );
    }

    #[test]
    fn test_halves_of_even_side_cover_every_row() {
        let lattice = Lattice::new(4).unwrap();
        let lower = lattice
            .sites()
            .filter(|&s| lattice.half(s) == Some(LatticeHalf::Lower))
            .count();
        let upper = lattice
            .sites()
            .filter(|&s| lattice.half(s) == Some(LatticeHalf::Upper))
            .count();
        assert_eq!((lower, upper), (8, 8));
        assert_eq!(lattice.half(lattice.site_index(1, 3)), Some(LatticeHalf::Lower));
        assert_eq!(lattice.half(lattice.site_index(2, 0)), Some(LatticeHalf::Upper));
    }

    #[test]
    fn test_last_row_of_odd_side_is_in_neither_half() {
        for side in [3, 5, 7] {
            let lattice = Lattice::new(side).unwrap();
            for col in 0..side {
                let site = lattice.site_index(side - 1, col);
                assert_eq!(lattice.half(site), None);
                assert_eq!(lattice.site_coordinates(lattice.mirror_site(site)).0, side - 1);
            }
            let lower = lattice
                .sites()
                .filter(|&s| lattice.half(s) == Some(LatticeHalf::Lower))
                .count();
            assert_eq!(lower, (side - 1) / 2 * side);
        }
    }

    #[test]
    fn test_mirror_swaps_halves_and_preserves_bonds() {
        for side in 2..=7 {
            let lattice = Lattice::new(side).unwrap();
            for site in lattice.sites() {
                let image = lattice.mirror_site(site);
                assert_eq!(lattice.mirror_site(image), site);
                let expected = match lattice.half(site) {
                    Some(LatticeHalf::Lower) => Some(LatticeHalf::Upper),
                    Some(LatticeHalf::Upper) => Some(LatticeHalf::Lower),
                    None => None,
                };
                assert_eq!(lattice.half(image), expected);
            }

            let mut bonds: Vec<(SiteIndex, SiteIndex, BondKind)> = lattice
                .bonds()
                .iter()
                .map(|b| (b.source(), b.target(), b.kind()))
                .collect();
            let mut mirrored: Vec<(SiteIndex, SiteIndex, BondKind)> = lattice
                .bonds()
                .iter()
                .map(|b| (lattice.mirror_site(b.target()), lattice.mirror_site(b.source()), b.kind()))
                .collect();
            bonds.sort();
            mirrored.sort();
            assert_eq!(bonds, mirrored, "side {side}");
        }
    }

    #[test]
    fn test_site_coordinates_round_trip() {
        let lattice = Lattice::new(5).unwrap();
        for site in lattice.sites() {
            let (row, col) = lattice.site_coordinates(site);
            assert_eq!(lattice.site_index(row, col), site);
        }
    }
}
