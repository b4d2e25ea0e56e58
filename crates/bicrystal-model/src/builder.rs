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

//! # Lattice Model Builder
//!
//! Encodes a `Lattice` and a solute count as a `BinaryProgram`:
//!
//! | variables | meaning |
//! | :--- | :--- |
//! | `x_s`, one per site | site `s` holds a solute |
//! | `y_b`, one per bond | both ends of bond `b` hold a solute |
//!
//! | rows | form |
//! | :--- | :--- |
//! | bond activation | `y_b <= x_u`, `y_b <= x_v`, `y_b >= x_u + x_v - 1` |
//! | interface occupancy | `Σ x_s` over interface sites `= ngb` |
//! | interface bonds | `Σ y_b` over interface bonds `= kgb` |
//! | bulk bonds | `Σ y_b` over bulk bonds `= kc` |
//! | solute count | `Σ x_s = num_solute` |
//! | symmetry breaking (optional) | `Σ x_s` (lower half) `- Σ x_s` (upper half) `>= 0` |
//!
//! The two halves are exchanged by `Lattice::mirror_site`, which preserves
//! every counter, so the symmetry row never removes a triple. For odd sides
//! the self-mirrored last row stays out of the row.
//!
//! The three counter rows start at zero and are re-targeted per query
//! through their `CounterConstraints` handles. The solute-count row is
//! written once here and never touched again.

use crate::{
    error::ModelError,
    index::{BondIndex, ConstraintIndex, SiteIndex, VariableIndex},
    lattice::{Lattice, LatticeHalf},
    program::{BinaryProgram, Sense, Term},
    triple::CounterTriple,
};

/// Handles of the rows whose right-hand sides define a query.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CounterConstraints {
    pub ngb: ConstraintIndex,
    pub kgb: ConstraintIndex,
    pub kc: ConstraintIndex,
    pub num_solute: ConstraintIndex,
}

/// A lattice together with its 0/1 encoding.
#[derive(Clone, Debug)]
pub struct LatticeModel {
    lattice: Lattice,
    num_solute: usize,
    program: BinaryProgram,
    counters: CounterConstraints,
    symmetry: Option<ConstraintIndex>,
    hint_sites: [SiteIndex; 2],
}

impl LatticeModel {
    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn num_solute(&self) -> usize {
        self.num_solute
    }

    #[inline]
    pub fn program(&self) -> &BinaryProgram {
        &self.program
    }

    /// Gives up the program, e.g. to hand it to a search backend.
    #[inline]
    pub fn into_parts(self) -> (LatticeModelLayout, BinaryProgram) {
        let layout = LatticeModelLayout {
            lattice: self.lattice,
            num_solute: self.num_solute,
            counters: self.counters,
            symmetry: self.symmetry,
            hint_sites: self.hint_sites,
        };
        (layout, self.program)
    }

    #[inline]
    pub fn counters(&self) -> CounterConstraints {
        self.counters
    }

    #[inline]
    pub fn symmetry_constraint(&self) -> Option<ConstraintIndex> {
        self.symmetry
    }

    #[inline]
    pub fn hint_sites(&self) -> [SiteIndex; 2] {
        self.hint_sites
    }

    #[inline]
    pub fn site_variable(&self, site: SiteIndex) -> VariableIndex {
        site_variable(site)
    }

    #[inline]
    pub fn bond_variable(&self, bond: BondIndex) -> VariableIndex {
        bond_variable(&self.lattice, bond)
    }
}

/// Everything of a `LatticeModel` except the program itself.
///
/// Used by components that drive a program owned by someone else (a search
/// backend) and only need to know which rows and variables mean what.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeModelLayout {
    lattice: Lattice,
    num_solute: usize,
    counters: CounterConstraints,
    symmetry: Option<ConstraintIndex>,
    hint_sites: [SiteIndex; 2],
}

impl LatticeModelLayout {
    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn num_solute(&self) -> usize {
        self.num_solute
    }

    #[inline]
    pub fn counters(&self) -> CounterConstraints {
        self.counters
    }

    #[inline]
    pub fn symmetry_constraint(&self) -> Option<ConstraintIndex> {
        self.symmetry
    }

    /// The interface site in column 0 of the lower and of the upper interface
    /// row, in that order.
    #[inline]
    pub fn hint_sites(&self) -> [SiteIndex; 2] {
        self.hint_sites
    }

    #[inline]
    pub fn site_variable(&self, site: SiteIndex) -> VariableIndex {
        site_variable(site)
    }

    #[inline]
    pub fn bond_variable(&self, bond: BondIndex) -> VariableIndex {
        bond_variable(&self.lattice, bond)
    }

    /// The right-hand sides that make the counter rows ask for `triple`.
    pub fn counter_targets(&self, triple: CounterTriple) -> [(ConstraintIndex, i64); 3] {
        [
            (self.counters.ngb, triple.ngb as i64),
            (self.counters.kgb, triple.kgb as i64),
            (self.counters.kc, triple.kc as i64),
        ]
    }
}

#[inline]
fn site_variable(site: SiteIndex) -> VariableIndex {
    VariableIndex::new(site.get())
}

#[inline]
fn bond_variable(lattice: &Lattice, bond: BondIndex) -> VariableIndex {
    VariableIndex::new(lattice.num_sites() + bond.get())
}

/// Builds a `LatticeModel`.
///
/// ```rust
/// # use bicrystal_model::builder::LatticeModelBuilder;
/// let model = LatticeModelBuilder::new(4, 3).build().unwrap();
/// assert_eq!(model.program().num_variables(), 16 + 48);
/// ```
#[derive(Clone, Debug)]
pub struct LatticeModelBuilder {
    side: usize,
    num_solute: usize,
    symmetry_breaking: bool,
}

impl LatticeModelBuilder {
    /// A builder for side `side` and `num_solute` solutes, with symmetry
    /// breaking enabled.
    pub fn new(side: usize, num_solute: usize) -> Self {
        Self {
            side,
            num_solute,
            symmetry_breaking: true,
        }
    }

    /// Enables or disables the lower-half-dominates row.
    pub fn symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidSide` for `side < 2`, and
    /// `ModelError::InvalidSoluteCount` when the solutes do not fit.
    pub fn build(self) -> Result<LatticeModel, ModelError> {
        let lattice = Lattice::new(self.side)?;
        if self.num_solute > lattice.num_sites() {
            return Err(ModelError::InvalidSoluteCount {
                num_solute: self.num_solute,
                num_sites: lattice.num_sites(),
            });
        }

        let mut program = BinaryProgram::new();
        for _ in lattice.sites() {
            program.add_variable();
        }
        for _ in lattice.bonds() {
            program.add_variable();
        }

        for (b, bond) in lattice.indexed_bonds() {
            let y = bond_variable(&lattice, b);
            let u = site_variable(bond.source());
            let v = site_variable(bond.target());
            program.add_constraint(vec![Term::new(y, 1), Term::new(u, -1)], Sense::LessEqual, 0);
            program.add_constraint(vec![Term::new(y, 1), Term::new(v, -1)], Sense::LessEqual, 0);
            program.add_constraint(
                vec![Term::new(y, 1), Term::new(u, -1), Term::new(v, -1)],
                Sense::GreaterEqual,
                -1,
            );
        }

        let ngb = program.add_constraint(
            lattice
                .interface_sites()
                .map(|s| Term::new(site_variable(s), 1))
                .collect(),
            Sense::Equal,
            0,
        );
        let bonds_of = |interface: bool| -> Vec<Term> {
            lattice
                .indexed_bonds()
                .filter(|(_, bond)| bond.is_interface() == interface)
                .map(|(b, _)| Term::new(bond_variable(&lattice, b), 1))
                .collect()
        };
        let kgb = program.add_constraint(bonds_of(true), Sense::Equal, 0);
        let kc = program.add_constraint(bonds_of(false), Sense::Equal, 0);
        let num_solute = program.add_constraint(
            lattice
                .sites()
                .map(|s| Term::new(site_variable(s), 1))
                .collect(),
            Sense::Equal,
            self.num_solute as i64,
        );

        let symmetry = self.symmetry_breaking.then(|| {
            program.add_constraint(
                lattice
                    .sites()
                    .filter_map(|s| {
                        let sign = match lattice.half(s)? {
                            LatticeHalf::Lower => 1,
                            LatticeHalf::Upper => -1,
                        };
                        Some(Term::new(site_variable(s), sign))
                    })
                    .collect(),
                Sense::GreaterEqual,
                0,
            )
        });

        let gb = lattice.gb_row();
        let hint_sites = [lattice.site_index(gb, 0), lattice.site_index(gb + 1, 0)];

        Ok(LatticeModel {
            lattice,
            num_solute: self.num_solute,
            program,
            counters: CounterConstraints {
                ngb,
                kgb,
                kc,
                num_solute,
            },
            symmetry,
            hint_sites,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::witness::WitnessGrid;
    use proptest::prelude::*;

    fn assignment(model: &LatticeModel, grid: &WitnessGrid) -> Vec<bool> {
        let lattice = model.lattice();
        let mut values = vec![false; model.program().num_variables()];
        for site in lattice.sites() {
            values[model.site_variable(site).get()] = grid.is_site_occupied(site);
        }
        for (b, bond) in lattice.indexed_bonds() {
            values[model.bond_variable(b).get()] =
                grid.is_site_occupied(bond.source()) && grid.is_site_occupied(bond.target());
        }
        values
    }

    fn retarget(model: &mut LatticeModel, triple: CounterTriple) {
        let (layout, mut program) = model.clone().into_parts();
        for (row, rhs) in layout.counter_targets(triple) {
            program.set_rhs(row, rhs);
        }
        model.program = program;
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert_eq!(
            LatticeModelBuilder::new(1, 0).build().unwrap_err(),
            ModelError::InvalidSide { side: 1 }
        );
        assert_eq!(
            LatticeModelBuilder::new(3, 10).build().unwrap_err(),
            ModelError::InvalidSoluteCount {
                num_solute: 10,
                num_sites: 9
            }
        );
        assert!(LatticeModelBuilder::new(3, 9).build().is_ok());
    }

    #[test]
    fn test_program_shape() {
        let model = LatticeModelBuilder::new(4, 3).build().unwrap();
        let program = model.program();
        assert_eq!(program.num_variables(), 16 + 48);
        // 3 rows per bond, 4 counter rows, 1 symmetry row.
        assert_eq!(program.num_constraints(), 3 * 48 + 4 + 1);
        assert_eq!(program.constraint(model.counters().num_solute).rhs(), 3);

        let plain = LatticeModelBuilder::new(4, 3)
            .symmetry_breaking(false)
            .build()
            .unwrap();
        assert_eq!(plain.program().num_constraints(), 3 * 48 + 4);
        assert!(plain.symmetry_constraint().is_none());
    }

    #[test]
    fn test_hint_sites_are_column_zero_of_interface_rows() {
        let model = LatticeModelBuilder::new(6, 2).build().unwrap();
        let lattice = model.lattice();
        assert_eq!(
            model.hint_sites(),
            [lattice.site_index(2, 0), lattice.site_index(3, 0)]
        );
    }

    #[test]
    fn test_witness_satisfies_program_for_its_own_triple() {
        let mut model = LatticeModelBuilder::new(4, 3).build().unwrap();
        let grid = WitnessGrid::from_rows(&[[0, 0, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]]);
        let triple = grid.counters(model.lattice());
        assert_eq!(triple, CounterTriple::new(3, 1, 1));

        retarget(&mut model, triple);
        assert!(model.program().is_satisfied_by(&assignment(&model, &grid)));

        retarget(&mut model, CounterTriple::new(3, 1, 0));
        assert!(!model.program().is_satisfied_by(&assignment(&model, &grid)));
    }

    #[test]
    fn test_symmetry_row_rejects_upper_heavy_placements() {
        let mut model = LatticeModelBuilder::new(4, 3).build().unwrap();
        let grid = WitnessGrid::from_rows(&[[0, 0, 0, 0], [0, 0, 0, 0], [1, 0, 0, 0], [0, 1, 0, 1]]);
        let triple = grid.counters(model.lattice());
        retarget(&mut model, triple);
        let values = assignment(&model, &grid);
        assert!(!model.program().is_satisfied_by(&values));
        assert_eq!(
            model.program().violated_constraints(&values),
            vec![model.symmetry_constraint().unwrap()]
        );
    }

    fn mirrored(lattice: &Lattice, grid: &WitnessGrid) -> WitnessGrid {
        let mut image = WitnessGrid::new(lattice.side());
        for site in lattice.sites() {
            image.set_site(lattice.mirror_site(site), grid.is_site_occupied(site));
        }
        image
    }

    #[test]
    fn test_symmetry_row_leaves_out_last_row_of_odd_side() {
        let model = LatticeModelBuilder::new(3, 2).build().unwrap();
        let row = model.program().constraint(model.symmetry_constraint().unwrap());
        assert_eq!(row.terms().len(), 6);
        let last_row: Vec<VariableIndex> = (0..3)
            .map(|col| model.site_variable(model.lattice().site_index(2, col)))
            .collect();
        assert!(row.terms().iter().all(|t| !last_row.contains(&t.variable)));

        // Both solutes in the self-mirrored row: bulk only, allowed.
        let mut model = model;
        let grid = WitnessGrid::from_rows(&[[0, 0, 0], [0, 0, 0], [1, 1, 0]]);
        let triple = grid.counters(model.lattice());
        assert_eq!(triple, CounterTriple::new(0, 0, 1));
        retarget(&mut model, triple);
        assert!(model.program().is_satisfied_by(&assignment(&model, &grid)));
    }

    #[test]
    fn test_every_placement_of_side_three_has_a_representative() {
        let mut model = LatticeModelBuilder::new(3, 0).build().unwrap();
        let lattice = model.lattice().clone();
        for mask in 0u32..(1 << 9) {
            let mut grid = WitnessGrid::new(3);
            for site in lattice.sites() {
                grid.set_site(site, mask & (1 << site.get()) != 0);
            }
            let image = mirrored(&lattice, &grid);
            let triple = grid.counters(&lattice);
            assert_eq!(image.counters(&lattice), triple);

            let (layout, mut program) = model.clone().into_parts();
            for (row, rhs) in layout.counter_targets(triple) {
                program.set_rhs(row, rhs);
            }
            program.set_rhs(layout.counters().num_solute, grid.num_occupied() as i64);
            model.program = program;
            assert!(
                model.program().is_satisfied_by(&assignment(&model, &grid))
                    || model.program().is_satisfied_by(&assignment(&model, &image)),
                "mask {mask:#b}"
            );
        }
    }

    proptest! {
        #[test]
        fn test_mirror_image_keeps_counters_and_flips_symmetry_activity(
            side in 2usize..=7,
            bits in proptest::collection::vec(any::<bool>(), 49),
        ) {
            let model = LatticeModelBuilder::new(side, 0).build().unwrap();
            let lattice = model.lattice();
            let mut grid = WitnessGrid::new(side);
            for site in lattice.sites() {
                grid.set_site(site, bits[site.get()]);
            }
            let image = mirrored(lattice, &grid);
            prop_assert_eq!(image.counters(lattice), grid.counters(lattice));

            let row = model.program().constraint(model.symmetry_constraint().unwrap());
            prop_assert_eq!(
                row.activity(&assignment(&model, &image)),
                -row.activity(&assignment(&model, &grid))
            );
        }
    }
}
