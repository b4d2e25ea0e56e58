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

use bicrystal_core::math::point::Point3;
use serde::{Deserialize, Serialize};

/// The configuration class of an occupancy: occupied interface sites
/// (`ngb`), interface bonds with both ends occupied (`kgb`) and bulk bonds
/// with both ends occupied (`kc`).
///
/// Ordering is lexicographic in `(ngb, kgb, kc)`, the enumeration order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CounterTriple {
    pub ngb: usize,
    pub kgb: usize,
    pub kc: usize,
}

impl CounterTriple {
    #[inline]
    pub const fn new(ngb: usize, kgb: usize, kc: usize) -> Self {
        Self { ngb, kgb, kc }
    }

    /// The triple as an integer point for hull computations.
    #[inline]
    pub fn to_point(&self) -> Point3<i64> {
        Point3::new(self.ngb as i64, self.kgb as i64, self.kc as i64)
    }
}

impl From<(usize, usize, usize)> for CounterTriple {
    #[inline]
    fn from((ngb, kgb, kc): (usize, usize, usize)) -> Self {
        Self::new(ngb, kgb, kc)
    }
}

impl std::fmt::Display for CounterTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ngb= {} kgb= {} kc= {}", self.ngb, self.kgb, self.kc)
    }
}
