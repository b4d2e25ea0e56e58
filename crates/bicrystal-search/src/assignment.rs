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

use bicrystal_model::index::VariableIndex;

/// Solution values of a feasible answer, one per program variable.
///
/// Values are `f64` because that is what external MIP solvers report; a
/// binary variable may come back as `0.9999999`. Use `rounded` or
/// `is_one` rather than comparing against `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    #[inline]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Builds an assignment from exact 0/1 values.
    pub fn from_bits(bits: &[bool]) -> Self {
        Self::new(bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Raw value of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is out of bounds.
    #[inline]
    pub fn value(&self, variable: VariableIndex) -> f64 {
        let index = variable.get();
        debug_assert!(
            index < self.values.len(),
            "called `Assignment::value` with variable index out of bounds: the len is {} but the index is {}",
            self.values.len(),
            index
        );
        self.values[index]
    }

    /// Value rounded to the nearest integer.
    #[inline]
    pub fn rounded(&self, variable: VariableIndex) -> i64 {
        self.value(variable).round() as i64
    }

    /// Returns `true` if the variable rounds to one.
    #[inline]
    pub fn is_one(&self, variable: VariableIndex) -> bool {
        self.rounded(variable) == 1
    }

    /// All values rounded to 0/1.
    pub fn to_bits(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.round() as i64 == 1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_tolerates_solver_noise() {
        let a = Assignment::new(vec![0.9999999, 1e-9, 0.5000001, 0.49]);
        assert!(a.is_one(VariableIndex::new(0)));
        assert!(!a.is_one(VariableIndex::new(1)));
        assert_eq!(a.rounded(VariableIndex::new(2)), 1);
        assert_eq!(a.to_bits(), vec![true, false, true, false]);
    }

    #[test]
    fn test_from_bits() {
        let a = Assignment::from_bits(&[true, false]);
        assert_eq!(a.values(), &[1.0, 0.0]);
        assert_eq!(a.len(), 2);
    }
}
