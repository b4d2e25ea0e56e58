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

use num_traits::{PrimInt, Signed};

/// A point with integer coordinates.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Point3<T> {
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T> Point3<T>
where
    T: PrimInt + Signed + Into<i128>,
{
    /// Returns the coordinates widened to `i128`.
    #[inline]
    pub fn widen(&self) -> Vector3 {
        Vector3::new(self.x.into(), self.y.into(), self.z.into())
    }

    /// Returns the largest absolute coordinate.
    #[inline]
    pub fn max_abs_coordinate(&self) -> i128 {
        let v = self.widen();
        v.x.abs().max(v.y.abs()).max(v.z.abs())
    }
}

impl<T> std::fmt::Display for Point3<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A 3-vector in `i128`, the working type of every exact predicate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Vector3 {
    pub x: i128,
    pub y: i128,
    pub z: i128,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0, 0, 0);

    #[inline]
    pub const fn new(x: i128, y: i128, z: i128) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn sub(&self, other: &Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[inline]
    pub fn dot(&self, other: &Vector3) -> i128 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    /// Returns the component along `axis` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn component(&self, axis: usize) -> i128 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Divides every component by their greatest common divisor.
    ///
    /// Facet normals are kept primitive so later products stay small.
    pub fn primitive(&self) -> Vector3 {
        let g = gcd(gcd(self.x.abs(), self.y.abs()), self.z.abs());
        if g <= 1 {
            return *self;
        }
        Vector3::new(self.x / g, self.y / g, self.z / g)
    }
}

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

#[inline]
fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Signed volume (times six) of the tetrahedron `a, b, c, d`.
///
/// Positive when `d` lies on the side of the plane through `a, b, c` that
/// `(b - a) × (c - a)` points to, zero when the four points are coplanar.
#[inline]
pub fn orient3d(a: &Vector3, b: &Vector3, c: &Vector3, d: &Vector3) -> i128 {
    b.sub(a).cross(&c.sub(a)).dot(&d.sub(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i128, y: i128, z: i128) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn test_widen_preserves_coordinates() {
        let p = Point3::new(-3i64, 4, 7);
        assert_eq!(p.widen(), v(-3, 4, 7));
        assert_eq!(p.max_abs_coordinate(), 7);
    }

    #[test]
    fn test_cross_of_unit_axes() {
        assert_eq!(v(1, 0, 0).cross(&v(0, 1, 0)), v(0, 0, 1));
        assert_eq!(v(0, 1, 0).cross(&v(1, 0, 0)), v(0, 0, -1));
        assert!(v(2, 4, 6).cross(&v(1, 2, 3)).is_zero());
    }

    #[test]
    fn test_orient3d_sign() {
        let o = v(0, 0, 0);
        let a = v(1, 0, 0);
        let b = v(0, 1, 0);
        assert!(orient3d(&o, &a, &b, &v(0, 0, 1)) > 0);
        assert!(orient3d(&o, &a, &b, &v(0, 0, -1)) < 0);
        assert_eq!(orient3d(&o, &a, &b, &v(5, 7, 0)), 0);
    }

    #[test]
    fn test_primitive_divides_by_gcd() {
        assert_eq!(v(4, -6, 8).primitive(), v(2, -3, 4));
        assert_eq!(v(0, 0, -5).primitive(), v(0, 0, -1));
        assert_eq!(v(0, 0, 0).primitive(), v(0, 0, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Point3::new(1i64, 2, 3)), "(1, 2, 3)");
        assert_eq!(format!("{}", v(1, -2, 3)), "<1, -2, 3>");
    }
}
