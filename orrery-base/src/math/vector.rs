//! Fixed-size vectors.
//! This module is private but reexported by its parent.

use core::fmt;
use core::ops;

use num_traits::{Float, One, Zero};

/// A vector of `N` numeric components of type `T`, with value semantics.
///
/// Four-component vectors are used as homogeneous coordinates: component 3 (“w”) is 1 for
/// points and 0 for directions. See [`Vector::point()`] and [`Vector::direction()`].
///
/// Indexing with `v[i]` panics if `i` is out of range.
/// [`Vector::clamped()`] is the alternative which substitutes the last component for any
/// out-of-range index.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Vector<T, const N: usize>([T; N]);

/// Two-component [`Vector`].
pub type Vector2<T> = Vector<T, 2>;
/// Three-component [`Vector`].
pub type Vector3<T> = Vector<T, 3>;
/// Four-component [`Vector`], usually a homogeneous point or direction.
pub type Vector4<T> = Vector<T, 4>;

impl<T, const N: usize> Vector<T, N> {
    /// Constructs a vector from an array of its components.
    #[inline]
    pub const fn from_array(components: [T; N]) -> Self {
        Self(components)
    }

    /// Returns the components as an array.
    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Borrows the components as an array.
    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    /// Applies `f` to each component.
    #[inline]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Vector<U, N> {
        Vector(self.0.map(f))
    }

    /// Mutable access to the component at `index`, or to the last component if `index` is
    /// out of range.
    #[inline]
    pub fn clamped_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index.min(N.saturating_sub(1))]
    }
}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Returns the component at `index`, or the last component if `index` is out of range.
    ///
    /// ```
    /// use orrery_base::math::Vector3;
    ///
    /// let v = Vector3::new(1, 2, 3);
    /// assert_eq!(v.clamped(1), 2);
    /// assert_eq!(v.clamped(17), 3);
    /// ```
    #[inline]
    pub fn clamped(&self, index: usize) -> T {
        self.0[index.min(N.saturating_sub(1))]
    }
}

impl<T: Copy + Zero, const N: usize> Vector<T, N> {
    /// The vector whose components are all zero.
    #[inline]
    pub fn zero() -> Self {
        Self([T::zero(); N])
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> T
    where
        T: ops::Mul<Output = T>,
    {
        self.0
            .into_iter()
            .zip(other.0)
            .fold(T::zero(), |sum, (a, b)| sum + a * b)
    }
}

impl<T: Float, const N: usize> Vector<T, N> {
    /// Euclidean length of all components.
    #[inline]
    pub fn length(self) -> T {
        self.dot(self).sqrt()
    }

    /// Divides every component by [`Self::length()`].
    ///
    /// The zero vector has no direction; normalizing it produces NaN components.
    #[inline]
    #[must_use]
    pub fn norm(self) -> Self {
        self / self.length()
    }

    /// Returns the largest absolute difference between corresponding components.
    /// Useful for approximate comparisons.
    #[inline]
    pub fn max_abs_difference(self, other: Self) -> T {
        self.0
            .into_iter()
            .zip(other.0)
            .fold(T::zero(), |max, (a, b)| max.max((a - b).abs()))
    }

    /// Returns whether every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.into_iter().all(T::is_finite)
    }
}

impl<T> Vector<T, 2> {
    /// Constructs a vector from its components.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self([x, y])
    }
}

impl<T> Vector<T, 3> {
    /// Constructs a vector from its components.
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self([x, y, z])
    }

    /// Appends a fourth component, e.g. 1 to make a homogeneous point or 0 for a direction.
    #[inline]
    pub fn extend(self, w: T) -> Vector4<T> {
        let [x, y, z] = self.0;
        Vector([x, y, z, w])
    }
}

impl<T: Copy + ops::Mul<Output = T> + ops::Sub<Output = T>> Vector<T, 3> {
    /// Cross product.
    #[inline]
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Self([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }
}

impl<T> Vector<T, 4> {
    /// Constructs a vector from its components.
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self([x, y, z, w])
    }

    /// Discards the w component.
    #[inline]
    pub fn truncate(self) -> Vector3<T> {
        let [x, y, z, _] = self.0;
        Vector([x, y, z])
    }
}

impl<T: One> Vector<T, 4> {
    /// Constructs a homogeneous point (w = 1).
    #[inline]
    pub fn point(x: T, y: T, z: T) -> Self {
        Self([x, y, z, T::one()])
    }
}

impl<T: Zero> Vector<T, 4> {
    /// Constructs a homogeneous direction (w = 0).
    #[inline]
    pub fn direction(x: T, y: T, z: T) -> Self {
        Self([x, y, z, T::zero()])
    }
}

impl<T: Copy + One + ops::Mul<Output = T> + ops::Sub<Output = T>> Vector<T, 4> {
    /// Cross product of the x, y, z parts. The result has w = 1.
    #[inline]
    #[must_use]
    pub fn cross_h(self, other: Self) -> Self {
        self.truncate().cross(other.truncate()).extend(T::one())
    }
}

impl<T: Float> Vector<T, 4> {
    /// Homogeneous normalization: if w is not 1, x, y, and z are first divided by w;
    /// then x, y, and z are scaled to unit length and w is set to 1.
    #[inline]
    #[must_use]
    pub fn norm_h(self) -> Self {
        let [x, y, z, w] = self.0;
        let xyz = if w == T::one() {
            Vector([x, y, z])
        } else {
            Vector([x / w, y / w, z / w])
        };
        xyz.norm().extend(T::one())
    }
}

macro_rules! component_accessors {
    ($n:literal: $($name:ident = $index:literal),*) => {
        impl<T: Copy> Vector<T, $n> {
            $(
                #[doc = concat!("Returns component ", stringify!($index), ".")]
                #[inline]
                pub fn $name(&self) -> T {
                    self.0[$index]
                }
            )*
        }
    };
}
component_accessors!(2: x = 0, y = 1);
component_accessors!(3: x = 0, y = 1, z = 2);
component_accessors!(4: x = 0, y = 1, z = 2, w = 3);

impl<T: Copy + Zero, const N: usize> Default for Vector<T, N> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(components: [T; N]) -> Self {
        Self(components)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(vector: Vector<T, N>) -> Self {
        vector.0
    }
}

impl<T, const N: usize> ops::Index<usize> for Vector<T, N> {
    type Output = T;
    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const N: usize> ops::IndexMut<usize> for Vector<T, N> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T: Copy + ops::Add<Output = T>, const N: usize> ops::Add for Vector<T, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<T: Copy + ops::Sub<Output = T>, const N: usize> ops::Sub for Vector<T, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<T: Copy + ops::Neg<Output = T>, const N: usize> ops::Neg for Vector<T, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<T: Copy + ops::Mul<Output = T>, const N: usize> ops::Mul<T> for Vector<T, N> {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: T) -> Self {
        self.map(|c| c * scalar)
    }
}

impl<T: Copy + ops::Div<Output = T>, const N: usize> ops::Div<T> for Vector<T, N> {
    type Output = Self;
    #[inline]
    fn div(self, scalar: T) -> Self {
        self.map(|c| c / scalar)
    }
}

impl<T: Copy + ops::Add<Output = T>, const N: usize> ops::AddAssign for Vector<T, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Copy + ops::Sub<Output = T>, const N: usize> ops::SubAssign for Vector<T, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Copy + ops::Mul<Output = T>, const N: usize> ops::MulAssign<T> for Vector<T, N> {
    #[inline]
    fn mul_assign(&mut self, scalar: T) {
        *self = *self * scalar;
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = f.debug_tuple("Vector");
        for component in &self.0 {
            t.field(component);
        }
        t.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng as _};
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(0.5, -1.0, 4.0);
        assert_eq!(a + b, Vector3::new(1.5, 1.0, 7.0));
        assert_eq!(a - b, Vector3::new(0.5, 3.0, -1.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));
        assert_eq!(a.dot(b), 0.5 - 2.0 + 12.0);

        let mut c = a;
        c += b;
        c -= a;
        c *= 2.0;
        assert_eq!(c, b * 2.0);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Vector4::<f64>::default(), Vector4::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(Vector2::<i32>::zero(), Vector2::new(0, 0));
    }

    #[test]
    fn cross_is_right_handed() {
        let x = Vector3::new(1, 0, 0);
        let y = Vector3::new(0, 1, 0);
        assert_eq!(x.cross(y), Vector3::new(0, 0, 1));
        assert_eq!(y.cross(x), Vector3::new(0, 0, -1));
    }

    #[test]
    fn cross_h_sets_w() {
        let x = Vector4::direction(1.0, 0.0, 0.0);
        let y = Vector4::direction(0.0, 1.0, 0.0);
        assert_eq!(x.cross_h(y), Vector4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn norm_is_unit_length() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x5eed_0f_0bb1);
        for _ in 0..100 {
            let v: Vector4<f64> = Vector4::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            );
            let length = v.norm().length();
            assert!((length - 1.0f64).abs() < 1e-12, "{v:?} normalized to length {length}");
        }
    }

    #[test]
    fn norm_of_zero_is_nan() {
        assert!(Vector3::<f64>::zero().norm().x().is_nan());
    }

    #[test]
    fn norm_h_divides_by_w() {
        let v = Vector4::new(0.0, 6.0, 0.0, 2.0).norm_h();
        assert_eq!(v, Vector4::new(0.0, 1.0, 0.0, 1.0));

        let d = Vector4::new(3.0, 0.0, 4.0, 1.0).norm_h();
        assert_eq!(d, Vector4::new(0.6, 0.0, 0.8, 1.0));
    }

    #[test]
    fn clamped_access() {
        let mut v = Vector4::new(1, 2, 3, 4);
        assert_eq!(v.clamped(0), 1);
        assert_eq!(v.clamped(3), 4);
        assert_eq!(v.clamped(4), 4);
        assert_eq!(v.clamped(usize::MAX), 4);
        *v.clamped_mut(10) = 40;
        assert_eq!(v, Vector4::new(1, 2, 3, 40));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_out_of_range_panics() {
        let v = Vector3::new(1, 2, 3);
        let _ = v[3];
    }

    #[test]
    fn homogeneous_constructors() {
        assert_eq!(Vector4::point(1, 2, 3).w(), 1);
        assert_eq!(Vector4::direction(1, 2, 3).w(), 0);
        assert_eq!(Vector4::point(1, 2, 3).truncate(), Vector3::new(1, 2, 3));
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", Vector3::new(1.0, 2.5, -3.0)),
            "Vector(1.0, 2.5, -3.0)"
        );
    }
}
