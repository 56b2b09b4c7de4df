//! Square matrices and the homogeneous transformations built from them.
//! This module is private but reexported by its parent.

use core::fmt;
use core::ops;

use num_traits::{Float, One, Zero};

use crate::math::{Axis, Vector, Vector2, Vector3};

/// An `N`×`N` matrix stored as rows, with value semantics.
///
/// Matrices multiply column vectors: `m * v` treats `v` as a column, and `a * b` applies `b`
/// first and then `a`.
///
/// Indexing with `m[(row, column)]` panics if either index is out of range;
/// [`Matrix::clamped()`] substitutes the last row or column instead.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Matrix<T, const N: usize>([[T; N]; N]);

/// 3×3 [`Matrix`], used for two-dimensional homogeneous transformations.
pub type Matrix3<T> = Matrix<T, 3>;
/// 4×4 [`Matrix`], used for three-dimensional homogeneous transformations.
pub type Matrix4<T> = Matrix<T, 4>;

impl<T, const N: usize> Matrix<T, N> {
    /// Constructs a matrix from an array of rows.
    #[inline]
    pub const fn from_rows(rows: [[T; N]; N]) -> Self {
        Self(rows)
    }

    /// Returns the array of rows.
    #[inline]
    pub fn into_rows(self) -> [[T; N]; N] {
        self.0
    }
}

impl<T: Copy, const N: usize> Matrix<T, N> {
    /// Returns the element at (`row`, `column`), clamping each out-of-range index to the last
    /// row or column.
    #[inline]
    pub fn clamped(&self, row: usize, column: usize) -> T {
        let last = N.saturating_sub(1);
        self.0[row.min(last)][column.min(last)]
    }

    /// Mutable counterpart of [`Self::clamped()`].
    #[inline]
    pub fn clamped_mut(&mut self, row: usize, column: usize) -> &mut T {
        let last = N.saturating_sub(1);
        &mut self.0[row.min(last)][column.min(last)]
    }

    /// Returns the row at `index`.
    #[inline]
    #[track_caller]
    pub fn row(&self, index: usize) -> Vector<T, N> {
        Vector::from_array(self.0[index])
    }

    /// Returns the column at `index`.
    #[inline]
    #[track_caller]
    pub fn column(&self, index: usize) -> Vector<T, N> {
        Vector::from_array(core::array::from_fn(|i| self.0[i][index]))
    }

    /// Swaps rows and columns.
    #[inline]
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self(core::array::from_fn(|i| core::array::from_fn(|j| self.0[j][i])))
    }
}

impl<T: Copy + Zero, const N: usize> Matrix<T, N> {
    /// The matrix whose elements are all zero.
    #[inline]
    pub fn zero() -> Self {
        Self([[T::zero(); N]; N])
    }
}

impl<T: Copy + Zero + One, const N: usize> Matrix<T, N> {
    /// The identity matrix.
    #[inline]
    pub fn identity() -> Self {
        let mut m = Self::zero();
        for i in 0..N {
            m.0[i][i] = T::one();
        }
        m
    }
}

impl<T: Float, const N: usize> Matrix<T, N> {
    /// Returns the largest absolute difference between corresponding elements.
    /// Useful for approximate comparisons.
    #[inline]
    pub fn max_abs_difference(&self, other: &Self) -> T {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .fold(T::zero(), |max, (&a, &b)| max.max((a - b).abs()))
    }

    /// Returns whether every element is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|e| e.is_finite())
    }
}

impl<T: Float> Matrix<T, 4> {
    /// Translation by `offset`. Points move; directions (w = 0) are unaffected.
    #[inline]
    pub fn translation(offset: Vector3<T>) -> Self {
        let mut m = Self::identity();
        for i in 0..3 {
            m.0[i][3] = offset[i];
        }
        m
    }

    /// Counterclockwise rotation by `angle` radians about one of the coordinate axes, as seen
    /// looking from the positive end of the axis toward the origin.
    #[inline]
    pub fn rotation(angle: T, axis: Axis) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self(match axis {
            Axis::X => [[l, o, o, o], [o, c, -s, o], [o, s, c, o], [o, o, o, l]],
            Axis::Y => [[c, o, s, o], [o, l, o, o], [-s, o, c, o], [o, o, o, l]],
            Axis::Z => [[c, -s, o, o], [s, c, o, o], [o, o, l, o], [o, o, o, l]],
        })
    }

    /// Rotation by `angle` radians about the line through the origin in the direction of
    /// `axis`, with the same handedness as [`Self::rotation()`].
    ///
    /// `axis` need not be normalized, but must not be zero; a zero axis produces NaN.
    #[allow(clippy::many_single_char_names)]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn rotation_about_axis(angle: T, axis: Vector3<T>) -> Self {
        let [x, y, z] = axis.norm().into_array();
        let d = x.hypot(y);
        if d == T::zero() {
            return Self::rotation(if z < T::zero() { -angle } else { angle }, Axis::Z);
        }
        let (o, l) = (T::zero(), T::one());
        // Rotate about Z into the XZ plane, then about Y onto +Z.
        let onto_xz = Self([
            [x / d, y / d, o, o],
            [-y / d, x / d, o, o],
            [o, o, l, o],
            [o, o, o, l],
        ]);
        let onto_z = Self([
            [z, o, -d, o],
            [o, l, o, o],
            [d, o, z, o],
            [o, o, o, l],
        ]);
        let align = onto_z * onto_xz;
        align.transpose() * Self::rotation(angle, Axis::Z) * align
    }

    /// Rotation by `angle` radians about the line through `pivot` in the direction of `axis`.
    ///
    /// ```
    /// use orrery_base::math::{Matrix4, Vector3, Vector4};
    ///
    /// let m = Matrix4::rotation_about_point(
    ///     std::f64::consts::PI,
    ///     Vector3::new(0.0, 0.0, 1.0),
    ///     Vector3::new(1.0, 0.0, 0.0),
    /// );
    /// let moved = m * Vector4::point(2.0, 0.0, 0.0);
    /// assert!((moved - Vector4::point(0.0, 0.0, 0.0)).length() < 1e-12);
    /// ```
    #[inline]
    pub fn rotation_about_point(angle: T, axis: Vector3<T>, pivot: Vector3<T>) -> Self {
        Self::translation(pivot)
            * Self::rotation_about_axis(angle, axis)
            * Self::translation(-pivot)
    }

    /// Computes the inverse matrix by LU decomposition with relative maximum partial pivoting.
    ///
    /// Returns [`None`] if the matrix is singular (a zero pivot is encountered) or if the
    /// result is not finite.
    #[allow(clippy::needless_range_loop)]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn inverse(&self) -> Option<Self> {
        let mut lu = self.0;
        let mut swaps = [0usize; 3];

        for k in 0..3 {
            let mut max = T::zero();
            for i in k..4 {
                let sum = lu[i][k..].iter().fold(T::zero(), |sum, e| sum + e.abs());
                if sum == T::zero() {
                    return None;
                }
                let ratio = lu[i][k].abs() / sum;
                if ratio > max {
                    max = ratio;
                    swaps[k] = i;
                }
            }
            if max == T::zero() {
                return None;
            }
            lu.swap(k, swaps[k]);
            for i in (k + 1)..4 {
                lu[i][k] = lu[i][k] / lu[k][k];
                for j in (k + 1)..4 {
                    lu[i][j] = lu[i][j] - lu[i][k] * lu[k][j];
                }
            }
        }
        if lu[3][3] == T::zero() {
            return None;
        }

        let mut result = Self::zero();
        for k in 0..4 {
            let mut b = [T::zero(); 4];
            b[k] = T::one();
            for (i, &swap) in swaps.iter().enumerate() {
                b.swap(i, swap);
            }
            for i in 0..4 {
                for j in 0..i {
                    b[i] = b[i] - lu[i][j] * b[j];
                }
            }
            for i in (0..4).rev() {
                for j in (i + 1)..4 {
                    b[i] = b[i] - lu[i][j] * b[j];
                }
                b[i] = b[i] / lu[i][i];
            }
            for i in 0..4 {
                result.0[i][k] = b[i];
            }
        }

        result.is_finite().then_some(result)
    }
}

impl<T: Float> Matrix<T, 3> {
    /// Two-dimensional translation by `offset`, acting on homogeneous `(x, y, 1)` points.
    #[inline]
    pub fn translation_2d(offset: Vector2<T>) -> Self {
        let mut m = Self::identity();
        m.0[0][2] = offset.x();
        m.0[1][2] = offset.y();
        m
    }

    /// Two-dimensional counterclockwise rotation by `angle` radians about the origin.
    #[inline]
    pub fn rotation_2d(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self([[c, -s, o], [s, c, o], [o, o, l]])
    }
}

impl<T, const N: usize> ops::Index<(usize, usize)> for Matrix<T, N> {
    type Output = T;
    #[inline]
    #[track_caller]
    fn index(&self, (row, column): (usize, usize)) -> &T {
        &self.0[row][column]
    }
}

impl<T, const N: usize> ops::IndexMut<(usize, usize)> for Matrix<T, N> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        &mut self.0[row][column]
    }
}

impl<T: Copy + Zero + ops::Mul<Output = T>, const N: usize> ops::Mul for Matrix<T, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(core::array::from_fn(|i| {
            core::array::from_fn(|j| {
                (0..N).fold(T::zero(), |sum, k| sum + self.0[i][k] * rhs.0[k][j])
            })
        }))
    }
}

impl<T: Copy + Zero + ops::Mul<Output = T>, const N: usize> ops::Mul<Vector<T, N>>
    for Matrix<T, N>
{
    type Output = Vector<T, N>;
    #[inline]
    fn mul(self, rhs: Vector<T, N>) -> Vector<T, N> {
        Vector::from_array(core::array::from_fn(|i| self.row(i).dot(rhs)))
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Matrix<T, N> {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matrix").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector4;
    use core::f64::consts::{FRAC_PI_2, PI};
    use rand::{Rng, SeedableRng as _};
    use rand_xoshiro::Xoshiro256Plus;
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    fn random_matrix(rng: &mut impl Rng) -> Matrix4<f64> {
        Matrix::from_rows(core::array::from_fn(|_| {
            core::array::from_fn(|_| rng.random_range(-10.0..10.0))
        }))
    }

    fn random_unit_vector(rng: &mut impl Rng) -> Vector3<f64> {
        loop {
            let v = Vector3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            );
            let length = v.length();
            if length > 0.1 && length <= 1.0 {
                return v / length;
            }
        }
    }

    fn assert_matrix_close(actual: Matrix4<f64>, expected: Matrix4<f64>) {
        let difference = actual.max_abs_difference(&expected);
        assert!(
            difference < EPSILON,
            "matrices differ by {difference}\nactual:   {actual:?}\nexpected: {expected:?}"
        );
    }

    #[test]
    fn identity_and_transpose() {
        let m = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_eq!(Matrix::identity() * m, m);
        assert_eq!(m * Matrix::identity(), m);
        assert_eq!(m.transpose(), Matrix::from_rows([[1, 3], [2, 4]]));
        assert_eq!(m.row(1), Vector2::new(3, 4));
        assert_eq!(m.column(1), Vector2::new(2, 4));
    }

    #[test]
    fn multiplication_order() {
        let a = Matrix::from_rows([[1, 2], [3, 4]]);
        let b = Matrix::from_rows([[0, 1], [1, 0]]);
        assert_eq!(a * b, Matrix::from_rows([[2, 1], [4, 3]]));
        assert_eq!((a * b) * Vector2::new(1, 0), a * (b * Vector2::new(1, 0)));
    }

    #[test]
    fn clamped_access() {
        let mut m = Matrix::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(m.clamped(0, 1), 2);
        assert_eq!(m.clamped(5, 0), 7);
        assert_eq!(m.clamped(5, 5), 9);
        *m.clamped_mut(1, 99) = 60;
        assert_eq!(m[(1, 2)], 60);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_out_of_range_panics() {
        let m = Matrix3::<f64>::identity();
        let _ = m[(0, 3)];
    }

    #[test]
    fn inverse_of_random_matrices() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x0dd_ba11_1eaf);
        for _ in 0..200 {
            let m = random_matrix(&mut rng);
            let inverse = m.inverse().expect("random matrix should be invertible");
            assert_matrix_close(m * inverse, Matrix::identity());
            assert_matrix_close(inverse * m, Matrix::identity());
        }
    }

    #[test]
    fn inverse_needs_pivoting() {
        // Zero in the top-left corner.
        let m = Matrix4::from_rows([
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 2.0],
            [0.0, 0.0, 4.0, 0.0],
        ]);
        let expected = Matrix4::from_rows([
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.25],
            [0.0, 0.0, 0.5, 0.0],
        ]);
        assert_eq!(m.inverse(), Some(expected));
    }

    #[rstest]
    fn inverse_of_singular(
        #[values(
            Matrix4::zero(),
            Matrix4::from_rows([
                [1.0, 2.0, 3.0, 4.0],
                [0.0, 0.0, 0.0, 0.0],
                [5.0, 6.0, 7.0, 8.0],
                [9.0, 1.0, 2.0, 3.0],
            ]),
            Matrix4::from_rows([
                [0.0, 2.0, 3.0, 4.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 6.0, 7.0, 8.0],
                [0.0, 1.0, 2.0, 3.0],
            ]),
            Matrix4::from_rows([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 0.0],
            ]),
            Matrix4::from_rows([[f64::NAN; 4]; 4]),
        )]
        m: Matrix4<f64>,
    ) {
        assert_eq!(m.inverse(), None);
    }

    #[test]
    fn translation_affects_points_only() {
        let t = Matrix4::translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            t * Vector4::point(1.0, 1.0, 1.0),
            Vector4::point(2.0, 3.0, 4.0)
        );
        assert_eq!(
            t * Vector4::direction(1.0, 1.0, 1.0),
            Vector4::direction(1.0, 1.0, 1.0)
        );
    }

    #[rstest]
    #[case(Axis::X, Vector4::direction(0.0, 1.0, 0.0), Vector4::direction(0.0, 0.0, 1.0))]
    #[case(Axis::Y, Vector4::direction(0.0, 0.0, 1.0), Vector4::direction(1.0, 0.0, 0.0))]
    #[case(Axis::Z, Vector4::direction(1.0, 0.0, 0.0), Vector4::direction(0.0, 1.0, 0.0))]
    fn elementary_rotation_quarter_turn(
        #[case] axis: Axis,
        #[case] input: Vector4<f64>,
        #[case] expected: Vector4<f64>,
    ) {
        let actual = Matrix4::rotation(FRAC_PI_2, axis) * input;
        assert!(actual.max_abs_difference(expected) < EPSILON, "{actual:?}");
    }

    /// Compare against Rodrigues' rotation formula.
    #[test]
    fn rotation_about_axis_matches_rodrigues() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x7071);
        for _ in 0..200 {
            let k = random_unit_vector(&mut rng);
            let v = random_unit_vector(&mut rng) * 3.0;
            let angle: f64 = rng.random_range(-PI..PI);
            let (s, c) = angle.sin_cos();
            let expected = v * c + k.cross(v) * s + k * (k.dot(v) * (1.0 - c));

            let actual = (Matrix4::rotation_about_axis(angle, k * 2.5) * v.extend(0.0)).truncate();
            assert!(
                actual.max_abs_difference(expected) < EPSILON,
                "axis {k:?} angle {angle}: {actual:?} != {expected:?}"
            );
        }
    }

    #[rstest]
    fn rotation_about_coordinate_axes_matches_elementary(
        #[values(Axis::X, Axis::Y, Axis::Z)] axis: Axis,
        #[values(1.0, -1.0)] sign: f64,
    ) {
        let mut direction = Vector3::zero();
        direction[axis as usize] = sign;
        assert_matrix_close(
            Matrix4::rotation_about_axis(0.3, direction),
            Matrix4::rotation(0.3 * sign, axis),
        );
    }

    #[rstest]
    fn zero_rotation_about_point_is_identity(
        #[values(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.5, 0.0, 0.0)
        )]
        axis: Vector3<f64>,
        #[values(Vector3::zero(), Vector3::new(10.0, -4.0, 0.5))] pivot: Vector3<f64>,
    ) {
        assert_matrix_close(
            Matrix4::rotation_about_point(0.0, axis, pivot),
            Matrix4::identity(),
        );
    }

    #[test]
    fn rotation_about_point_fixes_pivot_and_preserves_distance() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xf1ced);
        for _ in 0..50 {
            let axis = random_unit_vector(&mut rng);
            let pivot = random_unit_vector(&mut rng) * 5.0;
            let point = random_unit_vector(&mut rng) * 2.0;
            let m = Matrix4::rotation_about_point(1.234, axis, pivot);

            let moved_pivot = (m * pivot.extend(1.0)).truncate();
            assert!(moved_pivot.max_abs_difference(pivot) < EPSILON);

            let moved = (m * point.extend(1.0)).truncate();
            assert!(((moved - pivot).length() - (point - pivot).length()).abs() < EPSILON);
        }
    }

    #[test]
    fn rotation_inverse_is_transpose() {
        let m = Matrix4::rotation_about_axis(0.7, Vector3::new(1.0, -2.0, 0.5));
        assert_matrix_close(m.inverse().unwrap(), m.transpose());
    }

    #[test]
    fn two_dimensional_transforms() {
        let r = Matrix3::rotation_2d(FRAC_PI_2);
        let p = r * Vector3::new(1.0, 0.0, 1.0);
        assert!(p.max_abs_difference(Vector3::new(0.0, 1.0, 1.0)) < EPSILON);

        let t = Matrix3::translation_2d(Vector2::new(3.0, -1.0));
        assert_eq!(
            t * Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(4.0, 0.0, 1.0)
        );
    }
}
