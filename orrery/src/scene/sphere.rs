use crate::appearance::Appearance;
use crate::math::{FreeCoordinate, FreeVector, Matrix4, Vector3};
use crate::scene::SceneError;

/// Depth used to sort a ray that missed a sphere; it is behind every hit.
pub const NO_HIT_DEPTH: FreeCoordinate = FreeCoordinate::NEG_INFINITY;

/// A sphere with an [`Appearance`].
///
/// The radius and appearance are fixed at construction; the center moves as the scene is
/// animated.
#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Homogeneous point (w = 1).
    center: FreeVector,
    radius: FreeCoordinate,
    appearance: Appearance,
}

impl Sphere {
    /// Constructs a sphere.
    ///
    /// Panics if `radius` is not positive and finite; see [`Sphere::try_new()`] for the
    /// non-panicking alternative.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(
        center: Vector3<FreeCoordinate>,
        radius: FreeCoordinate,
        appearance: impl Into<Appearance>,
    ) -> Self {
        match Self::try_new(center, radius, appearance) {
            Ok(sphere) => sphere,
            Err(e) => panic!("{e}"),
        }
    }

    /// Constructs a sphere, failing if `radius` is not positive and finite.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn try_new(
        center: Vector3<FreeCoordinate>,
        radius: FreeCoordinate,
        appearance: impl Into<Appearance>,
    ) -> Result<Self, SceneError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self {
            center: center.extend(1.0),
            radius,
            appearance: appearance.into(),
        })
    }

    /// The center as a homogeneous point.
    #[inline]
    pub fn center(&self) -> FreeVector {
        self.center
    }

    /// The center without its w component.
    #[inline]
    pub fn center3(&self) -> Vector3<FreeCoordinate> {
        self.center.truncate()
    }

    /// Moves the sphere. `center` is treated as a point; its w component is replaced by 1.
    #[inline]
    pub fn set_center(&mut self, center: FreeVector) {
        self.center = center.truncate().extend(1.0);
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn radius(&self) -> FreeCoordinate {
        self.radius
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Returns a copy of this sphere with its center transformed by `transform`, which must be
    /// rigid (rotation, reflection, and translation only) for the radius to remain correct.
    #[inline]
    #[must_use]
    pub fn transformed(&self, transform: &Matrix4<FreeCoordinate>) -> Self {
        Self {
            center: *transform * self.center,
            ..self.clone()
        }
    }

    /// Finds the first point at which the ray from `eye` in `direction` enters this sphere.
    ///
    /// `direction` need not be normalized. Solves
    /// `|eye + t·direction − center|² = radius²` and takes the smallest strictly
    /// positive `t`; if neither root is positive, or the ray passes outside the sphere,
    /// the result is [`None`].
    ///
    /// [`None`] is the miss case. Callers ranking hits by depth treat a miss as being at
    /// [`NO_HIT_DEPTH`], behind every hit.
    ///
    /// ```
    /// use orrery::math::{Rgb, Vector3};
    /// use orrery::scene::Sphere;
    ///
    /// let sphere = Sphere::new(Vector3::new(0.0, 0.0, 0.0), 0.5, Rgb::ONE);
    /// let hit = sphere.intersect(Vector3::new(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, -1.0));
    /// assert_eq!(hit, Some(Vector3::new(0.0, 0.0, 0.5)));
    /// ```
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn intersect(
        &self,
        eye: Vector3<FreeCoordinate>,
        direction: Vector3<FreeCoordinate>,
    ) -> Option<Vector3<FreeCoordinate>> {
        let offset = eye - self.center3();
        let a = direction.dot(direction);
        let b = 2.0 * direction.dot(offset);
        let c = offset.dot(offset) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if a == 0.0 || discriminant.is_nan() || discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let near = (-b - root) / (2.0 * a);
        let far = (-b + root) / (2.0 * a);
        let t = if near > 0.0 {
            near
        } else if far > 0.0 {
            far
        } else {
            return None;
        };
        Some(eye + direction * t)
    }

    /// Unit surface normal at `point`, which should lie on the sphere.
    #[inline]
    pub fn normal_at(&self, point: Vector3<FreeCoordinate>) -> Vector3<FreeCoordinate> {
        (point - self.center3()) / self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Rgb, Vector4};
    use rstest::rstest;

    fn unit_sphere_at(center: Vector3<f64>) -> Sphere {
        Sphere::new(center, 1.0, Rgb::ONE)
    }

    #[test]
    fn construction() {
        let sphere = Sphere::new(Vector3::new(1.0, 2.0, 3.0), 0.5, Rgb::ZERO);
        assert_eq!(sphere.center(), Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(sphere.radius(), 0.5);
        assert_eq!(sphere.appearance(), &Appearance::Flat(Rgb::ZERO));
    }

    #[rstest]
    fn invalid_radius(#[values(0.0, -1.0, f64::NAN, f64::INFINITY)] radius: f64) {
        assert!(matches!(
            Sphere::try_new(Vector3::zero(), radius, Rgb::ONE),
            Err(SceneError::InvalidRadius(_))
        ));
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn new_panics_on_invalid_radius() {
        Sphere::new(Vector3::zero(), 0.0, Rgb::ONE);
    }

    #[test]
    fn set_center_forces_point() {
        let mut sphere = unit_sphere_at(Vector3::zero());
        sphere.set_center(Vector4::new(1.0, 1.0, 1.0, 0.0));
        assert_eq!(sphere.center(), Vector4::point(1.0, 1.0, 1.0));
    }

    /// A ray through the center from outside hits at distance `radius` from the center,
    /// on the near side.
    #[rstest]
    fn ray_through_center_hits_near_surface(
        #[values(0.25, 1.0, 3.0)] radius: f64,
        #[values(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::new(-7.0, 2.0, 1.0),
            Vector3::new(0.0, -20.0, 0.0)
        )]
        eye: Vector3<f64>,
    ) {
        let center = Vector3::new(0.5, -0.5, 0.0);
        let sphere = Sphere::new(center, radius, Rgb::ONE);
        let direction = (center - eye) * 0.3;

        let hit = sphere.intersect(eye, direction).expect("should hit");
        assert!(((hit - center).length() - radius).abs() < 1e-9);
        assert!((hit - eye).length() < (center - eye).length());
    }

    #[test]
    fn ray_passing_beside_misses() {
        let sphere = unit_sphere_at(Vector3::zero());
        let eye = Vector3::new(1.01, 0.0, 5.0);
        assert_eq!(sphere.intersect(eye, Vector3::new(0.0, 0.0, -1.0)), None);
    }

    #[test]
    fn sphere_behind_eye_misses() {
        let sphere = unit_sphere_at(Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(
            sphere.intersect(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0)),
            None
        );
    }

    #[test]
    fn eye_inside_hits_far_side() {
        let sphere = unit_sphere_at(Vector3::zero());
        assert_eq!(
            sphere.intersect(Vector3::zero(), Vector3::new(0.0, 0.0, -2.0)),
            Some(Vector3::new(0.0, 0.0, -1.0))
        );
    }

    #[test]
    fn miss_depth_is_behind_any_hit() {
        let eye = Vector3::new(0.0, 0.0, 5.0);
        let down = Vector3::new(0.0, 0.0, -1.0);
        let depth = |sphere: &Sphere| {
            sphere
                .intersect(eye, down)
                .map_or(NO_HIT_DEPTH, |p| p.z())
        };
        let far_hit = depth(&unit_sphere_at(Vector3::new(0.0, 0.0, -1e6)));
        let miss = depth(&unit_sphere_at(Vector3::new(3.0, 0.0, 0.0)));
        assert_eq!(miss, NO_HIT_DEPTH);
        assert!(miss < far_hit);
    }

    #[test]
    fn zero_direction_misses() {
        let sphere = unit_sphere_at(Vector3::zero());
        assert_eq!(
            sphere.intersect(Vector3::new(0.0, 0.0, 5.0), Vector3::zero()),
            None
        );
    }

    #[test]
    fn normal() {
        let sphere = Sphere::new(Vector3::new(1.0, 0.0, 0.0), 2.0, Rgb::ONE);
        assert_eq!(
            sphere.normal_at(Vector3::new(1.0, 2.0, 0.0)),
            Vector3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn transformed_moves_center_only() {
        let sphere = unit_sphere_at(Vector3::zero());
        let moved = sphere.transformed(&Matrix4::translation(Vector3::new(0.0, 0.0, -3.0)));
        assert_eq!(moved.center3(), Vector3::new(0.0, 0.0, -3.0));
        assert_eq!(moved.radius(), sphere.radius());
    }
}
