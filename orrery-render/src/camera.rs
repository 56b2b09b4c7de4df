//! Viewpoint and projection: the world-to-camera transform, its mutation by orbiting and
//! zooming, and the focal projection onto the image plane.

use euclid::Size2D;

use orrery::math::{FreeCoordinate, FreeVector, Matrix4, Vector2, Vector3};

use crate::Flaws;

pub mod input;

// -------------------------------------------------------------------------------------------------

/// Unit-of-measure type for whole pixels of a rendered image.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum ImagePixel {}

/// Width and height of a rendered image, in pixels.
pub type ImageSize = Size2D<u32, ImagePixel>;

/// Calculate area and convert to `usize`, which is a common operation for image data lengths.
#[inline]
#[doc(hidden)] // intended as a utility for our code, not public API
pub fn area_usize<T: TryInto<usize>, U>(size: Size2D<T, U>) -> Option<usize> {
    let width = size.width.try_into().ok()?;
    let height = size.height.try_into().ok()?;
    width.checked_mul(height)
}

// -------------------------------------------------------------------------------------------------

/// An eye position and viewing direction, from which the world-to-camera transform is
/// derived.
///
/// The view and up directions are normalized whenever they are set, but need not be
/// perpendicular to each other; the transform is built from an orthogonalized basis.
/// The transform is recomputed on every mutation, so reading it is free.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Point (w = 1).
    eye: FreeVector,
    /// Unit direction (w = 0).
    view: FreeVector,
    /// Unit direction (w = 0).
    up: FreeVector,
    transform: Matrix4<FreeCoordinate>,
}

impl Camera {
    /// Constructs a camera at `eye` looking along `view`, with `up` indicating which way is up.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(
        eye: Vector3<FreeCoordinate>,
        view: Vector3<FreeCoordinate>,
        up: Vector3<FreeCoordinate>,
    ) -> Self {
        let mut camera = Self {
            eye: eye.extend(1.0),
            view: view.norm().extend(0.0),
            up: up.norm().extend(0.0),
            transform: Matrix4::identity(),
        };
        camera.rebuild_transform();
        camera
    }

    /// Eye position, as a homogeneous point.
    #[inline]
    pub fn eye(&self) -> FreeVector {
        self.eye
    }

    /// Unit view direction, as a homogeneous direction.
    #[inline]
    pub fn view(&self) -> FreeVector {
        self.view
    }

    /// Unit up direction, as a homogeneous direction. This is the direction last set, not
    /// the orthogonalized one used in the transform.
    #[inline]
    pub fn up(&self) -> FreeVector {
        self.up
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn set_eye(&mut self, eye: Vector3<FreeCoordinate>) {
        self.eye = eye.extend(1.0);
        self.rebuild_transform();
    }

    /// Sets the view direction, normalizing it. A zero direction makes the camera singular.
    #[inline]
    pub fn set_view(&mut self, view: Vector3<FreeCoordinate>) {
        self.view = view.norm().extend(0.0);
        self.rebuild_transform();
    }

    /// Sets the up direction, normalizing it. A direction parallel to the view direction
    /// makes the camera singular.
    #[inline]
    pub fn set_up(&mut self, up: Vector3<FreeCoordinate>) {
        self.up = up.norm().extend(0.0);
        self.rebuild_transform();
    }

    /// The world-to-camera transform, which moves the eye to the origin and the view
    /// direction onto −Z.
    ///
    /// Its rotation part has the rows `right = normalize(up × view)`,
    /// `up' = view × right`, and `−view`.
    #[inline]
    pub fn transform(&self) -> Matrix4<FreeCoordinate> {
        self.transform
    }

    /// The camera-to-world transform, or [`None`] if the camera is degenerate (for example,
    /// if the view and up directions are parallel).
    #[inline]
    pub fn inverse_transform(&self) -> Option<Matrix4<FreeCoordinate>> {
        self.transform.inverse()
    }

    /// The transform from world coordinates into the ray caster's view space, in which the
    /// eye is at `(0, 0, focus)` looking toward −Z and the image plane is `z = 0`.
    #[inline]
    pub fn view_space_transform(&self, projection: Projection) -> Matrix4<FreeCoordinate> {
        Matrix4::translation(Vector3::new(0.0, 0.0, projection.focus())) * self.transform
    }

    /// [`Self::view_space_transform()`], or, if the camera is degenerate, the identity along
    /// with [`Flaws::SINGULAR_CAMERA`].
    pub(crate) fn view_space_or_identity(
        &self,
        projection: Projection,
    ) -> (Matrix4<FreeCoordinate>, Flaws) {
        if self.inverse_transform().is_some() {
            (self.view_space_transform(projection), Flaws::empty())
        } else {
            (Matrix4::identity(), Flaws::SINGULAR_CAMERA)
        }
    }

    /// Rotates the eye about the line through the origin along `axis`, then turns to look
    /// at the origin. The up direction is rotated along with the eye.
    ///
    /// Does nothing if `angle` is zero or `axis` has no direction.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn orbit(&mut self, axis: Vector3<FreeCoordinate>, angle: FreeCoordinate) {
        let axis_length = axis.length();
        if angle == 0.0 || !(axis_length > 0.0 && axis_length.is_finite()) {
            return;
        }
        let rotation = Matrix4::rotation_about_axis(angle, axis);
        self.eye = rotation * self.eye;
        self.up = (rotation * self.up).truncate().norm().extend(0.0);
        self.view = (-self.eye.truncate()).norm().extend(0.0);
        self.rebuild_transform();
    }

    /// Moves the eye `delta` units along the view direction; negative values move backward.
    #[inline]
    pub fn zoom(&mut self, delta: FreeCoordinate) {
        self.eye = (self.eye.truncate() + self.view.truncate() * delta).extend(1.0);
        self.rebuild_transform();
    }

    /// Moves the eye along the view direction so that, if the camera is looking at the
    /// origin, its distance from the origin is multiplied by `factor`.
    #[inline]
    pub fn dolly(&mut self, factor: FreeCoordinate) {
        let distance = self.eye.truncate().length();
        self.zoom(distance * (1.0 - factor));
    }

    /// Returns the world-space ray from the eye through the given point on the image plane,
    /// whose visible region is `[-1, 1]²`.
    ///
    /// Returns [`None`] if the camera is degenerate or the projection is.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn project_plane_into_world(
        &self,
        projection: Projection,
        plane_point: Vector2<FreeCoordinate>,
    ) -> Option<Ray> {
        if !projection.is_valid() {
            return None;
        }
        let inverse = self.inverse_transform()?;
        let view_direction = (Vector3::new(plane_point.x(), plane_point.y(), 0.0)
            - projection.eye())
        .norm();
        Some(Ray {
            origin: (inverse * Vector3::zero().extend(1.0)).truncate(),
            direction: (inverse * view_direction.extend(0.0)).truncate(),
        })
    }

    fn rebuild_transform(&mut self) {
        let view = self.view.truncate();
        let right = self.up.truncate().cross(view).norm();
        let up = view.cross(right);
        let [rx, ry, rz] = right.into_array();
        let [ux, uy, uz] = up.into_array();
        let [vx, vy, vz] = view.into_array();
        let rotation = Matrix4::from_rows([
            [rx, ry, rz, 0.0],
            [ux, uy, uz, 0.0],
            [-vx, -vy, -vz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        self.transform = rotation * Matrix4::translation(-self.eye.truncate());
    }
}

impl Default for Camera {
    /// A camera at `(0, 0, 1)` looking toward the origin, with +Y up.
    #[inline]
    fn default() -> Self {
        Self::new(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }
}

/// A ray, in whatever coordinate system its user specifies.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Starting point.
    pub origin: Vector3<FreeCoordinate>,
    /// Unit direction.
    pub direction: Vector3<FreeCoordinate>,
}

/// Perspective projection onto the image plane `z = 0` from an eye at `(0, 0, focus)`.
///
/// A focus that is not positive and finite cannot project anything; such a projection
/// maps every point to the origin of the plane instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    focus: FreeCoordinate,
}

impl Projection {
    #[allow(missing_docs)]
    #[inline]
    pub const fn new(focus: FreeCoordinate) -> Self {
        Self { focus }
    }

    /// Distance from the eye to the image plane.
    #[inline]
    pub const fn focus(self) -> FreeCoordinate {
        self.focus
    }

    /// Whether this projection is usable: the focus is positive and finite.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.focus > 0.0 && self.focus.is_finite()
    }

    /// The eye position in view space.
    #[inline]
    pub fn eye(self) -> Vector3<FreeCoordinate> {
        Vector3::new(0.0, 0.0, self.focus)
    }

    /// Whether `point`, in view space, is in front of the eye.
    #[inline]
    pub fn is_in_front(self, point: Vector3<FreeCoordinate>) -> bool {
        self.is_valid() && point.z() < self.focus
    }

    /// Ratio by which lengths at the depth of `point`, in view space, are scaled when
    /// projected. Zero if the projection is invalid or the point is not in front of the eye.
    #[inline]
    pub fn scale_at(self, point: Vector3<FreeCoordinate>) -> FreeCoordinate {
        if self.is_in_front(point) {
            self.focus / (self.focus - point.z())
        } else {
            0.0
        }
    }

    /// Projects `point`, in view space, onto the image plane along the line through the eye.
    ///
    /// Returns the zero vector if the projection is invalid or the point is not in front
    /// of the eye.
    ///
    /// ```
    /// use orrery::math::{Vector2, Vector3};
    /// use orrery_render::camera::Projection;
    ///
    /// let projection = Projection::new(1.0);
    /// assert_eq!(
    ///     projection.project(Vector3::new(1.0, 0.5, -1.0)),
    ///     Vector2::new(0.5, 0.25),
    /// );
    /// assert_eq!(Projection::new(0.0).project(Vector3::new(1.0, 0.5, -1.0)), Vector2::zero());
    /// ```
    #[inline]
    pub fn project(self, point: Vector3<FreeCoordinate>) -> Vector2<FreeCoordinate> {
        let scale = self.scale_at(point);
        Vector2::new(point.x() * scale, point.y() * scale)
    }
}
