//! Translation of pointer input into camera mutations.
//!
//! Hosts own the event loop; these functions only turn the raw numbers they receive into
//! arguments for [`Camera::orbit()`] and [`Camera::dolly()`].

use orrery::math::{FreeCoordinate, Vector3};

use crate::camera::Camera;

/// Wheel delta reported for one detent of a typical mouse wheel.
pub const WHEEL_DELTA_PER_NOTCH: FreeCoordinate = 120.0;

/// Dolly factor applied per wheel notch; scrolling one notch forward brings the eye this
/// much closer.
pub const DOLLY_PER_NOTCH: FreeCoordinate = 1.05;

/// A rotation to apply with [`Camera::orbit()`].
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitIntent {
    #[allow(missing_docs)]
    pub axis: Vector3<FreeCoordinate>,
    /// Radians.
    pub angle: FreeCoordinate,
}

impl OrbitIntent {
    /// Converts a drag into a rotation, trackball style.
    ///
    /// All quantities are in units of the viewport height, with +Y pointing down the screen:
    /// `delta` is the pointer movement since the previous event and `position` is the
    /// pointer's offset from the center of the viewport. Dragging near the center tilts the
    /// scene about an in-screen axis; dragging around the edge spins it about the view axis.
    ///
    /// Returns [`None`] if the pointer did not move.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn from_drag(delta: [FreeCoordinate; 2], position: [FreeCoordinate; 2]) -> Option<Self> {
        let [dx, dy] = delta;
        let [rx, ry] = position;
        let angle = dx.hypot(dy);
        if !(angle > 0.0 && angle.is_finite()) {
            return None;
        }
        Some(Self {
            axis: Vector3::new(dy, dx, 4.0 * (ry * dx - rx * dy)),
            angle,
        })
    }

    /// Applies this rotation to `camera`.
    #[inline]
    pub fn apply(self, camera: &mut Camera) {
        camera.orbit(self.axis, self.angle);
    }
}

/// Converts a mouse wheel delta, in the units where one notch is
/// [`WHEEL_DELTA_PER_NOTCH`], into a factor for [`Camera::dolly()`].
///
/// Forward (positive) scrolling gives a factor less than 1, moving the eye closer.
///
/// ```
/// use orrery_render::camera::input::dolly_factor_from_wheel;
///
/// assert_eq!(dolly_factor_from_wheel(0.0), 1.0);
/// assert!((dolly_factor_from_wheel(-120.0) - 1.05).abs() < 1e-12);
/// ```
#[inline]
pub fn dolly_factor_from_wheel(delta: FreeCoordinate) -> FreeCoordinate {
    DOLLY_PER_NOTCH.powf(-delta / WHEEL_DELTA_PER_NOTCH)
}
