//! A two-dimensional animated clock face that drifts around the viewport, bouncing off its
//! edges.

use core::f64::consts::PI;

use crate::math::{FreeCoordinate, Matrix3, Vector2, Vector3};

/// A clock face with two hands.
///
/// Positions are two-dimensional, in the pixel-centered coordinates of
/// `orrery_render::raster`: the origin is the middle of the viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct Clock {
    /// Homogeneous 2D points (w = 1).
    center: Vector3<FreeCoordinate>,
    long_hand: Vector3<FreeCoordinate>,
    short_hand: Vector3<FreeCoordinate>,
    radius: FreeCoordinate,
    /// Displacement per update.
    velocity: Vector2<FreeCoordinate>,
    half_extent: Vector2<FreeCoordinate>,
    long_hand_steps: u32,
    pending_ms: u32,
}

impl Clock {
    /// Time between movements of the long hand.
    pub const HAND_INTERVAL_MS: u32 = 100;
    /// The short hand moves once for this many movements of the long hand.
    pub const LONG_STEPS_PER_SHORT_STEP: u32 = 60;
    /// Angle turned clockwise by the long hand at each step.
    pub const LONG_HAND_STEP: FreeCoordinate = PI / 30.0;
    /// Angle turned clockwise by the short hand at each step.
    pub const SHORT_HAND_STEP: FreeCoordinate = PI / 6.0;

    /// Creates a clock with both hands pointing up (+Y), which moves by `velocity` at each
    /// [`Clock::update()`] and stays within `±half_extent` on each axis.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(
        center: Vector2<FreeCoordinate>,
        radius: FreeCoordinate,
        velocity: Vector2<FreeCoordinate>,
        half_extent: Vector2<FreeCoordinate>,
    ) -> Self {
        let [x, y] = center.into_array();
        Self {
            center: Vector3::new(x, y, 1.0),
            long_hand: Vector3::new(x, y + radius * 0.9, 1.0),
            short_hand: Vector3::new(x, y + radius * 0.6, 1.0),
            radius,
            velocity,
            half_extent,
            long_hand_steps: 0,
            pending_ms: 0,
        }
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn center(&self) -> Vector2<FreeCoordinate> {
        dehomogenize(self.center)
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn radius(&self) -> FreeCoordinate {
        self.radius
    }

    /// Position of the tip of the long hand.
    #[inline]
    pub fn long_hand(&self) -> Vector2<FreeCoordinate> {
        dehomogenize(self.long_hand)
    }

    /// Position of the tip of the short hand.
    #[inline]
    pub fn short_hand(&self) -> Vector2<FreeCoordinate> {
        dehomogenize(self.short_hand)
    }

    /// Current displacement per update; its signs change on bouncing.
    #[inline]
    pub fn velocity(&self) -> Vector2<FreeCoordinate> {
        self.velocity
    }

    /// Advances the clock by `elapsed_ms` milliseconds.
    ///
    /// The hands step once for every [`Clock::HAND_INTERVAL_MS`] accumulated. Then, for each
    /// axis on which moving would take the face beyond the half-extent, the velocity
    /// component is reversed, and the whole clock moves by the velocity.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn update(&mut self, elapsed_ms: u32) {
        self.pending_ms = self.pending_ms.saturating_add(elapsed_ms);
        while self.pending_ms >= Self::HAND_INTERVAL_MS {
            self.pending_ms -= Self::HAND_INTERVAL_MS;
            self.step_hands();
        }

        for axis in 0..2 {
            let reach = self.radius + self.velocity[axis].abs();
            let position = self.center[axis];
            if position + reach > self.half_extent[axis]
                || position - reach < -self.half_extent[axis]
            {
                self.velocity[axis] = -self.velocity[axis];
            }
        }

        let translation = Matrix3::translation_2d(self.velocity);
        self.center = translation * self.center;
        self.long_hand = translation * self.long_hand;
        self.short_hand = translation * self.short_hand;
    }

    fn step_hands(&mut self) {
        self.long_hand = self.rotation_about_center(-Self::LONG_HAND_STEP) * self.long_hand;
        self.long_hand_steps += 1;
        if self.long_hand_steps == Self::LONG_STEPS_PER_SHORT_STEP {
            self.long_hand_steps = 0;
            self.short_hand = self.rotation_about_center(-Self::SHORT_HAND_STEP) * self.short_hand;
        }
    }

    fn rotation_about_center(&self, angle: FreeCoordinate) -> Matrix3<FreeCoordinate> {
        let center = dehomogenize(self.center);
        Matrix3::translation_2d(center)
            * Matrix3::rotation_2d(angle)
            * Matrix3::translation_2d(-center)
    }
}

fn dehomogenize(v: Vector3<FreeCoordinate>) -> Vector2<FreeCoordinate> {
    Vector2::new(v.x(), v.y())
}
