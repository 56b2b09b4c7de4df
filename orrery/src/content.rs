//! Built-in scenes.
//!
//! Scene topology is compiled in; these functions are the only source of scenes other than
//! building one with [`SceneGraph::builder()`].

use crate::appearance::{Light, Material};
use crate::clock::Clock;
use crate::math::{Rgb, Vector2, Vector3};
use crate::scene::{SceneGraph, Sphere};

/// Named colors used by the built-in content.
pub mod palette {
    use crate::math::Rgb;

    #[allow(missing_docs)]
    pub const WHITE: Rgb = Rgb::ONE;
    #[allow(missing_docs)]
    pub const BLACK: Rgb = Rgb::ZERO;
    #[allow(missing_docs)]
    pub const YELLOW: Rgb = Rgb::new(1.0, 1.0, 0.0);
    #[allow(missing_docs)]
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    #[allow(missing_docs)]
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
    /// Ground and snow.
    pub const GREY: Rgb = Rgb::new(0.9, 0.9, 0.9);
    /// Hat.
    pub const BROWN: Rgb = Rgb::new(0.9, 0.5, 0.2);
    /// Broom bristles.
    pub const BROWN2: Rgb = Rgb::new(0.7, 0.5, 0.2);
    /// Broom handle.
    pub const BROWN3: Rgb = Rgb::new(0.5, 0.5, 0.2);

    /// Color of pixels where nothing was drawn.
    pub const BACKGROUND: Rgb = WHITE;
}

/// A single yellow sphere at the origin, unlit.
///
/// Rendered at 60×60 with the default camera and focus, it covers the middle of the image
/// and leaves the corners as background.
#[allow(clippy::missing_inline_in_public_items)]
pub fn single_sphere() -> SceneGraph {
    let mut builder = SceneGraph::builder();
    builder.root(Sphere::new(Vector3::zero(), 0.15, palette::YELLOW));
    match builder.build() {
        Ok(scene) => scene,
        Err(e) => unreachable!("built-in scene is invalid: {e}"),
    }
}

/// A sun with two planets, one of which has a moon.
///
/// The sun is unlit and carries the light; everything else is [`Material`]-shaded.
/// The second planet revolves about a tilted axis.
///
/// The moon turns about the opposite axis to its planet. Because each tick turns it about
/// the planet's *new* center, a moon turning the same way would fall behind by a fixed
/// step per tick and drift away without bound; turning the other way, it instead follows
/// a closed path above the sun's equator and is back where it started after every full
/// revolution.
#[allow(clippy::missing_inline_in_public_items)]
pub fn orrery() -> SceneGraph {
    let vertical = Vector3::new(0.0, 1.0, 0.0);
    let mut builder = SceneGraph::builder();

    let sun = builder.root(Sphere::new(Vector3::zero(), 0.2, palette::YELLOW));
    let blue_planet = builder.child(
        sun,
        Sphere::new(
            Vector3::new(0.55, 0.0, 0.0),
            0.08,
            Material::glossy(palette::BLUE, 20.0),
        ),
        vertical,
    );
    builder.child(
        blue_planet,
        Sphere::new(
            Vector3::new(0.55, 0.25, 0.0),
            0.03,
            Material::matte(palette::GREY),
        ),
        -vertical,
    );
    builder.child(
        sun,
        Sphere::new(
            Vector3::new(-0.35, 0.1, 0.0),
            0.05,
            Material::glossy(palette::RED, 8.0),
        ),
        Vector3::new(0.3, 1.0, 0.0),
    );
    builder.light(Light {
        position: Vector3::zero(),
        color: palette::WHITE,
        ambient: Rgb::from_luminance(0.3),
    });

    match builder.build() {
        Ok(scene) => scene,
        Err(e) => unreachable!("built-in scene is invalid: {e}"),
    }
}

/// A clock in the middle of a `width`×`height` pixel raster, drifting diagonally.
#[allow(clippy::missing_inline_in_public_items)]
pub fn clock(width: u32, height: u32) -> Clock {
    let half_extent = Vector2::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
    let radius = (half_extent.x().min(half_extent.y()) / 4.0).max(1.0);
    Clock::new(Vector2::zero(), radius, Vector2::new(1.0, 1.0), half_extent)
}
