//! Pictures drawn with lines and circles alone.

use alloc::vec::Vec;

use euclid::point2;

use orrery::clock::Clock;
use orrery::content::palette;
use orrery::math::{FreeCoordinate, Rgb, Vector2, Vector3};
use orrery::scene::SceneGraph;

use crate::Flaws;
use crate::camera::{Camera, Projection};
use crate::raster::{RasterPoint, RasterTarget, bresenham_circle, bresenham_line};

/// Size of image the [`snowman()`] is designed for; it is drawn centered on any target.
pub const SNOWMAN_SIZE: [u32; 2] = [60, 60];

/// Draws a snowman holding a broom, under the sun.
#[allow(clippy::missing_inline_in_public_items)]
pub fn snowman<T: RasterTarget + ?Sized>(target: &mut T) {
    use palette::{BLACK, BLUE, BROWN, BROWN2, BROWN3, GREY, RED, YELLOW};

    let line = |target: &mut T, a: (i32, i32), b: (i32, i32), color: Rgb| {
        bresenham_line(target, point2(a.0, a.1), point2(b.0, b.1), color);
    };

    // Ground and sky
    line(target, (-29, -30), (29, -30), GREY);
    line(target, (-29, -29), (29, -29), GREY);
    bresenham_circle(target, point2(-25, 25), 3, YELLOW);

    // Body and buttons
    for (y, radius) in [(-17, 12), (4, 10), (20, 6)] {
        bresenham_circle(target, point2(0, y), radius, BLACK);
    }
    for y in [-26, -15, -9, 0, 8] {
        bresenham_circle(target, point2(0, y), 1, BLACK);
    }

    // Face
    for (x, y) in [(-2, 22), (2, 22)] {
        target.set_point(point2(x, y), BLUE);
    }
    for (x, y) in [(-2, 18), (-1, 17), (0, 17), (1, 17), (2, 18)] {
        target.set_point(point2(x, y), BLACK);
    }

    // Hat
    for (half_width, y) in [(10, 25), (10, 26), (5, 27), (5, 28), (4, 29)] {
        line(target, (-half_width, y), (half_width, y), BROWN);
    }

    // Broom
    line(target, (5, -2), (15, 20), BROWN3);
    line(target, (6, -2), (16, 20), BROWN3);
    for tip in [(13, 25), (15, 25), (17, 25)] {
        line(target, (15, 20), tip, BROWN2);
    }
    for tip in [(19, 25), (20, 24), (19, 24), (20, 22), (22, 23)] {
        line(target, (16, 20), tip, BROWN2);
    }

    // Shawl
    line(target, (-5, 13), (5, 13), RED);
    line(target, (-4, 14), (4, 14), RED);
    line(target, (-4, 15), (4, 15), RED);
    line(target, (-5, 14), (-6, 0), RED);
    line(target, (-4, 15), (-5, 0), RED);
    line(target, (-3, 15), (-4, 0), RED);
}

/// Draws the face and hands of `clock`, whose coordinates are taken as [`Centered`] pixels.
///
/// [`Centered`]: crate::raster::Centered
#[allow(clippy::missing_inline_in_public_items)]
pub fn draw_clock<T: RasterTarget + ?Sized>(target: &mut T, clock: &Clock) {
    let center = round_point(clock.center());
    bresenham_circle(target, center, clock.radius().round() as i32, palette::BLACK);
    bresenham_line(target, center, round_point(clock.long_hand()), palette::BLACK);
    bresenham_line(target, center, round_point(clock.short_hand()), palette::RED);
}

/// Draws each sphere of `scene` as its projected outline in its base color, and a line
/// from each child's center to its parent's.
///
/// Spheres whose centers are not in front of the eye are skipped. Nothing is drawn if the
/// projection is degenerate, and a degenerate camera is replaced by the identity view,
/// as [`RayCaster`](crate::raycaster::RayCaster) does; the returned [`Flaws`] say so.
///
/// Lines are clipped to the image, and outlines which cannot touch the image are skipped.
/// Outlines wider than [`MAX_OUTLINE_RADIUS`] that do cross the image, as from a large
/// sphere just in front of the eye, are also skipped and reported as [`Flaws::CLIPPED`].
#[allow(clippy::missing_inline_in_public_items)]
pub fn draw_wireframe<T: RasterTarget + ?Sized>(
    target: &mut T,
    scene: &SceneGraph,
    camera: &Camera,
    projection: Projection,
) -> Flaws {
    if !projection.is_valid() {
        return Flaws::DEGENERATE_PROJECTION;
    }
    let size = target.size();
    let half_size = Vector2::new(
        FreeCoordinate::from(size.width) / 2.0,
        FreeCoordinate::from(size.height) / 2.0,
    );
    let (view, mut flaws) = camera.view_space_or_identity(projection);
    let centers: Vec<Vector3<FreeCoordinate>> = scene
        .spheres()
        .map(|sphere| (view * sphere.center()).truncate())
        .collect();
    // Projected positions in pixels, not yet rounded.
    let to_pixels = |point: Vector3<FreeCoordinate>| -> Option<Vector2<FreeCoordinate>> {
        if !projection.is_in_front(point) {
            return None;
        }
        let [x, y] = projection.project(point).into_array();
        Some(Vector2::new(x * half_size.x(), y * half_size.y())).filter(|p| p.is_finite())
    };

    for (node, &center) in scene.nodes().iter().zip(&centers) {
        let (Some(child), Some(parent)) = (
            to_pixels(center),
            node.parent().and_then(|p| to_pixels(centers[p.get()])),
        ) else {
            continue;
        };
        if let Some((parent, child)) = clip_segment(parent, child, half_size) {
            bresenham_line(target, round_point(parent), round_point(child), palette::BLACK);
        }
    }
    for (sphere, &center) in scene.spheres().zip(&centers) {
        let Some(pixel_center) = to_pixels(center) else {
            continue;
        };
        let radius = sphere.radius() * projection.scale_at(center) * half_size.x();
        let Some(radius) = visible_radius(pixel_center, radius, half_size) else {
            continue;
        };
        if radius > MAX_OUTLINE_RADIUS {
            flaws |= Flaws::CLIPPED;
            continue;
        }
        bresenham_circle(
            target,
            round_point(pixel_center),
            radius.round() as i32,
            sphere.appearance().base_color(),
        );
    }
    flaws
}

/// Largest outline radius, in pixels, that [`draw_wireframe()`] will draw.
pub const MAX_OUTLINE_RADIUS: FreeCoordinate = 65536.0;

/// Returns `radius` if a circle of that radius around `center` can touch the image whose
/// half extents are `half_size`, and [`None`] if it lies wholly outside the image or
/// wholly encloses it.
fn visible_radius(
    center: Vector2<FreeCoordinate>,
    radius: FreeCoordinate,
    half_size: Vector2<FreeCoordinate>,
) -> Option<FreeCoordinate> {
    if !radius.is_finite() || radius < 0.0 {
        return None;
    }
    // One pixel of slack for rounding.
    if center.x().abs() > half_size.x() + radius + 1.0
        || center.y().abs() > half_size.y() + radius + 1.0
    {
        return None;
    }
    let farthest_corner = Vector2::new(
        center.x().abs() + half_size.x(),
        center.y().abs() + half_size.y(),
    );
    if farthest_corner.length() < radius - 1.0 {
        return None;
    }
    Some(radius)
}

/// Clips the segment from `a` to `b` to the image whose half extents are `half_size`,
/// plus one pixel of margin (Liang–Barsky).
///
/// Returns [`None`] if no part of the segment is inside.
fn clip_segment(
    a: Vector2<FreeCoordinate>,
    b: Vector2<FreeCoordinate>,
    half_size: Vector2<FreeCoordinate>,
) -> Option<(Vector2<FreeCoordinate>, Vector2<FreeCoordinate>)> {
    let delta = b - a;
    let (mut t0, mut t1): (FreeCoordinate, FreeCoordinate) = (0.0, 1.0);
    for axis in 0..2 {
        let limit = half_size[axis] + 1.0;
        for (p, q) in [(-delta[axis], a[axis] + limit), (delta[axis], limit - a[axis])] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let t = q / p;
                if p < 0.0 {
                    t0 = t0.max(t);
                } else {
                    t1 = t1.min(t);
                }
            }
        }
    }
    (t0 <= t1).then(|| (a + delta * t0, a + delta * t1))
}

fn round_point(v: Vector2<FreeCoordinate>) -> RasterPoint {
    point2(v.x().round() as i32, v.y().round() as i32)
}
