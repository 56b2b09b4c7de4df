//! Per-pixel ray casting of a [`SceneGraph`] of spheres.
//!
//! Rendering takes place in *view space*, in which the eye sits at `(0, 0, focus)` looking
//! toward −Z and the image plane `z = 0` is visible over `[-1, 1]²`. Within that space, of
//! two points on the same ray, the one with the larger Z is nearer the eye.

use alloc::vec::Vec;
use core::fmt;

use orrery::appearance::{Appearance, Light};
use orrery::math::{FreeCoordinate, Rgb, Vector3};
use orrery::scene::{NO_HIT_DEPTH, SceneGraph, Sphere};

use crate::camera::{Camera, ImageSize};
use crate::raster::PixelBuffer;
use crate::{Flaws, RenderError, RenderOptions};

/// Renders [`SceneGraph`]s at a fixed image size by casting one ray per pixel.
///
/// ```
/// use orrery::content::{palette, single_sphere};
/// use orrery_render::camera::{Camera, ImageSize};
/// use orrery_render::raycaster::RayCaster;
/// use orrery_render::RenderOptions;
///
/// let caster = RayCaster::new(ImageSize::new(60, 60));
/// let (buffer, _info, flaws) =
///     caster.render(&single_sphere(), &Camera::default(), &RenderOptions::default());
/// assert!(flaws.is_empty());
/// assert_eq!(buffer.get(euclid::point2(30, 30)), Some(palette::YELLOW.to_rgb8()));
/// assert_eq!(buffer.get(euclid::point2(0, 0)), Some(palette::WHITE.to_rgb8()));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RayCaster {
    size: ImageSize,
}

impl RayCaster {
    #[allow(missing_docs)]
    #[inline]
    pub const fn new(size: ImageSize) -> Self {
        Self { size }
    }

    /// Size of the images produced.
    #[inline]
    pub const fn size(&self) -> ImageSize {
        self.size
    }

    /// Renders `scene` as seen by `camera` into a new [`PixelBuffer`].
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn render(
        &self,
        scene: &SceneGraph,
        camera: &Camera,
        options: &RenderOptions,
    ) -> (PixelBuffer, RaytraceInfo, Flaws) {
        let mut buffer = PixelBuffer::new(self.size, options.background);
        match self.render_into(scene, camera, options, &mut buffer) {
            Ok((info, flaws)) => (buffer, info, flaws),
            Err(e) => unreachable!("buffer was allocated at the right size: {e}"),
        }
    }

    /// Renders `scene` as seen by `camera`, overwriting every pixel of `buffer`.
    ///
    /// Returns [`RenderError::SizeMismatch`] without drawing anything if `buffer` is not of
    /// [`Self::size()`].
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn render_into(
        &self,
        scene: &SceneGraph,
        camera: &Camera,
        options: &RenderOptions,
        buffer: &mut PixelBuffer,
    ) -> Result<(RaytraceInfo, Flaws), RenderError> {
        if buffer.size() != self.size {
            return Err(RenderError::SizeMismatch {
                expected: self.size,
                actual: buffer.size(),
            });
        }
        buffer.clear(options.background);

        let projection = options.projection();
        if !projection.is_valid() {
            return Ok((RaytraceInfo::default(), Flaws::DEGENERATE_PROJECTION));
        }

        let (view, mut flaws) = camera.view_space_or_identity(projection);

        let spheres: Vec<Sphere> = scene.spheres().map(|s| s.transformed(&view)).collect();
        let light = scene.light().map(|light| Light {
            position: (view * light.position.extend(1.0)).truncate(),
            ..*light
        });
        if light.is_none()
            && spheres
                .iter()
                .any(|s| matches!(s.appearance(), Appearance::Shaded(_)))
        {
            flaws |= Flaws::NO_LIGHTING;
        }

        let view_scene = ViewScene {
            spheres: &spheres,
            light,
            eye: projection.eye(),
            background: options.background,
            size: self.size,
        };
        let info = trace_image::trace_scene_to_image_impl(&view_scene, buffer.pixels_mut());
        log::trace!("raycast {size:?}: {info:?}", size = self.size);
        Ok((info, flaws))
    }
}

/// The scene as prepared for tracing, all in view space.
struct ViewScene<'a> {
    spheres: &'a [Sphere],
    light: Option<Light>,
    eye: Vector3<FreeCoordinate>,
    background: Rgb,
    size: ImageSize,
}

impl ViewScene<'_> {
    /// Point on the image plane sampled by the pixel in column `x`.
    fn plane_x(&self, x: usize) -> FreeCoordinate {
        -1.0 + 2.0 * x as FreeCoordinate / FreeCoordinate::from(self.size.width)
    }

    /// Point on the image plane sampled by the pixel in row `y`, counting from the bottom.
    fn plane_y(&self, y: usize) -> FreeCoordinate {
        -1.0 + 2.0 * y as FreeCoordinate / FreeCoordinate::from(self.size.height)
    }

    fn trace_pixel(&self, px: FreeCoordinate, py: FreeCoordinate) -> ([u8; 3], RaytraceInfo) {
        let direction = (Vector3::new(px, py, 0.0) - self.eye).norm();
        let mut info = RaytraceInfo {
            pixels: 1,
            sphere_tests: self.spheres.len(),
            hits: 0,
        };

        // Nearest hit wins; among equally near hits, the first in scene order.
        let mut nearest: Option<(&Sphere, Vector3<FreeCoordinate>)> = None;
        for sphere in self.spheres {
            let Some(hit) = sphere.intersect(self.eye, direction) else {
                continue;
            };
            info.hits += 1;
            let nearest_depth = nearest.map_or(NO_HIT_DEPTH, |(_, point)| point.z());
            if hit.z() > nearest_depth {
                nearest = Some((sphere, hit));
            }
        }

        let color = match nearest {
            None => self.background,
            Some((sphere, point)) => self.shade(sphere, point),
        };
        (color.to_rgb8(), info)
    }

    fn shade(&self, sphere: &Sphere, point: Vector3<FreeCoordinate>) -> Rgb {
        match (sphere.appearance(), &self.light) {
            (Appearance::Shaded(material), Some(light)) => {
                material.illuminate(light, point, sphere.normal_at(point), self.eye)
            }
            (appearance, _) => appearance.base_color(),
        }
    }
}

/// Threaded and non-threaded implementations of tracing a full image.
mod trace_image {
    use super::*;

    /// Trace every pixel of `scene`, writing into `output` bottom row first.
    ///
    /// `output`'s length must be the area of `scene.size`.
    #[cfg(feature = "auto-threads")]
    pub(super) fn trace_scene_to_image_impl(
        scene: &ViewScene<'_>,
        output: &mut [[u8; 3]],
    ) -> RaytraceInfo {
        use rayon::iter::{
            IndexedParallelIterator as _, IntoParallelIterator as _, ParallelIterator as _,
        };
        use rayon::slice::ParallelSliceMut as _;

        // max(1) is zero-width protection; there will be no chunks anyway.
        output
            .par_chunks_mut((scene.size.width as usize).max(1))
            .enumerate()
            .map(move |(y, raster_row)| {
                let py = scene.plane_y(y);
                raster_row
                    .into_par_iter()
                    .enumerate()
                    .map(move |(x, pixel_out)| {
                        let (pixel, info) = scene.trace_pixel(scene.plane_x(x), py);
                        *pixel_out = pixel;
                        info
                    })
            })
            .flatten()
            .sum()
    }

    /// Trace every pixel of `scene`, writing into `output` bottom row first.
    ///
    /// `output`'s length must be the area of `scene.size`.
    #[cfg(not(feature = "auto-threads"))]
    pub(super) fn trace_scene_to_image_impl(
        scene: &ViewScene<'_>,
        output: &mut [[u8; 3]],
    ) -> RaytraceInfo {
        let mut total_info = RaytraceInfo::default();
        for (y, raster_row) in output
            .chunks_mut((scene.size.width as usize).max(1))
            .enumerate()
        {
            let py = scene.plane_y(y);
            for (x, pixel_out) in raster_row.iter_mut().enumerate() {
                let (pixel, info) = scene.trace_pixel(scene.plane_x(x), py);
                *pixel_out = pixel;
                total_info += info;
            }
        }
        total_info
    }
}

// -------------------------------------------------------------------------------------------------

/// Performance info from a [`RayCaster`] operation.
///
/// The [`Default`] value is the zero value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct RaytraceInfo {
    /// Number of pixels traced.
    pub pixels: usize,
    /// Number of ray-sphere intersection tests performed.
    pub sphere_tests: usize,
    /// Number of those tests which found an intersection.
    pub hits: usize,
}

impl core::ops::Add for RaytraceInfo {
    type Output = Self;
    #[inline]
    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl core::ops::AddAssign<RaytraceInfo> for RaytraceInfo {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.pixels += other.pixels;
        self.sphere_tests += other.sphere_tests;
        self.hits += other.hits;
    }
}

impl core::iter::Sum for RaytraceInfo {
    #[inline]
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        let mut sum = Self::default();
        for part in iter {
            sum += part;
        }
        sum
    }
}

impl fmt::Display for RaytraceInfo {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let &Self {
            pixels,
            sphere_tests,
            hits,
        } = self;
        write!(f, "Pixels: {pixels}  Tests: {sphere_tests}  Hits: {hits}")
    }
}
