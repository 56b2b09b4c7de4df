//! Owned renderer states which hosts drive by alternating [`HeadlessRenderer::step()`] and
//! [`HeadlessRenderer::draw()`].

use orrery::animate::Animator;
use orrery::clock::Clock;
use orrery::math::Rgb;
use orrery::scene::SceneGraph;

use crate::camera::{Camera, ImageSize};
use crate::options::{RenderMethod, RenderOptions};
use crate::raster::{PixelBuffer, scenes};
use crate::raycaster::RayCaster;
use crate::{Flaws, HeadlessRenderer, Rendering};

/// Flaws which come from the caller's configuration rather than from the scene, and are
/// worth a warning.
const CONFIGURATION_FLAWS: Flaws = Flaws::SINGULAR_CAMERA.union(Flaws::DEGENERATE_PROJECTION);

/// Everything needed to animate and render a [`SceneGraph`] of spheres.
///
/// ```
/// use orrery::animate::Animator;
/// use orrery_render::camera::{Camera, ImageSize};
/// use orrery_render::state::RendererState;
/// use orrery_render::{HeadlessRenderer as _, RenderOptions};
///
/// let mut state = RendererState::new(
///     orrery::content::orrery(),
///     Camera::default(),
///     Animator::default(),
///     RenderOptions::default(),
///     ImageSize::new(32, 24),
/// );
/// state.step();
/// let rendering = state.draw();
/// assert_eq!(rendering.buffer.as_bytes().len(), 3 * 32 * 24);
/// ```
#[derive(Clone, Debug)]
pub struct RendererState {
    scene: SceneGraph,
    camera: Camera,
    animator: Animator,
    options: RenderOptions,
    caster: RayCaster,
    /// Configuration flaws present in the last frame, which have been logged already.
    warned: Flaws,
}

impl RendererState {
    #[allow(missing_docs)]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(
        scene: SceneGraph,
        camera: Camera,
        animator: Animator,
        options: RenderOptions,
        size: ImageSize,
    ) -> Self {
        log::debug!(
            "renderer state: {count} spheres, {size:?}, {method:?}",
            count = scene.len(),
            method = options.render_method,
        );
        Self {
            scene,
            camera,
            animator,
            options,
            caster: RayCaster::new(size),
            warned: Flaws::empty(),
        }
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the camera, for applying orbit and zoom intents.
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Changes the size of subsequent renderings.
    #[inline]
    pub fn set_size(&mut self, size: ImageSize) {
        self.caster = RayCaster::new(size);
    }

    fn warn_on_new_flaws(&mut self, flaws: Flaws) {
        let configuration_flaws = flaws & CONFIGURATION_FLAWS;
        let new = configuration_flaws - self.warned;
        if !new.is_empty() {
            log::warn!("rendering is degraded: {new}");
        }
        self.warned = configuration_flaws;
    }
}

impl HeadlessRenderer for RendererState {
    #[inline]
    fn size(&self) -> ImageSize {
        self.caster.size()
    }

    /// Advances the scene by one tick of the [`Animator`].
    #[inline]
    fn step(&mut self) {
        self.animator.advance(&mut self.scene);
    }

    #[allow(clippy::missing_inline_in_public_items)]
    fn draw(&mut self) -> Rendering {
        let (buffer, flaws) = match self.options.render_method {
            RenderMethod::Raytrace => {
                let (buffer, _info, flaws) =
                    self.caster.render(&self.scene, &self.camera, &self.options);
                (buffer, flaws)
            }
            RenderMethod::Wireframe => {
                let mut buffer = PixelBuffer::new(self.caster.size(), self.options.background);
                let flaws = scenes::draw_wireframe(
                    &mut buffer,
                    &self.scene,
                    &self.camera,
                    self.options.projection(),
                );
                let flaws = flaws | buffer.flaws();
                (buffer, flaws)
            }
        };
        self.warn_on_new_flaws(flaws);
        Rendering { buffer, flaws }
    }
}

// -------------------------------------------------------------------------------------------------

/// A [`Clock`] bouncing around the image, drawn with lines and circles.
#[derive(Clone, Debug)]
pub struct ClockState {
    clock: Clock,
    size: ImageSize,
    background: Rgb,
}

impl ClockState {
    /// Milliseconds of clock time that pass in each [`HeadlessRenderer::step()`].
    pub const STEP_MS: u32 = 50;

    #[allow(missing_docs)]
    #[inline]
    pub fn new(clock: Clock, size: ImageSize, background: Rgb) -> Self {
        Self {
            clock,
            size,
            background,
        }
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

impl HeadlessRenderer for ClockState {
    #[inline]
    fn size(&self) -> ImageSize {
        self.size
    }

    #[inline]
    fn step(&mut self) {
        self.clock.update(Self::STEP_MS);
    }

    #[inline]
    fn draw(&mut self) -> Rendering {
        let mut buffer = PixelBuffer::new(self.size, self.background);
        scenes::draw_clock(&mut buffer, &self.clock);
        let flaws = buffer.flaws();
        Rendering { buffer, flaws }
    }
}

// -------------------------------------------------------------------------------------------------

/// The [snowman](scenes::snowman), which never changes.
#[derive(Clone, Debug)]
pub struct StillLife {
    size: ImageSize,
    background: Rgb,
}

impl StillLife {
    #[allow(missing_docs)]
    #[inline]
    pub fn new(size: ImageSize, background: Rgb) -> Self {
        Self { size, background }
    }
}

impl HeadlessRenderer for StillLife {
    #[inline]
    fn size(&self) -> ImageSize {
        self.size
    }

    #[inline]
    fn step(&mut self) {}

    #[inline]
    fn draw(&mut self) -> Rendering {
        let mut buffer = PixelBuffer::new(self.size, self.background);
        scenes::snowman(&mut buffer);
        let flaws = buffer.flaws();
        Rendering { buffer, flaws }
    }
}
