//! Choosing a scene and driving its renderer without a window.

use orrery::animate::Animator;
use orrery::content;
use orrery::math::{FreeCoordinate, Vector3};
use orrery_render::camera::{Camera, ImageSize};
use orrery_render::state::{ClockState, RendererState, StillLife};
use orrery_render::{Flaws, HeadlessRenderer, RenderOptions, Rendering};

/// The scenes the application knows how to show.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[non_exhaustive]
pub enum SceneChoice {
    /// A sun, two planets, and a moon, revolving.
    Orrery,
    /// One flat yellow sphere at the origin.
    SingleSphere,
    /// A snowman drawn with lines and circles.
    Snowman,
    /// A clock face bouncing around the image.
    Clock,
}

impl SceneChoice {
    /// Whether this scene is made of spheres viewed through a [`Camera`], and is therefore
    /// affected by the camera and the projection.
    pub fn uses_camera(self) -> bool {
        match self {
            SceneChoice::Orrery | SceneChoice::SingleSphere => true,
            SceneChoice::Snowman | SceneChoice::Clock => false,
        }
    }
}

/// Everything needed to construct a renderer for a [`SceneChoice`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct SessionParams {
    #[allow(missing_docs)]
    pub scene: SceneChoice,
    #[allow(missing_docs)]
    pub size: ImageSize,
    /// Degrees each child sphere revolves per step. [`None`] means the default animation.
    pub tick_angle: Option<FreeCoordinate>,
    /// Degrees the camera orbits about the vertical axis per step.
    pub orbit: FreeCoordinate,
    #[allow(missing_docs)]
    pub options: RenderOptions,
}

impl SessionParams {
    #[allow(missing_docs)]
    pub fn new(scene: SceneChoice, size: ImageSize, options: RenderOptions) -> Self {
        Self {
            scene,
            size,
            tick_angle: None,
            orbit: 0.0,
            options,
        }
    }

    /// Constructs the renderer these parameters describe.
    pub fn create_renderer(&self) -> Box<dyn HeadlessRenderer> {
        let &Self {
            scene,
            size,
            tick_angle,
            orbit,
            ref options,
        } = self;

        if !scene.uses_camera() && (tick_angle.is_some() || orbit != 0.0) {
            log::warn!("scene {scene} is not animated by revolving; ignoring angles");
        }

        let animator = tick_angle.map_or_else(Animator::default, |degrees| {
            Animator::new(degrees.to_radians())
        });
        let state = match scene {
            SceneChoice::Orrery => RendererState::new(
                content::orrery(),
                Camera::new(
                    Vector3::new(0.0, 0.5, 2.0),
                    Vector3::new(0.0, -0.5, -2.0),
                    Vector3::new(0.0, 1.0, 0.0),
                ),
                animator,
                options.clone(),
                size,
            ),
            SceneChoice::SingleSphere => RendererState::new(
                content::single_sphere(),
                Camera::default(),
                animator,
                options.clone(),
                size,
            ),
            SceneChoice::Snowman => return Box::new(StillLife::new(size, options.background)),
            SceneChoice::Clock => {
                return Box::new(ClockState::new(
                    content::clock(size.width, size.height),
                    size,
                    options.background,
                ));
            }
        };

        if orbit == 0.0 {
            Box::new(state)
        } else {
            Box::new(Turntable {
                state,
                angle: orbit.to_radians(),
            })
        }
    }
}

/// A [`RendererState`] whose camera also orbits the vertical axis on every step, as if the
/// user were dragging steadily.
#[derive(Debug)]
struct Turntable {
    state: RendererState,
    /// Radians per step.
    angle: FreeCoordinate,
}

impl HeadlessRenderer for Turntable {
    fn size(&self) -> ImageSize {
        self.state.size()
    }

    fn step(&mut self) {
        self.state.step();
        self.state
            .camera_mut()
            .orbit(Vector3::new(0.0, 1.0, 0.0), self.angle);
    }

    fn draw(&mut self) -> Rendering {
        self.state.draw()
    }
}

/// Steps `renderer` `frames` times without drawing anything, then draws the final state once
/// and returns its flaws.
pub fn headless_main_loop(renderer: &mut dyn HeadlessRenderer, frames: usize) -> Flaws {
    for _ in 0..frames {
        renderer.step();
    }
    let rendering = renderer.draw();
    log::info!(
        "Simulated {frames} steps; final frame is {size:?}",
        size = rendering.size()
    );
    if !rendering.flaws.is_empty() {
        log::warn!("Final frame has flaws: {flaws}", flaws = rendering.flaws);
    }
    rendering.flaws
}
