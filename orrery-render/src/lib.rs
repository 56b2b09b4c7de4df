//! Camera, rasterizer, and ray caster for the orrery renderer.
//!
//! A frame is produced by a [`HeadlessRenderer`], such as [`state::RendererState`], which
//! owns a [`SceneGraph`](orrery::scene::SceneGraph) and a [`camera::Camera`]: each
//! [`step()`](HeadlessRenderer::step) advances the animation by one tick and each
//! [`draw()`](HeadlessRenderer::draw) renders a fresh [`raster::PixelBuffer`].
//!
//! ## Package features
//!
//! This package, `orrery-render`, defines the following feature flags:
//!
//! * `"auto-threads"`:
//!   Trace the rows of an image in parallel, using `rayon`’s global thread pool.
//!   This feature does not affect the public API, only performance and dependencies.
//! * `"serde"`:
//!   Enables `serde` serialization of [`RenderOptions`].

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![warn(clippy::missing_inline_in_public_items)]

extern crate alloc;

// -------------------------------------------------------------------------------------------------

pub mod camera;

mod flaws;
pub use flaws::Flaws;

mod headless;
pub use headless::{HeadlessRenderer, Rendering};

mod options;
pub use options::{RenderMethod, RenderOptions};

pub mod raster;

pub mod raycaster;

pub mod state;

// -------------------------------------------------------------------------------------------------

/// An error indicating that a renderer was asked to do something it cannot.
#[derive(Clone, Debug, Eq, Hash, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum RenderError {
    /// The buffer to render into had a size other than the renderer's.
    #[displaydoc("buffer is {actual:?} but the renderer produces {expected:?}")]
    SizeMismatch {
        /// Size of images the renderer produces.
        expected: camera::ImageSize,
        /// Size of the buffer given.
        actual: camera::ImageSize,
    },
}

impl std::error::Error for RenderError {}
