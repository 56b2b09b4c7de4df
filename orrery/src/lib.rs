//! Orrery is a small software renderer for clockwork models: spheres that revolve about one
//! another in a fixed hierarchy.
//!
//! This crate defines the scene model and its animation. Rendering lives in
//! [`orrery-render`], and the command-line host in `orrery-desktop`.
//!
//! ## Data model
//!
//! * A [`SceneGraph`](scene::SceneGraph) is an arena of [`Sphere`](scene::Sphere)s, each of
//!   which either never moves (a root) or revolves about the center of its parent sphere.
//!   The graph is validated at construction, and an update order in which every parent
//!   precedes its children is computed once.
//! * A sphere's [`Appearance`](appearance::Appearance) is either a flat color or a
//!   [`Material`](appearance::Material) lit by the scene's [`Light`](appearance::Light).
//! * An [`Animator`](animate::Animator) advances a scene by one tick.
//! * A [`Clock`](clock::Clock) is a separate, two-dimensional animated entity which bounces
//!   around the edges of the viewport.
//!
//! ## Coordinate system
//!
//! Scenes use right-handed coordinates with +Y up. The built-in content fits within the
//! `[-1, 1]` cube, which is what the default camera sees.
//!
//! [`orrery-render`]: https://crates.io/crates/orrery-render/

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![warn(clippy::missing_inline_in_public_items)]

extern crate alloc;

pub mod animate;
pub mod appearance;
pub mod clock;
pub mod content;
pub mod math;
pub mod scene;
