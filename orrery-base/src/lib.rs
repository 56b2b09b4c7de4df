//! This library is a component of [`orrery`], which defines the mathematical types the
//! renderer is built on: fixed-size vectors and matrices, homogeneous transformations, and
//! colors.
//!
//! [`orrery`]: https://crates.io/crates/orrery/

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![warn(clippy::missing_inline_in_public_items)]

pub mod math;

pub mod util;
