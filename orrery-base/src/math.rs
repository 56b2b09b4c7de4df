//! Mathematical utilities and decisions.

mod axis;
pub use axis::*;
mod color;
pub use color::*;
mod matrix;
pub use matrix::*;
mod vector;
pub use vector::*;

/// Coordinates that are not locked to any grid: scene geometry, camera placement, and rays.
pub type FreeCoordinate = f64;

/// Three-dimensional homogeneous point or direction in [`FreeCoordinate`]s.
pub type FreeVector = Vector4<FreeCoordinate>;
