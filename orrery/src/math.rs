//! Mathematical utilities and decisions.
//!
//! The contents of this module are defined in `orrery-base` and reexported here.

pub use orrery_base::math::*;
