use orrery::content::palette;
use orrery::math::{FreeCoordinate, Rgb};

use crate::camera::Projection;

/// Options for controlling rendering, which do not affect the scene itself.
///
/// When deserialized, missing fields take their values from [`RenderOptions::default()`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct RenderOptions {
    /// Overall rendering technique to use.
    pub render_method: RenderMethod,

    /// Distance from the eye to the image plane, which spans `[-1, 1]` on each axis.
    /// Larger values narrow the field of view.
    ///
    /// Must be positive and finite; otherwise nothing but the background is drawn and
    /// [`Flaws::DEGENERATE_PROJECTION`](crate::Flaws::DEGENERATE_PROJECTION) is reported.
    pub focus: FreeCoordinate,

    /// Color of pixels where no sphere is seen.
    pub background: Rgb,
}

impl RenderOptions {
    /// The projection these options call for.
    #[inline]
    pub fn projection(&self) -> Projection {
        Projection::new(self.focus)
    }
}

impl Default for RenderOptions {
    #[inline]
    fn default() -> Self {
        Self {
            render_method: RenderMethod::Raytrace,
            focus: 1.0,
            background: palette::BACKGROUND,
        }
    }
}

/// Choices for [`RenderOptions::render_method`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum RenderMethod {
    /// Cast one ray per pixel and shade the nearest sphere hit.
    Raytrace,

    /// Draw the outline of each sphere and the links between parents and children,
    /// using only lines and circles.
    Wireframe,
}
