//! Color data types. This module is private but reexported by its parent.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use crate::math::Vector3;

/// A floating-point RGB color value.
///
/// * Each color component must be a non-NaN value. The nominal range is 0 to 1;
///   values outside it are preserved, and clamped only on conversion to 8-bit channels.
/// * Color components are linear; no gamma curve is applied on conversion.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f32; 3]", into = "[f32; 3]")
)]
pub struct Rgb(Vector3<f32>);

/// Error from constructing an [`Rgb`] with a NaN component.
#[derive(Clone, Copy, Debug, Eq, PartialEq, displaydoc::Display)]
#[displaydoc("color component is NaN")]
#[non_exhaustive]
pub struct ColorIsNan;

impl core::error::Error for ColorIsNan {}

impl Rgb {
    /// Black.
    pub const ZERO: Rgb = Rgb(Vector3::new(0.0, 0.0, 0.0));
    /// Nominal white.
    pub const ONE: Rgb = Rgb(Vector3::new(1.0, 1.0, 1.0));

    /// Constructs a color from components.
    ///
    /// Panics if any component is NaN.
    #[inline]
    #[track_caller]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        match Self::try_new(r, g, b) {
            Ok(color) => color,
            Err(_) => panic!("color component is NaN"),
        }
    }

    /// Constructs a color from components, failing if any component is NaN.
    #[inline]
    pub const fn try_new(r: f32, g: f32, b: f32) -> Result<Self, ColorIsNan> {
        if r.is_nan() || g.is_nan() || b.is_nan() {
            Err(ColorIsNan)
        } else {
            Ok(Self(Vector3::new(r, g, b)))
        }
    }

    /// Constructs a shade of gray (components all equal). Panics if `luminance` is NaN.
    #[inline]
    #[track_caller]
    pub const fn from_luminance(luminance: f32) -> Self {
        Self::new(luminance, luminance, luminance)
    }

    /// Returns the red color component.
    #[inline]
    pub fn red(self) -> f32 {
        self.0.x()
    }
    /// Returns the green color component.
    #[inline]
    pub fn green(self) -> f32 {
        self.0.y()
    }
    /// Returns the blue color component.
    #[inline]
    pub fn blue(self) -> f32 {
        self.0.z()
    }

    /// Combines the red, green, and blue components to obtain a [relative luminance]
    /// (“grayscale”) value. This will be equal to 1 if all components are 1.
    ///
    /// [relative luminance]: https://en.wikipedia.org/wiki/Relative_luminance
    #[inline]
    pub fn luminance(self) -> f32 {
        self.green() * 0.7152 + (self.red() * 0.2126 + self.blue() * 0.0722)
    }

    /// Clamp each component to lie within the range 0 to 1, inclusive.
    #[inline]
    #[must_use]
    pub fn clamp(self) -> Self {
        Self(self.0.map(|c| c.clamp(0.0, 1.0)))
    }

    /// Converts this color to 8 bits per component, as `round(255 × c)`.
    /// Out-of-range components saturate at 0 or 255.
    ///
    /// ```
    /// use orrery_base::math::Rgb;
    ///
    /// assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_rgb8(), [255, 128, 0]);
    /// assert_eq!(Rgb::new(2.0, -1.0, 0.1).to_rgb8(), [255, 0, 26]);
    /// ```
    #[inline]
    pub fn to_rgb8(self) -> [u8; 3] {
        // out of range values will be clamped by `as u8`
        self.0.map(|c| (c * 255.0).round() as u8).into_array()
    }
}

impl Add<Rgb> for Rgb {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}
impl AddAssign<Rgb> for Rgb {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}
/// Multiplies two color values componentwise.
impl Mul<Rgb> for Rgb {
    type Output = Self;
    #[inline]
    fn mul(self, other: Rgb) -> Self {
        Self(Vector3::new(
            self.red() * other.red(),
            self.green() * other.green(),
            self.blue() * other.blue(),
        ))
    }
}
impl Mul<f32> for Rgb {
    type Output = Self;
    /// Multiplies this color value by a scalar.
    ///
    /// Panics if the scalar is NaN.
    #[inline]
    #[track_caller]
    fn mul(self, scalar: f32) -> Self {
        assert!(!scalar.is_nan(), "color scalar is NaN");
        Self(self.0 * scalar)
    }
}
impl Sum for Rgb {
    #[allow(clippy::missing_inline_in_public_items)]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rgb::ZERO, Add::add)
    }
}

impl TryFrom<[f32; 3]> for Rgb {
    type Error = ColorIsNan;
    #[inline]
    fn try_from([r, g, b]: [f32; 3]) -> Result<Self, Self::Error> {
        Self::try_new(r, g, b)
    }
}
impl From<Rgb> for [f32; 3] {
    #[inline]
    fn from(value: Rgb) -> Self {
        value.0.into_array()
    }
}

impl fmt::Debug for Rgb {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "Rgb({:?}, {:?}, {:?})",
            self.red(),
            self.green(),
            self.blue()
        )
    }
}
