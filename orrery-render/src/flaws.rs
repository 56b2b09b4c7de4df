use core::fmt;

bitflags::bitflags! {
    /// Deficiencies of a rendering.
    ///
    /// This type describes the ways in which a rendered image could fail to accurately
    /// represent the scene, or fail to comply with the requested
    /// [`RenderOptions`](crate::RenderOptions). None of these are errors; a frame is always
    /// produced.
    ///
    /// It is a [`bitflags`] generated bit-flag type. *Note: We make no guarantees that
    /// the numeric value of flags will stay the same across versions*; please treat this
    /// as a set of named values only.
    ///
    /// The [empty](Self::empty) set means no flaws are present.
    #[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
    pub struct Flaws: u16 {
        /// The camera's transform could not be inverted, so the scene was drawn as if
        /// through the identity view instead.
        const SINGULAR_CAMERA = 1 << 0;

        /// The focal distance was zero, negative, or not finite, so nothing but the
        /// background was drawn.
        const DEGENERATE_PROJECTION = 1 << 1;

        /// Shaded surfaces were drawn in their base color because the scene has no light.
        const NO_LIGHTING = 1 << 2;

        /// Some drawing fell outside the image and was discarded.
        const CLIPPED = 1 << 3;
    }
}

impl Default for Flaws {
    /// Equivalent to [`Self::empty()`].
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Flaws {
    /// Displays the flags as text like “`SINGULAR_CAMERA | CLIPPED`".
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
