use crate::Flaws;
use crate::camera::ImageSize;
use crate::raster::PixelBuffer;

/// Advancing a previously-specified scene and rendering it to an in-memory image.
///
/// This trait is object-safe so that different kinds of scene can be driven without
/// generics.
pub trait HeadlessRenderer {
    /// Size of the images produced by [`Self::draw()`].
    fn size(&self) -> ImageSize;

    /// Advances the scene by one tick.
    fn step(&mut self);

    /// Produces an image of the scene as of the last call to [`Self::step()`].
    fn draw(&mut self) -> Rendering;
}

/// Image container produced by a [`HeadlessRenderer`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct Rendering {
    /// Image data, with row 0 at the bottom.
    pub buffer: PixelBuffer,
    /// Deficiencies of the rendering; ways in which it fails to accurately represent the
    /// scene or apply the renderer's options.
    pub flaws: Flaws,
}

impl Rendering {
    /// Width and height of the image.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.buffer.size()
    }
}

impl From<Rendering> for imgref::ImgVec<[u8; 3]> {
    /// Converts to an image with the top row first, as image files expect.
    #[allow(clippy::missing_inline_in_public_items)]
    fn from(value: Rendering) -> Self {
        let size = value.size();
        imgref::Img::new(
            value.buffer.rows_top_down().flatten().copied().collect(),
            // cannot overflow: u32 always fits in usize on supported targets
            size.width as usize,
            size.height as usize,
        )
    }
}

impl<'a> From<&'a Rendering> for imgref::ImgRef<'a, [u8; 3]> {
    /// The resulting image is upside down relative to the usual top-row-first convention;
    /// see [`PixelBuffer`].
    #[inline]
    fn from(value: &'a Rendering) -> Self {
        (&value.buffer).into()
    }
}
