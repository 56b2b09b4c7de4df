//! Pixel buffers and incremental (Bresenham) line and circle rasterization.
//!
//! Drawing uses *centered* coordinates: the origin is the middle of the image, +X is right
//! and +Y is up, so a `W`×`H` target covers `[-W/2, W/2) × [-H/2, H/2)`. Points outside
//! that range are silently discarded.

use alloc::vec::Vec;

use euclid::{Point2D, point2};

use orrery::math::Rgb;

use crate::Flaws;
use crate::camera::{ImagePixel, ImageSize, area_usize};

pub mod scenes;

// -------------------------------------------------------------------------------------------------

/// Unit-of-measure type for pixel coordinates relative to the center of the image.
#[expect(clippy::exhaustive_enums)]
#[derive(Debug, Eq, PartialEq)]
pub enum Centered {}

/// A pixel position in [`Centered`] coordinates.
pub type RasterPoint = Point2D<i32, Centered>;

/// Something that pixels can be drawn on.
pub trait RasterTarget {
    /// Size of the image.
    fn size(&self) -> ImageSize;

    /// Sets the pixel at `position`, measured from the bottom-left corner, which is
    /// guaranteed to be within [`Self::size()`].
    fn put_pixel(&mut self, position: Point2D<u32, ImagePixel>, color: Rgb);

    /// Called when a point fell outside the image and was not drawn.
    fn discarded(&mut self, _point: RasterPoint) {}

    /// Sets the pixel at `point`, in [`Centered`] coordinates, to `color`, or discards the
    /// write if it is outside the image.
    #[inline]
    fn set_point(&mut self, point: RasterPoint, color: Rgb) {
        let size = self.size();
        let half_width = i64::from(size.width / 2);
        let half_height = i64::from(size.height / 2);
        let x = i64::from(point.x) + half_width;
        let y = i64::from(point.y) + half_height;
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) if x < size.width && y < size.height => {
                self.put_pixel(point2(x, y), color);
            }
            _ => self.discarded(point),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// An RGB image with 8 bits per channel.
///
/// Pixels are stored row by row, and row 0 is the *bottom* of the image, as is usual for
/// textures. Use [`PixelBuffer::rows_top_down()`] when writing image files.
#[derive(Clone, Eq, PartialEq)]
pub struct PixelBuffer {
    size: ImageSize,
    data: Vec<[u8; 3]>,
    /// Number of writes discarded by [`RasterTarget::set_point()`].
    discarded: usize,
}

impl PixelBuffer {
    /// Creates a buffer of the given size filled with `background`.
    ///
    /// Panics if the number of pixels does not fit in memory.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn new(size: ImageSize, background: Rgb) -> Self {
        let Some(area) = area_usize(size) else {
            panic!("image size {size:?} is too large")
        };
        Self {
            size,
            data: vec![background.to_rgb8(); area],
            discarded: 0,
        }
    }

    #[allow(missing_docs)]
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Fills the whole buffer with `color` and forgets any discarded writes.
    #[inline]
    pub fn clear(&mut self, color: Rgb) {
        self.data.fill(color.to_rgb8());
        self.discarded = 0;
    }

    /// Returns the pixel at `position`, measured from the bottom-left corner.
    #[inline]
    pub fn get(&self, position: Point2D<u32, ImagePixel>) -> Option<[u8; 3]> {
        if position.x < self.size.width && position.y < self.size.height {
            self.data
                .get(position.y as usize * self.size.width as usize + position.x as usize)
                .copied()
        } else {
            None
        }
    }

    /// Returns the pixel at `point`, in [`Centered`] coordinates.
    #[inline]
    pub fn get_centered(&self, point: RasterPoint) -> Option<[u8; 3]> {
        let x = i64::from(point.x) + i64::from(self.size.width / 2);
        let y = i64::from(point.y) + i64::from(self.size.height / 2);
        self.get(point2(u32::try_from(x).ok()?, u32::try_from(y).ok()?))
    }

    /// All pixels, bottom row first.
    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.data
    }

    /// Mutable access to all pixels, bottom row first.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.data
    }

    /// The pixel data as `3 · width · height` bytes, in R, G, B order, bottom row first.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_flattened()
    }

    /// Rows of pixels, top row first.
    #[inline]
    pub fn rows_top_down(&self) -> impl DoubleEndedIterator<Item = &[[u8; 3]]> + '_ {
        // max(1) keeps chunks() from panicking on a zero-width image; there are no rows then.
        self.data.chunks(self.size.width.max(1) as usize).rev()
    }

    /// Number of writes discarded because they were outside the image, since creation or
    /// the last [`PixelBuffer::clear()`].
    #[inline]
    pub fn discarded_writes(&self) -> usize {
        self.discarded
    }

    /// [`Flaws::CLIPPED`] if any writes were discarded, and otherwise none.
    #[inline]
    pub fn flaws(&self) -> Flaws {
        if self.discarded > 0 {
            Flaws::CLIPPED
        } else {
            Flaws::empty()
        }
    }
}

impl RasterTarget for PixelBuffer {
    #[inline]
    fn size(&self) -> ImageSize {
        self.size
    }

    #[inline]
    fn put_pixel(&mut self, position: Point2D<u32, ImagePixel>, color: Rgb) {
        let index = position.y as usize * self.size.width as usize + position.x as usize;
        self.data[index] = color.to_rgb8();
    }

    #[inline]
    fn discarded(&mut self, point: RasterPoint) {
        log::trace!("discarding out-of-bounds point {point:?}");
        self.discarded += 1;
    }
}

impl core::fmt::Debug for PixelBuffer {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let Self {
            size,
            data: _,
            discarded,
        } = self;
        f.debug_struct("PixelBuffer")
            .field("size", size)
            .field("discarded", discarded)
            .finish_non_exhaustive()
    }
}

impl<'a> From<&'a PixelBuffer> for imgref::ImgRef<'a, [u8; 3]> {
    /// The resulting image is upside down relative to the usual top-row-first convention.
    #[inline]
    fn from(value: &'a PixelBuffer) -> Self {
        imgref::Img::new(
            value.data.as_slice(),
            value.size.width as usize,
            value.size.height as usize,
        )
    }
}

// -------------------------------------------------------------------------------------------------

/// Draws a line from `p1` to `p2`, inclusive of both endpoints, using the midpoint
/// (Bresenham) decision variable so that only integer arithmetic is used.
///
/// The endpoints are first ordered by increasing x; then one of four cases applies
/// depending on whether the slope is in `[0, 1]`, `(1, ∞)`, `[-1, 0)`, or `(-∞, -1)`.
/// The result is 8-connected.
#[allow(clippy::missing_inline_in_public_items)]
pub fn bresenham_line<T: RasterTarget + ?Sized>(
    target: &mut T,
    p1: RasterPoint,
    p2: RasterPoint,
    color: Rgb,
) {
    let (start, end) = if p2.x > p1.x { (p1, p2) } else { (p2, p1) };
    let (mut x, mut y) = (start.x, start.y);
    // Decision arithmetic is widened so that no pair of i32 endpoints can overflow it.
    let dx = i64::from(end.x) - i64::from(start.x);
    let dy = i64::from(end.y) - i64::from(start.y);

    target.set_point(point2(x, y), color);

    if dy >= 0 {
        if dy <= dx {
            let mut d = 2 * dy - dx;
            while x < end.x {
                if d >= 0 {
                    d += 2 * (dy - dx);
                    y += 1;
                } else {
                    d += 2 * dy;
                }
                x += 1;
                target.set_point(point2(x, y), color);
            }
        } else {
            let mut d = 2 * dx - dy;
            while y < end.y {
                if d >= 0 {
                    d += 2 * (dx - dy);
                    x += 1;
                } else {
                    d += 2 * dx;
                }
                y += 1;
                target.set_point(point2(x, y), color);
            }
        }
    } else if -dy <= dx {
        let mut d = -2 * dy - dx;
        while x < end.x {
            if d >= 0 {
                d += 2 * (-dy - dx);
                y -= 1;
            } else {
                d -= 2 * dy;
            }
            x += 1;
            target.set_point(point2(x, y), color);
        }
    } else {
        let mut d = 2 * dx + dy;
        while y > end.y {
            if d >= 0 {
                d += 2 * (dx + dy);
                x += 1;
            } else {
                d += 2 * dx;
            }
            y -= 1;
            target.set_point(point2(x, y), color);
        }
    }
}

/// Draws the outline of a circle using the midpoint algorithm with eight-way symmetry.
///
/// Every drawn point is within one pixel of the true circle. A radius of zero draws only
/// the center; a negative radius draws nothing.
#[allow(clippy::missing_inline_in_public_items)]
pub fn bresenham_circle<T: RasterTarget + ?Sized>(
    target: &mut T,
    center: RasterPoint,
    radius: i32,
    color: Rgb,
) {
    if radius < 0 {
        return;
    }
    let (cx, cy) = (center.x, center.y);
    let mut x: i32 = 0;
    let mut y: i32 = radius;
    // Scaled by 4 to keep the initial 5/4 − r integral, and widened so it cannot overflow.
    let mut d: i64 = 5 - 4 * i64::from(radius);

    // Points whose coordinates would not fit are off every image, so saturating is harmless.
    let mut plot = |px: i32, py: i32| {
        target.set_point(point2(cx.saturating_add(px), cy.saturating_add(py)), color);
    };
    plot(0, radius);
    plot(0, -radius);
    plot(radius, 0);
    plot(-radius, 0);

    while y > x {
        if d >= 0 {
            d += 4 * (2 * (i64::from(x) - i64::from(y)) + 5);
            y -= 1;
        } else {
            d += 4 * (2 * i64::from(x) + 3);
        }
        x += 1;
        for (px, py) in [
            (x, y),
            (-x, y),
            (x, -y),
            (-x, -y),
            (y, x),
            (-y, x),
            (y, -x),
            (-y, -x),
        ] {
            plot(px, py);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use rstest::rstest;

    /// Records drawn points rather than coloring pixels.
    struct Recorder {
        size: ImageSize,
        points: BTreeSet<(i32, i32)>,
        discarded: Vec<RasterPoint>,
    }

    impl Recorder {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: ImageSize::new(width, height),
                points: BTreeSet::new(),
                discarded: Vec::new(),
            }
        }
    }

    impl RasterTarget for Recorder {
        fn size(&self) -> ImageSize {
            self.size
        }
        fn put_pixel(&mut self, position: Point2D<u32, ImagePixel>, _: Rgb) {
            self.points.insert((
                position.x as i32 - (self.size.width / 2) as i32,
                position.y as i32 - (self.size.height / 2) as i32,
            ));
        }
        fn discarded(&mut self, point: RasterPoint) {
            self.discarded.push(point);
        }
    }

    fn line(p1: (i32, i32), p2: (i32, i32)) -> BTreeSet<(i32, i32)> {
        let mut r = Recorder::new(100, 100);
        bresenham_line(&mut r, point2(p1.0, p1.1), point2(p2.0, p2.1), Rgb::ZERO);
        assert_eq!(r.discarded, vec![]);
        r.points
    }

    #[test]
    fn set_point_centering() {
        let mut buffer = PixelBuffer::new(ImageSize::new(4, 2), Rgb::ONE);
        buffer.set_point(point2(-2, -1), Rgb::ZERO);
        buffer.set_point(point2(1, 0), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(buffer.get(point2(0, 0)), Some([0, 0, 0]));
        assert_eq!(buffer.get(point2(3, 1)), Some([255, 0, 0]));
        assert_eq!(buffer.get_centered(point2(1, 0)), Some([255, 0, 0]));
        assert_eq!(buffer.flaws(), Flaws::empty());
    }

    #[rstest]
    fn set_point_out_of_range_is_discarded(
        #[values((2, 0), (-3, 0), (0, 1), (0, -2), (i32::MAX, i32::MIN))] point: (i32, i32),
    ) {
        let mut buffer = PixelBuffer::new(ImageSize::new(4, 2), Rgb::ONE);
        let before = buffer.clone();
        buffer.set_point(point2(point.0, point.1), Rgb::ZERO);
        assert_eq!(buffer.pixels(), before.pixels());
        assert_eq!(buffer.discarded_writes(), 1);
        assert_eq!(buffer.flaws(), Flaws::CLIPPED);
    }

    #[test]
    fn clear_resets() {
        let mut buffer = PixelBuffer::new(ImageSize::new(3, 3), Rgb::ONE);
        buffer.set_point(point2(10, 10), Rgb::ZERO);
        buffer.clear(Rgb::new(0.0, 0.5, 1.0));
        assert!(buffer.pixels().iter().all(|&p| p == [0, 128, 255]));
        assert_eq!(buffer.discarded_writes(), 0);
    }

    #[test]
    fn byte_layout() {
        let mut buffer = PixelBuffer::new(ImageSize::new(2, 2), Rgb::ZERO);
        buffer.put_pixel(point2(1, 0), Rgb::new(1.0, 0.0, 0.0));
        buffer.put_pixel(point2(0, 1), Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(
            buffer.as_bytes(),
            &[0, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 0]
        );
        let rows: Vec<&[[u8; 3]]> = buffer.rows_top_down().collect();
        assert_eq!(rows[0], &[[0, 0, 255], [0, 0, 0]]);

        let image = imgref::ImgRef::from(&buffer);
        assert_eq!((image.width(), image.height()), (2, 2));
    }

    #[test]
    fn horizontal_line() {
        let expected: BTreeSet<_> = (-3..=3).map(|x| (x, 5)).collect();
        assert_eq!(line((-3, 5), (3, 5)), expected);
        assert_eq!(line((3, 5), (-3, 5)), expected);
    }

    #[test]
    fn vertical_line() {
        let expected: BTreeSet<_> = (-4..=2).map(|y| (1, y)).collect();
        assert_eq!(line((1, -4), (1, 2)), expected);
        assert_eq!(line((1, 2), (1, -4)), expected);
    }

    #[test]
    fn single_point_line() {
        assert_eq!(line((7, 7), (7, 7)), BTreeSet::from([(7, 7)]));
    }

    #[test]
    fn shallow_line_exact() {
        assert_eq!(
            line((0, 0), (10, 5)).into_iter().collect::<Vec<_>>(),
            vec![
                (0, 0),
                (1, 1),
                (2, 1),
                (3, 2),
                (4, 2),
                (5, 3),
                (6, 3),
                (7, 4),
                (8, 4),
                (9, 5),
                (10, 5)
            ]
        );
    }

    /// Endpoints are drawn, the line is 8-connected, and it has exactly one point per step
    /// along its major axis.
    #[rstest]
    fn line_in_every_octant(
        #[values(
            (10, 0), (10, 5), (10, 10), (5, 10),
            (0, 10), (-5, 10), (-10, 10), (-10, 5),
            (-10, 0), (-10, -5), (-10, -10), (-5, -10),
            (0, -10), (5, -10), (10, -10), (10, -5),
            (13, 4), (-3, 17), (-17, -3)
        )]
        end: (i32, i32),
        #[values((0, 0), (-6, 3))] start: (i32, i32),
    ) {
        let end = (start.0 + end.0, start.1 + end.1);
        let points = line(start, end);
        assert!(points.contains(&start), "start missing from {points:?}");
        assert!(points.contains(&end), "end missing from {points:?}");

        let major = (end.0 - start.0).abs().max((end.1 - start.1).abs());
        assert_eq!(points.len(), major as usize + 1, "{points:?}");

        for &(x, y) in &points {
            if (x, y) == start || (x, y) == end {
                continue;
            }
            let neighbors = points
                .iter()
                .filter(|&&(nx, ny)| {
                    (nx, ny) != (x, y) && (nx - x).abs() <= 1 && (ny - y).abs() <= 1
                })
                .count();
            assert!(neighbors >= 2, "({x}, {y}) has {neighbors} neighbors in {points:?}");
        }
    }

    #[rstest]
    fn circle_points_near_radius(#[values(1, 2, 3, 6, 10, 12, 20)] radius: i32) {
        let mut r = Recorder::new(100, 100);
        bresenham_circle(&mut r, point2(3, -2), radius, Rgb::ZERO);
        for &(x, y) in &r.points {
            let distance = f64::from(x - 3).hypot(f64::from(y + 2));
            assert!(
                (distance - f64::from(radius)).abs() <= 1.0,
                "({x}, {y}) is {distance} from center"
            );
        }
        for extreme in [(3, radius - 2), (3, -radius - 2), (3 + radius, -2), (3 - radius, -2)] {
            assert!(r.points.contains(&extreme), "{extreme:?} missing");
        }
        // Symmetric under reflection in both axes through the center.
        for &(x, y) in &r.points {
            assert!(r.points.contains(&(6 - x, y)));
            assert!(r.points.contains(&(x, -4 - y)));
        }
    }

    #[test]
    fn circle_radius_zero_and_negative() {
        let mut r = Recorder::new(10, 10);
        bresenham_circle(&mut r, point2(0, 0), 0, Rgb::ZERO);
        assert_eq!(r.points, BTreeSet::from([(0, 0)]));
        bresenham_circle(&mut r, point2(2, 2), -1, Rgb::ZERO);
        assert_eq!(r.points.len(), 1);
    }

    #[test]
    fn circle_clipped_at_edge() {
        let mut buffer = PixelBuffer::new(ImageSize::new(20, 20), Rgb::ONE);
        bresenham_circle(&mut buffer, point2(9, 0), 4, Rgb::ZERO);
        assert!(buffer.discarded_writes() > 0);
        assert_eq!(buffer.flaws(), Flaws::CLIPPED);
        assert_eq!(buffer.get_centered(point2(5, 0)), Some([0, 0, 0]));
    }

    #[test]
    fn circle_near_coordinate_limits() {
        let mut r = Recorder::new(10, 10);
        bresenham_circle(&mut r, point2(i32::MAX - 2, i32::MIN + 2), 5, Rgb::ZERO);
        assert_eq!(r.points, BTreeSet::new());
        assert!(r.discarded.contains(&point2(i32::MAX, i32::MIN + 2)));
    }
}
