/// One of the coordinate axes, for the rotations [`Matrix4::rotation()`] builds.
///
/// [`Matrix4::rotation()`]: crate::math::Matrix4::rotation
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Axis {
    X,
    Y,
    Z,
}
