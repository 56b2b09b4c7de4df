//! Advancing a [`SceneGraph`] in time.

use crate::math::{FreeCoordinate, Matrix4};
use crate::scene::SceneGraph;

/// Moves every non-root sphere of a scene by a fixed angle per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animator {
    angle: FreeCoordinate,
}

impl Animator {
    /// Creates an animator that turns each child by `angle` radians per tick, about the line
    /// through its parent's center along the child's axis.
    #[inline]
    pub const fn new(angle: FreeCoordinate) -> Self {
        Self { angle }
    }

    /// Angle, in radians, by which each child revolves per tick.
    #[inline]
    pub const fn angle(&self) -> FreeCoordinate {
        self.angle
    }

    /// Advances `scene` by one tick.
    ///
    /// Nodes are updated in [`SceneGraph::update_order()`], so each child revolves about its
    /// parent's already-updated center. Roots never move, and a zero angle leaves the scene
    /// untouched.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn advance(&self, scene: &mut SceneGraph) {
        if self.angle == 0.0 {
            return;
        }
        let SceneGraph { nodes, order, .. } = scene;
        for &index in order.iter() {
            let node = &nodes[index.get()];
            let Some(parent) = node.parent() else {
                continue;
            };
            let transform = Matrix4::rotation_about_point(
                self.angle,
                node.axis(),
                nodes[parent.get()].sphere.center3(),
            );
            let sphere = &mut nodes[index.get()].sphere;
            sphere.set_center(transform * sphere.center());
        }
    }
}

impl Default for Animator {
    /// One degree per tick.
    #[inline]
    fn default() -> Self {
        Self::new(FreeCoordinate::to_radians(1.0))
    }
}
