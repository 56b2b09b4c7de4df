//! [`SceneGraph`]: spheres arranged in a kinematic hierarchy, where each child sphere
//! revolves about its parent's center.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use crate::appearance::Light;
use crate::math::{FreeCoordinate, Vector3};

mod sphere;
pub use sphere::*;

/// Ways that constructing a [`Sphere`] or [`SceneGraph`] can fail.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SceneError {
    /// A sphere's radius was zero, negative, or not finite.
    #[error("sphere radius must be positive and finite, not {0}")]
    InvalidRadius(FreeCoordinate),

    /// A node referred to a parent index that does not exist.
    #[error("node {node} has parent {parent}, but there are only {count} nodes")]
    ParentOutOfRange {
        /// The node whose parent is invalid.
        node: NodeIndex,
        /// The invalid parent index.
        parent: NodeIndex,
        /// The number of nodes in the scene.
        count: usize,
    },

    /// A node was its own parent.
    #[error("node {0} is its own parent")]
    SelfParent(NodeIndex),

    /// A node's rotation axis had zero or non-finite length, so rotation about it is undefined.
    #[error("node {0} has no usable rotation axis")]
    ZeroAxis(NodeIndex),

    /// Following parents from this node never reaches a root.
    #[error("node {0} is part of a parent cycle")]
    Cycle(NodeIndex),
}

/// Identifies a node within one [`SceneGraph`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Wraps a raw index. The index is checked when the scene is built.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index into [`SceneGraph::nodes()`].
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A [`Sphere`] and its place in the hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub(crate) sphere: Sphere,
    parent: Option<NodeIndex>,
    axis: Vector3<FreeCoordinate>,
}

impl SceneNode {
    /// A node that never moves.
    #[inline]
    pub fn root(sphere: Sphere) -> Self {
        Self {
            sphere,
            parent: None,
            axis: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    /// A node that revolves about the center of `parent`, about a line in the direction of
    /// `axis`.
    #[inline]
    pub fn child(sphere: Sphere, parent: NodeIndex, axis: Vector3<FreeCoordinate>) -> Self {
        Self {
            sphere,
            parent: Some(parent),
            axis,
        }
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Direction of the line about which this node revolves; meaningless for roots.
    #[inline]
    pub fn axis(&self) -> Vector3<FreeCoordinate> {
        self.axis
    }
}

/// An arena of [`SceneNode`]s forming a forest, with an optional [`Light`].
///
/// Constructed only through validation, so every parent index refers to an existing node
/// and the parent relation has no cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneGraph {
    pub(crate) nodes: Vec<SceneNode>,
    /// Every node index, each after its parent.
    pub(crate) order: Vec<NodeIndex>,
    light: Option<Light>,
}

impl SceneGraph {
    /// Returns a [`SceneBuilder`] with which to construct a scene.
    #[inline]
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Validates `nodes` and computes their update order.
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn from_nodes(nodes: Vec<SceneNode>, light: Option<Light>) -> Result<Self, SceneError> {
        let count = nodes.len();
        let mut children: Vec<Vec<NodeIndex>> = vec![Vec::new(); count];
        let mut queue = VecDeque::new();

        for (i, node) in nodes.iter().enumerate() {
            let index = NodeIndex(i);
            match node.parent {
                None => queue.push_back(index),
                Some(parent) if parent == index => return Err(SceneError::SelfParent(index)),
                Some(parent) if parent.0 >= count => {
                    return Err(SceneError::ParentOutOfRange {
                        node: index,
                        parent,
                        count,
                    });
                }
                Some(parent) => {
                    let axis_length = node.axis.length();
                    if !(axis_length > 0.0 && axis_length.is_finite()) {
                        return Err(SceneError::ZeroAxis(index));
                    }
                    children[parent.0].push(index);
                }
            }
        }

        let mut order = Vec::with_capacity(count);
        while let Some(index) = queue.pop_front() {
            order.push(index);
            queue.extend(children[index.0].iter().copied());
        }
        if order.len() < count {
            let mut reached = vec![false; count];
            for index in &order {
                reached[index.0] = true;
            }
            let stuck = reached.iter().position(|&r| !r).unwrap_or(0);
            return Err(SceneError::Cycle(NodeIndex(stuck)));
        }

        log::debug!(
            "built scene of {count} spheres, {roots} roots",
            roots = nodes.iter().filter(|n| n.parent.is_none()).count()
        );
        Ok(Self {
            nodes,
            order,
            light,
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether there are no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in index order.
    #[inline]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Returns the node at `index`, if it exists.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> Option<&SceneNode> {
        self.nodes.get(index.0)
    }

    /// All spheres, in index order.
    #[inline]
    pub fn spheres(&self) -> impl ExactSizeIterator<Item = &Sphere> + '_ {
        self.nodes.iter().map(|node| &node.sphere)
    }

    /// Every node index, ordered so that each node comes after its parent.
    #[inline]
    pub fn update_order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// The light illuminating [`Appearance::Shaded`](crate::appearance::Appearance::Shaded)
    /// spheres, if any.
    #[inline]
    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    /// Replaces the light.
    #[inline]
    pub fn set_light(&mut self, light: Option<Light>) {
        self.light = light;
    }
}

/// Incrementally constructs a [`SceneGraph`].
///
/// ```
/// use orrery::math::{Rgb, Vector3};
/// use orrery::scene::{SceneGraph, Sphere};
///
/// let mut builder = SceneGraph::builder();
/// let sun = builder.root(Sphere::new(Vector3::zero(), 0.2, Rgb::new(1.0, 1.0, 0.0)));
/// builder.child(
///     sun,
///     Sphere::new(Vector3::new(0.5, 0.0, 0.0), 0.05, Rgb::new(0.0, 0.0, 1.0)),
///     Vector3::new(0.0, 1.0, 0.0),
/// );
/// let scene = builder.build().unwrap();
/// assert_eq!(scene.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    nodes: Vec<SceneNode>,
    light: Option<Light>,
}

impl SceneBuilder {
    /// Adds a node that never moves.
    #[inline]
    pub fn root(&mut self, sphere: Sphere) -> NodeIndex {
        self.push(SceneNode::root(sphere))
    }

    /// Adds a node revolving about `parent`. See [`SceneNode::child()`].
    #[inline]
    pub fn child(
        &mut self,
        parent: NodeIndex,
        sphere: Sphere,
        axis: Vector3<FreeCoordinate>,
    ) -> NodeIndex {
        self.push(SceneNode::child(sphere, parent, axis))
    }

    /// Sets the scene's light.
    #[inline]
    pub fn light(&mut self, light: Light) -> &mut Self {
        self.light = Some(light);
        self
    }

    fn push(&mut self, node: SceneNode) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(node);
        index
    }

    /// Validates the nodes and produces the scene.
    #[inline]
    pub fn build(self) -> Result<SceneGraph, SceneError> {
        SceneGraph::from_nodes(self.nodes, self.light)
    }
}
