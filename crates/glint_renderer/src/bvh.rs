//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built once over borrowed primitives. Construction is a
//! median split on the axis where primitive box centers spread the most, so
//! tree depth stays logarithmic however the primitives cluster.

use crate::error::{RenderError, RenderResult};
use crate::{HitRecord, Hittable, HittableList};
use glint_math::{Aabb, Axis, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf with primitives.
///
/// Branches own their children. Leaves borrow primitives from a list that
/// must outlive the tree.
pub enum BvhNode<'s> {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode<'s>>,
        right: Box<BvhNode<'s>>,
        bbox: Aabb,
    },
    /// Leaf node with at most `LEAF_MAX_SIZE` primitives.
    Leaf {
        objects: Vec<&'s dyn Hittable>,
        bbox: Aabb,
    },
}

impl<'s> BvhNode<'s> {
    /// Create a BVH from a list of hittable objects.
    ///
    /// Fails with `RenderError::EmptyScene` if `objects` is empty.
    pub fn new(objects: Vec<&'s dyn Hittable>) -> RenderResult<Self> {
        if objects.is_empty() {
            return Err(RenderError::EmptyScene);
        }

        let count = objects.len();
        let root = Self::build(objects);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Built BVH over {} primitives: {} nodes, depth {}",
                count,
                root.node_count(),
                root.depth()
            );
        }
        Ok(root)
    }

    /// Build a BVH over every object in `list`.
    pub fn from_list(list: &'s HittableList) -> RenderResult<Self> {
        Self::new(list.as_refs())
    }

    /// Recursive BVH construction.
    fn build(mut objects: Vec<&'s dyn Hittable>) -> Self {
        let n = objects.len();

        if n <= LEAF_MAX_SIZE {
            let bbox = objects[1..]
                .iter()
                .fold(objects[0].bounding_box(), |acc, o| acc.merge(&o.bounding_box()));
            return BvhNode::Leaf { objects, bbox };
        }

        // Spread of box centers, not of the boxes themselves
        let first = objects[0].bounding_box().center();
        let (min, max) = objects.iter().fold((first, first), |(min, max), o| {
            let c = o.bounding_box().center();
            (min.min(c), max.max(c))
        });
        let axis = Axis::of_max_component(max - min).index();

        objects.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().center()[axis];
            let b_val = b.bounding_box().center()[axis];
            a_val.total_cmp(&b_val)
        });

        // Split at midpoint
        let mid = n / 2;
        let right_objects = objects.split_off(mid);
        let left = Self::build(objects);
        let right = Self::build(right_objects);
        let bbox = left.bounding_box().merge(&right.bounding_box());

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    /// Closest hit, querying both children of every branch with the full
    /// interval instead of narrowing to the best hit found so far.
    ///
    /// Returns the same hit as `hit`; it only prunes less.
    pub fn hit_exhaustive(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.query(ray, ray_t, false)
    }

    fn query(&self, ray: &Ray, ray_t: Interval, narrow: bool) -> Option<HitRecord<'_>> {
        if !self.bounding_box().hit(ray, ray_t) {
            return None;
        }

        match self {
            BvhNode::Leaf { objects, .. } => {
                let mut closest: Option<HitRecord<'_>> = None;
                for obj in objects {
                    if let Some(rec) = obj.hit(ray, ray_t) {
                        if closest.as_ref().map_or(true, |c| rec.t < c.t) {
                            closest = Some(rec);
                        }
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, .. } => {
                let hit_left = left.query(ray, ray_t, narrow);

                let right_t = match (&hit_left, narrow) {
                    (Some(rec), true) => ray_t.with_max(rec.t),
                    _ => ray_t,
                };
                let hit_right = right.query(ray, right_t, narrow);

                // Left wins ties
                match (hit_left, hit_right) {
                    (Some(l), Some(r)) => Some(if r.t < l.t { r } else { l }),
                    (l, r) => l.or(r),
                }
            }
        }
    }

    /// Number of nodes in the tree, leaves included.
    pub fn node_count(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Hittable for BvhNode<'_> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.query(ray, ray_t, true)
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
