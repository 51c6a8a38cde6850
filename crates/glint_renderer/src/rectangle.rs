//! Axis-aligned rectangle primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Aabb, Axis, Interval, Ray, Vec3};
use std::sync::Arc;

/// Half-thickness given to the bounding box along the fixed axis.
const THICKNESS: f32 = 0.001;

/// A rectangle lying in the plane `axis = k`.
///
/// The rectangle spans `a` along the first of the two remaining axes and `b`
/// along the second (in X, Y, Z order). Its outward normal is the positive
/// unit vector of `axis`.
pub struct Rectangle {
    axis: Axis,
    a: Interval,
    b: Interval,
    k: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Rectangle {
    pub fn new(axis: Axis, a: Interval, b: Interval, k: f32, material: Arc<dyn Material>) -> Self {
        let (a_axis, b_axis) = axis.others();

        let mut min = Vec3::ZERO;
        let mut max = Vec3::ZERO;
        min[axis.index()] = k;
        max[axis.index()] = k;
        min[a_axis.index()] = a.min.min(a.max);
        max[a_axis.index()] = a.min.max(a.max);
        min[b_axis.index()] = b.min.min(b.max);
        max[b_axis.index()] = b.min.max(b.max);

        let bbox = Aabb::new(min, max).padded(axis, THICKNESS);

        Self {
            axis,
            a: Interval::new(min[a_axis.index()], max[a_axis.index()]),
            b: Interval::new(min[b_axis.index()], max[b_axis.index()]),
            k,
            material,
            bbox,
        }
    }

    /// Rectangle in the plane `z = k`, spanning `x` and `y`.
    pub fn xy(x: (f32, f32), y: (f32, f32), k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Axis::Z, Interval::new(x.0, x.1), Interval::new(y.0, y.1), k, material)
    }

    /// Rectangle in the plane `y = k`, spanning `x` and `z`.
    pub fn xz(x: (f32, f32), z: (f32, f32), k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Axis::Y, Interval::new(x.0, x.1), Interval::new(z.0, z.1), k, material)
    }

    /// Rectangle in the plane `x = k`, spanning `y` and `z`.
    pub fn yz(y: (f32, f32), z: (f32, f32), k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Axis::X, Interval::new(y.0, y.1), Interval::new(z.0, z.1), k, material)
    }
}

impl Hittable for Rectangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let (a_axis, b_axis) = self.axis.others();
        let k = self.axis.index();

        // A direction parallel to the plane divides to +-inf or NaN
        let t = (self.k - ray.origin()[k]) / ray.direction()[k];
        if !t.is_finite() || !ray_t.contains(t) {
            return None;
        }

        let p = ray.at(t);
        if !self.a.contains(p[a_axis.index()]) || !self.b.contains(p[b_axis.index()]) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.axis.unit(), self.material.as_ref()))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
