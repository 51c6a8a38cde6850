//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection. The
//! shading normal is the barycentric blend of the three vertex normals, so a
//! soup of flat triangles still shades smoothly.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Aabb, Interval, Ray, Vec3, Vec3Ext};
use std::sync::Arc;

/// Rays with |det| below this are treated as parallel to the triangle.
const EPSILON: f32 = 1e-7;

/// Padding that keeps axis-aligned triangles out of zero-thickness boxes.
const BBOX_PAD: f32 = 0.0001;

/// A triangle primitive.
pub struct Triangle {
    vertices: [Vec3; 3],
    /// Per-vertex shading normals
    normals: [Vec3; 3],
    /// Geometric face normal, used only when the blended normal degenerates
    face_normal: Vec3,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Triangle {
    /// Create a triangle with per-vertex normals (for smooth shading).
    pub fn new(vertices: [Vec3; 3], normals: [Vec3; 3], material: Arc<dyn Material>) -> Self {
        let [v0, v1, v2] = vertices;
        let face_normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();

        let min = v0.min(v1).min(v2);
        let max = v0.max(v1).max(v2);
        let bbox = Aabb::new(min - Vec3::splat(BBOX_PAD), max + Vec3::splat(BBOX_PAD));

        Self {
            vertices,
            normals,
            face_normal,
            material,
            bbox,
        }
    }

    /// Create a triangle whose vertex normals all equal the face normal.
    ///
    /// Counter-clockwise winding (seen from the front) faces outward.
    pub fn flat(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        let n = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self::new([v0, v1, v2], [n; 3], material)
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let [v0, v1, v2] = self.vertices;
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        // Line intersection behind the origin or outside the query
        if t <= EPSILON || !ray_t.contains(t) {
            return None;
        }

        let [n0, n1, n2] = self.normals;
        let blended = (1.0 - u - v) * n0 + u * n1 + v * n2;
        let outward_normal = if blended.near_zero() {
            self.face_normal
        } else {
            blended.normalize()
        };

        Some(HitRecord::new(ray, t, outward_normal, self.material.as_ref()))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
