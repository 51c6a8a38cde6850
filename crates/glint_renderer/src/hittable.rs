//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Aabb, Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Built once by the primitive that was hit and never modified afterwards.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a dyn Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at parameter `t`.
    ///
    /// `outward_normal` is the geometric normal pointing out of the surface.
    /// The stored normal is flipped when the ray arrives from behind, so it
    /// always opposes the incoming ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a dyn Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection of `ray` with parameter inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A flat list of hittable objects, intersected by testing every member.
///
/// This is the brute-force reference for the BVH and owns the primitives a
/// BVH borrows from.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.bbox = self.bbox.merge(&object.bounding_box());
        self.objects.push(object);
    }

    /// Borrow every object, in insertion order.
    pub fn as_refs(&self) -> Vec<&dyn Hittable> {
        self.objects.iter().map(|o| o.as_ref()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hittable + 'static> Extend<H> for HittableList {
    fn extend<I: IntoIterator<Item = H>>(&mut self, iter: I) {
        for object in iter {
            self.add(Box::new(object));
        }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let interval = match &closest {
                Some(rec) => ray_t.with_max(rec.t),
                None => ray_t,
            };
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use std::sync::Arc;

    #[test]
    fn test_hit_record_front_face() {
        let mat = Lambertian::new(Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = HitRecord::new(&ray, 4.0, Vec3::Z, &mat);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_hit_record_back_face_flips_normal() {
        let mat = Lambertian::new(Vec3::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));

        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &mat);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
        assert!(ray.direction().dot(rec.normal) <= 0.0);
    }

    #[test]
    fn test_list_returns_closest() {
        let mat = Arc::new(Lambertian::new(Vec3::splat(0.5)));
        let mut list = HittableList::new();
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, mat.clone())));
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, mat.clone())));
        list.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, mat)));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = list.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_list_bounding_box_grows() {
        let mat = Arc::new(Lambertian::new(Vec3::splat(0.5)));
        let mut list = HittableList::new();
        assert!(list.is_empty());

        list.add(Box::new(Sphere::new(Vec3::ZERO, 1.0, mat.clone())));
        list.add(Box::new(Sphere::new(Vec3::new(4.0, 0.0, 0.0), 1.0, mat)));

        assert_eq!(list.len(), 2);
        assert_eq!(list.bounding_box().min, Vec3::splat(-1.0));
        assert_eq!(list.bounding_box().max, Vec3::new(5.0, 1.0, 1.0));
    }
}
