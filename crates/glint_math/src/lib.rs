// Re-export glam for convenience
pub use glam::*;

// glint math types
mod aabb;
mod axis;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use axis::Axis;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, refract, Vec3Ext};
