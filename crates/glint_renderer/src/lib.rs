//! Glint Renderer - CPU Path Tracing
//!
//! A small Monte Carlo path tracer: spheres, triangles and axis-aligned
//! rectangles behind a median-split BVH, shaded through a depth-bounded
//! scatter loop with diffuse, metal, glass, checkered and emissive
//! materials.
//!
//! ```ignore
//! let list = glint_renderer::scenes::transparent();
//! let world = BvhNode::from_list(&list)?;
//! let camera = glint_renderer::scenes::transparent_camera(200, 200);
//! let image = render(&camera, &world, &RenderConfig::default(), &mut rng)?;
//! ```

mod bvh;
mod camera;
mod error;
mod hittable;
mod material;
mod mesh;
mod rectangle;
mod renderer;
mod sampling;
mod sphere;
mod triangle;

pub mod scenes;

pub use bvh::BvhNode;
pub use camera::{Camera, Projection};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Checkers, Color, Dielectric, Lambertian, Light, Material, Metal, ScatterResult,
};
pub use mesh::Mesh;
pub use rectangle::Rectangle;
pub use renderer::{
    color_to_rgb, linear_to_gamma, render, render_pixel, shoot_ray, Background, ImageBuffer,
    RenderConfig, T_MIN,
};
pub use sampling::{multi_jittered, Sample};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Axis, Interval, Ray, Vec3};
