//! Ready-made demo scenes.
//!
//! Each scene owns its primitives as a `HittableList`; build a BVH over it
//! with `BvhNode::from_list`. The matching `*_camera` functions give a view
//! that frames the scene at the requested resolution.

use crate::material::{Checkers, Dielectric, Lambertian, Light, Metal};
use crate::{Camera, Color, HittableList, Material, Rectangle, Sphere};
use glint_math::Vec3;
use std::sync::Arc;

/// Checkered ground with a hollow glass sphere between a metal and a blue ball.
pub fn transparent() -> HittableList {
    let ground: Arc<dyn Material> = Arc::new(Checkers::new(
        Color::new(1.0, 0.0, 0.0),
        Color::new(1.0, 1.0, 0.0),
        2.0,
    ));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    // Air inside glass: the relative index flips the ray back out
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.5, 0.5, 0.5)));
    let blue: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.0, 0.0, 1.0)));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.5, -2.5), 0.5, glass)));
    world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.5, -2.5), 0.45, bubble)));
    world.add(Box::new(Sphere::new(Vec3::new(1.0, 0.0, -3.5), 0.5, metal)));
    world.add(Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -3.5), 0.5, blue)));
    world
}

pub fn transparent_camera(width: u32, height: u32) -> Camera {
    let mut camera = Camera::new().with_resolution(width, height).with_position(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, -10.0),
        Vec3::Y,
    );
    camera.initialize();
    camera
}

/// Closed room lit by a ceiling panel, holding a mirror ball and a diffuse ball.
///
/// The room spans x in [-1, 1], y in [0, 2], z in [-3, 1] with the camera
/// inside it, so no ray ever reaches the background.
pub fn lit_box() -> HittableList {
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(Light::new(Color::new(15.0, 15.0, 15.0)));
    let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.9, 0.9, 0.9)));
    let clay: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.5, 0.3)));

    let mut world = HittableList::new();

    // Walls
    world.add(Box::new(Rectangle::yz((0.0, 2.0), (-3.0, 1.0), -1.0, red)));
    world.add(Box::new(Rectangle::yz((0.0, 2.0), (-3.0, 1.0), 1.0, green)));
    world.add(Box::new(Rectangle::xz((-1.0, 1.0), (-3.0, 1.0), 0.0, white.clone())));
    world.add(Box::new(Rectangle::xz((-1.0, 1.0), (-3.0, 1.0), 2.0, white.clone())));
    world.add(Box::new(Rectangle::xy((-1.0, 1.0), (0.0, 2.0), -3.0, white.clone())));
    world.add(Box::new(Rectangle::xy((-1.0, 1.0), (0.0, 2.0), 1.0, white)));

    // Panel just below the ceiling
    world.add(Box::new(Rectangle::xz((-0.3, 0.3), (-1.8, -1.2), 1.99, light)));

    world.add(Box::new(Sphere::new(Vec3::new(-0.4, 0.4, -2.0), 0.4, mirror)));
    world.add(Box::new(Sphere::new(Vec3::new(0.45, 0.3, -1.4), 0.3, clay)));
    world
}

pub fn lit_box_camera(width: u32, height: u32) -> Camera {
    let mut camera = Camera::new().with_resolution(width, height).with_position(
        Vec3::new(0.0, 1.0, 0.9),
        Vec3::new(0.0, 1.0, -3.0),
        Vec3::Y,
    );
    camera.initialize();
    camera
}
