//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - A depth-bounded shading loop (iterative, one scattered ray per bounce)
//! - Multi-jittered anti-aliasing
//! - Gamma correction

use crate::sampling::multi_jittered;
use crate::{Camera, Color, Hittable, RenderError, RenderResult};
use glint_math::{Interval, Ray};
use image::{Rgb, RgbImage};
use rand::RngCore;
use std::time::Instant;

/// Lower bound of every shading query; keeps scattered rays off their own surface.
pub const T_MIN: f32 = 0.001;

/// Color returned for rays that leave the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Background {
    /// Vertical gradient driven by the ray direction.
    #[default]
    Sky,
    Solid(Color),
}

impl Background {
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel are `jitter_grid * jitter_grid`
    pub jitter_grid: usize,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    pub background: Background,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            jitter_grid: 4,
            max_depth: 30,
            background: Background::Sky,
        }
    }
}

impl RenderConfig {
    pub fn with_jitter_grid(mut self, n: usize) -> Self {
        self.jitter_grid = n;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.jitter_grid == 0 {
            return Err(RenderError::InvalidConfig(
                "jitter_grid must be at least 1".to_string(),
            ));
        }
        if let Background::Solid(color) = self.background {
            if !color.is_finite() {
                return Err(RenderError::InvalidConfig(format!(
                    "background color {color} is not finite"
                )));
            }
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Follows the ray through at most `depth` surface interactions. Each hit
/// adds the surface's emission weighted by the attenuation gathered so far,
/// then continues with the scattered ray. A miss adds the background; an
/// absorbed ray or an exhausted budget stops with what has been gathered,
/// so `depth == 0` is always black.
pub fn shoot_ray(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;
    let mut radiance = Color::ZERO;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f32::INFINITY)) else {
            return radiance + throughput * background.color(&ray);
        };

        radiance += throughput * rec.material.emitted(rec.p);

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return radiance,
        }
    }

    radiance
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let t = unit_direction.y.clamp(0.0, 1.0);
    let horizon = Color::new(0.33, 0.61, 0.72);
    let zenith = Color::new(0.9, 0.9, 0.72);
    horizon * (1.0 - t) + zenith * t
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f32| (255.999 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Render a single pixel with multi-jittered sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    row: u32,
    col: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<Color> {
    config.validate()?;
    Ok(sample_pixel(camera, world, row, col, config, rng))
}

/// Pixel estimate for an already validated config.
fn sample_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    row: u32,
    col: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = multi_jittered(config.jitter_grid, rng);
    let width = camera.image_width as f32;
    let height = camera.image_height as f32;

    let mut pixel_color = Color::ZERO;
    for sample in &samples {
        let ray = camera.get_ray(
            (row as f32 + sample.row) / height,
            (col as f32 + sample.col) / width,
        );
        pixel_color += shoot_ray(&ray, world, config.max_depth, &config.background, rng);
    }

    pixel_color / samples.len() as f32
}

/// Simple image buffer for storing render output.
///
/// Pixels are linear colors stored row-major, top row first.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (row, col).
    pub fn get(&self, row: u32, col: u32) -> Color {
        self.pixels[(row * self.width + col) as usize]
    }

    /// Set the pixel at (row, col).
    pub fn set(&mut self, row: u32, col: u32, color: Color) {
        self.pixels[(row * self.width + col) as usize] = color;
    }

    /// Gamma-corrected 8-bit copy of the buffer.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(color_to_rgb(self.get(y, x))))
    }

    /// Mean of the Rec. 709 luminance over all pixels.
    pub fn mean_luminance(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let weights = Color::new(0.2126, 0.7152, 0.0722);
        self.pixels.iter().map(|c| c.dot(weights)).sum::<f32>() / self.pixels.len() as f32
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded; pixels are visited row by row so a seeded `rng` gives a
/// reproducible image.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    config.validate()?;
    if camera.image_width == 0 || camera.image_height == 0 {
        return Err(RenderError::InvalidConfig(format!(
            "image resolution {}x{} is empty",
            camera.image_width, camera.image_height
        )));
    }

    log::info!(
        "Rendering {}x{} at {} spp, max depth {}",
        camera.image_width,
        camera.image_height,
        config.jitter_grid * config.jitter_grid,
        config.max_depth
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for row in 0..camera.image_height {
        for col in 0..camera.image_width {
            let color = sample_pixel(camera, world, row, col, config, rng);
            image.set(row, col, color);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}
