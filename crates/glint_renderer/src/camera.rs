//! Camera for ray generation.

use glint_math::{Ray, Vec3};

/// How viewport points turn into rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// All rays start at the eye and pass through the viewport.
    #[default]
    Perspective,
    /// Rays start on the viewport and travel along the view direction.
    Orthographic,
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Viewport settings
    projection: Projection,
    viewport_height: f32,
    focal_length: f32,

    // Cached computed values (set by initialize())
    forward: Vec3,
    viewport_right: Vec3,
    viewport_down: Vec3,
    viewport_top_left: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 400,
            image_height: 400,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            projection: Projection::Perspective,
            viewport_height: 1.0,
            focal_length: 1.0,
            forward: Vec3::NEG_Z,
            viewport_right: Vec3::X,
            viewport_down: Vec3::NEG_Y,
            viewport_top_left: Vec3::new(-0.5, 0.5, -1.0),
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Set viewport height (world units) and eye-to-viewport distance.
    pub fn with_viewport(mut self, viewport_height: f32, focal_length: f32) -> Self {
        self.viewport_height = viewport_height;
        self.focal_length = focal_length;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        let aspect_ratio = self.image_width as f32 / self.image_height.max(1) as f32;
        let viewport_width = self.viewport_height * aspect_ratio;

        // Camera basis
        self.forward = (self.look_at - self.look_from).normalize();
        let right = self.forward.cross(self.vup).normalize();
        let up = right.cross(self.forward);

        self.viewport_right = viewport_width * right;
        self.viewport_down = -self.viewport_height * up;
        self.viewport_top_left = self.look_from - self.viewport_right / 2.0 - self.viewport_down / 2.0
            + self.focal_length * self.forward;
    }

    /// Ray through the viewport point at fractional position `(row, col)`.
    ///
    /// `(0, 0)` is the top-left corner of the viewport and `(1, 1)` the
    /// bottom-right.
    pub fn get_ray(&self, row_ratio: f32, col_ratio: f32) -> Ray {
        let target =
            self.viewport_top_left + self.viewport_down * row_ratio + self.viewport_right * col_ratio;

        match self.projection {
            Projection::Perspective => Ray::new(self.look_from, target - self.look_from),
            Projection::Orthographic => Ray::new(target, self.forward),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
