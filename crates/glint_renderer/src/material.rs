//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_unit_vector};
use glint_math::{reflect, refract, Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter: the new ray and how much light it keeps.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Only called after a hit has been found. Materials are immutable once
/// built and may be shared by any number of primitives.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Light emitted at point `p`. Black for everything but lights.
    fn emitted(&self, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Diffuse scatter direction: normal plus a random unit vector.
fn diffuse_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let scatter_direction = normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if scatter_direction.near_zero() {
        normal
    } else {
        scatter_direction
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, diffuse_direction(rec.normal, rng)),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// A perfect mirror tinted by `albedo`.
    pub fn new(albedo: Color) -> Self {
        Self { albedo, fuzz: 0.0 }
    }

    /// Roughen the reflection: 0.0 = perfect mirror, 1.0 = very rough.
    pub fn with_fuzz(mut self, fuzz: f32) -> Self {
        self.fuzz = fuzz.clamp(0.0, 1.0);
        self
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut direction = reflect(ray_in.direction().normalize(), rec.normal);
        if self.fuzz > 0.0 {
            direction += self.fuzz * random_unit_vector(rng);
        }

        // Reflections that would travel into the surface are absorbed
        if direction.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, direction),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ratio: f32) -> f32 {
        let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        // One draw per call, consumed even when refraction is impossible
        let draw = gen_f32(rng);
        let direction = if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > draw {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Diffuse material whose albedo alternates in a checkerboard over X and Z.
#[derive(Debug, Clone)]
pub struct Checkers {
    odd: Color,
    even: Color,
    scale: f32,
}

impl Checkers {
    /// Offset applied before flooring so cells don't double up across the origin.
    const SHIFT: f32 = 10000.0;

    /// Checkerboard of `odd` and `even` cells, `scale` cells per unit length.
    ///
    /// `even` is used where the X and Z cell indices share parity.
    pub fn new(odd: Color, even: Color, scale: f32) -> Self {
        Self { odd, even, scale }
    }

    /// Albedo at point `p`.
    pub fn albedo_at(&self, p: Vec3) -> Color {
        let x = (Self::SHIFT + p.x * self.scale).floor() as i64;
        let z = (Self::SHIFT + p.z * self.scale).floor() as i64;

        if x.rem_euclid(2) == z.rem_euclid(2) {
            self.even
        } else {
            self.odd
        }
    }
}

impl Material for Checkers {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo_at(rec.p),
            scattered: Ray::new(rec.p, diffuse_direction(rec.normal, rng)),
        })
    }
}

/// Pure emitter. Never scatters.
#[derive(Debug, Clone)]
pub struct Light {
    emit: Color,
}

impl Light {
    /// Create a new light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for Light {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, _p: Vec3) -> Color {
        self.emit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, t: f32, outward: Vec3, mat: &'a dyn Material) -> HitRecord<'a> {
        HitRecord::new(ray, t, outward, mat)
    }

    /// Replays a fixed cycle of `u32` values and counts the draws.
    struct ScriptedRng {
        values: Vec<u32>,
        draws: usize,
    }

    impl ScriptedRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                draws: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.values[self.draws % self.values.len()];
            self.draws += 1;
            v
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest {
                *byte = self.next_u32() as u8;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_lambertian_scatter() {
        let mat = Lambertian::new(Color::new(0.5, 0.5, 0.5));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.5, 0.5, 0.5));
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + unit vector never points below the surface
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert!(!result.scattered.direction().is_nan());
        }
    }

    #[test]
    fn test_diffuse_falls_back_to_normal_when_direction_cancels() {
        // 2^31 maps to 0.5 and 0 to 0.0, so the unit vector drawn is exactly -Y
        let script = [1 << 31, 0, 1 << 31];
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let lambertian = Lambertian::new(Color::splat(0.5));
        let rec = record(&ray, 1.0, Vec3::Y, &lambertian);
        let result = lambertian.scatter(&ray, &rec, &mut ScriptedRng::new(&script)).unwrap();
        assert_eq!(result.scattered.direction(), Vec3::Y);

        let checkers = Checkers::new(Color::X, Color::Y, 2.0);
        let rec = record(&ray, 1.0, Vec3::Y, &checkers);
        let result = checkers.scatter(&ray, &rec, &mut ScriptedRng::new(&script)).unwrap();
        assert_eq!(result.scattered.direction(), Vec3::Y);
    }

    #[test]
    fn test_metal_reflects() {
        let mat = Metal::new(Color::new(0.8, 0.8, 0.8));
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(5);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
        assert_eq!(result.attenuation, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_metal_absorbs_reflection_into_surface() {
        let mat = Metal::new(Color::ONE);
        // Ray travelling along the normal's side: its reflection points into the surface
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.3, 1.0, 0.0));
        let rec = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            front_face: true,
            material: &mat,
        };
        let mut rng = StdRng::seed_from_u64(5);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_grazing_reflection_is_absorbed() {
        let mat = Metal::new(Color::ONE);
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);
        let rec = HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            front_face: true,
            material: &mat,
        };
        let mut rng = StdRng::seed_from_u64(5);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_dielectric_always_scatters_untinted() {
        let mat = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(99);

        for i in 0..100 {
            let angle = i as f32 / 100.0 * std::f32::consts::FRAC_PI_2;
            let dir = Vec3::new(angle.sin(), -angle.cos(), 0.0);
            let ray = Ray::new(Vec3::ZERO - dir, dir);

            for outward in [Vec3::Y, -Vec3::Y] {
                let rec = record(&ray, 1.0, outward, &mat);
                let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::ONE);
                assert!((result.scattered.direction().length() - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Dielectric::new(1.5);
        // Exiting glass at a steep angle: ratio 1.5 * sin(60deg) > 1
        let dir = Vec3::new(60f32.to_radians().sin(), 60f32.to_radians().cos(), 0.0);
        let ray = Ray::new(Vec3::ZERO - dir, dir);
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        assert!(!rec.front_face);

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            // Stays inside: reflected back to the side it came from
            assert!(result.scattered.direction().y < 0.0);
        }
    }

    #[test]
    fn test_dielectric_normal_incidence_mostly_refracts() {
        let mat = Dielectric::new(1.5);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(2);

        let refracted = (0..1000)
            .filter(|_| mat.scatter(&ray, &rec, &mut rng).unwrap().scattered.direction().y < 0.0)
            .count();
        // Schlick reflectance at normal incidence for 1/1.5 is 4%
        assert!(refracted > 900, "refracted = {}", refracted);
    }

    #[test]
    fn test_dielectric_draws_once_per_call() {
        let mat = Dielectric::new(1.5);

        // Leaving the glass 60 degrees off the normal: total internal reflection
        let dir = Vec3::new(60f32.to_radians().sin(), 60f32.to_radians().cos(), 0.0);
        let ray = Ray::new(Vec3::ZERO, dir);
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        assert!(!rec.front_face);

        let mut rng = ScriptedRng::new(&[1 << 31]);
        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(rng.draws, 1);
        assert!((result.scattered.direction() - Vec3::new(dir.x, -dir.y, 0.0)).length() < 1e-5);

        // Head-on entry refracts, still with a single draw
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = ScriptedRng::new(&[1 << 31]);
        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(rng.draws, 1);
        assert!((result.scattered.direction() - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_checkers_parity() {
        let red = Color::new(1.0, 0.0, 0.0);
        let yellow = Color::new(1.0, 1.0, 0.0);
        let mat = Checkers::new(red, yellow, 2.0);

        let a = mat.albedo_at(Vec3::new(0.2, 0.0, 0.2));
        let b = mat.albedo_at(Vec3::new(0.7, 0.0, 0.2));
        assert_ne!(a, b);
        assert_eq!(a, yellow);
        assert_eq!(b, red);
    }

    #[test]
    fn test_checkers_continuous_across_origin() {
        let mat = Checkers::new(Color::X, Color::Y, 1.0);
        // Cells either side of x = 0 differ
        assert_ne!(
            mat.albedo_at(Vec3::new(-0.5, 0.0, 0.5)),
            mat.albedo_at(Vec3::new(0.5, 0.0, 0.5))
        );
    }

    #[test]
    fn test_checkers_scatter_uses_cell_albedo() {
        let red = Color::new(1.0, 0.0, 0.0);
        let yellow = Color::new(1.0, 1.0, 0.0);
        let mat = Checkers::new(red, yellow, 2.0);
        let ray = Ray::new(Vec3::new(0.7, 1.0, 0.2), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(8);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, red);
    }

    #[test]
    fn test_light_emits_and_absorbs() {
        let mat = Light::new(Color::new(4.0, 4.0, 4.0));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(&ray, 1.0, Vec3::Y, &mat);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(mat.emitted(Vec3::new(3.0, -2.0, 1.0)), Color::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_non_emissive_default() {
        assert_eq!(Lambertian::new(Color::ONE).emitted(Vec3::ZERO), Color::ZERO);
        assert_eq!(Metal::new(Color::ONE).emitted(Vec3::ZERO), Color::ZERO);
        assert_eq!(Dielectric::new(1.5).emitted(Vec3::ZERO), Color::ZERO);
    }
}
