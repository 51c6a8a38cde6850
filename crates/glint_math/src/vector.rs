//! Vector operations used by scattering that glam does not provide.

use crate::Vec3;

/// Extra queries on `Vec3`.
pub trait Vec3Ext {
    /// True if every component is within a tiny distance of zero.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        const S: f32 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }
}

/// Reflect `v` about the normal `n`: `v - 2(v·n)n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the boundary.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::splat(1e-9).near_zero());
        assert!(!Vec3::new(0.0, 1e-3, 0.0).near_zero());
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_same_medium_is_straight() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, Vec3::Y, 1.0);
        assert!((r - uv).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_normal_entering_denser_medium() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, Vec3::Y, 1.0 / 1.5);
        // Tangential component shrinks by the index ratio
        assert!((r.x - uv.x / 1.5).abs() < 1e-5);
        assert!(r.y < 0.0);
    }
}
