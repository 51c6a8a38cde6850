//! Random sampling helpers.
//!
//! Everything here draws from an explicitly passed generator so a seeded
//! `StdRng` reproduces a render exactly.

use glint_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Random unit vector, uniformly distributed over the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling in the unit ball, then project onto the sphere
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// A sub-pixel offset, both coordinates in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub row: f32,
    pub col: f32,
}

/// Multi-jittered sample pattern of `n * n` sub-pixel offsets.
///
/// Starts from the canonical arrangement, where every sample sits in its own
/// cell of the coarse `n x n` grid and its own cell of the fine `n² x n²`
/// grid, then shuffles row offsets within each grid row and column offsets
/// within each grid column. Both stratifications survive the shuffle.
///
/// Returned in row-major order.
pub fn multi_jittered(n: usize, rng: &mut dyn RngCore) -> Vec<Sample> {
    let nf = n as f32;
    let fine = nf * nf;
    let mut samples: Vec<Sample> = (0..n * n)
        .map(|i| {
            let (rr, cc) = (i / n, i % n);
            Sample {
                row: rr as f32 / nf + cc as f32 / fine + 0.5 / fine,
                col: cc as f32 / nf + rr as f32 / fine + 0.5 / fine,
            }
        })
        .collect();

    // Fisher-Yates on the row offsets of each grid row
    for rr in 0..n {
        for i in (1..n).rev() {
            let j = rng.gen_range(0..=i);
            let a = samples[rr * n + i].row;
            samples[rr * n + i].row = samples[rr * n + j].row;
            samples[rr * n + j].row = a;
        }
    }

    // ...and on the column offsets of each grid column
    for cc in 0..n {
        for i in (1..n).rev() {
            let j = rng.gen_range(0..=i);
            let a = samples[i * n + cc].col;
            samples[i * n + cc].col = samples[j * n + cc].col;
            samples[j * n + cc].col = a;
        }
    }

    samples
}
