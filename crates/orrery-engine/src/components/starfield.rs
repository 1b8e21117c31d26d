use std::f32::consts::TAU;

use crate::core::math::Vector;
use crate::core::rng::Rng;

/// Point sizes the renderer batches stars into.
pub const SIZE_BUCKETS: [f32; 5] = [1.5, 2.0, 2.5, 3.0, 3.5];

/// Shape of the generated starfield.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StarfieldParams {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: 200,
            min_radius: 80.0,
            max_radius: 150.0,
        }
    }
}

/// A background star. Its colour is a pure function of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vector,
    pub size: f32,
    pub phase_r: f32,
    pub phase_g: f32,
    pub phase_b: f32,
    pub speed: f32,
    pub base: f32,
    pub amp: f32,
}

impl Star {
    /// Twinkling RGB at `t` seconds, each channel in [0, 1].
    pub fn twinkle_color(&self, t: f32) -> [f32; 3] {
        let ts = t * self.speed;
        let tw = self.base + self.amp * (0.5 * ((ts + self.phase_r).sin() + 1.0)) * 0.9;
        let channel = |rate: f32, phase: f32| (tw * (0.6 + 0.4 * (ts * rate + phase).sin())).clamp(0.0, 1.0);
        [
            channel(1.1, self.phase_r),
            channel(0.9, self.phase_g),
            channel(1.3, self.phase_b),
        ]
    }

    /// Size snapped to the nearest bucket in [`SIZE_BUCKETS`].
    pub fn point_size(&self) -> f32 {
        SIZE_BUCKETS
            .iter()
            .copied()
            .min_by(|a, b| (a - self.size).abs().total_cmp(&(b - self.size).abs()))
            .unwrap_or(self.size)
    }
}

/// Scatter stars uniformly over directions on a shell between the two radii.
pub fn generate(params: &StarfieldParams, rng: &mut Rng) -> Vec<Star> {
    (0..params.count)
        .map(|_| {
            let u = rng.range(-1.0, 1.0);
            let theta = rng.range(0.0, TAU);
            let r = rng.range(params.min_radius, params.max_radius);
            let s = (1.0 - u * u).max(0.0).sqrt();

            Star {
                position: Vector::new(r * s * theta.cos(), r * u, r * s * theta.sin()),
                size: rng.range(1.5, 3.5),
                phase_r: rng.range(0.0, TAU),
                phase_g: rng.range(0.0, TAU),
                phase_b: rng.range(0.0, TAU),
                speed: rng.range(0.6, 1.8),
                base: rng.range(0.25, 0.55),
                amp: rng.range(0.35, 0.75),
            }
        })
        .collect()
}
