/// Hand-authored scene bodies and their visual constants.
///
/// Distances and speeds are stylized: radii in world units, speeds in
/// degrees per second, every orbit in the XZ plane around the sun.

use orrery_engine::{Moon, Planet};

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 4.0;
pub const SUN_COLOR: [f32; 3] = [1.0, 0.95, 0.2];
pub const SUN_EMISSION: f32 = 0.8;
/// Point light at the sun's centre. Over-bright on purpose.
pub const SUN_LIGHT_COLOR: [f32; 3] = [1.5, 1.425, 1.275];

// ── Orbit rings ──────────────────────────────────────────────────────

pub const PLANET_RING_SEGMENTS: u32 = 256;
pub const PLANET_RING_COLOR: [f32; 3] = [0.8, 0.8, 0.8];
pub const MOON_RING_SEGMENTS: u32 = 96;
pub const MOON_RING_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// ── Ship ─────────────────────────────────────────────────────────────

pub const HULL_COLOR: [f32; 3] = [0.75, 0.80, 0.95];

// ── Planets ──────────────────────────────────────────────────────────

pub const PLANET_COUNT: usize = 6;

/// The six planets, innermost first, with their moons at phase 0.
pub fn planets() -> Vec<Planet> {
    vec![
        Planet::new(1.4, 11.5, 11.5, 38.0, 10.0, 5.0, [1.0, 0.0, 1.0])
            .with_moon(Moon::new(0.30, 2.0, 90.0, 0.0, [0.9, 0.9, 1.0])),
        Planet::new(1.9, 16.1, 16.1, 26.0, 120.0, 8.0, [0.0, 1.0, 0.8]),
        // Only elliptical orbit in the set.
        Planet::new(1.2, 23.0, 18.4, 18.0, 60.0, 3.0, [0.0, 0.5, 1.0]),
        Planet::new(2.3, 27.6, 27.6, 12.0, 210.0, 23.0, [0.0, 1.0, 0.0])
            .with_moon(Moon::new(0.35, 2.5, 75.0, 0.0, [0.9, 0.9, 0.95]))
            .with_moon(Moon::new(0.28, 3.6, 52.0, 0.0, [0.8, 0.9, 1.0])),
        Planet::new(2.0, 34.5, 34.5, 9.0, 300.0, 10.0, [1.0, 0.0, 0.0])
            .with_moon(Moon::new(0.32, 2.2, 100.0, 0.0, [1.0, 0.85, 0.85])),
        Planet::new(3.1, 43.7, 43.7, 6.0, 30.0, 2.0, [1.0, 0.5, 0.0]),
    ]
}
