/// Orbital phase bookkeeping for planets and their moons.
///
/// Every body carries one state variable, its phase angle in degrees.
/// Positions are derived from the angle on demand and never stored.

use crate::core::math::{deg_to_rad, Vector};

/// Wrap an angle that has advanced by less than one full turn back into [0, 360).
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    if angle >= 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

/// A moon on a circular orbit around its parent planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Moon {
    pub radius: f32,
    pub orbit_radius: f32,
    /// Degrees per second.
    pub speed: f32,
    /// Current phase angle in degrees.
    pub angle: f32,
    pub color: [f32; 3],
}

impl Moon {
    pub fn new(radius: f32, orbit_radius: f32, speed: f32, angle: f32, color: [f32; 3]) -> Self {
        Self { radius, orbit_radius, speed, angle, color }
    }

    pub fn advance(&mut self, dt: f32) {
        self.angle = wrap_degrees(self.angle + self.speed * dt);
    }

    /// Offset from the parent planet, in the planet's (tilted) frame.
    pub fn local_position(&self) -> Vector {
        let a = deg_to_rad(self.angle);
        Vector::new(self.orbit_radius * a.cos(), 0.0, self.orbit_radius * a.sin())
    }
}

/// A planet on an axis-aligned elliptical orbit around the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub radius: f32,
    pub orbit_rx: f32,
    pub orbit_rz: f32,
    /// Degrees per second.
    pub speed: f32,
    /// Current phase angle in degrees.
    pub angle: f32,
    /// Axial tilt about Z in degrees. Never changes.
    pub tilt: f32,
    pub color: [f32; 3],
    pub moons: Vec<Moon>,
}

impl Planet {
    pub fn new(
        radius: f32,
        orbit_rx: f32,
        orbit_rz: f32,
        speed: f32,
        angle: f32,
        tilt: f32,
        color: [f32; 3],
    ) -> Self {
        Self {
            radius,
            orbit_rx,
            orbit_rz,
            speed,
            angle,
            tilt,
            color,
            moons: Vec::new(),
        }
    }

    pub fn with_moon(mut self, moon: Moon) -> Self {
        self.moons.push(moon);
        self
    }

    /// Advance this planet and all of its moons by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.angle = wrap_degrees(self.angle + self.speed * dt);
        for moon in &mut self.moons {
            moon.advance(dt);
        }
    }

    /// World-space centre at the current phase angle.
    pub fn position(&self) -> Vector {
        let a = deg_to_rad(self.angle);
        Vector::new(self.orbit_rx * a.cos(), 0.0, self.orbit_rz * a.sin())
    }

    /// World-space centre of one of this planet's moons.
    /// Moons orbit in the planet's frame, which is tilted about Z.
    pub fn moon_world_position(&self, moon: &Moon) -> Vector {
        self.position() + moon.local_position().rotate_z(deg_to_rad(self.tilt))
    }
}

/// Advance every planet (and moon) by `dt` seconds.
pub fn advance_all(planets: &mut [Planet], dt: f32) {
    for planet in planets {
        planet.advance(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(speed: f32, angle: f32) -> Planet {
        Planet::new(1.0, 10.0, 10.0, speed, angle, 0.0, [1.0, 1.0, 1.0])
    }

    #[test]
    fn nine_steps_without_wrap_then_wrap() {
        let mut p = planet(38.0, 10.0);
        for _ in 0..9 {
            p.advance(1.0);
        }
        assert!((p.angle - 352.0).abs() < 1e-3, "angle = {}", p.angle);

        p.advance(1.0);
        assert!((p.angle - 30.0).abs() < 1e-3, "angle = {}", p.angle);
    }

    #[test]
    fn wrap_keeps_angle_in_range() {
        for start in [0.0_f32, 90.0, 180.0, 300.0, 359.9] {
            for dt in [0.0_f32, 0.001, 0.016, 0.25, 1.0] {
                let mut p = planet(100.0, start);
                p.advance(dt);
                assert!(
                    (0.0..360.0).contains(&p.angle),
                    "start {start}, dt {dt} gave {}",
                    p.angle
                );
            }
        }
    }

    #[test]
    fn exactly_360_wraps_to_zero() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(359.0), 359.0);
    }

    #[test]
    fn moons_advance_with_parent() {
        let mut p = planet(10.0, 0.0).with_moon(Moon::new(0.3, 2.0, 90.0, 0.0, [1.0; 3]));
        advance_all(std::slice::from_mut(&mut p), 0.5);
        assert!((p.angle - 5.0).abs() < 1e-5);
        assert!((p.moons[0].angle - 45.0).abs() < 1e-5);
    }

    #[test]
    fn position_follows_elliptical_radii() {
        let mut p = Planet::new(1.0, 23.0, 18.4, 0.0, 0.0, 0.0, [1.0; 3]);
        let pos = p.position();
        assert!((pos.x - 23.0).abs() < 1e-5 && pos.z.abs() < 1e-5);

        p.angle = 90.0;
        let pos = p.position();
        assert!(pos.x.abs() < 1e-4 && (pos.z - 18.4).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
    }

    #[test]
    fn moon_offset_is_tilted_with_planet() {
        let p = Planet::new(1.0, 10.0, 10.0, 0.0, 0.0, 90.0, [1.0; 3])
            .with_moon(Moon::new(0.3, 2.0, 0.0, 0.0, [1.0; 3]));
        let world = p.moon_world_position(&p.moons[0]);
        // A 90 degree tilt about Z turns the moon's +X offset into +Y.
        assert!((world.x - 10.0).abs() < 1e-4);
        assert!((world.y - 2.0).abs() < 1e-4);
    }
}
