/// Free-flying camera driven by six level-triggered direction flags.
///
/// Orientation comes from fixed yaw/pitch; only the position moves.

use crate::core::math::{deg_to_rad, Vector};

/// Squared velocity below which the camera does not move.
const MIN_VELOCITY_SQ: f32 = 1e-8;

const WORLD_UP: Vector = Vector::Y;

/// One of the six movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Held state of the six movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveInput {
    /// Set on key-down, clear on key-up.
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Forward => self.forward = pressed,
            Direction::Backward => self.backward = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }
}

/// Orthonormal camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vector,
    pub right: Vector,
    pub up: Vector,
}

/// What the renderer needs to set up the view transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vector,
    pub target: Vector,
    pub up: Vector,
}

impl CameraView {
    /// Right-handed look-at matrix for this view.
    pub fn view_matrix(&self) -> glam::Mat4 {
        glam::Mat4::look_at_rh(self.eye.into(), self.target.into(), self.up.into())
    }
}

#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vector,
    /// Degrees. Fixed for the lifetime of the camera.
    pub yaw: f32,
    /// Degrees. Fixed for the lifetime of the camera.
    pub pitch: f32,
    /// World units per second.
    pub move_speed: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vector::new(0.0, 8.0, 85.0),
            yaw: 0.0,
            pitch: -5.0,
            move_speed: 25.0,
        }
    }
}

impl FlyCamera {
    pub fn new(position: Vector, yaw: f32, pitch: f32, move_speed: f32) -> Self {
        Self { position, yaw, pitch, move_speed }
    }

    /// Derive forward/right/up from yaw and pitch.
    pub fn basis(&self) -> CameraBasis {
        let cy = deg_to_rad(self.yaw);
        let cp = deg_to_rad(self.pitch);
        let forward = Vector::new(cy.sin() * cp.cos(), cp.sin(), -cy.cos() * cp.cos()).normalize();
        let right = forward.cross(WORLD_UP).normalize();
        let up = right.cross(forward).normalize();
        CameraBasis { forward, right, up }
    }

    /// Move the camera according to the held directions.
    ///
    /// The summed direction is renormalized before scaling, so the
    /// displacement is `move_speed * dt` regardless of how many flags
    /// are held, and zero when opposing flags cancel.
    pub fn integrate(&mut self, input: &MoveInput, dt: f32) {
        let basis = self.basis();
        let mut vel = Vector::ZERO;

        if input.forward {
            vel = vel + basis.forward;
        }
        if input.backward {
            vel = vel - basis.forward;
        }
        if input.right {
            vel = vel + basis.right;
        }
        if input.left {
            vel = vel - basis.right;
        }
        if input.up {
            vel = vel + basis.up;
        }
        if input.down {
            vel = vel - basis.up;
        }

        if vel.length_squared() > MIN_VELOCITY_SQ {
            self.position = self.position + vel.normalize() * (self.move_speed * dt);
        }
    }

    pub fn view(&self) -> CameraView {
        let basis = self.basis();
        CameraView {
            eye: self.position,
            target: self.position + basis.forward,
            up: basis.up,
        }
    }
}
