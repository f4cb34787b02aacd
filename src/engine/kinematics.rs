// Per-entity motion: position, speed/angle velocity and a gravity vector

use glam::Vec2;

use crate::core::math::motion_vector;

/// Position and motion state carried by every simulated entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// World position
    pub position: Vec2,
    /// Velocity in units/second
    pub velocity: Vec2,
    /// Constant acceleration applied every tick
    pub gravity: Vec2,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

impl Kinematics {
    /// Create a body at rest at the given position
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            gravity: Vec2::ZERO,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    /// Set velocity from a speed and heading in degrees
    pub fn set_motion(&mut self, speed: f32, angle_degrees: f32) {
        self.velocity = motion_vector(speed, angle_degrees);
    }

    /// Set gravity from a magnitude and heading in degrees
    pub fn set_gravity(&mut self, magnitude: f32, angle_degrees: f32) {
        self.gravity = motion_vector(magnitude, angle_degrees);
    }

    /// Stop all motion (gravity is kept)
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    /// Advance the body by one tick: gravity first, then velocity
    pub fn integrate(&mut self, dt: f32) {
        self.velocity += self.gravity * dt;
        self.position += self.velocity * dt;
    }
}
