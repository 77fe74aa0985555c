//! Per-entity motion state and Euler integration

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Motion state of a dynamic entity (value type, copied for snapshots)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: Vec2,
    /// Position before the most recent integration step
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub horizontal_acceleration: f32,
}

impl KinematicState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            previous_position: position,
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Advance by `dt` seconds under vertical `gravity`
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.previous_position = self.position;
        self.velocity.x += self.horizontal_acceleration * dt;
        self.velocity.y += gravity * dt;
        self.position += self.velocity * dt;
    }
}
