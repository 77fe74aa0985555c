//! Autonomous motion policies for dynamic entities
//!
//! A behaviour runs once per tick, after every dynamic entity has been
//! integrated and before collisions are resolved. It may overwrite the
//! entity's position and velocity freely.

use std::fmt;

use glam::Vec2;

use super::entity::DynamicEntity;
use super::geometry::HalfPlane;

/// Read-only capture of the hero taken between integration and behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroView {
    pub position: Vec2,
    pub previous_position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl HeroView {
    pub fn centre(&self) -> Vec2 {
        self.position + Vec2::new(self.width, self.height) * 0.5
    }
}

pub trait BehaviourStrategy: fmt::Debug {
    fn behave(&self, entity: &mut DynamicEntity, hero: &HeroView, dt: f32);
}

/// Does nothing; the entity just follows its kinematics
#[derive(Debug, Clone, Copy, Default)]
pub struct Passive;

impl BehaviourStrategy for Passive {
    fn behave(&self, _entity: &mut DynamicEntity, _hero: &HeroView, _dt: f32) {}
}

/// Sign of the horizontal direction from the entity towards the hero
fn direction_to_hero(entity: &DynamicEntity, hero: &HeroView) -> f32 {
    let dx = hero.centre().x - entity.volume.centre().x;
    if dx > 0.0 {
        1.0
    } else if dx < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn chase(entity: &mut DynamicEntity, direction: f32, acceleration: f32, max_speed: f32) {
    let k = &mut entity.kinematics;
    k.horizontal_acceleration = direction * acceleration;
    k.velocity.x = k.velocity.x.clamp(-max_speed, max_speed);
}

/// Accelerates horizontally towards the hero up to a speed cap
#[derive(Debug, Clone, Copy)]
pub struct Aggressive {
    pub acceleration: f32,
    pub max_speed: f32,
}

impl BehaviourStrategy for Aggressive {
    fn behave(&self, entity: &mut DynamicEntity, hero: &HeroView, _dt: f32) {
        let dir = direction_to_hero(entity, hero);
        chase(entity, dir, self.acceleration, self.max_speed);
    }
}

/// Accelerates horizontally away from the hero up to a speed cap
#[derive(Debug, Clone, Copy)]
pub struct Scared {
    pub acceleration: f32,
    pub max_speed: f32,
}

impl BehaviourStrategy for Scared {
    fn behave(&self, entity: &mut DynamicEntity, hero: &HeroView, _dt: f32) {
        let dir = -direction_to_hero(entity, hero);
        chase(entity, dir, self.acceleration, self.max_speed);
    }
}

/// Rides along with the hero while patrolling a square around it
///
/// The square is the hero's box grown by the same `margin` on every side,
/// so the ring is symmetric about the hero (no wider left edge). Edges are
/// tested in a fixed order (top, right, bottom, left) and the first match
/// picks the velocity; inside the ring nothing changes.
#[derive(Debug, Clone, Copy)]
pub struct Orbit {
    pub speed: f32,
    pub margin: f32,
}

impl Orbit {
    pub fn patrol_velocity(&self, position: Vec2, hero: &HeroView) -> Option<Vec2> {
        let left = hero.position.x - self.margin;
        let right = hero.position.x + hero.width + self.margin;
        let top = hero.position.y - self.margin;
        let bottom = hero.position.y + hero.height + self.margin;

        if position.is_above(top) && position.is_left_of(right) {
            Some(Vec2::new(self.speed, 0.0))
        } else if !position.is_left_of(right) && position.is_above(bottom) {
            Some(Vec2::new(0.0, self.speed))
        } else if !position.is_above(bottom) && position.is_right_of(left) {
            Some(Vec2::new(-self.speed, 0.0))
        } else if !position.is_right_of(left) && position.is_below(top) {
            Some(Vec2::new(0.0, -self.speed))
        } else {
            None
        }
    }
}

impl BehaviourStrategy for Orbit {
    fn behave(&self, entity: &mut DynamicEntity, hero: &HeroView, _dt: f32) {
        // Offset from the hero before this tick, plus the entity's own step
        let offset = entity.kinematics.position - hero.previous_position;
        entity.set_position(hero.position + offset);

        if let Some(velocity) = self.patrol_velocity(entity.position(), hero) {
            entity.set_velocity(velocity);
        }
    }
}
