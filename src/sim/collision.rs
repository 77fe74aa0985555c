//! Gameplay reactions to overlaps
//!
//! These never move anything; positional correction belongs to
//! [`super::physics`]. A strategy receives the level through the narrow
//! [`CollisionContext`] capability instead of holding a reference to it.

use std::fmt;

use super::entity::EntityId;

/// What a collision strategy may ask of the level it runs in
pub trait CollisionContext {
    fn is_hero(&self, id: EntityId) -> bool;
    fn is_finish(&self, id: EntityId) -> bool;
    fn is_mascot(&self, id: EntityId) -> bool;
    fn is_enemy(&self, id: EntityId) -> bool;
    /// Score and detach an enemy; returns false if `id` is not a live enemy
    fn remove_enemy(&mut self, id: EntityId) -> bool;
    /// Queue a hero reset for the end of the current update
    fn reset_hero(&mut self);
    fn finish(&mut self);
}

pub trait CollisionStrategy: fmt::Debug {
    fn collide_with(&self, me: EntityId, other: EntityId, level: &mut dyn CollisionContext);
}

/// No gameplay consequence (clouds, scenery that moves)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReaction;

impl CollisionStrategy for NoReaction {
    fn collide_with(&self, _me: EntityId, _other: EntityId, _level: &mut dyn CollisionContext) {}
}

/// Enemies send the hero back to its spawn point on contact
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyCollision;

impl CollisionStrategy for EnemyCollision {
    fn collide_with(&self, _me: EntityId, other: EntityId, level: &mut dyn CollisionContext) {
        if level.is_hero(other) {
            level.reset_hero();
        }
    }
}

/// The hero ends the level by reaching the finish marker
#[derive(Debug, Clone, Copy, Default)]
pub struct HeroCollision;

impl CollisionStrategy for HeroCollision {
    fn collide_with(&self, _me: EntityId, other: EntityId, level: &mut dyn CollisionContext) {
        if level.is_finish(other) {
            level.finish();
        }
    }
}

/// The mascot defeats any enemy it touches
#[derive(Debug, Clone, Copy, Default)]
pub struct MascotCollision;

impl CollisionStrategy for MascotCollision {
    fn collide_with(&self, me: EntityId, other: EntityId, level: &mut dyn CollisionContext) {
        if level.is_enemy(other) && level.remove_enemy(other) {
            log::debug!("mascot {} removed enemy {}", me, other);
        }
    }
}
