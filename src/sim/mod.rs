//! Platformer simulation core
//!
//! Everything that changes during play lives here:
//! - Fixed frame step only
//! - Stable iteration order (by entity id)
//! - No rendering, input or file I/O

pub mod behaviour;
pub mod collision;
pub mod entity;
pub mod factory;
pub mod geometry;
pub mod kinematics;
pub mod level;
pub mod physics;
pub mod score;

#[cfg(test)]
pub(crate) mod fixtures;

pub use behaviour::{Aggressive, BehaviourStrategy, HeroView, Orbit, Passive, Scared};
pub use collision::{
    CollisionContext, CollisionStrategy, EnemyCollision, HeroCollision, MascotCollision, NoReaction,
};
pub use entity::{
    AssetHandle, ControllableEntity, DynamicEntity, Entity, EntityId, HeroControl, Layer, StaticEntity,
};
pub use factory::LevelFactory;
pub use geometry::{BoundingBox, HalfPlane};
pub use kinematics::KinematicState;
pub use level::{DeferredJob, Level, LevelBuilder, LevelDimensions};
pub use physics::{WorldBounds, enforce_world_limits, resolve_dynamic_pair, resolve_dynamic_static};
pub use score::{Observer, ScoreChannel, ScoreObserver, Scoreboard};
