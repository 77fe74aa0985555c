//! Ballboy - a bouncing-ball platformer simulation
//!
//! Core modules:
//! - `sim`: Level simulation (kinematics, collisions, behaviours, scoring)
//! - `config`: Level descriptors supplied by the level loader
//! - `save`: In-memory level snapshots
//! - `session`: Level sequence, transitions and checkpoints
//! - `tuning`: Data-driven game feel

pub mod config;
pub mod save;
pub mod session;
pub mod sim;
pub mod tuning;

pub use config::{ConfigError, EnemyColor, EntityDescriptor, FloorDescriptor, LevelDescriptor};
pub use save::LevelSnapshot;
pub use session::{GameSession, SessionError, TickStatus};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Hero horizontal acceleration while a move key is held (pixels/s²)
    pub const HERO_ACCELERATION: f32 = 300.0;
    /// Upward speed the hero leaves a surface with
    pub const HERO_BOUNCE_SPEED: f32 = 300.0;
    pub const HERO_MIN_BOUNCE_SPEED: f32 = 150.0;
    pub const HERO_MAX_BOUNCE_SPEED: f32 = 600.0;
    /// Change per boost/drop command
    pub const HERO_BOUNCE_STEP: f32 = 50.0;

    pub const ENEMY_ACCELERATION: f32 = 120.0;
    pub const ENEMY_MAX_SPEED: f32 = 80.0;

    /// Mascot patrol speed around the hero
    pub const MASCOT_SPEED: f32 = 90.0;
    pub const MASCOT_MARGIN: f32 = 40.0;
}
