//! Gameplay tuning shared by every level of a session
//!
//! Level files describe layout; these values describe feel.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds advanced per `update()`
    pub frame_dt: f32,

    // === Hero ===
    pub hero_acceleration: f32,
    pub hero_bounce_speed: f32,
    pub hero_min_bounce_speed: f32,
    pub hero_max_bounce_speed: f32,
    pub hero_bounce_step: f32,

    // === Enemies ===
    pub enemy_acceleration: f32,
    pub enemy_max_speed: f32,

    // === Mascot ===
    pub mascot_speed: f32,
    /// Gap between the hero's box and the mascot's patrol square
    pub mascot_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_dt: SIM_DT,

            hero_acceleration: HERO_ACCELERATION,
            hero_bounce_speed: HERO_BOUNCE_SPEED,
            hero_min_bounce_speed: HERO_MIN_BOUNCE_SPEED,
            hero_max_bounce_speed: HERO_MAX_BOUNCE_SPEED,
            hero_bounce_step: HERO_BOUNCE_STEP,

            enemy_acceleration: ENEMY_ACCELERATION,
            enemy_max_speed: ENEMY_MAX_SPEED,

            mascot_speed: MASCOT_SPEED,
            mascot_margin: MASCOT_MARGIN,
        }
    }
}
