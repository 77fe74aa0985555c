//! Level descriptors handed in by the level loader
//!
//! Field names follow the camelCase keys of the level files, so a loader can
//! deserialize straight into these types. Nothing here touches the filesystem.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::ScoreChannel;

/// Problems that make a level descriptor unusable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not a valid enemy color")]
    UnknownEnemyColor(String),
    #[error("{kind} entity is missing required field '{field}'")]
    MissingField { kind: String, field: &'static str },
    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),
    #[error("hero must be a dynamic entity, got '{0}'")]
    HeroNotDynamic(String),
    #[error("mascot must be a dynamic entity, got '{0}'")]
    MascotNotDynamic(String),
    #[error("finish must be a 'finish' marker, got '{0}'")]
    FinishNotStatic(String),
    #[error("invalid {what}: {value}")]
    InvalidDimension { what: &'static str, value: f32 },
    #[error("failed to encode entity metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Colour tag carried by every enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    /// Scoreboard channel credited when an enemy of this colour is defeated
    pub fn channel(&self) -> ScoreChannel {
        match self {
            EnemyColor::Red => ScoreChannel::Red,
            EnemyColor::Green => ScoreChannel::Green,
            EnemyColor::Blue => ScoreChannel::Blue,
        }
    }
}

impl FromStr for EnemyColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(EnemyColor::Red),
            "green" => Ok(EnemyColor::Green),
            "blue" => Ok(EnemyColor::Blue),
            other => Err(ConfigError::UnknownEnemyColor(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorDescriptor {
    pub height: f32,
    /// Web colour string, passed through to the renderer
    pub color: String,
}

/// One entity as authored in a level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub start_x: f32,
    pub start_y: f32,
    /// Height; also the width unless `width` is given
    pub size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behaviour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_x: Option<f32>,
    #[serde(default)]
    pub floating: bool,
}

impl EntityDescriptor {
    pub fn new(kind: impl Into<String>, start_x: f32, start_y: f32, size: f32) -> Self {
        Self {
            kind: kind.into(),
            start_x,
            start_y,
            size,
            width: None,
            sprite: None,
            color: None,
            behaviour: None,
            velocity_x: None,
            floating: false,
        }
    }

    pub fn enemy(color: &str, start_x: f32, start_y: f32, size: f32) -> Self {
        let mut desc = Self::new("enemy", start_x, start_y, size);
        desc.color = Some(color.to_string());
        desc
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_behaviour(mut self, behaviour: &str) -> Self {
        self.behaviour = Some(behaviour.to_string());
        self
    }

    pub fn with_velocity_x(mut self, velocity_x: f32) -> Self {
        self.velocity_x = Some(velocity_x);
        self
    }

    pub fn width_or_size(&self) -> f32 {
        self.width.unwrap_or(self.size)
    }

    /// Sprite name, defaulting to `<type>.png`
    pub fn sprite_name(&self) -> String {
        self.sprite
            .clone()
            .unwrap_or_else(|| format!("{}.png", self.kind))
    }
}

/// Everything needed to build one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    pub level_width: f32,
    pub level_height: f32,
    pub level_gravity: f32,
    pub floor: FloorDescriptor,
    #[serde(default)]
    pub generic_entities: Vec<EntityDescriptor>,
    pub hero: EntityDescriptor,
    pub max_hero_velocity_x: f32,
    pub finish: EntityDescriptor,
    #[serde(alias = "squarecat")]
    pub mascot: EntityDescriptor,
}
