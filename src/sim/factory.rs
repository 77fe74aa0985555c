//! Builds levels from descriptors
//!
//! Every descriptor is validated here; a level either comes out whole or the
//! caller gets a [`ConfigError`] and must abandon it.

use std::rc::Rc;

use glam::Vec2;
use serde_json::{Map, Value};

use super::behaviour::{Aggressive, BehaviourStrategy, Orbit, Passive, Scared};
use super::collision::{CollisionStrategy, EnemyCollision, HeroCollision, MascotCollision, NoReaction};
use super::entity::{AssetHandle, ControllableEntity, DynamicEntity, Entity, HeroControl, Layer, StaticEntity};
use super::geometry::BoundingBox;
use super::kinematics::KinematicState;
use super::level::{Level, LevelBuilder, LevelDimensions};
use crate::config::{ConfigError, EnemyColor, EntityDescriptor, LevelDescriptor};
use crate::tuning::Tuning;

/// Scenery kinds that never move
const STATIC_KINDS: &[&str] = &["platform", "tree", "block"];
const FINISH_KIND: &str = "finish";

fn is_static_kind(kind: &str) -> bool {
    kind == FINISH_KIND || STATIC_KINDS.contains(&kind)
}

fn check(what: &'static str, value: f32, positive: bool) -> Result<f32, ConfigError> {
    if !value.is_finite() || (positive && value <= 0.0) {
        return Err(ConfigError::InvalidDimension { what, value });
    }
    Ok(value)
}

fn metadata(desc: &EntityDescriptor) -> Result<Map<String, Value>, ConfigError> {
    match serde_json::to_value(desc)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

pub struct LevelFactory<'a> {
    tuning: &'a Tuning,
}

impl<'a> LevelFactory<'a> {
    pub fn new(tuning: &'a Tuning) -> Self {
        Self { tuning }
    }

    pub fn build(&self, desc: &LevelDescriptor) -> Result<Level, ConfigError> {
        let dimensions = LevelDimensions {
            width: check("level width", desc.level_width, true)?,
            height: check("level height", desc.level_height, true)?,
            gravity: check("level gravity", desc.level_gravity, false)?,
            floor_height: check("floor height", desc.floor.height, false)?,
        };
        let mut builder = LevelBuilder::new(dimensions, desc.floor.color.clone(), self.tuning.frame_dt);

        for entity in &desc.generic_entities {
            match entity.kind.as_str() {
                "enemy" => {
                    let color = entity
                        .color
                        .as_deref()
                        .ok_or_else(|| ConfigError::MissingField {
                            kind: entity.kind.clone(),
                            field: "color",
                        })?
                        .parse::<EnemyColor>()?;
                    let enemy = self.enemy(entity)?;
                    builder.spawn_enemy(Entity::Dynamic(enemy), color);
                }
                "cloud" => {
                    let cloud = self.cloud(entity)?;
                    builder.spawn(Entity::Dynamic(cloud));
                }
                kind if STATIC_KINDS.contains(&kind) => {
                    let scenery = self.scenery(entity, Layer::Foreground)?;
                    builder.spawn(Entity::Static(scenery));
                }
                other => return Err(ConfigError::UnknownEntityType(other.to_string())),
            }
        }

        let hero = self.hero(&desc.hero, desc)?;
        builder.hero(hero);

        let finish = self.finish(&desc.finish)?;
        builder.finish(Entity::Static(finish));

        let mascot = self.mascot(&desc.mascot)?;
        builder.mascot(mascot);

        let level = builder.build()?;
        log::info!(
            "built level {}x{} with {} entities ({} enemies)",
            desc.level_width,
            desc.level_height,
            level.entity_count(),
            level.enemies().len()
        );
        Ok(level)
    }

    fn body(
        &self,
        desc: &EntityDescriptor,
        layer: Layer,
        behaviour: Rc<dyn BehaviourStrategy>,
        collision: Rc<dyn CollisionStrategy>,
    ) -> Result<DynamicEntity, ConfigError> {
        let size = Vec2::new(
            check("entity width", desc.width_or_size(), true)?,
            check("entity size", desc.size, true)?,
        );
        let start = Vec2::new(
            check("start x", desc.start_x, false)?,
            check("start y", desc.start_y, false)?,
        );
        let velocity = Vec2::new(desc.velocity_x.unwrap_or(0.0), 0.0);
        let body = DynamicEntity::new(
            KinematicState::at(start).with_velocity(velocity),
            size,
            AssetHandle::new(desc.sprite_name()),
            layer,
            behaviour,
            collision,
        )
        .with_config(metadata(desc)?)
        .floating(desc.floating);
        Ok(body)
    }

    fn scenery(&self, desc: &EntityDescriptor, layer: Layer) -> Result<StaticEntity, ConfigError> {
        let volume = BoundingBox::new(
            Vec2::new(check("start x", desc.start_x, false)?, check("start y", desc.start_y, false)?),
            check("entity width", desc.width_or_size(), true)?,
            check("entity size", desc.size, true)?,
        );
        Ok(StaticEntity::new(volume, AssetHandle::new(desc.sprite_name()), layer))
    }

    fn enemy(&self, desc: &EntityDescriptor) -> Result<DynamicEntity, ConfigError> {
        let t = self.tuning;
        let behaviour: Rc<dyn BehaviourStrategy> = match desc.behaviour.as_deref() {
            Some("aggressive") => Rc::new(Aggressive {
                acceleration: t.enemy_acceleration,
                max_speed: t.enemy_max_speed,
            }),
            Some("scared") => Rc::new(Scared {
                acceleration: t.enemy_acceleration,
                max_speed: t.enemy_max_speed,
            }),
            Some("passive") | None => Rc::new(Passive),
            Some(other) => {
                log::warn!("unknown enemy behaviour '{}', using passive", other);
                Rc::new(Passive)
            }
        };
        self.body(desc, Layer::Foreground, behaviour, Rc::new(EnemyCollision))
    }

    fn cloud(&self, desc: &EntityDescriptor) -> Result<DynamicEntity, ConfigError> {
        Ok(self
            .body(desc, Layer::Background, Rc::new(Passive), Rc::new(NoReaction))?
            .floating(true))
    }

    fn hero(&self, desc: &EntityDescriptor, level: &LevelDescriptor) -> Result<ControllableEntity, ConfigError> {
        match desc.kind.as_str() {
            "hero" | "ballboy" => {}
            kind if is_static_kind(kind) => {
                return Err(ConfigError::HeroNotDynamic(kind.to_string()));
            }
            other => return Err(ConfigError::UnknownEntityType(other.to_string())),
        }
        let t = self.tuning;
        let control = HeroControl {
            max_velocity_x: check("max hero velocity", level.max_hero_velocity_x, true)?,
            acceleration: t.hero_acceleration,
            bounce_speed: t.hero_bounce_speed,
            min_bounce_speed: t.hero_min_bounce_speed,
            max_bounce_speed: t.hero_max_bounce_speed,
            bounce_step: t.hero_bounce_step,
        };
        let body = self.body(desc, Layer::Foreground, Rc::new(Passive), Rc::new(HeroCollision))?;
        Ok(ControllableEntity::new(body, control, level.floor.height))
    }

    /// Exactly one finish marker per level, so the kind is not allowed elsewhere
    fn finish(&self, desc: &EntityDescriptor) -> Result<StaticEntity, ConfigError> {
        if desc.kind != FINISH_KIND {
            return Err(ConfigError::FinishNotStatic(desc.kind.clone()));
        }
        self.scenery(desc, Layer::Foreground)
    }

    fn mascot(&self, desc: &EntityDescriptor) -> Result<DynamicEntity, ConfigError> {
        match desc.kind.as_str() {
            "squarecat" | "mascot" => {}
            kind if is_static_kind(kind) => {
                return Err(ConfigError::MascotNotDynamic(kind.to_string()));
            }
            other => return Err(ConfigError::UnknownEntityType(other.to_string())),
        }
        let orbit = Orbit {
            speed: self.tuning.mascot_speed,
            margin: self.tuning.mascot_margin,
        };
        Ok(self
            .body(desc, Layer::Foreground, Rc::new(orbit), Rc::new(MascotCollision))?
            .floating(true))
    }
}
