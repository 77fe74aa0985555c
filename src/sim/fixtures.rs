//! Shared level descriptors for unit tests

use crate::config::{EntityDescriptor, FloorDescriptor, LevelDescriptor};
use crate::sim::{Level, LevelFactory};
use crate::tuning::Tuning;

/// 1000x600 level, gravity 9.8, one red enemy at (100, 100), hero at (0, 500)
pub fn scenario_descriptor() -> LevelDescriptor {
    LevelDescriptor {
        level_width: 1000.0,
        level_height: 600.0,
        level_gravity: 9.8,
        floor: FloorDescriptor {
            height: 550.0,
            color: "#228B22".to_string(),
        },
        generic_entities: vec![EntityDescriptor::enemy("red", 100.0, 100.0, 20.0)],
        hero: EntityDescriptor::new("hero", 0.0, 500.0, 20.0),
        max_hero_velocity_x: 120.0,
        finish: EntityDescriptor::new("finish", 950.0, 500.0, 40.0),
        mascot: EntityDescriptor::new("squarecat", 30.0, 440.0, 15.0),
    }
}

pub fn build(desc: &LevelDescriptor) -> Level {
    LevelFactory::new(&Tuning::default())
        .build(desc)
        .expect("fixture descriptor is valid")
}
