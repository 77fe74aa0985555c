//! Ballboy headless driver
//!
//! Runs a scripted session against two built-in levels and reports the
//! outcome. Rendering and keyboard input live in the GUI front end.

use ballboy_sim::config::{EntityDescriptor, FloorDescriptor, LevelDescriptor};
use ballboy_sim::sim::Observer;
use ballboy_sim::{GameSession, TickStatus, Tuning};

/// Ticks to run before giving up (one minute at 60 Hz)
const MAX_TICKS: u32 = 60 * 60;
const CHECKPOINT_TICK: u32 = 120;
const RESTORE_TICK: u32 = 300;

fn demo_level(width: f32, enemies: Vec<EntityDescriptor>) -> LevelDescriptor {
    let mut generic = vec![
        EntityDescriptor::new("cloud", 120.0, 40.0, 30.0)
            .with_width(60.0)
            .with_velocity_x(10.0),
        EntityDescriptor::new("platform", 300.0, 420.0, 16.0).with_width(160.0),
        EntityDescriptor::new("tree", 600.0, 470.0, 80.0).with_width(30.0),
    ];
    generic.extend(enemies);
    LevelDescriptor {
        level_width: width,
        level_height: 600.0,
        level_gravity: 300.0,
        floor: FloorDescriptor {
            height: 550.0,
            color: "#228B22".to_string(),
        },
        generic_entities: generic,
        hero: EntityDescriptor::new("hero", 20.0, 480.0, 24.0),
        max_hero_velocity_x: 120.0,
        finish: EntityDescriptor::new("finish", width - 60.0, 490.0, 60.0).with_width(20.0),
        mascot: EntityDescriptor::new("squarecat", 0.0, 420.0, 16.0),
    }
}

fn main() {
    env_logger::init();
    log::info!("Ballboy (headless) starting...");

    let levels = vec![
        demo_level(
            900.0,
            vec![
                EntityDescriptor::enemy("red", 200.0, 300.0, 20.0).with_behaviour("aggressive"),
                EntityDescriptor::enemy("green", 500.0, 300.0, 20.0).with_behaviour("scared"),
            ],
        ),
        demo_level(
            1200.0,
            vec![
                EntityDescriptor::enemy("blue", 400.0, 200.0, 20.0),
                EntityDescriptor::enemy("red", 800.0, 200.0, 20.0).with_behaviour("aggressive"),
            ],
        ),
    ];

    let mut session = match GameSession::from_descriptors(&levels, &Tuning::default()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("failed to start session: {}", e);
            std::process::exit(1);
        }
    };

    let mut ticks = 0;
    while ticks < MAX_TICKS {
        session.move_right();
        if ticks % 90 == 0 {
            session.boost_height();
        }
        match ticks {
            CHECKPOINT_TICK => session.save_checkpoint(),
            RESTORE_TICK => {
                session.restore_checkpoint();
            }
            _ => {}
        }

        match session.tick() {
            TickStatus::SessionFinished => break,
            TickStatus::LevelAdvanced { index } => {
                log::info!("reached level {} after {} ticks", index + 1, ticks);
            }
            TickStatus::Running => {}
        }
        ticks += 1;
    }

    let level = session.current_level();
    println!(
        "level {}/{} | ticks {} | total {} (red {}, green {}, blue {}) | finished: {}",
        session.current_index() + 1,
        session.level_count(),
        ticks,
        session.total_score(),
        level.red().value(),
        level.green().value(),
        level.blue().value(),
        session.is_finished(),
    );
}
