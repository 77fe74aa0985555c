//! A single playable level and its per-tick update pipeline
//!
//! Entities are stored in an arena indexed by [`EntityId`]. The hero, finish
//! marker, mascot and enemy roster are ids into that arena, so cloning the
//! level (for snapshots) keeps every cross-reference valid.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::behaviour::HeroView;
use super::collision::CollisionContext;
use super::entity::{ControllableEntity, DynamicEntity, Entity, EntityId};
use super::physics::{self, WorldBounds};
use super::score::{Observer, ScoreChannel, ScoreObserver, Scoreboard};
use crate::config::{ConfigError, EnemyColor};
use crate::save::LevelSnapshot;

/// Level-wide constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDimensions {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub floor_height: f32,
}

/// Mutations requested mid-update, applied once the pipeline has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredJob {
    ResetHero,
}

/// Assembles a level; the hero, finish marker and mascot are mandatory
#[derive(Debug)]
pub struct LevelBuilder {
    dimensions: LevelDimensions,
    floor_color: String,
    frame_dt: f32,
    slots: Vec<Option<Entity>>,
    hero: Option<EntityId>,
    finish: Option<EntityId>,
    mascot: Option<EntityId>,
    enemies: Vec<EntityId>,
}

impl LevelBuilder {
    pub fn new(dimensions: LevelDimensions, floor_color: impl Into<String>, frame_dt: f32) -> Self {
        Self {
            dimensions,
            floor_color: floor_color.into(),
            frame_dt,
            slots: Vec::new(),
            hero: None,
            finish: None,
            mascot: None,
            enemies: Vec::new(),
        }
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(entity));
        id
    }

    /// Add an enemy subscribed to its colour counter and the total
    pub fn spawn_enemy(&mut self, mut entity: Entity, color: EnemyColor) -> EntityId {
        entity.add_observer(color.channel());
        entity.add_observer(ScoreChannel::Total);
        let id = self.spawn(entity);
        self.enemies.push(id);
        id
    }

    pub fn hero(&mut self, hero: ControllableEntity) -> EntityId {
        let id = self.spawn(Entity::Controllable(hero));
        self.hero = Some(id);
        id
    }

    pub fn finish(&mut self, finish: Entity) -> EntityId {
        let id = self.spawn(finish);
        self.finish = Some(id);
        id
    }

    pub fn mascot(&mut self, mascot: DynamicEntity) -> EntityId {
        let id = self.spawn(Entity::Dynamic(mascot));
        self.mascot = Some(id);
        id
    }

    pub fn build(self) -> Result<Level, ConfigError> {
        let missing = |field| ConfigError::MissingField {
            kind: "level".to_string(),
            field,
        };
        let hero = self.hero.ok_or_else(|| missing("hero"))?;
        let finish = self.finish.ok_or_else(|| missing("finish"))?;
        let mascot = self.mascot.ok_or_else(|| missing("mascot"))?;
        let d = self.dimensions;

        Ok(Level {
            slots: self.slots,
            hero,
            finish,
            mascot,
            enemies: self.enemies,
            width: d.width,
            height: d.height,
            gravity: d.gravity,
            floor_height: d.floor_height,
            floor_color: self.floor_color,
            scores: Scoreboard::default(),
            finished: false,
            jobs: VecDeque::new(),
            frame_dt: self.frame_dt,
        })
    }
}

/// One level: its entities, scores and completion state
#[derive(Debug, Clone)]
pub struct Level {
    slots: Vec<Option<Entity>>,
    hero: EntityId,
    finish: EntityId,
    mascot: EntityId,
    enemies: Vec<EntityId>,
    width: f32,
    height: f32,
    gravity: f32,
    floor_height: f32,
    floor_color: String,
    scores: Scoreboard,
    finished: bool,
    jobs: VecDeque<DeferredJob>,
    frame_dt: f32,
}

impl Level {
    // === Queries ===

    /// Live entities in insertion order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (EntityId(i as u32), e)))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn entity_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn hero(&self) -> &ControllableEntity {
        match self.slots.get(self.hero.index()) {
            Some(Some(Entity::Controllable(hero))) => hero,
            _ => unreachable!("hero slot always holds the controllable hero"),
        }
    }

    fn hero_mut(&mut self) -> &mut ControllableEntity {
        match self.slots.get_mut(self.hero.index()) {
            Some(Some(Entity::Controllable(hero))) => hero,
            _ => unreachable!("hero slot always holds the controllable hero"),
        }
    }

    pub fn hero_id(&self) -> EntityId {
        self.hero
    }

    pub fn finish_id(&self) -> EntityId {
        self.finish
    }

    pub fn mascot_id(&self) -> EntityId {
        self.mascot
    }

    /// Enemies still in play
    pub fn enemies(&self) -> &[EntityId] {
        &self.enemies
    }

    pub fn hero_position(&self) -> Vec2 {
        self.hero().body.position()
    }

    pub fn hero_size(&self) -> Vec2 {
        self.hero().body.volume.size()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    pub fn floor_color(&self) -> &str {
        &self.floor_color
    }

    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds {
            width: self.width,
            height: self.height,
            floor_height: self.floor_height,
        }
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn red(&self) -> &ScoreObserver {
        &self.scores.red
    }

    pub fn green(&self) -> &ScoreObserver {
        &self.scores.green
    }

    pub fn blue(&self) -> &ScoreObserver {
        &self.scores.blue
    }

    pub fn total(&self) -> &ScoreObserver {
        &self.scores.total
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_hero(&self, id: EntityId) -> bool {
        id == self.hero
    }

    pub fn is_finish(&self, id: EntityId) -> bool {
        id == self.finish
    }

    pub fn is_mascot(&self, id: EntityId) -> bool {
        id == self.mascot
    }

    pub fn is_enemy(&self, id: EntityId) -> bool {
        self.enemies.contains(&id)
    }

    // === Commands ===

    pub fn move_left(&mut self) -> bool {
        self.hero_mut().move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.hero_mut().move_right()
    }

    pub fn boost_height(&mut self) -> bool {
        self.hero_mut().boost_height()
    }

    pub fn drop_height(&mut self) -> bool {
        self.hero_mut().drop_height()
    }

    /// Send the hero back to its spawn point at the end of the next update
    pub fn reset_hero(&mut self) {
        self.jobs.push_back(DeferredJob::ResetHero);
    }

    pub fn finish(&mut self) {
        if !self.finished {
            log::info!("level finished (total score {})", self.scores.total.value());
        }
        self.finished = true;
    }

    /// Credit an enemy's observers, then take it out of play
    pub fn remove_enemy(&mut self, id: EntityId) -> bool {
        // Only roster ids reach `take`, so the hero slot is never emptied
        let Some(pos) = self.enemies.iter().position(|e| *e == id) else {
            return false;
        };
        self.enemies.remove(pos);
        match self.slots.get_mut(id.index()).and_then(Option::take) {
            Some(enemy) => {
                enemy.notify_observers(&mut self.scores);
                true
            }
            None => false,
        }
    }

    /// Replace the running total counter (carried between levels)
    pub fn adopt_total(&mut self, total: ScoreObserver) {
        self.scores.total = total;
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot::capture(self)
    }

    // === Update pipeline ===

    fn hero_view(&self) -> HeroView {
        let hero = &self.hero().body;
        HeroView {
            position: hero.position(),
            previous_position: hero.kinematics.previous_position,
            width: hero.volume.width,
            height: hero.volume.height,
        }
    }

    fn overlapping(&self, a: EntityId, b: EntityId) -> bool {
        match (self.entity(a), self.entity(b)) {
            (Some(ea), Some(eb)) => ea.collides_with(eb),
            _ => false,
        }
    }

    /// Run `me`'s collision strategy against `other` if both are still live
    fn dispatch_collision(&mut self, me: EntityId, other: EntityId) {
        if self.entity(other).is_none() {
            return;
        }
        let Some(strategy) = self
            .entity(me)
            .and_then(Entity::as_dynamic)
            .map(DynamicEntity::collision_strategy)
        else {
            return;
        };
        strategy.collide_with(me, other, self);
    }

    fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let (i, j) = (a.index(), b.index());
        if i == j || i.max(j) >= self.slots.len() {
            return None;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let (head, tail) = self.slots.split_at_mut(hi);
        let low = head[lo].as_mut()?;
        let high = tail[0].as_mut()?;
        Some(if i < j { (low, high) } else { (high, low) })
    }

    /// Carry the mascot along when the hero jumps
    fn shift_mascot(&mut self, shift: Vec2) {
        let mascot = self.mascot;
        if let Some(body) = self.entity_mut(mascot).and_then(Entity::as_dynamic_mut) {
            body.kinematics.previous_position += shift;
            let position = body.position() + shift;
            body.set_position(position);
        }
    }

    fn run_deferred_jobs(&mut self) {
        let jobs: Vec<DeferredJob> = self.jobs.drain(..).collect();
        for job in jobs {
            match job {
                DeferredJob::ResetHero => {
                    log::debug!("resetting hero to spawn");
                    let before = self.hero_position();
                    self.hero_mut().reset();
                    let shift = self.hero_position() - before;
                    self.shift_mascot(shift);
                }
            }
        }
    }

    /// Advance the level by one frame
    pub fn update(&mut self) {
        let dt = self.frame_dt;
        let (dynamic, fixed): (Vec<EntityId>, Vec<EntityId>) = self
            .entities()
            .map(|(id, e)| (id, e.is_dynamic()))
            .fold((Vec::new(), Vec::new()), |(mut d, mut s), (id, is_dynamic)| {
                if is_dynamic {
                    d.push(id);
                } else {
                    s.push(id);
                }
                (d, s)
            });

        // Integrate; the mascot does not fall
        for &id in &dynamic {
            let gravity = if self.is_mascot(id) { 0.0 } else { self.gravity };
            if let Some(entity) = self.entity_mut(id) {
                entity.integrate(dt, gravity);
            }
        }

        let hero = self.hero_view();
        for &id in &dynamic {
            if let Some(body) = self.entity_mut(id).and_then(Entity::as_dynamic_mut) {
                body.behave(&hero, dt);
            }
        }

        // Dynamic vs dynamic
        for (i, &a) in dynamic.iter().enumerate() {
            for &b in &dynamic[i + 1..] {
                if !self.overlapping(a, b) {
                    continue;
                }
                self.dispatch_collision(a, b);
                self.dispatch_collision(b, a);

                let exempt = |id| self.is_hero(id) || self.is_mascot(id);
                if exempt(a) || exempt(b) {
                    continue;
                }
                if let Some((ea, eb)) = self.pair_mut(a, b) {
                    physics::resolve_dynamic_pair(ea, eb);
                }
            }
        }

        // Dynamic vs static
        for &a in &dynamic {
            if self.is_mascot(a) {
                continue;
            }
            for &s in &fixed {
                if !self.overlapping(a, s) {
                    continue;
                }
                self.dispatch_collision(a, s);
                let Some(surface) = self.entity(s).map(|e| *e.volume()) else {
                    continue;
                };
                if let Some(entity) = self.entity_mut(a) {
                    physics::resolve_dynamic_static(entity, &surface);
                }
            }
        }

        let bounds = self.bounds();
        for &id in &dynamic {
            if self.is_mascot(id) {
                continue;
            }
            if let Some(entity) = self.entity_mut(id) {
                physics::enforce_world_limits(entity, &bounds);
            }
        }

        self.run_deferred_jobs();
    }
}

impl CollisionContext for Level {
    fn is_hero(&self, id: EntityId) -> bool {
        Level::is_hero(self, id)
    }

    fn is_finish(&self, id: EntityId) -> bool {
        Level::is_finish(self, id)
    }

    fn is_mascot(&self, id: EntityId) -> bool {
        Level::is_mascot(self, id)
    }

    fn is_enemy(&self, id: EntityId) -> bool {
        Level::is_enemy(self, id)
    }

    fn remove_enemy(&mut self, id: EntityId) -> bool {
        Level::remove_enemy(self, id)
    }

    fn reset_hero(&mut self) {
        Level::reset_hero(self)
    }

    fn finish(&mut self) {
        Level::finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EntityDescriptor, LevelDescriptor};
    use crate::sim::behaviour::Passive;
    use crate::sim::collision::{CollisionStrategy, NoReaction};
    use crate::sim::entity::{AssetHandle, HeroControl, Layer, StaticEntity};
    use crate::sim::fixtures::{build, scenario_descriptor};
    use crate::sim::geometry::BoundingBox;
    use crate::sim::kinematics::KinematicState;
    use std::cell::Cell;
    use std::rc::Rc;

    fn place(level: &mut Level, id: EntityId, position: Vec2) {
        let body = level.entity_mut(id).and_then(Entity::as_dynamic_mut).unwrap();
        body.kinematics.previous_position = position;
        body.set_position(position);
        body.set_velocity(Vec2::ZERO);
    }

    fn first_enemy(level: &Level) -> EntityId {
        level.enemies()[0]
    }

    #[test]
    fn test_mascot_defeats_red_enemy() {
        let mut level = build(&scenario_descriptor());
        let enemy = first_enemy(&level);
        let count = level.entity_count();
        let enemy_pos = level.entity(enemy).unwrap().position();

        let mascot = level.mascot_id();
        place(&mut level, mascot, enemy_pos);
        // Keep the mascot on the enemy through the orbit re-anchoring
        let hero = level.hero_id();
        let hero_pos = level.hero_position();
        place(&mut level, hero, hero_pos);
        level.update();

        assert_eq!(level.red().value(), 1);
        assert_eq!(level.total().value(), 1);
        assert_eq!(level.green().value(), 0);
        assert_eq!(level.blue().value(), 0);
        assert!(level.entity(enemy).is_none());
        assert!(!level.is_enemy(enemy));
        assert_eq!(level.entity_count(), count - 1);
        assert!(level.entities().all(|(id, _)| id != enemy));
    }

    #[test]
    fn test_remove_enemy_only_once() {
        let mut level = build(&scenario_descriptor());
        let enemy = first_enemy(&level);
        assert!(level.remove_enemy(enemy));
        assert!(!level.remove_enemy(enemy));
        assert_eq!(level.total().value(), 1);
        // Non-enemies are never removed
        assert!(!level.remove_enemy(level.hero_id()));
        assert!(level.entity(level.hero_id()).is_some());
    }

    #[test]
    fn test_hero_reset_is_deferred() {
        let mut desc = scenario_descriptor();
        desc.hero = EntityDescriptor::new("hero", 100.0, 100.0, 20.0);
        desc.generic_entities = vec![EntityDescriptor::enemy("green", 105.0, 105.0, 20.0)];
        let mut level = build(&desc);
        let spawn = level.hero().spawn_position();

        let hero = level.hero_id();
        place(&mut level, hero, Vec2::new(300.0, 300.0));
        let enemy = first_enemy(&level);
        place(&mut level, enemy, Vec2::new(305.0, 305.0));

        level.reset_hero();
        assert_eq!(level.pending_jobs(), 1);
        // Nothing happens until the update pipeline drains the queue
        assert_eq!(level.hero_position(), Vec2::new(300.0, 300.0));

        level.update();
        assert_eq!(level.pending_jobs(), 0);
        assert_eq!(level.hero_position(), spawn);
    }

    #[test]
    fn test_mascot_follows_hero_reset() {
        let mut level = build(&scenario_descriptor());
        let hero = level.hero_id();
        let mascot = level.mascot_id();
        place(&mut level, hero, Vec2::new(800.0, 500.0));
        place(&mut level, mascot, Vec2::new(780.0, 440.0));

        level.reset_hero();
        for _ in 0..4 {
            level.update();
        }

        assert_eq!(level.hero().spawn_position(), Vec2::new(0.0, 500.0));
        let gap = level.entity(mascot).unwrap().position() - level.hero_position();
        // Still inside the patrol ring around the hero
        assert!(gap.length() < 100.0, "mascot drifted {gap:?} from the hero");
    }

    #[derive(Debug, Default)]
    struct CountingCollision {
        hits: Cell<u32>,
    }

    impl CollisionStrategy for CountingCollision {
        fn collide_with(&self, _me: EntityId, _other: EntityId, _level: &mut dyn CollisionContext) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    fn counted(position: Vec2, counter: &Rc<CountingCollision>) -> DynamicEntity {
        DynamicEntity::new(
            KinematicState::at(position),
            Vec2::splat(20.0),
            AssetHandle::new("counted"),
            Layer::Foreground,
            Rc::new(Passive),
            counter.clone(),
        )
    }

    /// Gravity-free level with a counted hero at `hero_at` and counted bodies at `others`
    fn counting_level(
        hero_at: Vec2,
        others: &[Vec2],
    ) -> (Level, Rc<CountingCollision>, Vec<Rc<CountingCollision>>) {
        let dims = LevelDimensions {
            width: 1000.0,
            height: 600.0,
            gravity: 0.0,
            floor_height: 550.0,
        };
        let mut builder = LevelBuilder::new(dims, "#000", 1.0 / 60.0);

        let counters: Vec<Rc<CountingCollision>> =
            others.iter().map(|_| Rc::new(CountingCollision::default())).collect();
        for (&at, counter) in others.iter().zip(&counters) {
            builder.spawn(Entity::Dynamic(counted(at, counter)));
        }

        let hero_counter = Rc::new(CountingCollision::default());
        let control = HeroControl {
            max_velocity_x: 120.0,
            acceleration: 300.0,
            bounce_speed: 300.0,
            min_bounce_speed: 150.0,
            max_bounce_speed: 600.0,
            bounce_step: 50.0,
        };
        builder.hero(ControllableEntity::new(counted(hero_at, &hero_counter), control, 550.0));

        let finish = BoundingBox::new(Vec2::new(950.0, 500.0), 40.0, 40.0);
        builder.finish(Entity::Static(StaticEntity::new(finish, AssetHandle::new("finish"), Layer::Foreground)));
        let still = DynamicEntity::new(
            KinematicState::at(Vec2::new(30.0, 100.0)),
            Vec2::splat(15.0),
            AssetHandle::new("squarecat"),
            Layer::Foreground,
            Rc::new(Passive),
            Rc::new(NoReaction),
        );
        builder.mascot(still);

        (builder.build().unwrap(), hero_counter, counters)
    }

    #[test]
    fn test_overlap_runs_each_strategy_once() {
        let (mut level, hero, counters) =
            counting_level(Vec2::new(600.0, 300.0), &[Vec2::new(200.0, 200.0), Vec2::new(210.0, 205.0)]);
        level.update();
        assert_eq!(counters[0].hits.get(), 1);
        assert_eq!(counters[1].hits.get(), 1);
        assert_eq!(hero.hits.get(), 0);
    }

    #[test]
    fn test_hero_overlap_runs_both_strategies_once() {
        let (mut level, hero, counters) = counting_level(Vec2::new(400.0, 300.0), &[Vec2::new(405.0, 305.0)]);
        level.update();
        assert_eq!(hero.hits.get(), 1);
        assert_eq!(counters[0].hits.get(), 1);

        // Still overlapping next frame: one more each, not two
        level.update();
        assert_eq!(hero.hits.get(), 2);
        assert_eq!(counters[0].hits.get(), 2);
    }

    #[test]
    fn test_enemy_contact_resets_hero() {
        let mut desc = scenario_descriptor();
        desc.level_gravity = 0.0;
        desc.generic_entities = vec![EntityDescriptor::enemy("blue", 400.0, 300.0, 20.0)];
        let mut level = build(&desc);
        let spawn = level.hero().spawn_position();

        let hero = level.hero_id();
        place(&mut level, hero, Vec2::new(395.0, 295.0));
        level.update();

        assert_eq!(level.hero_position(), spawn);
        assert_eq!(level.hero().body.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_touching_finish_ends_level() {
        let mut level = build(&scenario_descriptor());
        assert!(!level.is_finished());
        let finish_pos = level.entity(level.finish_id()).unwrap().position();
        let hero = level.hero_id();
        place(&mut level, hero, finish_pos + Vec2::new(1.0, 1.0));
        level.update();
        assert!(level.is_finished());
        // Terminal
        level.update();
        assert!(level.is_finished());
    }

    #[test]
    fn test_move_left_never_leaves_playfield() {
        let mut desc = scenario_descriptor();
        desc.hero = EntityDescriptor::new("hero", 50.0, 500.0, 20.0);
        let mut level = build(&desc);
        for _ in 0..600 {
            level.move_left();
            level.update();
            assert!(level.hero_position().x >= 0.0);
        }
        assert_eq!(level.hero_position().x, 0.0);
    }

    #[test]
    fn test_mascot_is_exempt_from_physics() {
        let mut desc = scenario_descriptor();
        desc.level_gravity = 0.0;
        desc.generic_entities =
            vec![EntityDescriptor::new("platform", 600.0, 100.0, 200.0).with_width(200.0)];
        let mut level = build(&desc);
        let mascot = level.mascot_id();

        // Embedded in a platform: left where it is
        place(&mut level, mascot, Vec2::new(650.0, 150.0));
        level.update();
        assert_eq!(level.entity(mascot).unwrap().position(), Vec2::new(650.0, 150.0));

        // Outside the playfield: not clamped
        place(&mut level, mascot, Vec2::new(-10.0, 150.0));
        level.update();
        assert_eq!(level.entity(mascot).unwrap().position().x, -10.0);
    }

    #[test]
    fn test_enemies_on_the_floor_come_to_rest() {
        let mut desc = scenario_descriptor();
        desc.generic_entities = vec![EntityDescriptor::enemy("red", 500.0, 100.0, 20.0)];
        let mut level = build(&desc);
        let enemy = first_enemy(&level);
        for _ in 0..2000 {
            level.update();
        }
        let e = level.entity(enemy).unwrap();
        assert!((e.volume().bottom() - level.floor_height()).abs() < 1e-3);
    }

    #[test]
    fn test_colliding_enemies_are_separated() {
        let mut desc = scenario_descriptor();
        desc.level_gravity = 0.0;
        desc.generic_entities = vec![
            EntityDescriptor::enemy("red", 200.0, 200.0, 20.0),
            EntityDescriptor::enemy("green", 215.0, 202.0, 20.0),
        ];
        let mut level = build(&desc);
        level.update();
        let a = level.entity(level.enemies()[0]).unwrap();
        let b = level.entity(level.enemies()[1]).unwrap();
        assert!(!a.collides_with(b));
    }

    #[test]
    fn test_bounding_boxes_track_positions_after_update() {
        let mut level = build(&scenario_descriptor());
        for _ in 0..30 {
            level.move_right();
            level.update();
            for (_, e) in level.entities() {
                if let Some(d) = e.as_dynamic() {
                    assert_eq!(d.volume.top_left, d.kinematics.position);
                }
            }
        }
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut level = build(&scenario_descriptor());
        level.update();
        let snapshot = level.snapshot();
        let restored = snapshot.restore();

        assert_eq!(restored.entity_count(), level.entity_count());
        assert_eq!(restored.hero_position(), level.hero_position());
        assert_eq!(restored.scores(), level.scores());
        assert_eq!(restored.is_finished(), level.is_finished());
        for ((ia, a), (ib, b)) in level.entities().zip(restored.entities()) {
            assert_eq!(ia, ib);
            assert_eq!(a.position(), b.position());
        }

        // Mutating the live level leaves the copy alone
        let enemy = first_enemy(&level);
        level.remove_enemy(enemy);
        for _ in 0..10 {
            level.move_right();
            level.update();
        }
        assert!(restored.entity(enemy).is_some());
        assert_eq!(restored.total().value(), 0);
        assert_ne!(restored.hero_position(), level.hero_position());

        // And the other way round
        let mut restored = restored;
        restored.finish();
        assert!(!level.is_finished());
        assert!(!snapshot.restore().is_finished());
    }

    #[test]
    fn test_snapshot_keeps_distinguished_references() {
        let level = build(&scenario_descriptor());
        let copy = level.snapshot().restore();
        assert_eq!(copy.hero_id(), level.hero_id());
        assert_eq!(copy.finish_id(), level.finish_id());
        assert_eq!(copy.mascot_id(), level.mascot_id());
        assert_eq!(copy.enemies(), level.enemies());
        assert!(matches!(copy.entity(copy.hero_id()), Some(Entity::Controllable(_))));
    }

    #[test]
    fn test_builder_requires_hero() {
        let desc: LevelDescriptor = scenario_descriptor();
        let dims = LevelDimensions {
            width: desc.level_width,
            height: desc.level_height,
            gravity: desc.level_gravity,
            floor_height: desc.floor.height,
        };
        let err = LevelBuilder::new(dims, "#000", 0.1).build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field: "hero", .. }));
    }
}
