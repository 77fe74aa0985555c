//! Entity model: static scenery, dynamic bodies and the controllable hero
//!
//! Entities live in a level-owned arena and are addressed by [`EntityId`].
//! Behaviour and collision strategies are stateless, so they are shared
//! through `Rc` between a level and any snapshot taken of it.

use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::behaviour::{BehaviourStrategy, HeroView};
use super::collision::CollisionStrategy;
use super::geometry::BoundingBox;
use super::kinematics::KinematicState;
use super::score::{ScoreChannel, Scoreboard};

/// Stable index of an entity inside its level's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Draw order bucket for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layer {
    Background,
    #[default]
    Foreground,
}

/// Opaque reference to an image asset, resolved by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle(String);

impl AssetHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fixed scenery: platforms, trees, the finish flag
#[derive(Debug, Clone)]
pub struct StaticEntity {
    pub volume: BoundingBox,
    pub sprite: AssetHandle,
    pub layer: Layer,
    observers: Vec<ScoreChannel>,
}

impl StaticEntity {
    pub fn new(volume: BoundingBox, sprite: AssetHandle, layer: Layer) -> Self {
        Self {
            volume,
            sprite,
            layer,
            observers: Vec::new(),
        }
    }
}

/// A moving body driven by kinematics and a behaviour strategy
#[derive(Debug, Clone)]
pub struct DynamicEntity {
    pub volume: BoundingBox,
    pub sprite: AssetHandle,
    pub layer: Layer,
    pub kinematics: KinematicState,
    /// Integrates with zero gravity (clouds, the mascot)
    pub floating: bool,
    behaviour: Rc<dyn BehaviourStrategy>,
    collision: Rc<dyn CollisionStrategy>,
    config: Map<String, Value>,
    observers: Vec<ScoreChannel>,
}

impl DynamicEntity {
    pub fn new(
        kinematics: KinematicState,
        size: Vec2,
        sprite: AssetHandle,
        layer: Layer,
        behaviour: Rc<dyn BehaviourStrategy>,
        collision: Rc<dyn CollisionStrategy>,
    ) -> Self {
        Self {
            volume: BoundingBox::new(kinematics.position, size.x, size.y),
            sprite,
            layer,
            kinematics,
            floating: false,
            behaviour,
            collision,
            config: Map::new(),
            observers: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }

    pub fn floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.kinematics.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.kinematics.position = position;
        self.sync_volume();
    }

    pub fn velocity(&self) -> Vec2 {
        self.kinematics.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.kinematics.velocity = velocity;
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn collision_strategy(&self) -> Rc<dyn CollisionStrategy> {
        Rc::clone(&self.collision)
    }

    /// Keep the bounding box on the kinematic position
    pub fn sync_volume(&mut self) {
        self.volume.translate_to(self.kinematics.position);
    }

    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        let gravity = if self.floating { 0.0 } else { gravity };
        self.kinematics.integrate(dt, gravity);
        self.sync_volume();
    }

    pub fn behave(&mut self, hero: &HeroView, dt: f32) {
        let behaviour = Rc::clone(&self.behaviour);
        behaviour.behave(self, hero, dt);
        self.sync_volume();
    }

    /// Snap the bottom edge onto `surface_y` and take `vertical_speed`
    fn rest_on(&mut self, surface_y: f32, vertical_speed: f32) {
        self.kinematics.position.y = surface_y - self.volume.height;
        self.kinematics.velocity.y = vertical_speed;
        self.sync_volume();
    }
}

/// Tunable limits for the hero's control commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroControl {
    pub max_velocity_x: f32,
    pub acceleration: f32,
    pub bounce_speed: f32,
    pub min_bounce_speed: f32,
    pub max_bounce_speed: f32,
    pub bounce_step: f32,
}

/// The player-controlled bouncing hero
#[derive(Debug, Clone)]
pub struct ControllableEntity {
    pub body: DynamicEntity,
    pub floor_height: f32,
    spawn_position: Vec2,
    control: HeroControl,
}

impl ControllableEntity {
    pub fn new(body: DynamicEntity, control: HeroControl, floor_height: f32) -> Self {
        let spawn_position = body.position();
        Self {
            body,
            floor_height,
            spawn_position,
            control,
        }
    }

    pub fn spawn_position(&self) -> Vec2 {
        self.spawn_position
    }

    pub fn max_velocity_x(&self) -> f32 {
        self.control.max_velocity_x
    }

    pub fn bounce_speed(&self) -> f32 {
        self.control.bounce_speed
    }

    pub fn move_left(&mut self) -> bool {
        if self.body.velocity().x <= -self.control.max_velocity_x {
            return false;
        }
        self.body.kinematics.horizontal_acceleration = -self.control.acceleration;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.body.velocity().x >= self.control.max_velocity_x {
            return false;
        }
        self.body.kinematics.horizontal_acceleration = self.control.acceleration;
        true
    }

    pub fn boost_height(&mut self) -> bool {
        let c = &mut self.control;
        if c.bounce_speed >= c.max_bounce_speed {
            return false;
        }
        c.bounce_speed = (c.bounce_speed + c.bounce_step).min(c.max_bounce_speed);
        true
    }

    pub fn drop_height(&mut self) -> bool {
        let c = &mut self.control;
        if c.bounce_speed <= c.min_bounce_speed {
            return false;
        }
        c.bounce_speed = (c.bounce_speed - c.bounce_step).max(c.min_bounce_speed);
        true
    }

    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.body.integrate(dt, gravity);
        let max = self.control.max_velocity_x;
        let v = &mut self.body.kinematics.velocity;
        v.x = v.x.clamp(-max, max);
    }

    /// Return to the spawn point at rest
    pub fn reset(&mut self) {
        let mut spawn = self.spawn_position;
        spawn.y = spawn.y.min(self.floor_height - self.body.volume.height);
        self.body.kinematics = KinematicState::at(spawn);
        self.body.sync_volume();
    }
}

/// Any entity a level can hold
#[derive(Debug, Clone)]
pub enum Entity {
    Static(StaticEntity),
    Dynamic(DynamicEntity),
    Controllable(ControllableEntity),
}

impl Entity {
    pub fn volume(&self) -> &BoundingBox {
        match self {
            Entity::Static(s) => &s.volume,
            Entity::Dynamic(d) => &d.volume,
            Entity::Controllable(c) => &c.body.volume,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.volume().top_left
    }

    pub fn width(&self) -> f32 {
        self.volume().width
    }

    pub fn height(&self) -> f32 {
        self.volume().height
    }

    pub fn sprite(&self) -> &AssetHandle {
        match self {
            Entity::Static(s) => &s.sprite,
            Entity::Dynamic(d) => &d.sprite,
            Entity::Controllable(c) => &c.body.sprite,
        }
    }

    pub fn layer(&self) -> Layer {
        match self {
            Entity::Static(s) => s.layer,
            Entity::Dynamic(d) => d.layer,
            Entity::Controllable(c) => c.body.layer,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Entity::Static(_))
    }

    pub fn as_dynamic(&self) -> Option<&DynamicEntity> {
        match self {
            Entity::Static(_) => None,
            Entity::Dynamic(d) => Some(d),
            Entity::Controllable(c) => Some(&c.body),
        }
    }

    pub fn as_dynamic_mut(&mut self) -> Option<&mut DynamicEntity> {
        match self {
            Entity::Static(_) => None,
            Entity::Dynamic(d) => Some(d),
            Entity::Controllable(c) => Some(&mut c.body),
        }
    }

    pub fn collides_with(&self, other: &Entity) -> bool {
        self.volume().overlaps(other.volume())
    }

    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        match self {
            Entity::Static(_) => {}
            Entity::Dynamic(d) => d.integrate(dt, gravity),
            Entity::Controllable(c) => c.integrate(dt, gravity),
        }
    }

    /// Come to rest on a surface; the hero bounces off it instead
    pub fn land(&mut self, surface_y: f32) {
        match self {
            Entity::Static(_) => {}
            Entity::Dynamic(d) => d.rest_on(surface_y, 0.0),
            Entity::Controllable(c) => {
                let speed = c.control.bounce_speed;
                c.body.rest_on(surface_y, -speed);
            }
        }
    }

    pub fn add_observer(&mut self, channel: ScoreChannel) {
        self.observers_mut().push(channel);
    }

    pub fn observers(&self) -> &[ScoreChannel] {
        match self {
            Entity::Static(s) => &s.observers,
            Entity::Dynamic(d) => &d.observers,
            Entity::Controllable(c) => &c.body.observers,
        }
    }

    fn observers_mut(&mut self) -> &mut Vec<ScoreChannel> {
        match self {
            Entity::Static(s) => &mut s.observers,
            Entity::Dynamic(d) => &mut d.observers,
            Entity::Controllable(c) => &mut c.body.observers,
        }
    }

    /// Fire every subscribed channel once, in subscription order
    pub fn notify_observers(&self, scores: &mut Scoreboard) {
        for &channel in self.observers() {
            scores.notify(channel);
        }
    }
}
