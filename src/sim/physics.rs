//! Physical response to overlaps and to the edges of the world
//!
//! Everything here is a pure function of its arguments. Callers decide who
//! takes part; the mascot, for instance, is filtered out by the level.

use glam::Vec2;

use super::entity::Entity;
use super::geometry::BoundingBox;

/// Playfield extents used for world-limit clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    /// Hard resting surface; never below `height`
    pub floor_height: f32,
}

impl WorldBounds {
    pub fn floor(&self) -> f32 {
        self.floor_height.min(self.height)
    }
}

fn shift(entity: &mut Entity, delta: Vec2, horizontal: bool) {
    if let Some(d) = entity.as_dynamic_mut() {
        let position = d.position() + delta;
        d.set_position(position);
        if horizontal {
            d.kinematics.velocity.x = 0.0;
        } else {
            d.kinematics.velocity.y = 0.0;
        }
    }
}

/// Separate two overlapping bodies along the axis of least penetration
///
/// Each body moves half the overlap away from the other and loses its
/// velocity component on that axis.
pub fn resolve_dynamic_pair(a: &mut Entity, b: &mut Entity) {
    let Some(penetration) = a.volume().penetration(b.volume()) else {
        return;
    };
    let ca = a.volume().centre();
    let cb = b.volume().centre();

    if penetration.x < penetration.y {
        let dir = if ca.x < cb.x { -1.0 } else { 1.0 };
        let half = penetration.x * 0.5 * dir;
        shift(a, Vec2::new(half, 0.0), true);
        shift(b, Vec2::new(-half, 0.0), true);
    } else {
        let dir = if ca.y < cb.y { -1.0 } else { 1.0 };
        let half = penetration.y * 0.5 * dir;
        shift(a, Vec2::new(0.0, half), false);
        shift(b, Vec2::new(0.0, -half), false);
    }
}

/// Stop a body moving into a fixed surface
///
/// The side of contact is taken from where the body was before its last
/// step. Arriving from above lands it on top of the surface.
pub fn resolve_dynamic_static(entity: &mut Entity, surface: &BoundingBox) {
    let Some(body) = entity.as_dynamic() else {
        return;
    };
    if !body.volume.overlaps(surface) {
        return;
    }
    let before = BoundingBox::new(
        body.kinematics.previous_position,
        body.volume.width,
        body.volume.height,
    );
    let current = body.volume;

    if before.bottom() <= surface.top() {
        entity.land(surface.top());
    } else if before.top() >= surface.bottom() {
        shift(entity, Vec2::new(0.0, surface.bottom() - current.top()), false);
    } else if before.right() <= surface.left() {
        shift(entity, Vec2::new(surface.left() - current.right(), 0.0), true);
    } else if before.left() >= surface.right() {
        shift(entity, Vec2::new(surface.right() - current.left(), 0.0), true);
    } else if let Some(penetration) = current.penetration(surface) {
        // Already embedded last tick: push out through the shallower side
        let centre = current.centre();
        let surface_centre = surface.centre();
        if penetration.x < penetration.y {
            let dx = if centre.x < surface_centre.x {
                surface.left() - current.right()
            } else {
                surface.right() - current.left()
            };
            shift(entity, Vec2::new(dx, 0.0), true);
        } else if centre.y < surface_centre.y {
            entity.land(surface.top());
        } else {
            shift(entity, Vec2::new(0.0, surface.bottom() - current.top()), false);
        }
    }
}

/// Clamp a body inside the playfield and rest it on the floor
pub fn enforce_world_limits(entity: &mut Entity, bounds: &WorldBounds) {
    let Some(body) = entity.as_dynamic_mut() else {
        return;
    };
    let mut position = body.position();
    let mut velocity = body.velocity();
    let size = body.volume.size();

    if position.x < 0.0 {
        position.x = 0.0;
        velocity.x = velocity.x.max(0.0);
    } else if position.x + size.x > bounds.width {
        position.x = (bounds.width - size.x).max(0.0);
        velocity.x = velocity.x.min(0.0);
    }
    if position.y < 0.0 {
        position.y = 0.0;
        velocity.y = velocity.y.max(0.0);
    }
    body.set_position(position);
    body.set_velocity(velocity);

    let floor = bounds.floor();
    if body.volume.bottom() > floor {
        entity.land(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::behaviour::Passive;
    use crate::sim::collision::NoReaction;
    use crate::sim::entity::{AssetHandle, DynamicEntity, Layer};
    use crate::sim::kinematics::KinematicState;
    use proptest::prelude::*;
    use std::rc::Rc;

    fn body(x: f32, y: f32, size: f32) -> Entity {
        Entity::Dynamic(DynamicEntity::new(
            KinematicState::at(Vec2::new(x, y)),
            Vec2::splat(size),
            AssetHandle::new("b.png"),
            Layer::Foreground,
            Rc::new(Passive),
            Rc::new(NoReaction),
        ))
    }

    fn moved(mut e: Entity, to: Vec2, velocity: Vec2) -> Entity {
        let d = e.as_dynamic_mut().unwrap();
        d.kinematics.previous_position = d.kinematics.position;
        d.set_position(to);
        d.set_velocity(velocity);
        e
    }

    const BOUNDS: WorldBounds = WorldBounds {
        width: 1000.0,
        height: 600.0,
        floor_height: 500.0,
    };

    #[test]
    fn test_pair_separates_on_least_penetration_axis() {
        let mut a = body(0.0, 0.0, 10.0);
        let mut b = body(8.0, 1.0, 10.0);
        a.as_dynamic_mut().unwrap().set_velocity(Vec2::new(5.0, 3.0));
        b.as_dynamic_mut().unwrap().set_velocity(Vec2::new(-5.0, 2.0));
        resolve_dynamic_pair(&mut a, &mut b);

        assert!(!a.collides_with(&b));
        assert!((a.position().x - -1.0).abs() < 1e-5);
        assert!((b.position().x - 9.0).abs() < 1e-5);
        assert_eq!(a.as_dynamic().unwrap().velocity(), Vec2::new(0.0, 3.0));
        assert_eq!(b.as_dynamic().unwrap().velocity(), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_landing_on_platform() {
        let platform = BoundingBox::new(Vec2::new(0.0, 100.0), 200.0, 20.0);
        let e = body(50.0, 85.0, 10.0);
        let mut e = moved(e, Vec2::new(50.0, 95.0), Vec2::new(4.0, 30.0));
        resolve_dynamic_static(&mut e, &platform);

        assert_eq!(e.volume().bottom(), 100.0);
        assert_eq!(e.as_dynamic().unwrap().velocity(), Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_bumping_head_and_side() {
        let platform = BoundingBox::new(Vec2::new(100.0, 100.0), 100.0, 20.0);

        let e = body(150.0, 125.0, 10.0);
        let mut e = moved(e, Vec2::new(150.0, 115.0), Vec2::new(0.0, -20.0));
        resolve_dynamic_static(&mut e, &platform);
        assert_eq!(e.volume().top(), 120.0);
        assert_eq!(e.as_dynamic().unwrap().velocity().y, 0.0);

        let e = body(85.0, 105.0, 10.0);
        let mut e = moved(e, Vec2::new(95.0, 105.0), Vec2::new(20.0, 0.0));
        resolve_dynamic_static(&mut e, &platform);
        assert_eq!(e.volume().right(), 100.0);
        assert_eq!(e.as_dynamic().unwrap().velocity().x, 0.0);
    }

    #[test]
    fn test_world_limits_clamp_sides_and_floor() {
        let mut e = body(-30.0, 520.0, 20.0);
        e.as_dynamic_mut().unwrap().set_velocity(Vec2::new(-10.0, 50.0));
        enforce_world_limits(&mut e, &BOUNDS);
        assert_eq!(e.position().x, 0.0);
        assert_eq!(e.volume().bottom(), 500.0);
        assert_eq!(e.as_dynamic().unwrap().velocity(), Vec2::ZERO);

        let mut e = body(990.0, 10.0, 20.0);
        enforce_world_limits(&mut e, &BOUNDS);
        assert_eq!(e.volume().right(), 1000.0);
    }

    #[test]
    fn test_floor_never_below_level_height() {
        let bounds = WorldBounds {
            width: 100.0,
            height: 50.0,
            floor_height: 80.0,
        };
        let mut e = body(0.0, 45.0, 10.0);
        enforce_world_limits(&mut e, &bounds);
        assert_eq!(e.volume().bottom(), 50.0);
    }

    proptest! {
        #[test]
        fn world_limits_keep_bodies_inside(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            size in 1.0f32..100.0,
        ) {
            let mut e = body(x, y, size);
            enforce_world_limits(&mut e, &BOUNDS);
            let v = e.volume();
            prop_assert!(v.left() >= 0.0);
            prop_assert!(v.right() <= BOUNDS.width + 1e-3);
            prop_assert!(v.top() >= 0.0);
            prop_assert!(v.bottom() <= BOUNDS.floor_height + 1e-3);
        }
    }
}
