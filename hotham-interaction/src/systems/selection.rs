use glam::Vec3;
use hecs::{Entity, World};

use crate::{
    components::{Grabbable, LocalTransform, Pose},
    contexts::PhysicsContext,
};

/// The axis a hand points along, in the hand's local space
pub const HAND_FORWARD: Vec3 = Vec3::Z;

/// Find the grabbable with a grab point closest to `grip_position`.
///
/// Distance is measured to the nearest point on each grab point's bounding box. Grabbables that
/// are already held are skipped, unless they allow themselves to be stolen by the other hand.
pub fn find_closest_grabbable(
    world: &World,
    physics_context: &PhysicsContext,
    candidates: &[Entity],
    grip_position: Vec3,
) -> Option<Entity> {
    let mut closest_distance_squared = f32::MAX;
    let mut closest_grabbable = None;

    for &entity in candidates {
        let grabbable = match world.get::<&Grabbable>(entity) {
            Ok(grabbable) => grabbable,
            Err(_) => continue,
        };

        if !grabbable.is_available() {
            continue;
        }

        for &grab_point in &grabbable.grab_points {
            let closest_point =
                match physics_context.closest_point_on_bounds(grab_point, grip_position) {
                    Some(point) => point,
                    None => continue,
                };

            let distance_squared = grip_position.distance_squared(closest_point);
            if distance_squared < closest_distance_squared {
                closest_distance_squared = distance_squared;
                closest_grabbable = Some(entity);
            }
        }
    }

    closest_grabbable
}

/// Find the grabbable a hand is pointing at.
///
/// First, a ray is cast along the hand's forward axis. The first hit (in the order the query
/// pipeline reports them, which is *not* necessarily the nearest) that belongs to a candidate wins.
///
/// Failing that, the candidate best aligned with the hand's forward axis is chosen, provided it
/// is closer than `max_grab_distance` and the cosine of the angle to it exceeds
/// `grab_angle_threshold`. Equally aligned candidates go to the one that appears last.
pub fn find_distance_grabbable(
    world: &World,
    physics_context: &PhysicsContext,
    candidates: &[Entity],
    hand: &Pose,
    max_grab_distance: f32,
    grab_angle_threshold: f32,
) -> Option<Entity> {
    let origin = hand.position;
    let forward = hand.rotation * HAND_FORWARD;

    for hit in physics_context.cast_ray_all(origin, forward, max_grab_distance) {
        for &entity in candidates {
            if let Ok(grabbable) = world.get::<&Grabbable>(entity) {
                if grabbable.has_grab_point(hit.collider) {
                    return Some(entity);
                }
            }
        }
    }

    let mut best: Option<(Entity, f32)> = None;
    for &entity in candidates {
        let reference_point = match reference_point(world, entity) {
            Some(point) => point,
            None => continue,
        };

        let to_candidate = reference_point - origin;
        let distance = to_candidate.length();
        let cosine = forward.dot(to_candidate.normalize_or_zero());

        if distance < max_grab_distance
            && cosine > grab_angle_threshold
            && best.map_or(true, |(_, best_cosine)| cosine >= best_cosine)
        {
            best = Some((entity, cosine));
        }
    }

    best.map(|(entity, _)| entity)
}

/// Where a distance grab aims for: the snap anchor if there is one, otherwise the entity itself.
fn reference_point(world: &World, entity: Entity) -> Option<Vec3> {
    let grabbable = world.get::<&Grabbable>(entity).ok()?;
    let transform = world.get::<&LocalTransform>(entity).ok()?;

    Some(match &grabbable.snap_anchor {
        Some(anchor) => anchor.world_position(&transform),
        None => transform.translation,
    })
}
