use std::collections::HashMap;

use hecs::{Entity, World};
use log::{debug, trace, warn};
use rapier3d::prelude::{RigidBodyHandle, RigidBodyType};

use super::selection::{find_closest_grabbable, find_distance_grabbable};
use crate::{
    components::{
        hand::Handedness, Collider, GrabState, Grabbable, Grip, Hand, LocalTransform, Pose,
        RigidBody,
    },
    contexts::{GrabbableRegistry, HandRegistry, PhysicsContext},
    Engine, GrabEvent, InteractionError, InteractionResult,
};

/// Asks the hand currently holding `entity` to let go of it, because `requested_by` wants it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// The entity being stolen
    pub entity: Entity,
    /// The hand doing the stealing
    pub requested_by: Entity,
}

/// Grabbing system
/// Used to allow a player to grab objects. Used in conjunction with `hands_system`
pub fn grabbing_system(engine: &mut Engine) {
    let now = engine.time_context.now();
    grabbing_system_inner(
        &mut engine.world,
        &mut engine.physics_context,
        &engine.grabbable_registry,
        &engine.hand_registry,
        now,
        &mut engine.grab_events,
    );
}

/// Run the grab state machine for every hand, releasing first and then grabbing
pub fn grabbing_system_inner(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    grabbables: &GrabbableRegistry,
    hands: &HandRegistry,
    now: f32,
    events: &mut Vec<GrabEvent>,
) {
    for &hand_entity in hands.hands() {
        match update_hand(world, physics_context, grabbables, hand_entity, now, events) {
            Ok(()) => {}
            Err(e @ InteractionError::OwnershipViolation { .. }) => {
                panic!("[HOTHAM_GRABBING] !!FATAL ERROR!! {e}")
            }
            Err(e) => warn!("[HOTHAM_GRABBING] Unable to update hand {hand_entity:?}: {e}"),
        }
    }

    debug_assert!(
        verify_ownership(world).is_ok(),
        "[HOTHAM_GRABBING] Ownership is inconsistent: {:?}",
        verify_ownership(world)
    );
}

fn update_hand(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    grabbables: &GrabbableRegistry,
    hand_entity: Entity,
    now: f32,
    events: &mut Vec<GrabEvent>,
) -> InteractionResult<()> {
    let (just_pressed, just_released) = {
        let hand = world.get::<&Hand>(hand_entity)?;
        (hand.grip_button_just_pressed, hand.grip_button_just_released)
    };

    if just_released {
        end_grab(world, physics_context, hand_entity, events)?;
    }

    if just_pressed {
        begin_grab(world, physics_context, grabbables, hand_entity, now, events)?;
    }

    update_hovered(world, physics_context, grabbables, hand_entity)?;

    let mut hand = world.get::<&mut Hand>(hand_entity)?;
    hand.model_visible = !(hand.settings.hide_when_grabbing && hand.grabbed_entity().is_some());

    Ok(())
}

/// Try to pick something up with `hand_entity`. Returns the entity that was grabbed, if any.
///
/// The closest grabbable is preferred; failing that, whatever the hand was pointing at last tick.
/// If another hand is holding the target, that hand is made to let go first.
pub fn begin_grab(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    grabbables: &GrabbableRegistry,
    hand_entity: Entity,
    now: f32,
    events: &mut Vec<GrabEvent>,
) -> InteractionResult<Option<Entity>> {
    let (hand_pose, grip_pose, settings, handedness, hovered) = {
        let hand = world.get::<&Hand>(hand_entity)?;
        if hand.grabbed_entity().is_some() {
            return Ok(None);
        }
        let transform = world.get::<&LocalTransform>(hand_entity)?;
        (
            transform.pose(),
            hand.grip_pose(&transform),
            hand.settings,
            hand.handedness,
            hand.hovered_entity(),
        )
    };

    let mut target = None;
    if settings.allow_hand_grabbing {
        target = find_closest_grabbable(
            world,
            physics_context,
            grabbables.all_entities(),
            grip_pose.position,
        );
    }
    if target.is_none() && settings.allow_distance_grabbing {
        // Anything hovered last tick may have been deactivated since
        target = hovered.filter(|entity| grabbables.contains(*entity));
    }

    let target = match target {
        Some(target) => target,
        None => return Ok(None),
    };

    let (target_transform, snap_anchor, primary_grab_point, previous_holder) = {
        let grabbable = world.get::<&Grabbable>(target)?;
        let transform = *world.get::<&LocalTransform>(target)?;
        (
            transform,
            grabbable.snap_anchor,
            grabbable.primary_grab_point(),
            grabbable.grabbed_by(),
        )
    };

    // Whoever is holding it has to let go before we can take it.
    if let Some(previous_holder) = previous_holder {
        let request = ReleaseRequest {
            entity: target,
            requested_by: hand_entity,
        };
        handle_release_request(world, physics_context, previous_holder, request, events)?;
    }

    set_grab_volume_enabled(world, physics_context, hand_entity, false)?;
    world
        .get::<&mut Grabbable>(target)?
        .set_grabbed_by(Some(hand_entity));
    physics_context.set_ignore_collision(hand_entity, target, true);

    // Held bodies go wherever the hand puts them, regardless of gravity.
    let body_type_before_grab = match world.get::<&RigidBody>(target) {
        Ok(rigid_body) => Some(
            physics_context
                .set_body_type(rigid_body.handle, RigidBodyType::KinematicPositionBased)?,
        ),
        Err(_) => None,
    };

    let mut position_offset = match &snap_anchor {
        Some(anchor) => anchor.local_position,
        None => primary_grab_point
            .and_then(|handle| physics_context.bounds_center(handle))
            .unwrap_or_default(),
    };
    if handedness == Handedness::Left {
        position_offset.x = -position_offset.x;
    }

    let rotation_offset = match &snap_anchor {
        Some(anchor) => anchor.world_rotation(&target_transform) * settings.grip_rotation,
        None => settings.grip_rotation,
    };

    let trajectory_end = match &snap_anchor {
        Some(anchor) => {
            let rotation = anchor.local_rotation.inverse();
            let position = -(rotation * (anchor.local_position * anchor.parent_scale));
            Pose::new(position, rotation)
        }
        None => Pose::IDENTITY,
    };

    world.get::<&mut Hand>(hand_entity)?.grab_state = GrabState::Grabbed(Grip {
        entity: target,
        grabbed_at: now,
        pull_duration: settings.pull_duration,
        position_offset,
        rotation_offset,
        trajectory_start: target_transform.pose(),
        trajectory_end,
        last_hand_pose: hand_pose,
        hand_linear_velocity: Default::default(),
        body_type_before_grab,
    });

    debug!("[HOTHAM_GRABBING] {hand_entity:?} grabbed {target:?}");
    events.push(GrabEvent::Started {
        entity: target,
        hand: hand_entity,
    });

    Ok(Some(target))
}

/// Let go of whatever `hand_entity` is holding, throwing it with the hand's velocity.
/// Returns the entity that was released, if any.
///
/// The hand's grab volume is switched back on whether or not anything was held.
pub fn end_grab(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    hand_entity: Entity,
    events: &mut Vec<GrabEvent>,
) -> InteractionResult<Option<Entity>> {
    let grip = {
        let mut hand = world.get::<&mut Hand>(hand_entity)?;
        match std::mem::take(&mut hand.grab_state) {
            GrabState::Grabbed(grip) => Some(grip),
            GrabState::Idle { .. } => None,
        }
    };
    set_grab_volume_enabled(world, physics_context, hand_entity, true)?;

    let grip = match grip {
        Some(grip) => grip,
        None => return Ok(None),
    };

    let entity = grip.entity;
    physics_context.set_ignore_collision(hand_entity, entity, false);

    // The entity may have been despawned while we were holding it.
    if let Ok(mut grabbable) = world.get::<&mut Grabbable>(entity) {
        if grabbable.grabbed_by() != Some(hand_entity) {
            return Err(InteractionError::OwnershipViolation {
                entity,
                reason: format!(
                    "released by {hand_entity:?} but grabbed by {:?}",
                    grabbable.grabbed_by()
                ),
            });
        }
        grabbable.set_grabbed_by(None);
    }

    if let Ok(rigid_body) = world.get::<&RigidBody>(entity) {
        restore_body_type(physics_context, rigid_body.handle, &grip)?;
        physics_context.set_linear_velocity(rigid_body.handle, grip.hand_linear_velocity)?;
    }

    debug!("[HOTHAM_GRABBING] {hand_entity:?} released {entity:?}");
    events.push(GrabEvent::Ended {
        entity,
        hand: hand_entity,
        linear_velocity: grip.hand_linear_velocity,
    });

    Ok(Some(entity))
}

/// Have `holder` give up the entity named in `request`.
///
/// Unlike [`end_grab`], the entity isn't thrown and the holder's grab volume stays off until
/// its own grip is released.
pub fn handle_release_request(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    holder: Entity,
    request: ReleaseRequest,
    events: &mut Vec<GrabEvent>,
) -> InteractionResult<()> {
    let grip = {
        let mut hand = world.get::<&mut Hand>(holder)?;
        if hand.grabbed_entity() != Some(request.entity) {
            return Err(InteractionError::OwnershipViolation {
                entity: request.entity,
                reason: format!(
                    "{:?} asked {holder:?} to release it, but {holder:?} is holding {:?}",
                    request.requested_by,
                    hand.grabbed_entity()
                ),
            });
        }
        let grip = hand.grip().cloned();
        hand.grab_state = GrabState::default();
        grip
    };

    world
        .get::<&mut Grabbable>(request.entity)?
        .set_grabbed_by(None);
    physics_context.set_ignore_collision(holder, request.entity, false);
    if let (Ok(rigid_body), Some(grip)) = (world.get::<&RigidBody>(request.entity), &grip) {
        restore_body_type(physics_context, rigid_body.handle, grip)?;
    }

    debug!(
        "[HOTHAM_GRABBING] {:?} took {:?} from {holder:?}",
        request.requested_by, request.entity
    );
    events.push(GrabEvent::Ended {
        entity: request.entity,
        hand: holder,
        linear_velocity: Default::default(),
    });

    Ok(())
}

/// Make whichever hand is holding `entity` drop it. Used when a grabbable is deactivated.
pub fn force_release(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    entity: Entity,
    events: &mut Vec<GrabEvent>,
) -> InteractionResult<Option<Entity>> {
    let holder = match world.get::<&Grabbable>(entity) {
        Ok(grabbable) => grabbable.grabbed_by(),
        Err(_) => return Ok(None),
    };

    match holder {
        Some(hand) => {
            end_grab(world, physics_context, hand, events)?;
            Ok(Some(hand))
        }
        None => Ok(None),
    }
}

fn update_hovered(
    world: &mut World,
    physics_context: &PhysicsContext,
    grabbables: &GrabbableRegistry,
    hand_entity: Entity,
) -> InteractionResult<()> {
    let (hand_pose, settings, previous) = {
        let hand = world.get::<&Hand>(hand_entity)?;
        let previous = match hand.grab_state() {
            GrabState::Idle { hovered } => *hovered,
            GrabState::Grabbed(_) => return Ok(()),
        };
        let transform = world.get::<&LocalTransform>(hand_entity)?;
        (transform.pose(), hand.settings, previous)
    };

    let hovered = if settings.allow_distance_grabbing {
        find_distance_grabbable(
            world,
            physics_context,
            grabbables.distance_entities(),
            &hand_pose,
            settings.max_grab_distance,
            settings.grab_angle_threshold,
        )
    } else {
        None
    };

    if hovered != previous {
        trace!("[HOTHAM_GRABBING] {hand_entity:?} now hovering {hovered:?}");
    }

    world.get::<&mut Hand>(hand_entity)?.grab_state = GrabState::Idle { hovered };
    Ok(())
}

/// Switch the volume a hand uses to sense grabbables on or off. Switching it off forgets
/// everything the hand was touching.
fn set_grab_volume_enabled(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    hand_entity: Entity,
    enabled: bool,
) -> InteractionResult<()> {
    world.get::<&mut Hand>(hand_entity)?.grab_volume_enabled = enabled;
    if let Ok(mut collider) = world.get::<&mut Collider>(hand_entity) {
        physics_context.set_collider_enabled(collider.handle, enabled)?;
        if !enabled {
            collider.collisions_this_frame.clear();
        }
    }
    Ok(())
}

/// Put a body back the way it was simulated before it was grabbed
fn restore_body_type(
    physics_context: &mut PhysicsContext,
    handle: RigidBodyHandle,
    grip: &Grip,
) -> InteractionResult<()> {
    if let Some(body_type) = grip.body_type_before_grab {
        physics_context.set_body_type(handle, body_type)?;
    }
    Ok(())
}

/// Check that every hand and every grabbable agree on who is holding what.
pub fn verify_ownership(world: &World) -> InteractionResult<()> {
    let mut holders: HashMap<Entity, Entity> = HashMap::new();

    for (hand_entity, hand) in world.query::<&Hand>().iter() {
        let entity = match hand.grabbed_entity() {
            Some(entity) => entity,
            None => continue,
        };

        if let Some(other_hand) = holders.insert(entity, hand_entity) {
            return Err(InteractionError::OwnershipViolation {
                entity,
                reason: format!("held by both {other_hand:?} and {hand_entity:?}"),
            });
        }

        match world.get::<&Grabbable>(entity) {
            Ok(grabbable) if grabbable.grabbed_by() == Some(hand_entity) => {}
            Ok(grabbable) => {
                return Err(InteractionError::OwnershipViolation {
                    entity,
                    reason: format!(
                        "held by {hand_entity:?} but grabbed by {:?}",
                        grabbable.grabbed_by()
                    ),
                })
            }
            // Despawned while held. The hand will drop it when the grip is released.
            Err(_) => {}
        }
    }

    for (entity, grabbable) in world.query::<&Grabbable>().iter() {
        if let Some(hand) = grabbable.grabbed_by() {
            if holders.get(&entity) != Some(&hand) {
                return Err(InteractionError::OwnershipViolation {
                    entity,
                    reason: format!("grabbed by {hand:?}, which isn't holding it"),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::SnapAnchor, config::GrabberSettings, util::test_scene::TestScene,
    };
    use approx::assert_relative_eq;
    use glam::{Quat, Vec3};

    fn tick(scene: &mut TestScene, now: f32, events: &mut Vec<GrabEvent>) {
        grabbing_system_inner(
            &mut scene.world,
            &mut scene.physics_context,
            &scene.grabbables,
            &scene.hands,
            now,
            events,
        );
        for &hand in scene.hands.hands().to_vec().iter() {
            scene.clear_grip_edges(hand);
        }
        verify_ownership(&scene.world).unwrap();
    }

    #[test]
    pub fn test_grab_and_release() {
        let mut scene = TestScene::default();
        let hand = scene.add_hand(Handedness::Right, Vec3::ZERO);
        let cube = scene.add_cube("Cube", [0., 0., 0.2].into(), 0.1);
        let mut events = Vec::new();

        // Nothing happens without input
        tick(&mut scene, 0.0, &mut events);
        assert_eq!(scene.grabbed_entity(hand), None);
        assert!(events.is_empty());

        scene.press_grip(hand);
        tick(&mut scene, 0.1, &mut events);
        assert_eq!(scene.grabbed_entity(hand), Some(cube));
        assert_eq!(scene.grabbed_by(cube), Some(hand));
        assert!(scene.physics_context.is_collision_ignored(hand, cube));
        assert_eq!(events, vec![GrabEvent::Started { entity: cube, hand }]);

        {
            let hand = scene.world.get::<&Hand>(hand).unwrap();
            assert!(!hand.grab_volume_enabled());
            assert!(!hand.model_visible);
            let grip = hand.grip().unwrap();
            assert_eq!(grip.grabbed_at, 0.1);
            assert_relative_eq!(grip.position_offset, Vec3::new(0., 0., 0.2));
            assert_eq!(grip.trajectory_end, Pose::IDENTITY);
        }

        events.clear();
        scene.release_grip(hand);
        tick(&mut scene, 0.2, &mut events);
        assert_eq!(scene.grabbed_entity(hand), None);
        assert_eq!(scene.grabbed_by(cube), None);
        assert!(!scene.physics_context.is_collision_ignored(hand, cube));
        assert_eq!(
            events,
            vec![GrabEvent::Ended {
                entity: cube,
                hand,
                linear_velocity: Vec3::ZERO
            }]
        );

        let hand = scene.world.get::<&Hand>(hand).unwrap();
        assert!(hand.grab_volume_enabled());
        assert!(hand.model_visible);
    }

    #[test]
    pub fn test_grab_with_nothing_nearby() {
        let mut scene = TestScene::default();
        let hand = scene.add_hand(Handedness::Right, Vec3::ZERO);
        let mut events = Vec::new();

        scene.press_grip(hand);
        tick(&mut scene, 0.0, &mut events);
        assert_eq!(scene.grabbed_entity(hand), None);
        assert!(events.is_empty());
        assert!(scene.world.get::<&Hand>(hand).unwrap().grab_volume_enabled());
    }

    #[test]
    pub fn test_offhand_steal() {
        let mut scene = TestScene::default();
        let left = scene.add_hand(Handedness::Left, [-0.1, 0., 0.].into());
        let right = scene.add_hand(Handedness::Right, [0.1, 0., 0.].into());
        let cube = scene.add_cube("Cube", Vec3::ZERO, 0.05);
        let mut events = Vec::new();

        scene.press_grip(left);
        tick(&mut scene, 0.0, &mut events);
        assert_eq!(scene.grabbed_entity(left), Some(cube));

        events.clear();
        scene.press_grip(right);
        tick(&mut scene, 0.1, &mut events);
        assert_eq!(scene.grabbed_by(cube), Some(right));
        assert_eq!(scene.grabbed_entity(left), None);
        assert_eq!(scene.grabbed_entity(right), Some(cube));
        assert_eq!(
            events,
            vec![
                GrabEvent::Ended {
                    entity: cube,
                    hand: left,
                    linear_velocity: Vec3::ZERO
                },
                GrabEvent::Started {
                    entity: cube,
                    hand: right
                },
            ]
        );

        // The left hand's volume stays off until it lets go of its own grip.
        assert!(!scene.world.get::<&Hand>(left).unwrap().grab_volume_enabled());
        assert!(!scene.physics_context.is_collision_ignored(left, cube));
        assert!(scene.physics_context.is_collision_ignored(right, cube));

        events.clear();
        scene.release_grip(left);
        tick(&mut scene, 0.2, &mut events);
        assert!(scene.world.get::<&Hand>(left).unwrap().grab_volume_enabled());
        assert_eq!(scene.grabbed_by(cube), Some(right));
        assert!(events.is_empty());
    }

    #[test]
    pub fn test_held_body_is_kinematic() {
        let mut scene = TestScene::default();
        let left = scene.add_hand(Handedness::Left, [-0.1, 0., 0.].into());
        let right = scene.add_hand(Handedness::Right, [0.1, 0., 0.].into());
        let cube = scene.add_dynamic_cube("Cube", Vec3::ZERO, 0.05);
        let rigid_body = scene.world.get::<&RigidBody>(cube).unwrap().handle;
        let body_type =
            |scene: &TestScene| scene.physics_context.rigid_bodies[rigid_body].body_type();
        let mut events = Vec::new();

        scene.press_grip(left);
        tick(&mut scene, 0.0, &mut events);
        assert_eq!(body_type(&scene), RigidBodyType::KinematicPositionBased);

        // Changing hands keeps it kinematic, and remembers how it was simulated originally
        scene.press_grip(right);
        tick(&mut scene, 0.1, &mut events);
        assert_eq!(scene.grabbed_entity(right), Some(cube));
        assert_eq!(body_type(&scene), RigidBodyType::KinematicPositionBased);
        assert_eq!(
            scene
                .world
                .get::<&Hand>(right)
                .unwrap()
                .grip()
                .unwrap()
                .body_type_before_grab,
            Some(RigidBodyType::Dynamic)
        );

        scene.release_grip(right);
        tick(&mut scene, 0.2, &mut events);
        assert_eq!(scene.grabbed_entity(right), None);
        assert_eq!(body_type(&scene), RigidBodyType::Dynamic);
    }

    #[test]
    pub fn test_offhand_steal_not_allowed() {
        let mut scene = TestScene::default();
        let left = scene.add_hand(Handedness::Left, [-0.1, 0., 0.].into());
        let right = scene.add_hand(Handedness::Right, [0.1, 0., 0.].into());
        let cube = scene.add_grabbable(
            "Cube",
            Vec3::ZERO,
            0.05,
            Grabbable::default().allowing_offhand_steal(false),
        );
        let mut events = Vec::new();

        scene.press_grip(left);
        tick(&mut scene, 0.0, &mut events);
        scene.press_grip(right);
        tick(&mut scene, 0.1, &mut events);

        assert_eq!(scene.grabbed_by(cube), Some(left));
        assert_eq!(scene.grabbed_entity(right), None);
    }

    #[test]
    pub fn test_distance_grab_uses_hovered() {
        let mut scene = TestScene::default();
        let hand = scene.add_hand_with_settings(
            Handedness::Right,
            Vec3::ZERO,
            GrabberSettings {
                allow_hand_grabbing: false,
                ..Default::default()
            },
        );
        let target = scene.add_grabbable(
            "Target",
            [0., 0., 2.].into(),
            0.1,
            Grabbable::default().distance_grabbable(),
        );
        let mut events = Vec::new();

        tick(&mut scene, 0.0, &mut events);
        assert_eq!(scene.hovered_entity(hand), Some(target));

        scene.press_grip(hand);
        tick(&mut scene, 0.1, &mut events);
        assert_eq!(scene.grabbed_entity(hand), Some(target));
        assert_eq!(scene.hovered_entity(hand), None);

        // Hovering isn't updated while holding something.
        scene.move_hand(hand, Vec3::ZERO, Quat::from_rotation_y(std::f32::consts::PI));
        tick(&mut scene, 0.2, &mut events);
        assert_eq!(scene.hovered_entity(hand), None);

        // Once released, the hand is pointing away from the target.
        scene.release_grip(hand);
        tick(&mut scene, 0.3, &mut events);
        assert_eq!(scene.hovered_entity(hand), None);
    }

    #[test]
    pub fn test_hover_needs_distance_grabbing() {
        let mut scene = TestScene::default();
        let hand = scene.add_hand_with_settings(
            Handedness::Right,
            Vec3::ZERO,
            GrabberSettings {
                allow_distance_grabbing: false,
                ..Default::default()
            },
        );
        scene.add_grabbable(
            "Target",
            [0., 0., 2.].into(),
            0.1,
            Grabbable::default().distance_grabbable(),
        );
        let mut events = Vec::new();

        tick(&mut scene, 0.0, &mut events);
        assert_eq!(scene.hovered_entity(hand), None);
    }

    #[test]
    pub fn test_proximity_preferred_over_hovered() {
        let mut scene = TestScene::default();
        let hand = scene.add_hand(Handedness::Right, Vec3::ZERO);
        let far = scene.add_grabbable(
            "Far",
            [0., 0., 3.].into(),
            0.1,
            Grabbable::default().distance_grabbable(),
        );
        let near = scene.add_cube("Near", [0.3, 0., 0.].into(), 0.1);
        let mut events = Vec::new();

        tick(&mut scene, 0.0, &mut events);
        assert_eq!(scene.hovered_entity(hand), Some(far));

        // Proximity is measured against every grabbable, so the near cube wins.
        scene.press_grip(hand);
        tick(&mut scene, 0.1, &mut events);
        assert_eq!(scene.grabbed_entity(hand), Some(near));
    }

    #[test]
    pub fn test_left_hand_mirrors_snap_anchor() {
        let mut scene = TestScene::default();
        let left = scene.add_hand(Handedness::Left, Vec3::ZERO);
        let anchor = SnapAnchor::new([0.1, 0.2, 0.3].into(), Quat::from_rotation_x(0.5));
        let cube = scene.add_grabbable(
            "Cube",
            [0., 0., 0.1].into(),
            0.1,
            Grabbable::default().with_snap_anchor(anchor),
        );
        let mut events = Vec::new();

        scene.press_grip(left);
        tick(&mut scene, 0.0, &mut events);
        assert_eq!(scene.grabbed_entity(left), Some(cube));

        let hand = scene.world.get::<&Hand>(left).unwrap();
        let grip = hand.grip().unwrap();
        assert_relative_eq!(grip.position_offset, Vec3::new(-0.1, 0.2, 0.3));
        assert_relative_eq!(grip.rotation_offset, anchor.local_rotation, epsilon = 1e-6);
        assert_relative_eq!(
            grip.trajectory_end.rotation,
            anchor.local_rotation.inverse(),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            grip.trajectory_end.position,
            -(anchor.local_rotation.inverse() * anchor.local_position),
            epsilon = 1e-6
        );
        assert_relative_eq!(grip.trajectory_start.position, Vec3::new(0., 0., 0.1));
    }

    #[test]
    pub fn test_force_release() {
        let mut scene = TestScene::default();
        let hand = scene.add_hand(Handedness::Right, Vec3::ZERO);
        let cube = scene.add_cube("Cube", Vec3::ZERO, 0.1);
        let mut events = Vec::new();

        scene.press_grip(hand);
        tick(&mut scene, 0.0, &mut events);

        let released_by =
            force_release(&mut scene.world, &mut scene.physics_context, cube, &mut events)
                .unwrap();
        assert_eq!(released_by, Some(hand));
        assert_eq!(scene.grabbed_entity(hand), None);
        assert_eq!(scene.grabbed_by(cube), None);
        verify_ownership(&scene.world).unwrap();
    }

    #[test]
    pub fn test_release_request_for_wrong_entity() {
        let mut scene = TestScene::default();
        let left = scene.add_hand(Handedness::Left, Vec3::ZERO);
        let right = scene.add_hand(Handedness::Right, Vec3::ZERO);
        let cube = scene.add_cube("Cube", Vec3::ZERO, 0.1);
        let mut events = Vec::new();

        let result = handle_release_request(
            &mut scene.world,
            &mut scene.physics_context,
            left,
            ReleaseRequest {
                entity: cube,
                requested_by: right,
            },
            &mut events,
        );
        assert!(matches!(
            result,
            Err(InteractionError::OwnershipViolation { .. })
        ));
    }

    #[test]
    pub fn test_verify_ownership_detects_mismatch() {
        let mut scene = TestScene::default();
        let hand = scene.add_hand(Handedness::Right, Vec3::ZERO);
        let cube = scene.add_cube("Cube", Vec3::ZERO, 0.1);
        verify_ownership(&scene.world).unwrap();

        // The grabbable thinks it's held, but the hand doesn't know about it.
        scene
            .world
            .get::<&mut Grabbable>(cube)
            .unwrap()
            .set_grabbed_by(Some(hand));
        assert!(verify_ownership(&scene.world).is_err());
    }
}
