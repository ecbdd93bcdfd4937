use hecs::World;
use log::warn;

use crate::{
    components::{GrabState, Grip, Hand, LocalTransform, Pose, RigidBody},
    contexts::{HandRegistry, PhysicsContext, TimeContext},
    util::lerp_slerp,
    Engine, InteractionResult,
};

/// Grabbed motion system
/// Pulls everything that's being held towards (and then along with) the hand holding it
pub fn grabbed_motion_system(engine: &mut Engine) {
    grabbed_motion_system_inner(
        &mut engine.world,
        &mut engine.physics_context,
        &engine.hand_registry,
        &engine.time_context,
    );
}

/// Move every held entity towards its target pose for `now`
pub fn grabbed_motion_system_inner(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    hands: &HandRegistry,
    time_context: &TimeContext,
) {
    for &hand_entity in hands.hands() {
        if let Err(e) = move_grabbed_entity(world, physics_context, hand_entity, time_context) {
            warn!("[HOTHAM_GRABBED_MOTION] Unable to move entity held by {hand_entity:?}: {e}");
        }
    }
}

fn move_grabbed_entity(
    world: &mut World,
    physics_context: &mut PhysicsContext,
    hand_entity: hecs::Entity,
    time_context: &TimeContext,
) -> InteractionResult<()> {
    let (entity, target) = {
        let mut hand = world.get::<&mut Hand>(hand_entity)?;
        let grip = match &mut hand.grab_state {
            GrabState::Grabbed(grip) => grip,
            GrabState::Idle { .. } => return Ok(()),
        };
        let hand_pose = world.get::<&LocalTransform>(hand_entity)?.pose();

        let delta = time_context.delta();
        if delta > 0.0 {
            grip.hand_linear_velocity = (hand_pose.position - grip.last_hand_pose.position) / delta;
        }
        grip.last_hand_pose = hand_pose;

        (grip.entity, grabbed_target_pose(grip, &hand_pose, time_context.now()))
    };

    world.get::<&mut LocalTransform>(entity)?.set_pose(&target);

    if let Ok(rigid_body) = world.get::<&RigidBody>(entity) {
        physics_context.move_to(rigid_body.handle, &target)?;
    }

    Ok(())
}

/// How far through the pull into the hand a grab is, from `0.0` to `1.0`
pub fn pull_ratio(grip: &Grip, now: f32) -> f32 {
    if grip.pull_duration <= 0.0 {
        return 1.0;
    }
    ((now - grip.grabbed_at) / grip.pull_duration).clamp(0.0, 1.0)
}

/// Where a held entity should be this tick.
///
/// The entity travels from where it was grabbed towards the hand, arriving once the pull
/// duration has elapsed. From then on it follows the hand exactly.
pub fn grabbed_target_pose(grip: &Grip, hand: &Pose, now: f32) -> Pose {
    let trajectory_end = hand.compose(&grip.trajectory_end);
    let mut pose = lerp_slerp(&grip.trajectory_start, &trajectory_end, pull_ratio(grip, now));
    pose.rotation = pose.rotation.normalize();
    pose
}
