use hecs::World;
use log::warn;

use super::stage::get_global_from_stage;
use crate::{
    components::{Collider, Hand, LocalTransform},
    contexts::{InputContext, PhysicsContext},
    Engine,
};

/// Hands system
/// Moves each hand to where its controller is, and passes on the state of the grip
pub fn hands_system(engine: &mut Engine) {
    hands_system_inner(
        &mut engine.world,
        &engine.input_context,
        &mut engine.physics_context,
    )
}

/// Pose each hand from its controller, carrying its grab volume along with it
pub fn hands_system_inner(
    world: &mut World,
    input_context: &InputContext,
    physics_context: &mut PhysicsContext,
) {
    let global_from_stage = get_global_from_stage(world);

    for (entity, (hand, local_transform, collider)) in
        world.query_mut::<(&mut Hand, &mut LocalTransform, Option<&Collider>)>()
    {
        let input = input_context.hand(hand.handedness);

        // Controllers report their pose in stage space
        let global_from_grip = global_from_stage.compose(&input.stage_from_grip());
        local_transform.set_pose(&global_from_grip);

        if let Some(collider) = collider {
            if let Err(e) = physics_context.set_collider_pose(collider.handle, &global_from_grip) {
                warn!("[HOTHAM_HANDS] Unable to move grab volume for {entity:?}: {e}");
            }
        }

        hand.grip_value = input.grip_analog();
        hand.grip_button_just_pressed = input.grip_button_just_pressed();
        hand.grip_button_just_released = input.grip_button_just_released();
    }

    physics_context.update_query_pipeline();
}
