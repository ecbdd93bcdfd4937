use hecs::World;
use log::warn;

use crate::{
    components::{LocalTransform, RigidBody},
    contexts::PhysicsContext,
    util::pose_from_isometry,
    Engine,
};

/// Walks through each pair of `RigidBody`s and `LocalTransform`s and sets the `LocalTransform` accordingly
pub fn update_local_transform_with_rigid_body_system(engine: &mut Engine) {
    update_local_transform_with_rigid_body_system_inner(
        &mut engine.world,
        &engine.physics_context,
    );
}

/// Copy every rigid body's pose into its entity's [`LocalTransform`]
pub fn update_local_transform_with_rigid_body_system_inner(
    world: &mut World,
    physics_context: &PhysicsContext,
) {
    for (entity, (rigid_body, local_transform)) in
        world.query_mut::<(&RigidBody, &mut LocalTransform)>()
    {
        match physics_context.rigid_bodies.get(rigid_body.handle) {
            Some(body) => local_transform.set_pose(&pose_from_isometry(body.position())),
            None => warn!("[HOTHAM_PHYSICS] {entity:?} has an invalid rigid body handle"),
        }
    }
}
