use hecs::{With, World};

use crate::components::{LocalTransform, Pose, Stage};

/// Get the pose of the stage in global space.
pub fn get_global_from_stage(world: &World) -> Pose {
    world
        .query::<With<&LocalTransform, &Stage>>()
        .iter()
        .next()
        .map(|(_, transform)| transform.pose())
        .unwrap_or_default()
}
