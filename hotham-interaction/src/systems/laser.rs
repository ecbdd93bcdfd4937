use hecs::World;

use crate::{
    components::{HandLaser, LocalTransform, UiPanel},
    contexts::PhysicsContext,
    Engine,
};

/// Laser system
/// Points a laser out of each hand that has one, noting where it strikes any UI
pub fn laser_system(engine: &mut Engine) {
    laser_system_inner(&mut engine.world, &engine.physics_context);
}

/// Cast each hand's laser and record what it strikes
pub fn laser_system_inner(world: &mut World, physics_context: &PhysicsContext) {
    let world: &World = world;
    for (entity, (laser, transform)) in world
        .query::<(&mut HandLaser, &LocalTransform)>()
        .iter()
    {
        let origin = transform.translation;
        let direction = transform.forward();

        let hit =
            physics_context.cast_ray_nearest(origin, direction, laser.max_distance, Some(entity));
        match hit {
            Some(hit) => {
                laser.length = hit.distance;
                laser.ui_hit = hit
                    .entity
                    .filter(|e| world.get::<&UiPanel>(*e).is_ok())
                    .map(|_| origin + direction * hit.distance);
            }
            None => {
                laser.length = laser.idle_length;
                laser.ui_hit = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::Info, util::na_vector_from_glam};
    use approx::assert_relative_eq;
    use glam::{Quat, Vec3};
    use rapier3d::prelude::ColliderBuilder;

    fn add_wall(world: &mut World, physics_context: &mut PhysicsContext, z: f32) -> hecs::Entity {
        let entity = world.spawn((Info {
            name: "Wall".to_string(),
        },));
        physics_context.add_collider(
            entity,
            ColliderBuilder::cuboid(1.0, 1.0, 0.1)
                .translation(na_vector_from_glam([0., 0., z].into()))
                .build(),
        );
        entity
    }

    #[test]
    pub fn test_laser_system() {
        let mut world = World::new();
        let mut physics_context = PhysicsContext::default();
        let hand = world.spawn((
            HandLaser::default(),
            LocalTransform::default(),
        ));
        // The hand's own volume shouldn't block the laser
        physics_context.add_collider(hand, ColliderBuilder::ball(0.05).sensor(true).build());

        laser_system_inner(&mut world, &physics_context);
        {
            let laser = world.get::<&HandLaser>(hand).unwrap();
            assert_eq!(laser.length, 5.0);
            assert_eq!(laser.ui_hit, None);
        }

        let wall = add_wall(&mut world, &mut physics_context, 3.0);
        laser_system_inner(&mut world, &physics_context);
        {
            let laser = world.get::<&HandLaser>(hand).unwrap();
            assert_relative_eq!(laser.length, 2.9, epsilon = 1e-4);
            assert_eq!(laser.ui_hit, None);
        }

        world.insert_one(wall, UiPanel {}).unwrap();
        laser_system_inner(&mut world, &physics_context);
        {
            let laser = world.get::<&HandLaser>(hand).unwrap();
            assert_relative_eq!(laser.ui_hit.unwrap(), Vec3::new(0., 0., 2.9), epsilon = 1e-4);
        }

        // Turned away
        world.get::<&mut LocalTransform>(hand).unwrap().rotation =
            Quat::from_rotation_y(std::f32::consts::PI);
        laser_system_inner(&mut world, &physics_context);
        let laser = world.get::<&HandLaser>(hand).unwrap();
        assert_eq!(laser.length, 5.0);
        assert_eq!(laser.ui_hit, None);
    }

    #[test]
    pub fn test_laser_out_of_reach() {
        let mut world = World::new();
        let mut physics_context = PhysicsContext::default();
        let hand = world.spawn((HandLaser::default(), LocalTransform::default()));
        add_wall(&mut world, &mut physics_context, 12.0);

        laser_system_inner(&mut world, &physics_context);
        assert_eq!(world.get::<&HandLaser>(hand).unwrap().length, 5.0);
    }
}
