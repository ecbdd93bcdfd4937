use hecs::World;
use log::debug;

use crate::{
    components::{LocalTransform, Pose, TeleportPhase, TeleportTransition},
    Engine,
};

/// Teleport transition system
/// Fades out, moves whatever is being teleported (normally the stage), then fades back in
pub fn teleport_transition_system(engine: &mut Engine) {
    let now = engine.time_context.now();
    teleport_transition_system_inner(&mut engine.world, now);
}

/// Advance every teleport transition to `now`, applying any teleports that land
pub fn teleport_transition_system_inner(world: &mut World, now: f32) {
    for (entity, (transition, local_transform)) in
        world.query_mut::<(&mut TeleportTransition, &mut LocalTransform)>()
    {
        if let Some(destination) = advance_transition(transition, now) {
            debug!("[HOTHAM_TELEPORT] Moving {entity:?} to {destination:?}");
            local_transform.set_pose(&destination);
        }
    }
}

/// Move the transition along to `now`. Returns the destination on the tick the teleport happens.
///
/// The screen fades to black over half the transition duration and is held there until the full
/// duration has passed. It then stays black for half of the stay faded time on either side of the
/// teleport, before fading back in over the other half of the transition duration.
pub fn advance_transition(transition: &mut TeleportTransition, now: f32) -> Option<Pose> {
    let duration = transition.settings.transition_duration();
    let fade_time = transition.settings.fade_time();
    let half_stay_faded = transition.settings.stay_faded_time() / 2.;
    let elapsed = now - transition.phase_started_at;

    match transition.phase {
        TeleportPhase::Idle => {
            transition.fade_alpha = 0.;
            None
        }
        TeleportPhase::FadingOut => {
            transition.fade_alpha = fade(elapsed, fade_time);
            if elapsed < duration + half_stay_faded {
                return None;
            }

            transition.fade_alpha = 1.;
            transition.phase = TeleportPhase::Teleporting;
            transition.phase_started_at = now;
            transition.destination.take()
        }
        TeleportPhase::Teleporting => {
            transition.fade_alpha = 1.;
            if elapsed >= half_stay_faded {
                transition.phase = TeleportPhase::FadingIn;
                transition.phase_started_at = now;
            }
            None
        }
        TeleportPhase::FadingIn => {
            transition.fade_alpha = 1. - fade(elapsed, fade_time);
            if elapsed >= fade_time {
                transition.fade_alpha = 0.;
                transition.phase = TeleportPhase::Idle;
            }
            None
        }
    }
}

fn fade(elapsed: f32, fade_time: f32) -> f32 {
    if fade_time <= 0. {
        return 1.;
    }
    (elapsed / fade_time).clamp(0., 1.)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::Stage, config::TeleportSettings};
    use approx::assert_relative_eq;
    use glam::{Quat, Vec3};

    #[test]
    pub fn test_teleport_transition() {
        let mut world = World::new();
        let settings = TeleportSettings {
            transition_duration: 1.0,
            stay_faded_time: 0.2,
        };
        let stage = world.spawn((
            Stage {},
            LocalTransform::default(),
            TeleportTransition::new(settings),
        ));
        let destination = Pose::new([5., 0., 5.].into(), Quat::from_rotation_y(1.0));

        // Nothing happens until asked
        teleport_transition_system_inner(&mut world, 0.0);
        assert_eq!(
            world.get::<&TeleportTransition>(stage).unwrap().phase(),
            TeleportPhase::Idle
        );

        assert!(world
            .get::<&mut TeleportTransition>(stage)
            .unwrap()
            .begin(destination, 1.0));
        // A second request while under way is ignored
        assert!(!world
            .get::<&mut TeleportTransition>(stage)
            .unwrap()
            .begin(Pose::IDENTITY, 1.0));

        teleport_transition_system_inner(&mut world, 1.25);
        {
            let transition = world.get::<&TeleportTransition>(stage).unwrap();
            assert_eq!(transition.phase(), TeleportPhase::FadingOut);
            assert!(transition.is_transitioning());
            assert_relative_eq!(transition.fade_alpha(), 0.5);
        }
        assert_eq!(world.get::<&LocalTransform>(stage).unwrap().translation, Vec3::ZERO);

        // Faded out, but the stage hasn't moved yet
        teleport_transition_system_inner(&mut world, 2.05);
        {
            let transition = world.get::<&TeleportTransition>(stage).unwrap();
            assert_eq!(transition.phase(), TeleportPhase::FadingOut);
            assert_eq!(transition.fade_alpha(), 1.0);
        }
        assert_eq!(world.get::<&LocalTransform>(stage).unwrap().translation, Vec3::ZERO);

        teleport_transition_system_inner(&mut world, 2.15);
        assert_eq!(
            world.get::<&TeleportTransition>(stage).unwrap().phase(),
            TeleportPhase::Teleporting
        );
        assert_eq!(
            world.get::<&LocalTransform>(stage).unwrap().pose(),
            destination
        );

        teleport_transition_system_inner(&mut world, 2.3);
        {
            let transition = world.get::<&TeleportTransition>(stage).unwrap();
            assert_eq!(transition.phase(), TeleportPhase::FadingIn);
            assert!(!transition.is_transitioning());
        }

        teleport_transition_system_inner(&mut world, 2.55);
        assert_relative_eq!(
            world.get::<&TeleportTransition>(stage).unwrap().fade_alpha(),
            0.5,
            epsilon = 1e-5
        );

        teleport_transition_system_inner(&mut world, 2.85);
        {
            let transition = world.get::<&TeleportTransition>(stage).unwrap();
            assert_eq!(transition.phase(), TeleportPhase::Idle);
            assert_eq!(transition.fade_alpha(), 0.0);
        }

        // The stage stays put
        assert_eq!(
            world.get::<&LocalTransform>(stage).unwrap().pose(),
            destination
        );
    }
}
