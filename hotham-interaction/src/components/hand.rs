use glam::{Quat, Vec3};
use hecs::Entity;
use rapier3d::prelude::RigidBodyType;
use serde::{Deserialize, Serialize};

use super::{LocalTransform, Pose};
use crate::config::GrabberSettings;

/// A component that represents the "side" or "handedness" that an entity is on
/// Used by components such as `Hand` and `HandLaser` to identify which controller they should map to
#[derive(Debug, PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand side
    Left,
    /// Right hand side
    Right,
}

/// Everything a hand remembers about the entity it's holding
#[derive(Debug, Clone, PartialEq)]
pub struct Grip {
    /// The entity being held
    pub entity: Entity,
    /// When the grab began, in seconds
    pub grabbed_at: f32,
    /// How long the pull into the hand takes, in seconds
    pub pull_duration: f32,
    /// Where the entity sits relative to the hand, ignoring the pull
    pub position_offset: Vec3,
    /// How the entity is oriented relative to the hand, ignoring the pull
    pub rotation_offset: Quat,
    /// The entity's pose in the world when it was grabbed
    pub trajectory_start: Pose,
    /// Where the entity ends up relative to the hand once the pull completes
    pub trajectory_end: Pose,
    /// The hand's pose last tick
    pub last_hand_pose: Pose,
    /// How fast the hand moved over the last tick, in metres per second
    pub hand_linear_velocity: Vec3,
    /// How the entity's rigid body was simulated before it was made kinematic for the grab
    pub body_type_before_grab: Option<RigidBodyType>,
}

/// What a hand is currently doing
#[derive(Debug, Clone, PartialEq)]
pub enum GrabState {
    /// Not holding anything. `hovered` is the entity a distance grab would pick up.
    Idle {
        /// The current distance grab candidate
        hovered: Option<Entity>,
    },
    /// Holding something
    Grabbed(Grip),
}

impl Default for GrabState {
    fn default() -> Self {
        GrabState::Idle { hovered: None }
    }
}

/// A component that's added to an entity to represent a "hand" presence.
/// Used to give the player a feeling of immersion by allowing them to grab objects in the world
/// Requires `hands_system` and `grabbing_system`
#[derive(Debug, Clone)]
pub struct Hand {
    /// How much has this hand been gripped?
    pub grip_value: f32,
    /// Did the grip go from released to pressed this frame?
    pub grip_button_just_pressed: bool,
    /// Did the grip go from pressed to released this frame?
    pub grip_button_just_released: bool,
    /// Which side is this hand on?
    pub handedness: Handedness,
    /// What is this hand allowed to do?
    pub settings: GrabberSettings,
    /// Should the hand model be drawn?
    pub model_visible: bool,
    pub(crate) grab_state: GrabState,
    pub(crate) grab_volume_enabled: bool,
}

impl Hand {
    /// Create a new hand
    pub fn new(handedness: Handedness, settings: GrabberSettings) -> Hand {
        Hand {
            grip_value: 0.0,
            grip_button_just_pressed: false,
            grip_button_just_released: false,
            handedness,
            settings,
            model_visible: true,
            grab_state: GrabState::default(),
            grab_volume_enabled: true,
        }
    }

    /// Shortcut helper to create a Left hand
    pub fn left() -> Hand {
        Hand::new(Handedness::Left, Default::default())
    }

    /// Shortcut helper to create a right hand
    pub fn right() -> Hand {
        Hand::new(Handedness::Right, Default::default())
    }

    /// What is this hand doing?
    pub fn grab_state(&self) -> &GrabState {
        &self.grab_state
    }

    /// The entity this hand is holding, if any
    pub fn grabbed_entity(&self) -> Option<Entity> {
        match &self.grab_state {
            GrabState::Grabbed(grip) => Some(grip.entity),
            GrabState::Idle { .. } => None,
        }
    }

    /// The entity this hand would distance grab, if any. Always `None` while holding something.
    pub fn hovered_entity(&self) -> Option<Entity> {
        match &self.grab_state {
            GrabState::Idle { hovered } => *hovered,
            GrabState::Grabbed(_) => None,
        }
    }

    /// Details of the current grab
    pub fn grip(&self) -> Option<&Grip> {
        match &self.grab_state {
            GrabState::Grabbed(grip) => Some(grip),
            GrabState::Idle { .. } => None,
        }
    }

    /// Is the volume used to sense nearby grabbables active?
    pub fn grab_volume_enabled(&self) -> bool {
        self.grab_volume_enabled
    }

    /// The pose of this hand's grip point, given the hand's transform
    pub fn grip_pose(&self, hand_transform: &LocalTransform) -> Pose {
        hand_transform.pose().compose(&Pose::new(
            self.settings.grip_offset,
            self.settings.grip_rotation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    pub fn test_new_hand_is_idle() {
        let hand = Hand::left();
        assert_eq!(hand.handedness, Handedness::Left);
        assert_eq!(hand.grab_state(), &GrabState::Idle { hovered: None });
        assert!(hand.grabbed_entity().is_none());
        assert!(hand.hovered_entity().is_none());
        assert!(hand.grab_volume_enabled());
        assert!(hand.model_visible);
    }

    #[test]
    pub fn test_grip_pose() {
        let mut hand = Hand::right();
        hand.settings.grip_offset = [0.0, -0.1, 0.0].into();
        let transform = LocalTransform::from_rotation_translation(
            Quat::from_rotation_z(std::f32::consts::PI),
            [1.0, 1.0, 0.0].into(),
        );
        let grip = hand.grip_pose(&transform);
        assert_relative_eq!(grip.position, Vec3::new(1.0, 1.1, 0.0), epsilon = 1e-6);
    }

    #[test]
    pub fn test_hovered_hidden_while_grabbing() {
        let mut world = hecs::World::new();
        let entity = world.spawn((0u8,));
        let mut hand = Hand::left();
        hand.grab_state = GrabState::Idle {
            hovered: Some(entity),
        };
        assert_eq!(hand.hovered_entity(), Some(entity));

        hand.grab_state = GrabState::Grabbed(Grip {
            entity,
            grabbed_at: 0.0,
            pull_duration: 1.0,
            position_offset: Vec3::ZERO,
            rotation_offset: Quat::IDENTITY,
            trajectory_start: Pose::IDENTITY,
            trajectory_end: Pose::IDENTITY,
            last_hand_pose: Pose::IDENTITY,
            hand_linear_velocity: Vec3::ZERO,
            body_type_before_grab: None,
        });
        assert_eq!(hand.hovered_entity(), None);
        assert_eq!(hand.grabbed_entity(), Some(entity));
    }
}
