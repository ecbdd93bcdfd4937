use glam::{Affine3A, Quat, Vec3};
use rapier3d::na::Isometry3;
use serde::{Deserialize, Serialize};

use crate::util;

/// The entity's position in the game simulation.
///
/// Hands have this set each tick from the controller pose (see [`crate::systems::hands_system`]),
/// grabbed entities have it driven towards the hand by [`crate::systems::grabbed_motion_system`].
/// If the entity also has a [`super::RigidBody`], the physics simulation is told to follow along.
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct LocalTransform {
    /// The translation of the entity
    pub translation: Vec3,
    /// The rotation of the entity
    pub rotation: Quat,
    /// The non-uniform scale of the entity
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Create a unit-scale transform
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Convenience function to convert the [`LocalTransform`] into a [`glam::Affine3A`]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Update the scale, rotation and translation from a [`glam::Affine3A`]
    pub fn update_from_affine(&mut self, transform: &Affine3A) {
        let (scale, rotation, translation) = transform.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation;
        self.translation = translation;
    }

    /// Convenience function to convert the [`LocalTransform`] into a [`rapier3d::na::Isometry3`]
    pub fn to_isometry(&self) -> Isometry3<f32> {
        util::isometry_from_pose(&self.pose())
    }

    /// The position and orientation of this transform, ignoring scale
    pub fn pose(&self) -> Pose {
        Pose::new(self.translation, self.rotation)
    }

    /// Move to `pose`, leaving scale untouched
    pub fn set_pose(&mut self, pose: &Pose) {
        self.translation = pose.position;
        self.rotation = pose.rotation;
    }

    /// The direction this transform is facing
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// A position and an orientation. Unlike [`LocalTransform`] there is no scale.
#[derive(Clone, Copy, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Pose {
    /// Where
    pub position: Vec3,
    /// Which way
    pub rotation: Quat,
}

impl Pose {
    /// No translation, no rotation
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a new pose
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Treat `local` as being relative to this pose and return it in this pose's space.
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * local.position,
            rotation: self.rotation * local.rotation,
        }
    }
}
