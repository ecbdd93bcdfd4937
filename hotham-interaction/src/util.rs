use glam::{Quat, Vec3};
use hecs::Entity;
use rapier3d::na::{self, Isometry3, Point3, Vector3};

use crate::components::Pose;

#[inline]
/// Convert a [`Pose`] into a [`rapier3d::na::Isometry3`]
pub fn isometry_from_pose(pose: &Pose) -> Isometry3<f32> {
    let t = pose.position;
    let r = pose.rotation;
    let translation = na::Translation3::new(t.x, t.y, t.z);
    let rotation = na::UnitQuaternion::new_normalize(na::Quaternion::new(r.w, r.x, r.y, r.z));

    Isometry3::from_parts(translation, rotation)
}

#[inline]
/// Decompose a [`rapier3d::na::Isometry3`] into a [`Pose`]
pub fn pose_from_isometry(i: &Isometry3<f32>) -> Pose {
    let q = i.rotation.quaternion();
    let t = &i.translation.vector;
    Pose::new(
        Vec3::new(t.x, t.y, t.z),
        Quat::from_xyzw(q.i, q.j, q.k, q.w),
    )
}

#[inline]
/// Convert a [`glam::Vec3`] into a [`rapier3d::na::Vector3`]
pub fn na_vector_from_glam(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

#[inline]
/// Convert a [`glam::Vec3`] into a [`rapier3d::na::Point3`]
pub fn na_point_from_glam(v: Vec3) -> Point3<f32> {
    Point3::new(v.x, v.y, v.z)
}

#[inline]
/// Convert a [`rapier3d::na::Point3`] into a [`glam::Vec3`]
pub fn glam_vec_from_na(p: &Point3<f32>) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

/// Pack an entity into rapier's `user_data` so it can be recovered from a collider
pub fn user_data_from_entity(entity: Entity) -> u128 {
    entity.to_bits().get() as _
}

/// Recover the entity stored in a collider's `user_data`
pub fn entity_from_user_data(user_data: u128) -> Option<Entity> {
    Entity::from_bits(user_data as u64)
}

/// Interpolate between two poses: linearly for position, along the shortest arc for rotation.
pub fn lerp_slerp(a: &Pose, b: &Pose, s: f32) -> Pose {
    Pose::new(
        a.position.lerp(b.position, s),
        a.rotation.slerp(b.rotation, s),
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    pub fn test_isometry_round_trip() {
        let pose = Pose::new([1.0, -2.0, 3.0].into(), Quat::from_rotation_z(0.7));
        let isometry = isometry_from_pose(&pose);
        let back = pose_from_isometry(&isometry);
        assert_relative_eq!(back.position, pose.position);
        assert_relative_eq!(back.rotation, pose.rotation, epsilon = 1e-6);
    }

    #[test]
    pub fn test_lerp_slerp() {
        let a = Pose::IDENTITY;
        let b = Pose::new([2.0, 0.0, 0.0].into(), Quat::from_rotation_y(1.0));
        let halfway = lerp_slerp(&a, &b, 0.5);
        assert_relative_eq!(halfway.position, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(halfway.rotation, Quat::from_rotation_y(0.5), epsilon = 1e-6);
        let start = lerp_slerp(&a, &b, 0.0);
        assert_relative_eq!(start.position, a.position);
        assert_relative_eq!(start.rotation, a.rotation, epsilon = 1e-6);
    }

    #[test]
    pub fn test_entity_user_data() {
        let mut world = hecs::World::new();
        let entity = world.spawn((1u8,));
        let user_data = user_data_from_entity(entity);
        assert_eq!(entity_from_user_data(user_data), Some(entity));
        assert_eq!(entity_from_user_data(0), None);
    }
}
