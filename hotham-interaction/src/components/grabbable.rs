use glam::{Quat, Vec3};
use hecs::Entity;
use rapier3d::prelude::ColliderHandle;

use super::LocalTransform;

/// The pose a grabbable should settle into once it's in the hand, expressed relative to
/// the grabbable itself. Typically authored as a child node of the grabbable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnchor {
    /// Position of the anchor relative to its parent
    pub local_position: Vec3,
    /// Rotation of the anchor relative to its parent
    pub local_rotation: Quat,
    /// World scale of the anchor's parent
    pub parent_scale: Vec3,
}

impl SnapAnchor {
    /// Create an anchor whose parent has unit scale
    pub fn new(local_position: Vec3, local_rotation: Quat) -> Self {
        Self {
            local_position,
            local_rotation,
            parent_scale: Vec3::ONE,
        }
    }

    /// Where the anchor is in the world, given the transform of the entity it belongs to
    pub fn world_position(&self, owner: &LocalTransform) -> Vec3 {
        owner.translation + owner.rotation * (self.local_position * self.parent_scale)
    }

    /// How the anchor is oriented in the world, given the transform of the entity it belongs to
    pub fn world_rotation(&self, owner: &LocalTransform) -> Quat {
        owner.rotation * self.local_rotation
    }
}

/// A component added to an entity to allow it to be picked up by a [`super::Hand`].
///
/// Remember to register the entity with the [`crate::contexts::GrabbableRegistry`] (or use
/// [`crate::Engine::add_grabbable`]), otherwise no hand will ever see it.
#[derive(Debug, Clone)]
pub struct Grabbable {
    /// Colliders used to decide how close a hand is, and what a distance grab ray hit. The first
    /// one is the primary grab point.
    pub grab_points: Vec<ColliderHandle>,
    /// Optional pose to snap into when held
    pub snap_anchor: Option<SnapAnchor>,
    /// Can a second hand take this straight out of the first?
    pub allows_offhand_steal: bool,
    /// Can this be grabbed from across the room?
    pub is_distance_grabbable: bool,
    grabbed_by: Option<Entity>,
}

impl Default for Grabbable {
    fn default() -> Self {
        Self {
            grab_points: Vec::new(),
            snap_anchor: None,
            allows_offhand_steal: true,
            is_distance_grabbable: false,
            grabbed_by: None,
        }
    }
}

impl Grabbable {
    /// Create a grabbable with the given grab points
    pub fn new(grab_points: Vec<ColliderHandle>) -> Self {
        Self {
            grab_points,
            ..Default::default()
        }
    }

    /// Shortcut helper to create a grabbable that can also be grabbed from a distance
    pub fn distance(grab_points: Vec<ColliderHandle>) -> Self {
        Self {
            grab_points,
            is_distance_grabbable: true,
            ..Default::default()
        }
    }

    /// Allow this to be grabbed from a distance as well
    pub fn distance_grabbable(mut self) -> Self {
        self.is_distance_grabbable = true;
        self
    }

    /// Snap into `anchor` when held
    pub fn with_snap_anchor(mut self, anchor: SnapAnchor) -> Self {
        self.snap_anchor = Some(anchor);
        self
    }

    /// Decide whether the other hand can take this while it's held
    pub fn allowing_offhand_steal(mut self, allowed: bool) -> Self {
        self.allows_offhand_steal = allowed;
        self
    }

    /// Is a hand holding this right now?
    pub fn is_grabbed(&self) -> bool {
        self.grabbed_by.is_some()
    }

    /// The hand that's holding this, if any
    pub fn grabbed_by(&self) -> Option<Entity> {
        self.grabbed_by
    }

    /// Could a hand that isn't already holding this pick it up?
    pub fn is_available(&self) -> bool {
        !self.is_grabbed() || self.allows_offhand_steal
    }

    /// Does this collider belong to this grabbable?
    pub fn has_grab_point(&self, collider: ColliderHandle) -> bool {
        self.grab_points.contains(&collider)
    }

    /// The first grab point
    pub fn primary_grab_point(&self) -> Option<ColliderHandle> {
        self.grab_points.first().copied()
    }

    pub(crate) fn set_grabbed_by(&mut self, hand: Option<Entity>) {
        self.grabbed_by = hand;
    }
}
