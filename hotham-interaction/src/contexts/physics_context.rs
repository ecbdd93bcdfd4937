use std::collections::HashSet;

use glam::Vec3;
use hecs::Entity;
use rapier3d::crossbeam::{self, channel::Receiver};
use rapier3d::na::Vector3;
use rapier3d::prelude::*;

use crate::{
    components::{Collider as ColliderComponent, Pose, RigidBody as RigidBodyComponent},
    util::{
        entity_from_user_data, glam_vec_from_na, isometry_from_pose, na_point_from_glam,
        na_vector_from_glam, user_data_from_entity,
    },
    InteractionError, InteractionResult,
};

/// A collider struck by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// The entity that owns the collider, if it has one
    pub entity: Option<Entity>,
    /// How far along the ray the hit occurred
    pub distance: f32,
}

/// Pairs of entities whose colliders should pass straight through each other.
/// Handed to rapier as its physics hooks each step.
#[derive(Debug, Clone, Default)]
pub struct IgnoredPairs {
    pairs: HashSet<(Entity, Entity)>,
}

impl IgnoredPairs {
    /// Start (or stop) ignoring collisions between `a` and `b`
    pub fn set(&mut self, a: Entity, b: Entity, ignore: bool) {
        let pair = ordered_pair(a, b);
        if ignore {
            self.pairs.insert(pair);
        } else {
            self.pairs.remove(&pair);
        }
    }

    /// Are collisions between `a` and `b` being ignored?
    pub fn contains(&self, a: Entity, b: Entity) -> bool {
        self.pairs.contains(&ordered_pair(a, b))
    }

    fn contains_colliders(
        &self,
        colliders: &ColliderSet,
        a: ColliderHandle,
        b: ColliderHandle,
    ) -> bool {
        if self.pairs.is_empty() {
            return false;
        }

        let entity = |handle: ColliderHandle| {
            colliders
                .get(handle)
                .and_then(|c| entity_from_user_data(c.user_data))
        };
        match (entity(a), entity(b)) {
            (Some(a), Some(b)) => self.contains(a, b),
            _ => false,
        }
    }
}

impl PhysicsHooks for IgnoredPairs {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        if self.contains_colliders(context.colliders, context.collider1, context.collider2) {
            None
        } else {
            Some(SolverFlags::COMPUTE_IMPULSES)
        }
    }

    fn filter_intersection_pair(&self, context: &PairFilterContext) -> bool {
        !self.contains_colliders(context.colliders, context.collider1, context.collider2)
    }
}

/// Everything needed to run the `rapier` simulation, plus the questions grabbing asks of it.
pub struct PhysicsContext {
    /// Steps the simulation
    pub physics_pipeline: PhysicsPipeline,
    /// Defaults to earth gravity
    pub gravity: Vector3<f32>,
    /// Answers ray casts
    pub query_pipeline: QueryPipeline,
    /// Every collider in the simulation
    pub colliders: ColliderSet,
    /// `rapier` broad phase
    pub broad_phase: BroadPhase,
    /// `rapier` narrow phase, which knows which colliders are touching
    pub narrow_phase: NarrowPhase,
    /// Every rigid body in the simulation
    pub rigid_bodies: RigidBodySet,
    /// `rapier` island manager
    pub island_manager: IslandManager,
    /// Collisions started or stopped during the last step
    pub collision_recv: Receiver<CollisionEvent>,
    /// Contact forces reported during the last step
    pub contact_force_recv: Receiver<ContactForceEvent>,
    /// Sends events to `collision_recv` and `contact_force_recv`
    pub event_handler: ChannelEventCollector,
    /// `rapier` integration parameters
    pub integration_parameters: IntegrationParameters,
    /// `rapier` impulse joints
    pub impulse_joints: ImpulseJointSet,
    /// `rapier` multibody joints
    pub multibody_joints: MultibodyJointSet,
    /// `rapier` CCD solver
    pub ccd_solver: CCDSolver,
    /// Pairs of entities that don't collide with each other, such as a hand and what it's holding
    pub ignored_pairs: IgnoredPairs,
}

impl Default for PhysicsContext {
    fn default() -> Self {
        let (collision_send, collision_recv) = crossbeam::channel::unbounded();
        let (contact_force_send, contact_force_recv) = crossbeam::channel::unbounded();
        let event_handler = ChannelEventCollector::new(collision_send, contact_force_send);
        let mut integration_parameters = IntegrationParameters::default();

        // TODO: This is *usually* 72fps on the Quest 2, but should follow the display refresh rate.
        integration_parameters.dt = 1. / 72.;

        PhysicsContext {
            physics_pipeline: PhysicsPipeline::new(),
            gravity: Vector3::new(0.0, -9.81, 0.0),
            query_pipeline: QueryPipeline::new(),
            colliders: ColliderSet::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            island_manager: IslandManager::new(),
            collision_recv,
            contact_force_recv,
            event_handler,
            integration_parameters,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            ignored_pairs: IgnoredPairs::default(),
        }
    }
}

impl PhysicsContext {
    /// Step the simulation once
    pub fn update(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.ignored_pairs,
            &self.event_handler,
        );
    }

    /// Bring ray casts up to date with colliders that were moved or added since the last step
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline
            .update(&self.rigid_bodies, &self.colliders);
    }

    /// Add a free-standing collider that belongs to `entity`
    pub fn add_collider(&mut self, entity: Entity, mut collider: Collider) -> ColliderHandle {
        prepare_collider(entity, &mut collider);
        let handle = self.colliders.insert(collider);
        self.update_query_pipeline();
        handle
    }

    /// Add a rigid body with a single collider, both belonging to `entity`
    pub fn create_rigid_body_and_collider(
        &mut self,
        entity: Entity,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyComponent, ColliderComponent) {
        let (rigid_body, mut handles) =
            self.add_rigid_body_with_colliders(entity, rigid_body, vec![collider]);
        let collider = ColliderComponent::new(handles.remove(0));
        (rigid_body, collider)
    }

    /// Add a rigid body with any number of colliders attached, all belonging to `entity`.
    /// Returns the body and the handles of the colliders, in the order they were given.
    pub fn add_rigid_body_with_colliders(
        &mut self,
        entity: Entity,
        rigid_body: RigidBody,
        colliders: Vec<Collider>,
    ) -> (RigidBodyComponent, Vec<ColliderHandle>) {
        let rigid_body_handle = self.rigid_bodies.insert(rigid_body);
        let collider_handles = colliders
            .into_iter()
            .map(|mut collider| {
                prepare_collider(entity, &mut collider);
                self.colliders
                    .insert_with_parent(collider, rigid_body_handle, &mut self.rigid_bodies)
            })
            .collect();
        self.update_query_pipeline();

        (RigidBodyComponent::new(rigid_body_handle), collider_handles)
    }

    /// The entity a collider belongs to
    pub fn entity_for_collider(&self, handle: ColliderHandle) -> Option<Entity> {
        self.colliders
            .get(handle)
            .and_then(|c| entity_from_user_data(c.user_data))
    }

    /// Every collider the ray passes through within `max_distance`.
    ///
    /// Hits are returned in the order the query pipeline finds them, **not** sorted by distance.
    pub fn cast_ray_all(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Vec<RayHit> {
        let ray = match ray_from(origin, direction) {
            Some(ray) => ray,
            None => return Vec::new(),
        };

        let mut hits = Vec::new();
        self.query_pipeline.intersections_with_ray(
            &self.rigid_bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            QueryFilter::default(),
            |handle, intersection| {
                hits.push(RayHit {
                    collider: handle,
                    entity: self.entity_for_collider(handle),
                    distance: intersection.toi,
                });
                true
            },
        );
        hits
    }

    /// The closest collider the ray hits within `max_distance`, skipping any that belong to
    /// `exclude`
    pub fn cast_ray_nearest(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let ray = ray_from(origin, direction)?;
        let not_excluded = |_: ColliderHandle, collider: &Collider| {
            exclude.is_none() || entity_from_user_data(collider.user_data) != exclude
        };
        let filter = QueryFilter::default().predicate(&not_excluded);

        let (handle, distance) = self.query_pipeline.cast_ray(
            &self.rigid_bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            filter,
        )?;

        Some(RayHit {
            collider: handle,
            entity: self.entity_for_collider(handle),
            distance,
        })
    }

    /// The point on the collider's world-space bounding box closest to `point`.
    /// Points inside the box are returned unchanged.
    pub fn closest_point_on_bounds(&self, handle: ColliderHandle, point: Vec3) -> Option<Vec3> {
        let aabb = self.colliders.get(handle)?.compute_aabb();
        let mins = glam_vec_from_na(&aabb.mins);
        let maxs = glam_vec_from_na(&aabb.maxs);
        Some(point.clamp(mins, maxs))
    }

    /// The centre of the collider's world-space bounding box
    pub fn bounds_center(&self, handle: ColliderHandle) -> Option<Vec3> {
        let aabb = self.colliders.get(handle)?.compute_aabb();
        Some(glam_vec_from_na(&aabb.center()))
    }

    /// Move a free-standing collider, such as a hand's grab volume
    pub fn set_collider_pose(
        &mut self,
        handle: ColliderHandle,
        pose: &Pose,
    ) -> InteractionResult<()> {
        self.colliders
            .get_mut(handle)
            .ok_or(InteractionError::InvalidHandle { kind: "collider" })?
            .set_position(isometry_from_pose(pose));
        Ok(())
    }

    /// Switch a collider on or off. Disabled colliders touch nothing and can't be hit by rays.
    pub fn set_collider_enabled(
        &mut self,
        handle: ColliderHandle,
        enabled: bool,
    ) -> InteractionResult<()> {
        self.colliders
            .get_mut(handle)
            .ok_or(InteractionError::InvalidHandle { kind: "collider" })?
            .set_enabled(enabled);
        Ok(())
    }

    /// Ask the physics simulation to move a body to `pose`.
    ///
    /// Kinematic bodies get there on the next step, anything else is placed there immediately.
    pub fn move_to(&mut self, handle: RigidBodyHandle, pose: &Pose) -> InteractionResult<()> {
        let rigid_body = self.rigid_body_mut(handle)?;
        let position = isometry_from_pose(pose);

        if rigid_body.is_kinematic() {
            rigid_body.set_next_kinematic_position(position);
        } else {
            rigid_body.set_position(position, true);
        }

        Ok(())
    }

    /// Change how a body is simulated, returning how it was simulated before
    pub fn set_body_type(
        &mut self,
        handle: RigidBodyHandle,
        body_type: RigidBodyType,
    ) -> InteractionResult<RigidBodyType> {
        let rigid_body = self.rigid_body_mut(handle)?;
        let previous = rigid_body.body_type();
        rigid_body.set_body_type(body_type, true);
        Ok(previous)
    }

    /// Give a body a push. Has no effect on bodies that aren't dynamic.
    pub fn set_linear_velocity(
        &mut self,
        handle: RigidBodyHandle,
        velocity: Vec3,
    ) -> InteractionResult<()> {
        let rigid_body = self.rigid_body_mut(handle)?;
        if rigid_body.is_dynamic() {
            rigid_body.set_linvel(na_vector_from_glam(velocity), true);
        }

        Ok(())
    }

    /// Stop (or resume) collisions between two entities' colliders
    pub fn set_ignore_collision(&mut self, a: Entity, b: Entity, ignore: bool) {
        self.ignored_pairs.set(a, b, ignore);
    }

    /// Should collisions between these two entities be ignored?
    pub fn is_collision_ignored(&self, a: Entity, b: Entity) -> bool {
        self.ignored_pairs.contains(a, b)
    }

    fn rigid_body_mut(&mut self, handle: RigidBodyHandle) -> InteractionResult<&mut RigidBody> {
        self.rigid_bodies
            .get_mut(handle)
            .ok_or(InteractionError::InvalidHandle { kind: "rigid body" })
    }
}

/// Tag the collider with its entity, and have rapier check it against [`IgnoredPairs`]
fn prepare_collider(entity: Entity, collider: &mut Collider) {
    collider.user_data = user_data_from_entity(entity);
    collider.set_active_hooks(
        ActiveHooks::FILTER_CONTACT_PAIRS | ActiveHooks::FILTER_INTERSECTION_PAIR,
    );
}

fn ray_from(origin: Vec3, direction: Vec3) -> Option<Ray> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }
    Some(Ray::new(
        na_point_from_glam(origin),
        na_vector_from_glam(direction),
    ))
}

fn ordered_pair(a: Entity, b: Entity) -> (Entity, Entity) {
    if a.to_bits() <= b.to_bits() {
        (a, b)
    } else {
        (b, a)
    }
}
