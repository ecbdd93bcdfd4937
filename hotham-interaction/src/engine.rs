use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, info};
use rapier3d::prelude::{
    ActiveCollisionTypes, ActiveEvents, Collider as RapierCollider, ColliderBuilder,
    RigidBody as RapierRigidBody,
};

use crate::{
    components::{
        hand::Handedness, Collider, Grabbable, Hand, Highlight, Info, LocalTransform, Pose, Stage,
        TeleportTransition,
    },
    config::InteractionConfig,
    contexts::{GrabbableRegistry, HandRegistry, InputContext, PhysicsContext, TimeContext},
    systems::grabbing::{end_grab, force_release},
    InteractionResult,
};

/// Radius of the sphere each hand uses to sense what it's touching, in metres
pub const HAND_GRAB_VOLUME_RADIUS: f32 = 0.05;

/// The sensor a hand uses to feel what it's touching. It senses fixed and kinematic colliders
/// as well as dynamic ones, since grabbables don't need to be simulated.
pub(crate) fn hand_grab_volume() -> RapierCollider {
    ColliderBuilder::ball(HAND_GRAB_VOLUME_RADIUS)
        .sensor(true)
        .active_collision_types(ActiveCollisionTypes::all())
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build()
}

/// Something happened to a grabbable. Collected each tick in [`Engine::grab_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrabEvent {
    /// `hand` picked up `entity`
    Started {
        /// The grabbable
        entity: Entity,
        /// The hand now holding it
        hand: Entity,
    },
    /// `hand` is no longer holding `entity`
    Ended {
        /// The grabbable
        entity: Entity,
        /// The hand that was holding it
        hand: Entity,
        /// The velocity the entity was thrown with. Zero if the other hand took it.
        linear_velocity: Vec3,
    },
}

/// Builder for `Engine`.
#[derive(Default)]
pub struct EngineBuilder {
    config: Option<InteractionConfig>,
}

impl EngineBuilder {
    /// Create an `EngineBuilder`
    pub fn new() -> Self {
        Default::default()
    }

    /// Use this configuration rather than the defaults
    pub fn config(&mut self, config: InteractionConfig) -> &mut Self {
        self.config = Some(config);
        self
    }

    /// Build the `Engine`
    pub fn build(&self) -> Engine {
        let config = self.config.unwrap_or_default();

        // Initialize the world with the stage, so the player can be moved around.
        let mut world = World::default();
        let stage_entity = world.spawn((
            Stage {},
            Info {
                name: "Stage".to_string(),
            },
            LocalTransform::default(),
            TeleportTransition::new(config.teleport),
        ));

        info!("[HOTHAM_INTERACTION] Engine ready");

        Engine {
            world,
            physics_context: Default::default(),
            input_context: Default::default(),
            time_context: Default::default(),
            grabbable_registry: Default::default(),
            hand_registry: Default::default(),
            stage_entity,
            config,
            grab_events: Vec::new(),
        }
    }
}

/// The Hotham Interaction Engine
/// Owns the world and everything the systems need to pick things up in it.
/// **IMPORTANT**: make sure you call `update` each tick, then run [`crate::systems::interaction_systems`]
pub struct Engine {
    /// World
    pub world: World,
    /// Physics context
    pub physics_context: PhysicsContext,
    /// Input context
    pub input_context: InputContext,
    /// Time context
    pub time_context: TimeContext,
    /// Grabbables that hands can currently see
    pub grabbable_registry: GrabbableRegistry,
    /// Hands that are currently active
    pub hand_registry: HandRegistry,
    /// Stage entity
    pub stage_entity: Entity,
    /// The configuration the engine was built with
    pub config: InteractionConfig,
    /// Everything that was grabbed or released this tick
    pub grab_events: Vec<GrabEvent>,
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl Engine {
    /// Create a new engine with the default configuration
    pub fn new() -> Self {
        Default::default()
    }

    /// Start a new tick, `delta_time` seconds after the last one.
    /// Events from the previous tick are discarded.
    pub fn update(&mut self, delta_time: f32) {
        self.time_context.advance(delta_time);
        self.grab_events.clear();
    }

    /// Events from the current tick
    pub fn grab_events(&self) -> &[GrabEvent] {
        &self.grab_events
    }

    /// Add a hand with a sensing volume, and make it active.
    pub fn add_hand(&mut self, handedness: Handedness) -> InteractionResult<Entity> {
        let name = match handedness {
            Handedness::Left => "Left Hand",
            Handedness::Right => "Right Hand",
        };
        let entity = self.world.spawn((
            Hand::new(handedness, self.config.grabber),
            Info {
                name: name.to_string(),
            },
            LocalTransform::default(),
        ));

        let handle = self.physics_context.add_collider(entity, hand_grab_volume());
        self.world.insert_one(entity, Collider::new(handle))?;

        self.hand_registry.register(entity);
        debug!("[HOTHAM_INTERACTION] Added {name}: {entity:?}");
        Ok(entity)
    }

    /// Deactivate a hand, dropping anything it's holding.
    pub fn remove_hand(&mut self, hand: Entity) -> InteractionResult<()> {
        end_grab(
            &mut self.world,
            &mut self.physics_context,
            hand,
            &mut self.grab_events,
        )?;
        self.hand_registry.unregister(hand);
        Ok(())
    }

    /// Add a grabbable entity whose grab points are `colliders`, attached to `rigid_body`.
    /// The entity is outlined with the configured highlight settings and made active straight away.
    pub fn add_grabbable(
        &mut self,
        name: &str,
        local_transform: LocalTransform,
        mut rigid_body: RapierRigidBody,
        colliders: Vec<RapierCollider>,
        mut grabbable: Grabbable,
    ) -> InteractionResult<Entity> {
        let entity = self.world.spawn((
            Info {
                name: name.to_string(),
            },
            local_transform,
        ));

        rigid_body.set_position(local_transform.to_isometry(), false);
        let (rigid_body, grab_points) =
            self.physics_context
                .add_rigid_body_with_colliders(entity, rigid_body, colliders);
        grabbable.grab_points.extend(grab_points);

        self.grabbable_registry.register(entity, &grabbable);
        self.world.insert(
            entity,
            (rigid_body, Highlight::new(self.config.highlight), grabbable),
        )?;

        debug!("[HOTHAM_INTERACTION] Added grabbable {name}: {entity:?}");
        Ok(entity)
    }

    /// Make a grabbable visible to hands again
    pub fn activate_grabbable(&mut self, entity: Entity) -> InteractionResult<()> {
        let grabbable = self.world.get::<&Grabbable>(entity)?;
        self.grabbable_registry.register(entity, &grabbable);
        Ok(())
    }

    /// Hide a grabbable from hands. If it's being held, it's dropped.
    pub fn deactivate_grabbable(&mut self, entity: Entity) -> InteractionResult<()> {
        force_release(
            &mut self.world,
            &mut self.physics_context,
            entity,
            &mut self.grab_events,
        )?;
        self.grabbable_registry.unregister(entity);
        Ok(())
    }

    /// Fade out, move the player to `destination` and fade back in.
    /// Returns `false` if a teleport is already under way.
    pub fn teleport(&mut self, destination: Pose) -> InteractionResult<bool> {
        let now = self.time_context.now();
        let mut transition = self
            .world
            .get::<&mut TeleportTransition>(self.stage_entity)?;
        Ok(transition.begin(destination, now))
    }
}
