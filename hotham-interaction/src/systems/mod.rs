/// Fills in each collider's contacts from the last physics step
pub mod collision;
/// Moves held objects along with the hand holding them
pub mod grabbed_motion;
/// Picks things up and puts them down
pub mod grabbing;
/// Poses hands from their controllers
pub mod hands;
/// Tells each grabbable whether it's being touched or pointed at
pub mod highlight;
/// Distance grabbing with a laser pointer
pub mod laser;
/// Steps the physics simulation
pub mod physics;
/// Choosing what a hand would grab
pub mod selection;
/// Helpers for the stage
pub mod stage;
/// Smoothly moves the player's stage
pub mod teleport_transition;
/// Copies simulated poses back into the world
pub mod update_local_transform_with_rigid_body;

pub use collision::collision_system;
pub use grabbed_motion::grabbed_motion_system;
pub use grabbing::grabbing_system;
pub use hands::hands_system;
pub use highlight::highlight_system;
pub use laser::laser_system;
pub use physics::physics_system;
pub use teleport_transition::teleport_transition_system;
pub use update_local_transform_with_rigid_body::update_local_transform_with_rigid_body_system;

use crate::Engine;

/// Run every interaction system, in the order they depend on each other.
/// Call once per tick, after [`Engine::update`].
pub fn interaction_systems(engine: &mut Engine) {
    hands_system(engine);
    collision_system(engine);
    grabbing_system(engine);
    grabbed_motion_system(engine);
    physics_system(engine);
    update_local_transform_with_rigid_body_system(engine);
    laser_system(engine);
    highlight_system(engine);
    teleport_transition_system(engine);
}
