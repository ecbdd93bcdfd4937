/// A volume that senses what it touches
pub mod collider;
/// Things a hand can pick up
pub mod grabbable;
/// Controllers that can grab things
pub mod hand;
/// A pointer that comes out of a hand
pub mod hand_laser;
/// How a grabbable should be outlined
pub mod highlight;
/// Human readable information about an entity
pub mod info;
/// Where an entity is in the world
pub mod local_transform;
/// A body in the physics simulation
pub mod rigid_body;
/// The player's play area
pub mod stage;
/// A fade out, move and fade in
pub mod teleport_transition;
/// A panel the laser can point at
pub mod ui_panel;

pub use collider::Collider;
pub use grabbable::{Grabbable, SnapAnchor};
pub use hand::{GrabState, Grip, Hand, Handedness};
pub use hand_laser::HandLaser;
pub use highlight::{Highlight, HighlightState};
pub use info::Info;
pub use local_transform::{LocalTransform, Pose};
pub use rigid_body::RigidBody;
pub use stage::Stage;
pub use teleport_transition::{TeleportPhase, TeleportTransition};
pub use ui_panel::UiPanel;
