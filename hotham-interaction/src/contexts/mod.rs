/// Which grabbables hands can currently see
pub mod grabbable_registry;
/// Which hands are currently active
pub mod hand_registry;
/// Controller input, fed in by the host
pub mod input_context;
/// The `rapier` simulation
pub mod physics_context;
/// The tick clock
pub mod time_context;

pub use grabbable_registry::GrabbableRegistry;
pub use hand_registry::HandRegistry;
pub use input_context::{HandInput, InputContext};
pub use physics_context::{IgnoredPairs, PhysicsContext, RayHit};
pub use time_context::TimeContext;
