/// Marker component for the player's frame of reference.
///
/// Hands are tracked relative to the stage, so moving the stage (eg. with a
/// [`super::TeleportTransition`]) moves the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stage {}
