use super::Pose;
use crate::config::TeleportSettings;

/// Where a [`TeleportTransition`] is up to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeleportPhase {
    /// Nothing is happening
    #[default]
    Idle,
    /// The screen is fading to black
    FadingOut,
    /// The player has been moved and the screen is held black
    Teleporting,
    /// The screen is fading back in
    FadingIn,
}

/// A component added to the [`super::Stage`] to move the player with a fade to black, rather
/// than an instant (and nauseating) jump.
///
/// 1. Call [`TeleportTransition::begin`] with where you'd like the player to end up
/// 2. `teleport_transition_system` fades out, moves the stage and fades back in
///
/// Renderers should draw a black overlay with [`TeleportTransition::fade_alpha`].
#[derive(Debug, Clone, Default)]
pub struct TeleportTransition {
    /// Timing
    pub settings: TeleportSettings,
    pub(crate) phase: TeleportPhase,
    pub(crate) phase_started_at: f32,
    pub(crate) destination: Option<Pose>,
    pub(crate) fade_alpha: f32,
}

impl TeleportTransition {
    /// Create a new, idle transition
    pub fn new(settings: TeleportSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Start moving the stage to `destination`. Ignored if a transition is already under way.
    pub fn begin(&mut self, destination: Pose, now: f32) -> bool {
        if self.phase != TeleportPhase::Idle {
            return false;
        }

        self.destination = Some(destination);
        self.phase = TeleportPhase::FadingOut;
        self.phase_started_at = now;
        true
    }

    /// The current phase
    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }

    /// Is the player being moved? The fade in doesn't count.
    pub fn is_transitioning(&self) -> bool {
        matches!(
            self.phase,
            TeleportPhase::FadingOut | TeleportPhase::Teleporting
        )
    }

    /// How opaque the black overlay should be, from `0.0` to `1.0`
    pub fn fade_alpha(&self) -> f32 {
        self.fade_alpha
    }
}
