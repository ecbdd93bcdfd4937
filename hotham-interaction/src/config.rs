use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::InteractionResult;

/// Grip value a controller must rise through to start a grab
pub const GRAB_BEGIN: f32 = 0.55;
/// Grip value a controller must fall through to end a grab
pub const GRAB_END: f32 = 0.35;

/// All the knobs, in one place. Every field falls back to its default when missing from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Applied to every hand added through the [`crate::Engine`]
    pub grabber: GrabberSettings,
    /// Applied to every grabbable added through the [`crate::Engine`]
    pub highlight: HighlightSettings,
    /// Used for teleport fades
    pub teleport: TeleportSettings,
}

impl InteractionConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> InteractionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How a [`crate::components::Hand`] is allowed to grab things
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrabberSettings {
    /// Can this hand pick up the closest grabbable?
    pub allow_hand_grabbing: bool,
    /// Can this hand pick things up by pointing at them?
    pub allow_distance_grabbing: bool,
    /// How far away can distance grabbing reach, in metres?
    pub max_grab_distance: f32,
    /// Cosine of the widest angle between the hand's forward axis and a distance grab target
    pub grab_angle_threshold: f32,
    /// How long it takes a grabbed object to be pulled into the hand, in seconds
    pub pull_duration: f32,
    /// Should the hand model disappear while holding something?
    pub hide_when_grabbing: bool,
    /// Position of the grip point relative to the hand
    pub grip_offset: Vec3,
    /// Rotation of the grip point relative to the hand
    pub grip_rotation: Quat,
}

impl Default for GrabberSettings {
    fn default() -> Self {
        Self {
            allow_hand_grabbing: true,
            allow_distance_grabbing: true,
            max_grab_distance: 5.0,
            grab_angle_threshold: 0.8,
            pull_duration: 1.0,
            hide_when_grabbing: true,
            grip_offset: Vec3::ZERO,
            grip_rotation: Quat::IDENTITY,
        }
    }
}

/// How grabbables are outlined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    /// Hands closer than this are considered "close by", in metres
    pub range: f32,
    /// Width of the outline. Clamped to `1.0..=8.0` when read
    pub outline_width: f32,
    /// Outline colour while held
    pub grabbed_color: Vec4,
    /// Outline colour when no hand is near
    pub not_close_by_color: Vec4,
    /// Outline colour when a hand is in range
    pub close_by_color: Vec4,
    /// Outline colour when a hand could grab this right now
    pub ready_to_pickup_color: Vec4,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            range: 3.0,
            outline_width: 3.0,
            grabbed_color: Vec4::ZERO,
            not_close_by_color: Vec4::ZERO,
            close_by_color: Vec4::ONE,
            ready_to_pickup_color: Vec4::new(1.0, 0.92, 0.016, 1.0),
        }
    }
}

impl HighlightSettings {
    /// The outline width, kept within sensible bounds
    pub fn outline_width(&self) -> f32 {
        self.outline_width.clamp(1.0, 8.0)
    }
}

/// Timing of the fade used when teleporting the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportSettings {
    /// How long the whole transition takes, in seconds. Clamped to `0.2..=2.0` when read
    pub transition_duration: f32,
    /// How long the screen stays black around the teleport, in seconds. Clamped to `0.0..=1.0` when read
    pub stay_faded_time: f32,
}

impl Default for TeleportSettings {
    fn default() -> Self {
        Self {
            transition_duration: 0.5,
            stay_faded_time: 0.1,
        }
    }
}

impl TeleportSettings {
    /// Length of the transition
    pub fn transition_duration(&self) -> f32 {
        self.transition_duration.clamp(0.2, 2.0)
    }

    /// Time spent fully faded
    pub fn stay_faded_time(&self) -> f32 {
        self.stay_faded_time.clamp(0.0, 1.0)
    }

    /// Time taken to fade to (or from) black
    pub fn fade_time(&self) -> f32 {
        self.transition_duration() / 2.
    }
}
