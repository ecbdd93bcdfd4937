use glam::Vec4;

use crate::config::HighlightSettings;

/// How eager a grabbable is to be picked up, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    /// A hand is holding this
    Grabbed,
    /// A hand is pointing at this, or touching it
    ReadyToPickup,
    /// A hand is within range
    CloseBy,
    /// Nothing is nearby
    #[default]
    NotCloseBy,
}

impl HighlightState {
    /// The outline colour for this state
    pub fn color(&self, settings: &HighlightSettings) -> Vec4 {
        match self {
            HighlightState::Grabbed => settings.grabbed_color,
            HighlightState::ReadyToPickup => settings.ready_to_pickup_color,
            HighlightState::CloseBy => settings.close_by_color,
            HighlightState::NotCloseBy => settings.not_close_by_color,
        }
    }
}

/// A component added to a [`super::Grabbable`] to have it outlined. The outline itself is drawn
/// elsewhere - this just keeps track of what it should look like.
/// Updated by `highlight_system`
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    /// Colours and ranges
    pub settings: HighlightSettings,
    /// State as of the last tick
    pub state: HighlightState,
}

impl Highlight {
    /// Create a new highlight
    pub fn new(settings: HighlightSettings) -> Self {
        Self {
            settings,
            state: Default::default(),
        }
    }

    /// The colour the outline should be drawn in
    pub fn color(&self) -> Vec4 {
        self.state.color(&self.settings)
    }

    /// The width the outline should be drawn with
    pub fn outline_width(&self) -> f32 {
        self.settings.outline_width()
    }
}
