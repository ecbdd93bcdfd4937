use crate::{
    components::{hand::Handedness, Pose},
    config::{GRAB_BEGIN, GRAB_END},
};

/// Controller state for one hand. Fed by the host each tick with [`HandInput::update`].
#[derive(Debug, Clone, Default)]
pub struct HandInput {
    grip_analog: f32,
    grip_analog_prev: f32,
    stage_from_grip: Pose,
}

impl HandInput {
    /// Record this tick's grip value and pose
    pub fn update(&mut self, grip_analog: f32, stage_from_grip: Pose) {
        self.grip_analog_prev = self.grip_analog;
        self.grip_analog = grip_analog;
        self.stage_from_grip = stage_from_grip;
    }

    /// How hard the grip is squeezed, from `0.0` to `1.0`
    pub fn grip_analog(&self) -> f32 {
        self.grip_analog
    }

    /// Is the grip squeezed past [`GRAB_BEGIN`]?
    pub fn grip_button(&self) -> bool {
        self.grip_analog >= GRAB_BEGIN
    }

    /// Did the grip rise through [`GRAB_BEGIN`] this tick?
    pub fn grip_button_just_pressed(&self) -> bool {
        self.grip_analog_prev < GRAB_BEGIN && self.grip_analog >= GRAB_BEGIN
    }

    /// Did the grip fall through [`GRAB_END`] this tick?
    pub fn grip_button_just_released(&self) -> bool {
        self.grip_analog_prev > GRAB_END && self.grip_analog <= GRAB_END
    }

    /// Where the grip is, relative to the stage
    pub fn stage_from_grip(&self) -> Pose {
        self.stage_from_grip
    }
}

/// Input from both controllers
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    /// Left controller
    pub left: HandInput,
    /// Right controller
    pub right: HandInput,
}

impl InputContext {
    /// Input for one hand
    pub fn hand(&self, handedness: Handedness) -> &HandInput {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    /// Mutable input for one hand
    pub fn hand_mut(&mut self, handedness: Handedness) -> &mut HandInput {
        match handedness {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }
}
