use glam::Vec3;

/// Default reach of the laser, in metres
pub const LASER_MAX_DISTANCE: f32 = 10.0;
/// Length of the laser when it doesn't hit anything, in metres
pub const LASER_IDLE_LENGTH: f32 = 5.0;

/// A component added to a [`super::Hand`] to draw a pointer coming out of it.
/// Updated by `laser_system`
#[derive(Debug, Clone, PartialEq)]
pub struct HandLaser {
    /// How far does the laser reach?
    pub max_distance: f32,
    /// How long is the laser when it hits nothing?
    pub idle_length: f32,
    /// How long should the laser be drawn this frame?
    pub length: f32,
    /// Where the laser hit a [`super::UiPanel`], if it did
    pub ui_hit: Option<Vec3>,
}

impl Default for HandLaser {
    fn default() -> Self {
        Self {
            max_distance: LASER_MAX_DISTANCE,
            idle_length: LASER_IDLE_LENGTH,
            length: LASER_IDLE_LENGTH,
            ui_hit: None,
        }
    }
}
