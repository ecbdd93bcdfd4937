/// Marker component for entities that a [`super::HandLaser`] should treat as user interface.
/// When the laser hits one of these, it reports where.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiPanel {}
