use crate::Engine;

/// Physics system
/// Steps the simulation once. Run after anything that moves rigid bodies.
pub fn physics_system(engine: &mut Engine) {
    // TODO: We may want to adjust this so that the step length follows `TimeContext::delta`
    engine.physics_context.update();
}
