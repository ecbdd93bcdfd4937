use hecs::{Entity, World};

use crate::{
    components::{Collider, Grabbable, Hand, Highlight, HighlightState, LocalTransform},
    contexts::HandRegistry,
    Engine,
};

/// Highlight system
/// Decides how each [`Highlight`]ed grabbable should be outlined this tick
pub fn highlight_system(engine: &mut Engine) {
    highlight_system_inner(&mut engine.world, &engine.hand_registry);
}

/// Evaluate the highlight of every grabbable against every registered hand
pub fn highlight_system_inner(world: &mut World, hands: &HandRegistry) {
    let states: Vec<(Entity, HighlightState)> = {
        let world: &World = world;
        world
            .query::<&Highlight>()
            .iter()
            .map(|(entity, highlight)| {
                (
                    entity,
                    evaluate_highlight(world, hands, entity, highlight.settings.range),
                )
            })
            .collect()
    };

    for (entity, state) in states {
        if let Ok(mut highlight) = world.get::<&mut Highlight>(entity) {
            highlight.state = state;
        }
    }
}

/// How `entity` should be outlined, given what every hand is doing.
///
/// Being held trumps everything. Next comes a hand that could pick it up right now, either
/// because it's pointing at it or touching it. Failing that, is any hand within `range`?
pub fn evaluate_highlight(
    world: &World,
    hands: &HandRegistry,
    entity: Entity,
    range: f32,
) -> HighlightState {
    if let Ok(grabbable) = world.get::<&Grabbable>(entity) {
        if grabbable.is_grabbed() {
            return HighlightState::Grabbed;
        }
    }

    let position = world
        .get::<&LocalTransform>(entity)
        .map(|transform| transform.translation)
        .ok();

    let mut close_by = false;
    for &hand_entity in hands.hands() {
        let hand = match world.get::<&Hand>(hand_entity) {
            Ok(hand) => hand,
            Err(_) => continue,
        };

        if hand.hovered_entity() == Some(entity) {
            return HighlightState::ReadyToPickup;
        }

        if let Ok(collider) = world.get::<&Collider>(hand_entity) {
            if collider.is_touching(entity) {
                return HighlightState::ReadyToPickup;
            }
        }

        if let (Some(position), Ok(hand_transform)) =
            (position, world.get::<&LocalTransform>(hand_entity))
        {
            if hand_transform.translation.distance(position) < range {
                close_by = true;
            }
        }
    }

    if close_by {
        HighlightState::CloseBy
    } else {
        HighlightState::NotCloseBy
    }
}
