use hecs::Entity;

/// The hands that are currently active, in the order they were registered.
/// Used to find every hand when deciding how to highlight a grabbable.
#[derive(Debug, Clone, Default)]
pub struct HandRegistry {
    hands: Vec<Entity>,
}

impl HandRegistry {
    /// Start tracking `hand`. Registering twice has no effect.
    pub fn register(&mut self, hand: Entity) {
        if !self.hands.contains(&hand) {
            self.hands.push(hand);
        }
    }

    /// Stop tracking `hand`. Does nothing if it isn't registered.
    pub fn unregister(&mut self, hand: Entity) {
        self.hands.retain(|h| *h != hand);
    }

    /// Every active hand
    pub fn hands(&self) -> &[Entity] {
        &self.hands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_hand_registry() {
        let mut world = hecs::World::new();
        let left = world.spawn((0u8,));
        let right = world.spawn((0u8,));
        let mut registry = HandRegistry::default();

        registry.register(left);
        registry.register(right);
        registry.register(left);
        assert_eq!(registry.hands(), &[left, right]);

        registry.unregister(left);
        registry.unregister(left);
        assert_eq!(registry.hands(), &[right]);
    }
}
