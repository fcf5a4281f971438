//! Typed simulation events.
//!
//! Every externally observable state change is recorded as a `ShopEvent`
//! in a queue owned by the engine. Presentation layers (UI, audio, VFX)
//! drain the queue after each update; nothing in the core ever depends on
//! whether anyone is listening.

use hecs::Entity;

use pizzashop_logic::types::CookQuality;

/// Discrete, named simulation events carrying the affected entities.
#[derive(Debug, Clone, PartialEq)]
pub enum ShopEvent {
    // Containers
    ContainerAssigned { container: Entity, ingredient: String },
    ContainerRefilled { container: Entity, servings: u32 },
    ServingTaken { container: Entity, ingredient: String },
    ContainerReset { container: Entity },

    // Orders
    OrderReceived { order_id: u32 },
    OrderCompleted { order_id: u32, payment: u32 },
    OrderExpired { order_id: u32 },
    OrderTimerUpdated { order_id: u32, time_remaining: f32 },

    // Pizza assembly
    PizzaStarted { pizza: Entity, zone: Entity },
    IngredientAdded { pizza: Entity, ingredient: String },
    PizzaCompleted { pizza: Entity },
    PizzaCancelled { pizza: Entity },

    // Cooking
    PizzaPlacedInOven { pizza: Entity, oven: Entity, slot: usize },
    PizzaCooked { pizza: Entity, quality: CookQuality },
    PizzaBurnt { pizza: Entity },
    PizzaRemovedFromOven { pizza: Entity, oven: Entity },

    // Economy
    MoneyEarned { amount: u32, total: u64 },
}

/// Event queue owned by the simulation driver.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<ShopEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ShopEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<ShopEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShopEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = EventQueue::new();
        queue.push(ShopEvent::OrderReceived { order_id: 1 });
        queue.push(ShopEvent::OrderExpired { order_id: 1 });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
