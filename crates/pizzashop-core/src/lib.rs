//! PizzaShop Core - Headless Restaurant Simulation Engine
//!
//! A frame-driven simulation of a pizza shop: serving containers, assembly
//! zones, ovens with independently timed slots, and a customer order queue
//! with pluggable generation strategies.
//!
//! # Architecture
//!
//! Kitchen entities live in a `hecs` world:
//! - **Entities**: containers, pizzas, assembly zones, ovens
//! - **Components**: state-machine structs attached to entities
//!   (`Container`, `Pizza`, `AssemblyZone`, `Oven`)
//! - **Systems**: world-level operations and per-frame ticking
//!
//! Orders are owned by the [`orders::OrderManager`], not the world. All
//! state changes are recorded as [`events::ShopEvent`] values in an event
//! queue drained by the embedding driver.
//!
//! # Example
//!
//! ```rust,no_run
//! use pizzashop_core::prelude::*;
//! use pizzashop_core::catalog::DataCatalog;
//! use pizzashop_core::orders::{OrderConfig, OrderGenerationMode};
//!
//! let catalog = DataCatalog::from_json(include_str!("../../../data/catalog.json")).unwrap();
//! let mut engine = ShopEngine::new(catalog, OrderConfig::default(), OrderGenerationMode::Simple);
//!
//! // Run the shop
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for event in engine.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod catalog;
pub mod components;
pub mod engine;
pub mod events;
pub mod generation;
pub mod orders;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::ShopEngine;
    pub use crate::events::{EventQueue, ShopEvent};
    pub use pizzashop_logic::types::*;
}
