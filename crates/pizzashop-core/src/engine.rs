//! Shop engine — main entry point for running the simulation.
//!
//! Owns the world, the catalog, the order manager and the event queue.
//! An external clock drives `update(dt)`; player-facing operations are
//! methods that delegate to the component state machines and systems.

use std::fmt;

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pizzashop_logic::types::PizzaSize;

use crate::catalog::DataCatalog;
use crate::components::{Container, ContainerError, Oven, OvenError, Pizza};
use crate::events::{EventQueue, ShopEvent};
use crate::generation::{build_kitchen, KitchenError, KitchenLayout, KitchenSetup};
use crate::orders::{GenerateError, OrderConfig, OrderGenerationMode, OrderManager, ValidationError};
use crate::systems::{
    add_ingredient, cancel_pizza, oven_system, remove_pizza, start_pizza, try_place_pizza,
    try_remove_cooked_pizza, AssemblyError, PlacePizzaError, RemovePizzaError,
};

/// Failures surfaced by engine-level operations
#[derive(Debug)]
pub enum ShopError {
    MissingContainer,
    MissingOven,
    MissingPizza,
    UnknownIngredient(String),
    Container(ContainerError),
    Assembly(AssemblyError),
    Oven(OvenError),
    PlacePizza(PlacePizzaError),
    RemovePizza(RemovePizzaError),
    Validation(ValidationError),
    Generate(GenerateError),
    /// No active order matches the submitted pizza
    NoMatchingOrder,
    Kitchen(KitchenError),
}

impl fmt::Display for ShopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopError::MissingContainer => write!(f, "no container at this entity"),
            ShopError::MissingOven => write!(f, "no oven at this entity"),
            ShopError::MissingPizza => write!(f, "no pizza at this entity"),
            ShopError::UnknownIngredient(id) => write!(f, "ingredient not found: {}", id),
            ShopError::Container(e) => write!(f, "{}", e),
            ShopError::Assembly(e) => write!(f, "{}", e),
            ShopError::Oven(e) => write!(f, "{}", e),
            ShopError::PlacePizza(e) => write!(f, "{}", e),
            ShopError::RemovePizza(e) => write!(f, "{}", e),
            ShopError::Validation(e) => write!(f, "{}", e),
            ShopError::Generate(e) => write!(f, "{}", e),
            ShopError::NoMatchingOrder => write!(f, "no matching order found for this pizza"),
            ShopError::Kitchen(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShopError {}

/// Main simulation driver.
pub struct ShopEngine {
    /// ECS world holding containers, pizzas, zones and ovens
    pub world: World,
    catalog: DataCatalog,
    orders: OrderManager,
    events: EventQueue,
    layout: Option<KitchenLayout>,
    sim_time: f64,
    time_scale: f32,
    rng: StdRng,
}

impl ShopEngine {
    /// Create an engine seeded from entropy.
    pub fn new(catalog: DataCatalog, config: OrderConfig, mode: OrderGenerationMode) -> Self {
        Self::with_seed(catalog, config, mode, rand::random())
    }

    /// Create an engine with a fixed RNG seed for reproducible runs.
    pub fn with_seed(
        catalog: DataCatalog,
        config: OrderConfig,
        mode: OrderGenerationMode,
        seed: u64,
    ) -> Self {
        Self {
            world: World::new(),
            catalog,
            orders: OrderManager::new(config, mode),
            events: EventQueue::new(),
            layout: None,
            sim_time: 0.0,
            time_scale: 1.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build the kitchen described by `setup` into the world.
    pub fn setup_kitchen(&mut self, setup: &KitchenSetup) -> Result<(), ShopError> {
        let layout =
            build_kitchen(&mut self.world, &self.catalog, setup).map_err(ShopError::Kitchen)?;
        self.layout = Some(layout);
        Ok(())
    }

    /// Advance the simulation by `delta_seconds` of wall-clock time.
    ///
    /// Within one frame, order timers update before new-order generation
    /// is considered; ovens tick afterwards, slots in index order.
    pub fn update(&mut self, delta_seconds: f32) {
        let dt = (delta_seconds * self.time_scale).max(0.0);
        self.sim_time += dt as f64;

        self.orders.update(dt, &mut self.rng, &mut self.events);
        oven_system(&mut self.world, dt, &mut self.events);
    }

    // ==================== Containers ====================

    /// Take one serving from a container; returns the ingredient id.
    pub fn take_serving(&mut self, container: Entity) -> Result<String, ShopError> {
        let ingredient = {
            let mut c = self
                .world
                .get::<&mut Container>(container)
                .map_err(|_| ShopError::MissingContainer)?;
            c.remove_serving().map_err(ShopError::Container)?
        };

        self.events.push(ShopEvent::ServingTaken {
            container,
            ingredient: ingredient.clone(),
        });
        if let Ok(c) = self.world.get::<&Container>(container) {
            if c.is_empty() {
                self.events.push(ShopEvent::ContainerReset { container });
            }
        }
        Ok(ingredient)
    }

    /// Add one serving of an ingredient, assigning the container on first
    /// fill. Different ingredients than the assigned one are rejected.
    pub fn refill_container(
        &mut self,
        container: Entity,
        ingredient_id: &str,
    ) -> Result<(), ShopError> {
        if self.catalog.try_get_ingredient(ingredient_id).is_none() {
            return Err(ShopError::UnknownIngredient(ingredient_id.to_string()));
        }

        let (newly_assigned, servings) = {
            let mut c = self
                .world
                .get::<&mut Container>(container)
                .map_err(|_| ShopError::MissingContainer)?;
            let was_assigned = c.assigned_ingredient().is_some();
            c.try_fill(ingredient_id).map_err(ShopError::Container)?;
            (!was_assigned, c.servings())
        };

        if newly_assigned {
            self.events.push(ShopEvent::ContainerAssigned {
                container,
                ingredient: ingredient_id.to_string(),
            });
        }
        self.events.push(ShopEvent::ContainerRefilled {
            container,
            servings,
        });
        Ok(())
    }

    // ==================== Assembly ====================

    /// Start a new pizza in an assembly zone.
    pub fn start_pizza(&mut self, zone: Entity, size: PizzaSize) -> Result<Entity, ShopError> {
        start_pizza(&mut self.world, zone, size, &mut self.events).map_err(ShopError::Assembly)
    }

    /// Add a catalog ingredient to the zone's pizza.
    pub fn add_ingredient(&mut self, zone: Entity, ingredient_id: &str) -> Result<(), ShopError> {
        let record = self
            .catalog
            .try_get_ingredient(ingredient_id)
            .cloned()
            .ok_or_else(|| ShopError::UnknownIngredient(ingredient_id.to_string()))?;
        add_ingredient(&mut self.world, zone, &record, &mut self.events)
            .map_err(ShopError::Assembly)
    }

    /// Take the pizza out of a zone; ownership passes to the caller.
    pub fn pick_up_pizza(&mut self, zone: Entity) -> Result<Entity, ShopError> {
        remove_pizza(&mut self.world, zone).map_err(ShopError::Assembly)
    }

    /// Discard a zone's pizza entirely.
    pub fn cancel_pizza(&mut self, zone: Entity) -> Result<(), ShopError> {
        cancel_pizza(&mut self.world, zone, &mut self.events).map_err(ShopError::Assembly)
    }

    // ==================== Cooking ====================

    pub fn turn_oven_on(&mut self, oven: Entity) -> Result<(), ShopError> {
        let mut o = self
            .world
            .get::<&mut Oven>(oven)
            .map_err(|_| ShopError::MissingOven)?;
        o.turn_on().map_err(ShopError::Oven)
    }

    pub fn turn_oven_off(&mut self, oven: Entity) -> Result<(), ShopError> {
        let mut o = self
            .world
            .get::<&mut Oven>(oven)
            .map_err(|_| ShopError::MissingOven)?;
        o.turn_off().map_err(ShopError::Oven)
    }

    /// Place a complete pizza in an oven; returns the slot index.
    pub fn place_pizza_in_oven(
        &mut self,
        oven: Entity,
        pizza: Entity,
    ) -> Result<usize, ShopError> {
        try_place_pizza(&mut self.world, oven, pizza, &mut self.events)
            .map_err(ShopError::PlacePizza)
    }

    /// Remove the first cooked pizza from an oven.
    pub fn remove_cooked_pizza(&mut self, oven: Entity) -> Result<Entity, ShopError> {
        try_remove_cooked_pizza(&mut self.world, oven, &mut self.events)
            .map_err(ShopError::RemovePizza)
    }

    // ==================== Orders ====================

    /// Submit a pizza against whichever active order it satisfies. On
    /// success the pizza is consumed and the payout returned.
    pub fn submit_pizza(&mut self, pizza: Entity) -> Result<u32, ShopError> {
        let order_id = {
            let p = self
                .world
                .get::<&Pizza>(pizza)
                .map_err(|_| ShopError::MissingPizza)?;
            self.orders
                .find_matching_order(&p.contents())
                .ok_or(ShopError::NoMatchingOrder)?
        };
        self.submit_pizza_for(pizza, order_id)
    }

    /// Submit a pizza against a specific active order.
    pub fn submit_pizza_for(&mut self, pizza: Entity, order_id: u32) -> Result<u32, ShopError> {
        let payment = {
            let p = self
                .world
                .get::<&Pizza>(pizza)
                .map_err(|_| ShopError::MissingPizza)?;
            self.orders
                .validate_order(&p.contents(), order_id, &mut self.events)
                .map_err(ShopError::Validation)?
        };

        // The pizza is handed to the customer
        let _ = self.world.despawn(pizza);
        Ok(payment)
    }

    /// Generate one order immediately, bypassing the schedule.
    pub fn generate_order_now(&mut self) -> Result<u32, ShopError> {
        self.orders
            .generate_order(&mut self.rng, &mut self.events)
            .map_err(ShopError::Generate)
    }

    pub fn cancel_order(&mut self, order_id: u32) -> bool {
        self.orders.cancel_order(order_id, &mut self.events)
    }

    pub fn set_generation_mode(&mut self, mode: OrderGenerationMode) {
        self.orders.set_generation_mode(mode);
    }

    pub fn set_auto_generate(&mut self, enabled: bool) {
        self.orders.set_auto_generate(enabled);
    }

    // ==================== Access ====================

    pub fn orders(&self) -> &OrderManager {
        &self.orders
    }

    pub fn catalog(&self) -> &DataCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> Option<&KitchenLayout> {
        self.layout.as_ref()
    }

    /// Take all pending events.
    pub fn drain_events(&mut self) -> Vec<ShopEvent> {
        self.events.drain()
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Set time scale (1.0 = real-time, 2.0 = double speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}
