//! Assembly operations — the interplay between a zone and the pizza it
//! owns.

use std::fmt;

use hecs::{Entity, World};

use pizzashop_logic::types::PizzaSize;

use crate::catalog::IngredientRecord;
use crate::components::{AddIngredientError, AssemblyZone, Pizza};
use crate::events::{EventQueue, ShopEvent};

/// Rejected assembly operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyError {
    /// Entity has no `AssemblyZone` component
    ZoneMissing,
    /// Zone's pizza entity vanished from the world
    PizzaMissing,
    ZoneOccupied,
    UnsupportedSize {
        supported: PizzaSize,
        requested: PizzaSize,
    },
    NoPizza,
    Ingredient(AddIngredientError),
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::ZoneMissing => write!(f, "no assembly zone at this entity"),
            AssemblyError::PizzaMissing => write!(f, "zone's pizza is missing from the world"),
            AssemblyError::ZoneOccupied => write!(f, "zone already has a pizza"),
            AssemblyError::UnsupportedSize {
                supported,
                requested,
            } => write!(f, "zone supports {:?}, not {:?}", supported, requested),
            AssemblyError::NoPizza => write!(f, "no pizza in this zone"),
            AssemblyError::Ingredient(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AssemblyError {}

/// Start a new pizza in the zone. The zone owns it until it is removed or
/// cancelled.
pub fn start_pizza(
    world: &mut World,
    zone_entity: Entity,
    size: PizzaSize,
    events: &mut EventQueue,
) -> Result<Entity, AssemblyError> {
    {
        let zone = world
            .get::<&AssemblyZone>(zone_entity)
            .map_err(|_| AssemblyError::ZoneMissing)?;
        if zone.has_pizza() {
            log::warn!("zone already has a pizza");
            return Err(AssemblyError::ZoneOccupied);
        }
        if zone.supported_size() != size {
            log::warn!(
                "zone supports {:?}, not {:?}",
                zone.supported_size(),
                size
            );
            return Err(AssemblyError::UnsupportedSize {
                supported: zone.supported_size(),
                requested: size,
            });
        }
    }

    let pizza_entity = world.spawn((Pizza::new(size),));
    {
        let mut zone = world
            .get::<&mut AssemblyZone>(zone_entity)
            .map_err(|_| AssemblyError::ZoneMissing)?;
        zone.begin_assembly(pizza_entity);
    }

    log::info!("started {:?} pizza", size);
    events.push(ShopEvent::PizzaStarted {
        pizza: pizza_entity,
        zone: zone_entity,
    });
    Ok(pizza_entity)
}

/// Add an ingredient to the zone's pizza, firing completion when the base
/// is finished.
pub fn add_ingredient(
    world: &mut World,
    zone_entity: Entity,
    record: &IngredientRecord,
    events: &mut EventQueue,
) -> Result<(), AssemblyError> {
    let pizza_entity = {
        let zone = world
            .get::<&AssemblyZone>(zone_entity)
            .map_err(|_| AssemblyError::ZoneMissing)?;
        zone.pizza().ok_or(AssemblyError::NoPizza)?
    };

    let became_complete = {
        let mut pizza = world
            .get::<&mut Pizza>(pizza_entity)
            .map_err(|_| AssemblyError::PizzaMissing)?;
        let was_complete = pizza.is_complete();
        pizza
            .try_add_ingredient(record)
            .map_err(AssemblyError::Ingredient)?;
        !was_complete && pizza.is_complete()
    };

    events.push(ShopEvent::IngredientAdded {
        pizza: pizza_entity,
        ingredient: record.id.clone(),
    });

    if became_complete {
        let mut zone = world
            .get::<&mut AssemblyZone>(zone_entity)
            .map_err(|_| AssemblyError::ZoneMissing)?;
        zone.mark_complete();
        events.push(ShopEvent::PizzaCompleted {
            pizza: pizza_entity,
        });
    }

    Ok(())
}

/// Release the zone's pizza to the caller; the zone resets to Empty.
pub fn remove_pizza(world: &mut World, zone_entity: Entity) -> Result<Entity, AssemblyError> {
    let mut zone = world
        .get::<&mut AssemblyZone>(zone_entity)
        .map_err(|_| AssemblyError::ZoneMissing)?;
    zone.release().ok_or(AssemblyError::NoPizza)
}

/// Discard the zone's pizza entirely; it is not returned.
pub fn cancel_pizza(
    world: &mut World,
    zone_entity: Entity,
    events: &mut EventQueue,
) -> Result<(), AssemblyError> {
    let pizza_entity = {
        let mut zone = world
            .get::<&mut AssemblyZone>(zone_entity)
            .map_err(|_| AssemblyError::ZoneMissing)?;
        zone.release().ok_or(AssemblyError::NoPizza)?
    };

    events.push(ShopEvent::PizzaCancelled {
        pizza: pizza_entity,
    });
    let _ = world.despawn(pizza_entity);
    log::info!("pizza cancelled");
    Ok(())
}
