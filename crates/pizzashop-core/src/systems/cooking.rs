//! Cooking system — heat-up ramps and per-slot cook ticking, plus the
//! place/remove operations players drive.

use std::fmt;

use hecs::{Entity, World};

use crate::components::{CookError, Oven, OvenState, Pizza, PizzaState};
use crate::events::{EventQueue, ShopEvent};

/// Rejected pizza placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacePizzaError {
    /// Entity has no `Oven` component
    OvenMissing,
    /// Oven must be Ready or Cooking to accept pizzas
    OvenNotHot,
    NoEmptySlot,
    /// Entity has no `Pizza` component
    PizzaMissing,
    PizzaIncomplete,
    UnsupportedSize,
    Cook(CookError),
}

impl fmt::Display for PlacePizzaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacePizzaError::OvenMissing => write!(f, "no oven at this entity"),
            PlacePizzaError::OvenNotHot => write!(f, "oven is not at cooking temperature"),
            PlacePizzaError::NoEmptySlot => write!(f, "no empty oven slots available"),
            PlacePizzaError::PizzaMissing => write!(f, "no pizza at this entity"),
            PlacePizzaError::PizzaIncomplete => write!(f, "cannot cook an incomplete pizza"),
            PlacePizzaError::UnsupportedSize => {
                write!(f, "this oven does not support that pizza size")
            }
            PlacePizzaError::Cook(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PlacePizzaError {}

/// Rejected pizza removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovePizzaError {
    OvenMissing,
    NoCookedPizza,
}

impl fmt::Display for RemovePizzaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovePizzaError::OvenMissing => write!(f, "no oven at this entity"),
            RemovePizzaError::NoCookedPizza => write!(f, "no cooked pizzas available"),
        }
    }
}

impl std::error::Error for RemovePizzaError {}

/// Tick every oven: heat-up ramps while Heating, slot cooking while
/// Cooking. Slots are processed in index order and time their pizzas
/// independently — one slot burning does not touch the others.
pub fn oven_system(world: &mut World, dt: f32, events: &mut EventQueue) {
    let ovens: Vec<Entity> = world.query::<&Oven>().iter().map(|(e, _)| e).collect();

    for oven_entity in ovens {
        let Ok(mut oven) = world.get::<&mut Oven>(oven_entity) else {
            continue;
        };

        match oven.state() {
            OvenState::Off | OvenState::Ready => {}
            OvenState::Heating => {
                if oven.tick_heating(dt) {
                    log::info!("oven {} is ready", oven.config_id());
                }
            }
            OvenState::Cooking => {
                for index in 0..oven.slot_count() {
                    let slot = &oven.slots()[index];
                    let (Some(pizza_entity), true) = (slot.pizza(), slot.is_cooking()) else {
                        continue;
                    };
                    let Ok(mut pizza) = world.get::<&mut Pizza>(pizza_entity) else {
                        continue;
                    };

                    let profile = oven.profile_for(pizza.size());
                    oven.slot_mut(index).tick(dt);
                    let tick = pizza.update_cooking(dt, &profile);

                    if tick.became_cooked {
                        log::info!(
                            "pizza in slot {} finished cooking ({:?})",
                            index,
                            tick.quality
                        );
                        events.push(ShopEvent::PizzaCooked {
                            pizza: pizza_entity,
                            quality: tick.quality,
                        });
                    }
                    if tick.became_burnt {
                        log::warn!("pizza burnt in slot {}", index);
                        oven.slot_mut(index).stop_cooking();
                        events.push(ShopEvent::PizzaBurnt {
                            pizza: pizza_entity,
                        });
                    }
                }
            }
        }
    }
}

/// Place a complete pizza into the first empty slot and start its timer.
pub fn try_place_pizza(
    world: &mut World,
    oven_entity: Entity,
    pizza_entity: Entity,
    events: &mut EventQueue,
) -> Result<usize, PlacePizzaError> {
    let mut oven = world
        .get::<&mut Oven>(oven_entity)
        .map_err(|_| PlacePizzaError::OvenMissing)?;

    if !matches!(oven.state(), OvenState::Ready | OvenState::Cooking) {
        log::warn!("oven is not at cooking temperature");
        return Err(PlacePizzaError::OvenNotHot);
    }

    let slot_index = oven.empty_slot_index().ok_or_else(|| {
        log::warn!("no empty oven slots available");
        PlacePizzaError::NoEmptySlot
    })?;

    let mut pizza = world
        .get::<&mut Pizza>(pizza_entity)
        .map_err(|_| PlacePizzaError::PizzaMissing)?;

    if !pizza.is_complete() {
        log::warn!("cannot cook an incomplete pizza");
        return Err(PlacePizzaError::PizzaIncomplete);
    }
    if !oven.supports_size(pizza.size()) {
        log::warn!("oven does not support {:?} pizzas", pizza.size());
        return Err(PlacePizzaError::UnsupportedSize);
    }

    pizza.start_cooking().map_err(PlacePizzaError::Cook)?;
    oven.slot_mut(slot_index).place(pizza_entity);
    if oven.state() == OvenState::Ready {
        oven.set_state(OvenState::Cooking);
    }

    log::info!("pizza placed in slot {}", slot_index);
    events.push(ShopEvent::PizzaPlacedInOven {
        pizza: pizza_entity,
        oven: oven_entity,
        slot: slot_index,
    });
    Ok(slot_index)
}

/// Take the first cooked pizza out of the oven, returning its entity to
/// the caller. An oven left with no pizzas reverts to Ready.
pub fn try_remove_cooked_pizza(
    world: &mut World,
    oven_entity: Entity,
    events: &mut EventQueue,
) -> Result<Entity, RemovePizzaError> {
    let mut oven = world
        .get::<&mut Oven>(oven_entity)
        .map_err(|_| RemovePizzaError::OvenMissing)?;

    for index in 0..oven.slot_count() {
        let Some(pizza_entity) = oven.slots()[index].pizza() else {
            continue;
        };
        let Ok(pizza) = world.get::<&Pizza>(pizza_entity) else {
            continue;
        };
        if pizza.state() != PizzaState::Cooked {
            continue;
        }

        oven.slot_mut(index).take();
        if !oven.has_pizzas() && oven.state() == OvenState::Cooking {
            oven.set_state(OvenState::Ready);
        }

        log::info!(
            "pizza removed from slot {} with quality {:?}",
            index,
            pizza.quality()
        );
        events.push(ShopEvent::PizzaRemovedFromOven {
            pizza: pizza_entity,
            oven: oven_entity,
        });
        return Ok(pizza_entity);
    }

    log::warn!("no cooked pizzas available");
    Err(RemovePizzaError::NoCookedPizza)
}
