//! Oven — a multi-slot cooking appliance with its own heat state machine.
//!
//! Each slot times its pizza independently; a burnt pizza in one slot does
//! not affect the others.

use std::fmt;

use hecs::Entity;

use pizzashop_logic::quality::CookingProfile;
use pizzashop_logic::types::PizzaSize;

use crate::catalog::{OvenConfig, SizeProfiles};

/// Oven heat state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenState {
    /// Cold; only turning on is possible
    Off,
    /// Temperature ramping toward cooking temperature
    Heating,
    /// At temperature, no pizzas inside
    Ready,
    /// At temperature with at least one occupied slot
    Cooking,
}

/// Rejected oven power operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenError {
    AlreadyOn,
    AlreadyOff,
    /// Turning off is refused while any slot is occupied
    PizzasPresent,
}

impl fmt::Display for OvenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            OvenError::AlreadyOn => "oven is already on",
            OvenError::AlreadyOff => "oven is already off",
            OvenError::PizzasPresent => "cannot turn off oven while pizzas are inside",
        };
        write!(f, "{}", reason)
    }
}

impl std::error::Error for OvenError {}

/// One slot inside an oven, borrowing (not owning) its pizza entity.
///
/// The timer only advances while `is_cooking` is true; the flag drops the
/// moment the held pizza burns.
#[derive(Debug, Clone)]
pub struct OvenSlot {
    index: usize,
    pizza: Option<Entity>,
    cook_timer: f32,
    is_cooking: bool,
}

impl OvenSlot {
    fn new(index: usize) -> Self {
        Self {
            index,
            pizza: None,
            cook_timer: 0.0,
            is_cooking: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_occupied(&self) -> bool {
        self.pizza.is_some()
    }

    pub fn pizza(&self) -> Option<Entity> {
        self.pizza
    }

    pub fn cook_timer(&self) -> f32 {
        self.cook_timer
    }

    pub fn is_cooking(&self) -> bool {
        self.is_cooking
    }

    /// Cooking progress toward the perfect time (0-1)
    pub fn progress(&self, profile: &CookingProfile) -> f32 {
        if !self.is_cooking {
            return 0.0;
        }
        profile.progress(self.cook_timer)
    }

    pub(crate) fn place(&mut self, pizza: Entity) {
        self.pizza = Some(pizza);
        self.cook_timer = 0.0;
        self.is_cooking = true;
    }

    pub(crate) fn take(&mut self) -> Option<Entity> {
        let pizza = self.pizza.take();
        self.cook_timer = 0.0;
        self.is_cooking = false;
        pizza
    }

    pub(crate) fn tick(&mut self, dt: f32) {
        if self.is_cooking {
            self.cook_timer += dt;
        }
    }

    pub(crate) fn stop_cooking(&mut self) {
        self.is_cooking = false;
    }
}

/// A multi-slot oven built from a catalog config
#[derive(Debug, Clone)]
pub struct Oven {
    config_id: String,
    supported_sizes: Vec<PizzaSize>,
    profiles: SizeProfiles,
    cooking_temperature: f32,
    heat_up_time: f32,
    state: OvenState,
    temperature: f32,
    heating_timer: f32,
    slots: Vec<OvenSlot>,
}

impl Oven {
    pub fn new(config: &OvenConfig) -> Self {
        let slot_count = config.max_pizzas.max(1);
        Self {
            config_id: config.id.clone(),
            supported_sizes: config.supported_sizes.clone(),
            profiles: config.profiles.clone(),
            cooking_temperature: config.cooking_temperature,
            heat_up_time: config.heat_up_time,
            state: OvenState::Off,
            temperature: 0.0,
            heating_timer: 0.0,
            slots: (0..slot_count).map(OvenSlot::new).collect(),
        }
    }

    pub fn turn_on(&mut self) -> Result<(), OvenError> {
        if self.state != OvenState::Off {
            log::warn!("oven is already on");
            return Err(OvenError::AlreadyOn);
        }
        self.state = OvenState::Heating;
        self.heating_timer = 0.0;
        log::info!("oven {} turned on", self.config_id);
        Ok(())
    }

    pub fn turn_off(&mut self) -> Result<(), OvenError> {
        if self.state == OvenState::Off {
            log::warn!("oven is already off");
            return Err(OvenError::AlreadyOff);
        }
        if self.has_pizzas() {
            log::warn!("cannot turn off oven while pizzas are inside");
            return Err(OvenError::PizzasPresent);
        }
        self.state = OvenState::Off;
        self.temperature = 0.0;
        self.heating_timer = 0.0;
        log::info!("oven {} turned off", self.config_id);
        Ok(())
    }

    /// Advance the heat-up ramp. Returns true when the oven just reached
    /// cooking temperature.
    pub(crate) fn tick_heating(&mut self, dt: f32) -> bool {
        if self.state != OvenState::Heating {
            return false;
        }

        self.heating_timer += dt;
        if self.heat_up_time <= 0.0 || self.heating_timer >= self.heat_up_time {
            self.temperature = self.cooking_temperature;
            self.state = OvenState::Ready;
            return true;
        }

        let progress = self.heating_timer / self.heat_up_time;
        self.temperature = self.cooking_temperature * progress;
        false
    }

    pub(crate) fn set_state(&mut self, state: OvenState) {
        self.state = state;
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut OvenSlot {
        &mut self.slots[index]
    }

    pub fn config_id(&self) -> &str {
        &self.config_id
    }

    pub fn state(&self) -> OvenState {
        self.state
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn cooking_temperature(&self) -> f32 {
        self.cooking_temperature
    }

    pub fn heat_up_time(&self) -> f32 {
        self.heat_up_time
    }

    pub fn slots(&self) -> &[OvenSlot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn supports_size(&self, size: PizzaSize) -> bool {
        self.supported_sizes.contains(&size)
    }

    pub fn profile_for(&self, size: PizzaSize) -> CookingProfile {
        self.profiles.profile_for(size)
    }

    pub fn empty_slot_index(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_occupied())
    }

    pub fn has_empty_slot(&self) -> bool {
        self.empty_slot_index().is_some()
    }

    pub fn has_pizzas(&self) -> bool {
        self.slots.iter().any(|s| s.is_occupied())
    }

    pub fn occupied_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }
}
