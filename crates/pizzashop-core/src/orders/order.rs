//! A single customer order with a decaying payment schedule.

use std::collections::BTreeSet;

use pizzashop_logic::matching::OrderRequirements;
use pizzashop_logic::payment;
use pizzashop_logic::types::{CookLevel, PizzaSize, SauceType};

use super::strategy::OrderDraft;

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Active,
    Completed,
    Expired,
}

/// A timed customer request for a specific pizza.
#[derive(Debug, Clone)]
pub struct Order {
    id: u32,
    customer_name: String,
    size: PizzaSize,
    sauce: SauceType,
    requires_cheese: bool,
    toppings: BTreeSet<String>,
    cook_level: CookLevel,
    base_payment: u32,
    bonus_payment: u32,
    time_limit: f32,
    time_remaining: f32,
    state: OrderState,
    created_at: f64,
}

impl Order {
    pub(crate) fn new(id: u32, draft: OrderDraft, created_at: f64) -> Self {
        Self {
            id,
            customer_name: draft.customer_name,
            size: draft.size,
            sauce: draft.sauce,
            requires_cheese: draft.requires_cheese,
            toppings: draft.toppings,
            cook_level: draft.cook_level,
            base_payment: draft.base_payment,
            bonus_payment: payment::bonus_for_base(draft.base_payment),
            time_limit: draft.time_limit,
            time_remaining: draft.time_limit,
            state: OrderState::Active,
            created_at,
        }
    }

    /// Count down the timer. Returns true when the order expires on this
    /// tick; expiry happens exactly once.
    pub fn update_timer(&mut self, dt: f32) -> bool {
        if self.state != OrderState::Active {
            return false;
        }

        self.time_remaining -= dt;
        if self.time_remaining <= 0.0 {
            self.time_remaining = 0.0;
            self.state = OrderState::Expired;
            return true;
        }
        false
    }

    /// Fraction of the time limit still remaining (0-1)
    pub fn time_fraction(&self) -> f32 {
        if self.time_limit <= 0.0 {
            return 0.0;
        }
        self.time_remaining / self.time_limit
    }

    /// Payment owed if the order were completed right now
    pub fn current_payment(&self) -> u32 {
        payment::payment_for_time(self.base_payment, self.bonus_payment, self.time_fraction())
    }

    pub(crate) fn complete(&mut self) {
        self.state = OrderState::Completed;
    }

    pub(crate) fn expire(&mut self) {
        self.state = OrderState::Expired;
    }

    /// View of this order for pizza matching
    pub fn requirements(&self) -> OrderRequirements<'_> {
        OrderRequirements {
            size: self.size,
            sauce: self.sauce,
            requires_cheese: self.requires_cheese,
            toppings: &self.toppings,
            cook_level: self.cook_level,
        }
    }

    /// Display code, e.g. `ORD-0042`
    pub fn code(&self) -> String {
        format!("ORD-{:04}", self.id)
    }

    /// Human-readable summary for order tickets
    pub fn description(&self) -> String {
        let mut desc = format!("{:?} pizza with {:?} sauce", self.size, self.sauce);
        if self.requires_cheese {
            desc.push_str(", cheese");
        }
        for topping in &self.toppings {
            desc.push_str(", ");
            desc.push_str(topping);
        }
        desc.push_str(&format!(" ({:?})", self.cook_level));
        desc
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn size(&self) -> PizzaSize {
        self.size
    }

    pub fn sauce(&self) -> SauceType {
        self.sauce
    }

    pub fn requires_cheese(&self) -> bool {
        self.requires_cheese
    }

    pub fn toppings(&self) -> &BTreeSet<String> {
        &self.toppings
    }

    pub fn cook_level(&self) -> CookLevel {
        self.cook_level
    }

    pub fn base_payment(&self) -> u32 {
        self.base_payment
    }

    pub fn bonus_payment(&self) -> u32 {
        self.bonus_payment
    }

    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn created_at(&self) -> f64 {
        self.created_at
    }
}
