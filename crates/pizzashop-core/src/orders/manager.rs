//! Order manager — owns every order through its lifecycle.
//!
//! Per tick: active timers count down first (expiring orders move to the
//! expired list), then the generation scheduler decides whether a new
//! order is due. The three lists are disjoint; an order is in exactly one.

use std::fmt;

use rand::rngs::StdRng;

use pizzashop_logic::matching::{match_pizza, MatchFailure, PizzaContents};

use super::config::OrderConfig;
use super::order::Order;
use super::strategy::{OrderGenerationMode, OrderGenerationStrategy};
use crate::events::{EventQueue, ShopEvent};

/// Rejected order generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    MaxActiveReached,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::MaxActiveReached => write!(f, "max active orders reached"),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Rejected order validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The order is not in the active list
    NotActive(u32),
    /// The pizza does not satisfy the order; the order stays active
    Mismatch(MatchFailure),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotActive(id) => write!(f, "order {} is not active", id),
            ValidationError::Mismatch(reason) => write!(f, "pizza rejected: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Owns the order queue: scheduling, timers, validation and payouts.
pub struct OrderManager {
    config: OrderConfig,
    mode: OrderGenerationMode,
    strategy: Box<dyn OrderGenerationStrategy>,
    auto_generate: bool,

    active: Vec<Order>,
    completed: Vec<Order>,
    expired: Vec<Order>,

    next_order_seq: u32,
    next_order_time: Option<f64>,
    game_time: f64,

    total_generated: u32,
    total_money_earned: u64,
}

impl OrderManager {
    pub fn new(config: OrderConfig, mode: OrderGenerationMode) -> Self {
        Self {
            config,
            mode,
            strategy: mode.make_strategy(),
            auto_generate: true,
            active: Vec::new(),
            completed: Vec::new(),
            expired: Vec::new(),
            next_order_seq: 0,
            next_order_time: None,
            game_time: 0.0,
            total_generated: 0,
            total_money_earned: 0,
        }
    }

    /// Advance timers, expire overdue orders, and possibly generate a new
    /// order. Timer updates always happen before generation.
    pub fn update(&mut self, dt: f32, rng: &mut StdRng, events: &mut EventQueue) {
        self.game_time += dt as f64;
        self.update_active_orders(dt, events);

        if !self.auto_generate {
            return;
        }

        let due = match self.next_order_time {
            Some(t) => t,
            None => self.schedule_next(rng),
        };

        if self.game_time >= due {
            if self.active.len() < self.config.max_active_orders {
                let _ = self.generate_order(rng, events);
            }
            self.schedule_next(rng);
        }
    }

    fn update_active_orders(&mut self, dt: f32, events: &mut EventQueue) {
        let mut i = 0;
        while i < self.active.len() {
            let expired = self.active[i].update_timer(dt);
            events.push(ShopEvent::OrderTimerUpdated {
                order_id: self.active[i].id(),
                time_remaining: self.active[i].time_remaining(),
            });

            if expired {
                let order = self.active.remove(i);
                log::info!("order {} expired", order.code());
                events.push(ShopEvent::OrderExpired { order_id: order.id() });
                self.expired.push(order);
            } else {
                i += 1;
            }
        }
    }

    /// Create one order via the current strategy.
    pub fn generate_order(
        &mut self,
        rng: &mut StdRng,
        events: &mut EventQueue,
    ) -> Result<u32, GenerateError> {
        if self.active.len() >= self.config.max_active_orders {
            log::warn!("cannot generate order: max active orders reached");
            return Err(GenerateError::MaxActiveReached);
        }

        self.next_order_seq += 1;
        let id = self.next_order_seq;
        let draft = self
            .strategy
            .generate_order(&self.config, self.game_time, rng);
        let order = Order::new(id, draft, self.game_time);

        log::info!(
            "generated {} for {}: {}",
            order.code(),
            order.customer_name(),
            order.description()
        );
        events.push(ShopEvent::OrderReceived { order_id: id });

        self.active.push(order);
        self.total_generated += 1;
        Ok(id)
    }

    /// Check a submitted pizza against an active order. On a match the
    /// order completes and the payout is credited; on a mismatch nothing
    /// changes and the reason is returned.
    pub fn validate_order(
        &mut self,
        pizza: &PizzaContents<'_>,
        order_id: u32,
        events: &mut EventQueue,
    ) -> Result<u32, ValidationError> {
        let index = self
            .active
            .iter()
            .position(|o| o.id() == order_id)
            .ok_or(ValidationError::NotActive(order_id))?;

        if let Err(reason) = match_pizza(pizza, &self.active[index].requirements()) {
            log::warn!("pizza does not match order {}: {}", order_id, reason);
            return Err(ValidationError::Mismatch(reason));
        }

        let mut order = self.active.remove(index);
        order.complete();
        let payment = order.current_payment();
        self.total_money_earned += payment as u64;

        log::info!("completed {}, earned ${}", order.code(), payment);
        events.push(ShopEvent::OrderCompleted {
            order_id: order.id(),
            payment,
        });
        events.push(ShopEvent::MoneyEarned {
            amount: payment,
            total: self.total_money_earned,
        });

        self.completed.push(order);
        Ok(payment)
    }

    /// First active order the pizza would satisfy, if any.
    pub fn find_matching_order(&self, pizza: &PizzaContents<'_>) -> Option<u32> {
        self.active
            .iter()
            .find(|o| match_pizza(pizza, &o.requirements()).is_ok())
            .map(|o| o.id())
    }

    /// Force an active order into the expired list regardless of its timer.
    pub fn cancel_order(&mut self, order_id: u32, events: &mut EventQueue) -> bool {
        let Some(index) = self.active.iter().position(|o| o.id() == order_id) else {
            return false;
        };

        let mut order = self.active.remove(index);
        order.expire();
        log::info!("cancelled {}", order.code());
        events.push(ShopEvent::OrderExpired { order_id: order.id() });
        self.expired.push(order);
        true
    }

    /// Swap the generation strategy; the order sequence continues.
    pub fn set_generation_mode(&mut self, mode: OrderGenerationMode) {
        self.mode = mode;
        self.strategy = mode.make_strategy();
        log::info!("order generation mode set to {:?}", mode);
    }

    pub fn generation_mode(&self) -> OrderGenerationMode {
        self.mode
    }

    pub fn set_auto_generate(&mut self, enabled: bool) {
        self.auto_generate = enabled;
    }

    pub fn order_by_id(&self, order_id: u32) -> Option<&Order> {
        self.active.iter().find(|o| o.id() == order_id)
    }

    pub fn active_orders(&self) -> &[Order] {
        &self.active
    }

    pub fn completed_orders(&self) -> &[Order] {
        &self.completed
    }

    pub fn expired_orders(&self) -> &[Order] {
        &self.expired
    }

    pub fn total_orders_generated(&self) -> u32 {
        self.total_generated
    }

    pub fn total_money_earned(&self) -> u64 {
        self.total_money_earned
    }

    pub fn config(&self) -> &OrderConfig {
        &self.config
    }

    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    pub fn clear_expired_orders(&mut self) {
        self.expired.clear();
    }

    pub fn clear_completed_orders(&mut self) {
        self.completed.clear();
    }

    /// Drop all orders and counters, restarting the shift clock.
    pub fn reset_stats(&mut self) {
        self.active.clear();
        self.completed.clear();
        self.expired.clear();
        self.total_generated = 0;
        self.total_money_earned = 0;
        self.game_time = 0.0;
        self.next_order_time = None;
    }

    fn schedule_next(&mut self, rng: &mut StdRng) -> f64 {
        let interval = self
            .config
            .scaled_order_interval(self.game_time as f32, rng) as f64;
        let due = self.game_time + interval;
        self.next_order_time = Some(due);
        log::debug!("next order in {:.1}s", interval);
        due
    }
}
