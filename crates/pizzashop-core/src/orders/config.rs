//! Order generation configuration: weighted tables, time limits, payments
//! and difficulty scaling.

use std::collections::BTreeSet;

use rand::Rng;
use serde::Deserialize;

use pizzashop_logic::scheduling::{scaled_interval, SpawnScaling};
use pizzashop_logic::types::{CookLevel, PizzaSize, SauceType};
use pizzashop_logic::weighted::{pick_weighted, WeightedItem};

/// Tunable order-generation parameters. Deserializable so shops can ship
/// their own balance files; `Default` carries the stock balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub max_active_orders: usize,
    pub base_order_interval: f32,
    pub order_interval_variance: f32,

    pub small_pizza_time: f32,
    pub medium_pizza_time: f32,
    pub large_pizza_time: f32,
    pub x_large_pizza_time: f32,

    pub small_pizza_payment: u32,
    pub medium_pizza_payment: u32,
    pub large_pizza_payment: u32,
    pub x_large_pizza_payment: u32,
    pub topping_payment: u32,

    pub size_weights: Vec<WeightedItem<PizzaSize>>,
    pub sauce_weights: Vec<WeightedItem<SauceType>>,
    /// Weighted over topping ingredient ids
    pub topping_weights: Vec<WeightedItem<String>>,
    pub cook_level_weights: Vec<WeightedItem<CookLevel>>,
    pub cheese_chance: f32,
    pub min_toppings: usize,
    pub max_toppings: usize,

    pub customer_names: Vec<String>,
    pub scaling: SpawnScaling,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            max_active_orders: 3,
            base_order_interval: 30.0,
            order_interval_variance: 10.0,

            small_pizza_time: 120.0,
            medium_pizza_time: 150.0,
            large_pizza_time: 180.0,
            x_large_pizza_time: 210.0,

            small_pizza_payment: 10,
            medium_pizza_payment: 15,
            large_pizza_payment: 20,
            x_large_pizza_payment: 25,
            topping_payment: 2,

            size_weights: vec![
                WeightedItem::new(PizzaSize::Small, 1.0),
                WeightedItem::new(PizzaSize::Medium, 2.0),
                WeightedItem::new(PizzaSize::Large, 1.5),
                WeightedItem::new(PizzaSize::XLarge, 0.5),
            ],
            sauce_weights: vec![
                WeightedItem::new(SauceType::Marinara, 3.0),
                WeightedItem::new(SauceType::White, 1.0),
                WeightedItem::new(SauceType::Bbq, 1.0),
                WeightedItem::new(SauceType::Pesto, 0.5),
            ],
            topping_weights: vec![
                WeightedItem::new("pepperoni".to_string(), 3.0),
                WeightedItem::new("mushrooms".to_string(), 2.0),
                WeightedItem::new("onions".to_string(), 2.0),
                WeightedItem::new("sausage".to_string(), 2.0),
                WeightedItem::new("bacon".to_string(), 1.5),
                WeightedItem::new("peppers".to_string(), 1.5),
                WeightedItem::new("olives".to_string(), 1.0),
                WeightedItem::new("pineapple".to_string(), 0.5),
            ],
            cook_level_weights: vec![
                WeightedItem::new(CookLevel::LightlyCooked, 1.0),
                WeightedItem::new(CookLevel::WellDone, 3.0),
                WeightedItem::new(CookLevel::Crispy, 1.0),
            ],
            cheese_chance: 0.8,
            min_toppings: 0,
            max_toppings: 4,

            customer_names: [
                "John", "Sarah", "Mike", "Emily", "David", "Lisa", "Tom", "Anna", "Chris",
                "Mary", "Jake", "Sophie",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            scaling: SpawnScaling::default(),
        }
    }
}

impl OrderConfig {
    pub fn time_limit_for(&self, size: PizzaSize) -> f32 {
        match size {
            PizzaSize::Small => self.small_pizza_time,
            PizzaSize::Medium => self.medium_pizza_time,
            PizzaSize::Large => self.large_pizza_time,
            PizzaSize::XLarge => self.x_large_pizza_time,
        }
    }

    pub fn base_payment_for(&self, size: PizzaSize) -> u32 {
        match size {
            PizzaSize::Small => self.small_pizza_payment,
            PizzaSize::Medium => self.medium_pizza_payment,
            PizzaSize::Large => self.large_pizza_payment,
            PizzaSize::XLarge => self.x_large_pizza_payment,
        }
    }

    pub fn random_size(&self, rng: &mut impl Rng) -> PizzaSize {
        pick_weighted(&self.size_weights, rng.gen())
            .copied()
            .unwrap_or(PizzaSize::Medium)
    }

    pub fn random_sauce(&self, rng: &mut impl Rng) -> SauceType {
        pick_weighted(&self.sauce_weights, rng.gen())
            .copied()
            .unwrap_or(SauceType::Marinara)
    }

    pub fn random_cook_level(&self, rng: &mut impl Rng) -> CookLevel {
        pick_weighted(&self.cook_level_weights, rng.gen())
            .copied()
            .unwrap_or(CookLevel::WellDone)
    }

    pub fn random_cheese(&self, rng: &mut impl Rng) -> bool {
        rng.gen::<f32>() < self.cheese_chance
    }

    /// Sample a topping set. Duplicated draws collapse, so the result may
    /// hold fewer toppings than were rolled.
    pub fn random_toppings(&self, rng: &mut impl Rng) -> BTreeSet<String> {
        let max = self.max_toppings.max(self.min_toppings);
        let count = rng.gen_range(self.min_toppings..=max);

        let mut toppings = BTreeSet::new();
        for _ in 0..count {
            if let Some(topping) = pick_weighted(&self.topping_weights, rng.gen()) {
                toppings.insert(topping.clone());
            }
        }
        toppings
    }

    pub fn random_customer_name(&self, rng: &mut impl Rng) -> String {
        if self.customer_names.is_empty() {
            return "Customer".to_string();
        }
        self.customer_names[rng.gen_range(0..self.customer_names.len())].clone()
    }

    /// Interval until the next order: difficulty-scaled base plus jitter.
    pub fn scaled_order_interval(&self, game_time: f32, rng: &mut impl Rng) -> f32 {
        let base = scaled_interval(self.base_order_interval, &self.scaling, game_time);
        let jitter = if self.order_interval_variance > 0.0 {
            rng.gen_range(-self.order_interval_variance..=self.order_interval_variance)
        } else {
            0.0
        };
        (base + jitter).max(0.0)
    }
}
