//! Order generation strategies — pluggable policies that synthesize new
//! customer orders from the weighted configuration tables.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;

use pizzashop_logic::types::{CookLevel, PizzaSize, SauceType};

use super::config::OrderConfig;

/// Everything a strategy decides about a new order. The manager assigns
/// the id and timestamps.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_name: String,
    pub size: PizzaSize,
    pub sauce: SauceType,
    pub requires_cheese: bool,
    pub toppings: BTreeSet<String>,
    pub cook_level: CookLevel,
    pub base_payment: u32,
    pub time_limit: f32,
}

/// A policy for synthesizing customer orders.
pub trait OrderGenerationStrategy {
    fn generate_order(
        &mut self,
        config: &OrderConfig,
        game_time: f64,
        rng: &mut StdRng,
    ) -> OrderDraft;
}

/// Which strategy the manager runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderGenerationMode {
    WeightedRandom,
    TrendBased,
    Simple,
}

impl OrderGenerationMode {
    pub(crate) fn make_strategy(self) -> Box<dyn OrderGenerationStrategy> {
        match self {
            OrderGenerationMode::WeightedRandom => Box::new(WeightedRandomStrategy),
            OrderGenerationMode::TrendBased => Box::new(TrendBasedStrategy::new()),
            OrderGenerationMode::Simple => Box::new(SimpleOrderStrategy),
        }
    }
}

fn payment_for(config: &OrderConfig, size: PizzaSize, topping_count: usize) -> u32 {
    config.base_payment_for(size) + topping_count as u32 * config.topping_payment
}

/// Samples every attribute independently from the weighted tables.
pub struct WeightedRandomStrategy;

impl OrderGenerationStrategy for WeightedRandomStrategy {
    fn generate_order(
        &mut self,
        config: &OrderConfig,
        _game_time: f64,
        rng: &mut StdRng,
    ) -> OrderDraft {
        let size = config.random_size(rng);
        let toppings = config.random_toppings(rng);

        OrderDraft {
            customer_name: config.random_customer_name(rng),
            size,
            sauce: config.random_sauce(rng),
            requires_cheese: config.random_cheese(rng),
            base_payment: payment_for(config, size, toppings.len()),
            time_limit: config.time_limit_for(size),
            toppings,
            cook_level: config.random_cook_level(rng),
        }
    }
}

/// Biases orders toward a rotating "trending" sauce and occasionally
/// injects a trending topping, simulating shifting customer demand.
pub struct TrendBasedStrategy {
    trending_sauce: SauceType,
    trend_started: f64,
}

/// How long one trend lasts, in game seconds
const TREND_DURATION: f64 = 120.0;
/// Chance an order follows the trending sauce
const TRENDING_SAUCE_CHANCE: f32 = 0.6;
/// Chance an order picks up a trending topping
const TRENDING_TOPPING_CHANCE: f32 = 0.4;

impl TrendBasedStrategy {
    pub fn new() -> Self {
        Self {
            trending_sauce: SauceType::Marinara,
            trend_started: 0.0,
        }
    }

    fn update_trends(&mut self, game_time: f64, rng: &mut StdRng) {
        if game_time - self.trend_started >= TREND_DURATION {
            self.trending_sauce = SauceType::ALL[rng.gen_range(0..SauceType::ALL.len())];
            self.trend_started = game_time;
        }
    }
}

impl Default for TrendBasedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderGenerationStrategy for TrendBasedStrategy {
    fn generate_order(
        &mut self,
        config: &OrderConfig,
        game_time: f64,
        rng: &mut StdRng,
    ) -> OrderDraft {
        self.update_trends(game_time, rng);

        let size = config.random_size(rng);
        let sauce = if rng.gen::<f32>() < TRENDING_SAUCE_CHANCE {
            self.trending_sauce
        } else {
            config.random_sauce(rng)
        };

        let mut toppings = config.random_toppings(rng);
        if rng.gen::<f32>() < TRENDING_TOPPING_CHANCE
            && toppings.len() < 4
            && !config.topping_weights.is_empty()
        {
            let trending =
                &config.topping_weights[rng.gen_range(0..config.topping_weights.len())].value;
            toppings.insert(trending.clone());
        }

        OrderDraft {
            customer_name: config.random_customer_name(rng),
            size,
            sauce,
            requires_cheese: config.random_cheese(rng),
            base_payment: payment_for(config, size, toppings.len()),
            time_limit: config.time_limit_for(size),
            toppings,
            cook_level: config.random_cook_level(rng),
        }
    }
}

/// Deliberately easy tutorial profile: medium marinara cheese pizzas,
/// sometimes with pepperoni, always well done, with extra time.
pub struct SimpleOrderStrategy;

const SIMPLE_TOPPING: &str = "pepperoni";
const SIMPLE_TOPPING_CHANCE: f32 = 0.7;
const SIMPLE_TIME_MULTIPLIER: f32 = 1.5;

impl OrderGenerationStrategy for SimpleOrderStrategy {
    fn generate_order(
        &mut self,
        config: &OrderConfig,
        _game_time: f64,
        rng: &mut StdRng,
    ) -> OrderDraft {
        let size = PizzaSize::Medium;

        let mut toppings = BTreeSet::new();
        if rng.gen::<f32>() < SIMPLE_TOPPING_CHANCE {
            toppings.insert(SIMPLE_TOPPING.to_string());
        }

        OrderDraft {
            customer_name: config.random_customer_name(rng),
            size,
            sauce: SauceType::Marinara,
            requires_cheese: true,
            base_payment: payment_for(config, size, toppings.len()),
            time_limit: config.time_limit_for(size) * SIMPLE_TIME_MULTIPLIER,
            toppings,
            cook_level: CookLevel::WellDone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_simple_strategy_profile() {
        let config = OrderConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut strategy = SimpleOrderStrategy;

        for _ in 0..50 {
            let draft = strategy.generate_order(&config, 0.0, &mut rng);
            assert_eq!(draft.size, PizzaSize::Medium);
            assert_eq!(draft.sauce, SauceType::Marinara);
            assert!(draft.requires_cheese);
            assert_eq!(draft.cook_level, CookLevel::WellDone);
            assert!((draft.time_limit - 225.0).abs() < 1e-3);
            assert!(draft.toppings.len() <= 1);
            if draft.toppings.is_empty() {
                assert_eq!(draft.base_payment, 15);
            } else {
                assert!(draft.toppings.contains("pepperoni"));
                assert_eq!(draft.base_payment, 17);
            }
        }
    }

    #[test]
    fn test_weighted_strategy_prices_toppings() {
        let config = OrderConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut strategy = WeightedRandomStrategy;

        for _ in 0..50 {
            let draft = strategy.generate_order(&config, 0.0, &mut rng);
            let expected = config.base_payment_for(draft.size)
                + draft.toppings.len() as u32 * config.topping_payment;
            assert_eq!(draft.base_payment, expected);
            assert_eq!(draft.time_limit, config.time_limit_for(draft.size));
        }
    }

    #[test]
    fn test_trend_rotates_on_schedule() {
        let config = OrderConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut strategy = TrendBasedStrategy::new();

        assert_eq!(strategy.trending_sauce, SauceType::Marinara);
        strategy.update_trends(60.0, &mut rng);
        assert_eq!(strategy.trend_started, 0.0); // too early

        strategy.update_trends(120.0, &mut rng);
        assert_eq!(strategy.trend_started, 120.0);
    }

    #[test]
    fn test_trend_strategy_caps_toppings() {
        let config = OrderConfig::default();
        let mut rng = StdRng::seed_from_u64(13);
        let mut strategy = TrendBasedStrategy::new();

        for _ in 0..100 {
            let draft = strategy.generate_order(&config, 0.0, &mut rng);
            assert!(draft.toppings.len() <= 5);
        }
    }
}
