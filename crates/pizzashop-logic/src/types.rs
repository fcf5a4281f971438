//! Shared gameplay enums used across the logic and core crates.

use serde::{Deserialize, Serialize};

/// Pizza sizes, smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
    XLarge,
}

impl PizzaSize {
    pub const ALL: [PizzaSize; 4] = [
        PizzaSize::Small,
        PizzaSize::Medium,
        PizzaSize::Large,
        PizzaSize::XLarge,
    ];
}

/// Sauce varieties a customer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SauceType {
    Marinara,
    White,
    Bbq,
    Pesto,
}

impl SauceType {
    pub const ALL: [SauceType; 4] = [
        SauceType::Marinara,
        SauceType::White,
        SauceType::Bbq,
        SauceType::Pesto,
    ];
}

/// Structural role of an ingredient on the pizza
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientCategory {
    /// Dough
    Base,
    /// Marinara, white, etc.
    Sauce,
    /// Mozzarella and friends
    Cheese,
    /// Everything that goes on top
    Topping,
}

/// Doneness a customer asks for on an order.
///
/// Distinct from [`CookQuality`]: the level is a request, the quality is
/// what actually came out of the oven. `target_quality` defines the mapping
/// between the two used by order matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CookLevel {
    LightlyCooked,
    WellDone,
    Crispy,
}

impl CookLevel {
    /// The cook quality that satisfies this level
    pub fn target_quality(&self) -> CookQuality {
        match self {
            CookLevel::LightlyCooked => CookQuality::Undercooked,
            CookLevel::WellDone => CookQuality::Perfect,
            CookLevel::Crispy => CookQuality::Overcooked,
        }
    }
}

/// Discrete rating derived from elapsed cooking time.
///
/// Ordered: quality only ever moves forward while a pizza stays in the oven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CookQuality {
    Raw,
    Undercooked,
    Perfect,
    Overcooked,
    Burnt,
}
