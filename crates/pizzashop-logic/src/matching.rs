//! Pizza-against-order matching.
//!
//! Both sides are reduced to plain views so the check stays independent of
//! how the core stores pizzas and orders. Failures carry the reason shown
//! to the player when a submission is rejected.

use std::collections::BTreeSet;
use std::fmt;

use crate::types::{CookLevel, CookQuality, PizzaSize, SauceType};

/// What a finished pizza actually is
#[derive(Debug, Clone)]
pub struct PizzaContents<'a> {
    pub size: PizzaSize,
    pub has_dough: bool,
    pub sauce: Option<SauceType>,
    pub has_cheese: bool,
    /// Topping ingredient ids, deduplicated
    pub toppings: &'a BTreeSet<String>,
    pub quality: CookQuality,
}

/// What an order asks for
#[derive(Debug, Clone)]
pub struct OrderRequirements<'a> {
    pub size: PizzaSize,
    pub sauce: SauceType,
    pub requires_cheese: bool,
    pub toppings: &'a BTreeSet<String>,
    pub cook_level: CookLevel,
}

/// Why a pizza failed to match an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFailure {
    WrongSize,
    MissingDough,
    WrongSauce,
    CheeseMismatch,
    ToppingMismatch,
    WrongCookLevel,
}

impl fmt::Display for MatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            MatchFailure::WrongSize => "wrong pizza size",
            MatchFailure::MissingDough => "pizza has no dough",
            MatchFailure::WrongSauce => "wrong sauce",
            MatchFailure::CheeseMismatch => "cheese does not match the order",
            MatchFailure::ToppingMismatch => "toppings do not match the order",
            MatchFailure::WrongCookLevel => "wrong cook level",
        };
        write!(f, "{}", reason)
    }
}

impl std::error::Error for MatchFailure {}

/// Check a pizza against an order.
///
/// Toppings must match as exact sets — every requested topping present and
/// nothing extra. Cook level matches when the achieved quality equals the
/// level's target quality.
pub fn match_pizza(
    pizza: &PizzaContents<'_>,
    order: &OrderRequirements<'_>,
) -> Result<(), MatchFailure> {
    if pizza.size != order.size {
        return Err(MatchFailure::WrongSize);
    }
    if !pizza.has_dough {
        return Err(MatchFailure::MissingDough);
    }
    if pizza.sauce != Some(order.sauce) {
        return Err(MatchFailure::WrongSauce);
    }
    if pizza.has_cheese != order.requires_cheese {
        return Err(MatchFailure::CheeseMismatch);
    }
    if pizza.toppings != order.toppings {
        return Err(MatchFailure::ToppingMismatch);
    }
    if pizza.quality != order.cook_level.target_quality() {
        return Err(MatchFailure::WrongCookLevel);
    }
    Ok(())
}
