//! Pizza — an assembling then cooking food item.
//!
//! Assembly is gated by ingredient category: dough first, then sauce, then
//! cheese, then any number of toppings. Cooking overlays the assembly state
//! once the base is complete.

use std::collections::BTreeSet;
use std::fmt;

use pizzashop_logic::matching::PizzaContents;
use pizzashop_logic::payment;
use pizzashop_logic::quality::CookingProfile;
use pizzashop_logic::types::{CookQuality, IngredientCategory, PizzaSize, SauceType};

use crate::catalog::IngredientRecord;

/// Combined assembly and cooking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PizzaState {
    NoDough,
    DoughOnly,
    DoughAndSauce,
    ReadyForToppings,
    /// Dough, sauce and cheese all present
    Complete,
    Cooking,
    Cooked,
    Burnt,
}

/// Rejected ingredient additions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddIngredientError {
    AlreadyHasDough,
    SauceRequiresDough,
    AlreadyHasSauce,
    CheeseRequiresDoughAndSauce,
    AlreadyHasCheese,
    ToppingsRequireCompleteBase,
    /// Pizza is in or past the oven; assembly is over
    AssemblyLocked,
    /// Catalog record is malformed (sauce without a kind)
    InvalidSauceRecord,
}

impl fmt::Display for AddIngredientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AddIngredientError::AlreadyHasDough => "pizza already has dough",
            AddIngredientError::SauceRequiresDough => "need dough before adding sauce",
            AddIngredientError::AlreadyHasSauce => "pizza already has sauce",
            AddIngredientError::CheeseRequiresDoughAndSauce => {
                "need dough and sauce before adding cheese"
            }
            AddIngredientError::AlreadyHasCheese => "pizza already has cheese",
            AddIngredientError::ToppingsRequireCompleteBase => {
                "need dough, sauce, and cheese before adding toppings"
            }
            AddIngredientError::AssemblyLocked => "pizza is no longer being assembled",
            AddIngredientError::InvalidSauceRecord => "sauce ingredient has no sauce kind",
        };
        write!(f, "{}", reason)
    }
}

impl std::error::Error for AddIngredientError {}

/// Rejected cooking operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookError {
    NotAssembled,
    AlreadyCooking,
    Burnt,
    NotCooking,
}

impl fmt::Display for CookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            CookError::NotAssembled => "cannot cook an incomplete pizza",
            CookError::AlreadyCooking => "pizza is already cooking",
            CookError::Burnt => "pizza is burnt",
            CookError::NotCooking => "pizza is not cooking",
        };
        write!(f, "{}", reason)
    }
}

impl std::error::Error for CookError {}

/// State edges crossed during one cooking tick
#[derive(Debug, Clone, Copy)]
pub struct CookTick {
    /// Crossed perfect time this tick without burning
    pub became_cooked: bool,
    /// Crossed burn time this tick; cooking has stopped
    pub became_burnt: bool,
    pub quality: CookQuality,
}

/// A pizza under assembly or in the oven
#[derive(Debug, Clone)]
pub struct Pizza {
    size: PizzaSize,
    has_dough: bool,
    sauce: Option<SauceType>,
    has_cheese: bool,
    /// Deduplicated topping set used for order matching
    toppings: BTreeSet<String>,
    /// Every ingredient id added, in order, duplicates included
    ingredients: Vec<String>,
    state: PizzaState,
    quality: CookQuality,
    cook_timer: f32,
}

impl Pizza {
    pub fn new(size: PizzaSize) -> Self {
        Self {
            size,
            has_dough: false,
            sauce: None,
            has_cheese: false,
            toppings: BTreeSet::new(),
            ingredients: Vec::new(),
            state: PizzaState::NoDough,
            quality: CookQuality::Raw,
            cook_timer: 0.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.has_dough && self.sauce.is_some() && self.has_cheese
    }

    /// Try to add an ingredient, enforcing the category ordering.
    pub fn try_add_ingredient(
        &mut self,
        record: &IngredientRecord,
    ) -> Result<(), AddIngredientError> {
        if matches!(
            self.state,
            PizzaState::Cooking | PizzaState::Cooked | PizzaState::Burnt
        ) {
            log::warn!("rejecting {}: assembly is over", record.id);
            return Err(AddIngredientError::AssemblyLocked);
        }

        match record.category {
            IngredientCategory::Base => {
                if self.has_dough {
                    log::warn!("pizza already has dough");
                    return Err(AddIngredientError::AlreadyHasDough);
                }
                self.has_dough = true;
                self.update_state(PizzaState::DoughOnly);
            }
            IngredientCategory::Sauce => {
                if !self.has_dough {
                    log::warn!("need dough before sauce");
                    return Err(AddIngredientError::SauceRequiresDough);
                }
                if self.sauce.is_some() {
                    log::warn!("pizza already has sauce");
                    return Err(AddIngredientError::AlreadyHasSauce);
                }
                let kind = record.sauce.ok_or(AddIngredientError::InvalidSauceRecord)?;
                self.sauce = Some(kind);
                self.update_state(PizzaState::DoughAndSauce);
            }
            IngredientCategory::Cheese => {
                if !self.has_dough || self.sauce.is_none() {
                    log::warn!("need dough and sauce before cheese");
                    return Err(AddIngredientError::CheeseRequiresDoughAndSauce);
                }
                if self.has_cheese {
                    log::warn!("pizza already has cheese");
                    return Err(AddIngredientError::AlreadyHasCheese);
                }
                self.has_cheese = true;
                self.update_state(PizzaState::ReadyForToppings);
            }
            IngredientCategory::Topping => {
                if !self.is_complete() {
                    log::warn!("need dough, sauce, and cheese before toppings");
                    return Err(AddIngredientError::ToppingsRequireCompleteBase);
                }
                // Repeat additions are fine; the matching set dedups
                self.toppings.insert(record.id.clone());
            }
        }

        self.ingredients.push(record.id.clone());
        Ok(())
    }

    fn update_state(&mut self, new_state: PizzaState) {
        self.state = new_state;
        if self.is_complete() && self.state != PizzaState::Complete {
            self.state = PizzaState::Complete;
        }
    }

    /// Begin cooking: resets the cook timer. Valid from Complete, or from
    /// Cooked for a pizza going back into an oven.
    pub fn start_cooking(&mut self) -> Result<(), CookError> {
        match self.state {
            PizzaState::Complete | PizzaState::Cooked => {}
            PizzaState::Cooking => return Err(CookError::AlreadyCooking),
            PizzaState::Burnt => return Err(CookError::Burnt),
            _ => {
                log::warn!("cannot cook an incomplete pizza");
                return Err(CookError::NotAssembled);
            }
        }

        self.state = PizzaState::Cooking;
        self.cook_timer = 0.0;
        self.quality = CookQuality::Raw;
        Ok(())
    }

    /// Advance the cook timer and derive quality from the profile.
    ///
    /// Keeps ticking while Cooking or Cooked — a pizza left in the oven
    /// past its window overcooks and eventually burns. No-op otherwise.
    pub fn update_cooking(&mut self, dt: f32, profile: &CookingProfile) -> CookTick {
        if !matches!(self.state, PizzaState::Cooking | PizzaState::Cooked) {
            return CookTick {
                became_cooked: false,
                became_burnt: false,
                quality: self.quality,
            };
        }

        self.cook_timer += dt;
        self.quality = profile.quality_at(self.cook_timer);

        let mut tick = CookTick {
            became_cooked: false,
            became_burnt: false,
            quality: self.quality,
        };

        if self.quality == CookQuality::Burnt {
            self.state = PizzaState::Burnt;
            tick.became_burnt = true;
        } else if self.state == PizzaState::Cooking && self.cook_timer >= profile.perfect_time {
            // Auto-finish once the target time passes without burning
            self.state = PizzaState::Cooked;
            tick.became_cooked = true;
        }

        tick
    }

    /// Mark cooking finished (pizza leaving the oven) and report the final
    /// quality. Only valid while Cooking or Cooked.
    pub fn finish_cooking(&mut self) -> Result<CookQuality, CookError> {
        if !matches!(self.state, PizzaState::Cooking | PizzaState::Cooked) {
            log::warn!("pizza is not cooking");
            return Err(CookError::NotCooking);
        }
        self.state = PizzaState::Cooked;
        Ok(self.quality)
    }

    /// View of this pizza for order matching
    pub fn contents(&self) -> PizzaContents<'_> {
        PizzaContents {
            size: self.size,
            has_dough: self.has_dough,
            sauce: self.sauce,
            has_cheese: self.has_cheese,
            toppings: &self.toppings,
            quality: self.quality,
        }
    }

    /// Sale value: size base times cook quality multiplier
    pub fn value(&self) -> u32 {
        payment::pizza_value(self.size, self.quality)
    }

    /// Human-readable summary, e.g. for notifications
    pub fn description(&self) -> String {
        let mut desc = format!("{:?} pizza", self.size);
        if !self.has_dough {
            desc.push_str(" (no dough)");
            return desc;
        }
        if let Some(sauce) = self.sauce {
            desc.push_str(&format!(" with {:?} sauce", sauce));
        }
        if self.has_cheese {
            desc.push_str(", cheese");
        }
        for topping in &self.toppings {
            desc.push_str(", ");
            desc.push_str(topping);
        }
        if matches!(self.state, PizzaState::Cooked | PizzaState::Burnt) {
            desc.push_str(&format!(" ({:?})", self.quality));
        }
        desc
    }

    pub fn size(&self) -> PizzaSize {
        self.size
    }

    pub fn state(&self) -> PizzaState {
        self.state
    }

    pub fn quality(&self) -> CookQuality {
        self.quality
    }

    pub fn cook_timer(&self) -> f32 {
        self.cook_timer
    }

    pub fn has_dough(&self) -> bool {
        self.has_dough
    }

    pub fn sauce(&self) -> Option<SauceType> {
        self.sauce
    }

    pub fn has_cheese(&self) -> bool {
        self.has_cheese
    }

    pub fn toppings(&self) -> &BTreeSet<String> {
        &self.toppings
    }

    /// Full addition history, duplicates included
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, category: IngredientCategory) -> IngredientRecord {
        IngredientRecord {
            id: id.to_string(),
            display_name: id.to_string(),
            category,
            sauce: if category == IngredientCategory::Sauce {
                Some(SauceType::Marinara)
            } else {
                None
            },
            base_price: 5,
        }
    }

    fn assembled() -> Pizza {
        let mut p = Pizza::new(PizzaSize::Medium);
        p.try_add_ingredient(&record("dough", IngredientCategory::Base)).unwrap();
        p.try_add_ingredient(&record("marinara", IngredientCategory::Sauce)).unwrap();
        p.try_add_ingredient(&record("mozzarella", IngredientCategory::Cheese)).unwrap();
        p
    }

    #[test]
    fn test_assembly_gating() {
        let mut p = Pizza::new(PizzaSize::Small);

        // Everything but dough is rejected on an empty pizza
        assert_eq!(
            p.try_add_ingredient(&record("marinara", IngredientCategory::Sauce)),
            Err(AddIngredientError::SauceRequiresDough)
        );
        assert_eq!(
            p.try_add_ingredient(&record("mozzarella", IngredientCategory::Cheese)),
            Err(AddIngredientError::CheeseRequiresDoughAndSauce)
        );
        assert_eq!(
            p.try_add_ingredient(&record("pepperoni", IngredientCategory::Topping)),
            Err(AddIngredientError::ToppingsRequireCompleteBase)
        );

        p.try_add_ingredient(&record("dough", IngredientCategory::Base)).unwrap();
        assert_eq!(p.state(), PizzaState::DoughOnly);
        assert_eq!(
            p.try_add_ingredient(&record("dough", IngredientCategory::Base)),
            Err(AddIngredientError::AlreadyHasDough)
        );

        // Cheese still gated until sauce lands
        assert_eq!(
            p.try_add_ingredient(&record("mozzarella", IngredientCategory::Cheese)),
            Err(AddIngredientError::CheeseRequiresDoughAndSauce)
        );
        p.try_add_ingredient(&record("marinara", IngredientCategory::Sauce)).unwrap();
        assert_eq!(p.state(), PizzaState::DoughAndSauce);

        p.try_add_ingredient(&record("mozzarella", IngredientCategory::Cheese)).unwrap();
        assert!(p.is_complete());
        assert_eq!(p.state(), PizzaState::Complete);
    }

    #[test]
    fn test_toppings_fail_until_complete() {
        let mut p = Pizza::new(PizzaSize::Medium);
        p.try_add_ingredient(&record("dough", IngredientCategory::Base)).unwrap();
        p.try_add_ingredient(&record("marinara", IngredientCategory::Sauce)).unwrap();
        assert!(!p.is_complete());
        assert_eq!(
            p.try_add_ingredient(&record("pepperoni", IngredientCategory::Topping)),
            Err(AddIngredientError::ToppingsRequireCompleteBase)
        );
    }

    #[test]
    fn test_duplicate_toppings_collapse_in_matching_set() {
        let mut p = assembled();
        p.try_add_ingredient(&record("pepperoni", IngredientCategory::Topping)).unwrap();
        p.try_add_ingredient(&record("pepperoni", IngredientCategory::Topping)).unwrap();

        assert_eq!(p.toppings().len(), 1);
        // Both additions remain in the history
        assert_eq!(
            p.ingredients().iter().filter(|i| *i == "pepperoni").count(),
            2
        );
    }

    #[test]
    fn test_cannot_cook_incomplete() {
        let mut p = Pizza::new(PizzaSize::Large);
        assert_eq!(p.start_cooking(), Err(CookError::NotAssembled));
    }

    #[test]
    fn test_cooking_quality_progression() {
        let profile = CookingProfile::new(30.0, 45.0);
        let mut p = assembled();
        p.start_cooking().unwrap();

        p.update_cooking(10.0, &profile);
        assert_eq!(p.quality(), CookQuality::Raw);

        let tick = p.update_cooking(19.0, &profile); // t = 29
        assert_eq!(p.quality(), CookQuality::Perfect);
        assert!(!tick.became_cooked);
        assert_eq!(p.state(), PizzaState::Cooking);

        let tick = p.update_cooking(2.0, &profile); // t = 31, past perfect time
        assert!(tick.became_cooked);
        assert_eq!(p.state(), PizzaState::Cooked);

        let tick = p.update_cooking(14.0, &profile); // t = 45, burn time
        assert!(tick.became_burnt);
        assert_eq!(p.state(), PizzaState::Burnt);
        assert_eq!(p.quality(), CookQuality::Burnt);

        // Burnt pizzas stop ticking
        let tick = p.update_cooking(10.0, &profile);
        assert!(!tick.became_burnt);
        assert_eq!(p.cook_timer(), 45.0);
    }

    #[test]
    fn test_finish_cooking() {
        let profile = CookingProfile::new(30.0, 45.0);
        let mut p = assembled();
        assert_eq!(p.finish_cooking(), Err(CookError::NotCooking));

        p.start_cooking().unwrap();
        p.update_cooking(29.0, &profile);
        assert_eq!(p.finish_cooking(), Ok(CookQuality::Perfect));
        assert_eq!(p.state(), PizzaState::Cooked);
    }

    #[test]
    fn test_assembly_locked_after_cooking_starts() {
        let mut p = assembled();
        p.start_cooking().unwrap();
        assert_eq!(
            p.try_add_ingredient(&record("pepperoni", IngredientCategory::Topping)),
            Err(AddIngredientError::AssemblyLocked)
        );
    }

    #[test]
    fn test_value_reflects_quality() {
        let profile = CookingProfile::new(30.0, 45.0);
        let mut p = assembled();
        p.start_cooking().unwrap();
        p.update_cooking(30.0, &profile);
        assert_eq!(p.value(), 23); // 15 * 1.5 rounds to 23

        p.update_cooking(15.0, &profile); // burnt
        assert_eq!(p.value(), 2); // 15 * 0.1 rounds to 2
    }
}
