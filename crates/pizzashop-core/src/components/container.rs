//! Serving container — a reusable dispenser that binds to one ingredient
//! for its whole filled lifetime.

use std::fmt;

use crate::catalog::ContainerTypeRecord;

/// Container fill state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    /// Unassigned, accepts any ingredient, cannot dispense
    Empty,
    /// Bound to one ingredient; can fill and dispense
    Filling,
    /// At capacity; can only dispense
    Full,
}

/// Rejected container operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    AlreadyAssigned { current: String },
    /// Servings cannot exist without an assigned ingredient
    NotAssigned,
    Full,
    Empty,
    IngredientMismatch { assigned: String, offered: String },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::AlreadyAssigned { current } => {
                write!(f, "container already assigned to {}", current)
            }
            ContainerError::NotAssigned => write!(f, "container has no assigned ingredient"),
            ContainerError::Full => write!(f, "container is full"),
            ContainerError::Empty => write!(f, "container is empty"),
            ContainerError::IngredientMismatch { assigned, offered } => {
                write!(f, "container holds {}, cannot add {}", assigned, offered)
            }
        }
    }
}

impl std::error::Error for ContainerError {}

/// A serving dispenser on the make table.
///
/// Invariant: `servings == 0` ⟺ state is Empty ⟺ no assigned ingredient.
#[derive(Debug, Clone)]
pub struct Container {
    type_id: String,
    max_capacity: u32,
    assigned_ingredient: Option<String>,
    servings: u32,
    state: ContainerState,
}

impl Container {
    /// A fresh, empty container of the given type
    pub fn new(record: &ContainerTypeRecord) -> Self {
        Self {
            type_id: record.id.clone(),
            max_capacity: record.max_capacity.max(1),
            assigned_ingredient: None,
            servings: 0,
            state: ContainerState::Empty,
        }
    }

    /// A container pre-filled with the record's initial servings of one
    /// ingredient. Zero initial servings still yields an empty container.
    pub fn prefilled(record: &ContainerTypeRecord, ingredient_id: &str) -> Self {
        let mut container = Self::new(record);
        let servings = record.initial_servings.min(container.max_capacity);
        if servings > 0 {
            container.assigned_ingredient = Some(ingredient_id.to_string());
            container.servings = servings;
            container.state = if servings >= container.max_capacity {
                ContainerState::Full
            } else {
                ContainerState::Filling
            };
        }
        container
    }

    /// Bind the container to an ingredient. Only valid while unassigned.
    pub fn assign_ingredient(&mut self, ingredient_id: &str) -> Result<(), ContainerError> {
        if let Some(current) = &self.assigned_ingredient {
            log::warn!(
                "container already assigned to {}, rejecting {}",
                current,
                ingredient_id
            );
            return Err(ContainerError::AlreadyAssigned {
                current: current.clone(),
            });
        }

        self.assigned_ingredient = Some(ingredient_id.to_string());
        self.state = ContainerState::Filling;
        Ok(())
    }

    /// Add one serving of the assigned ingredient.
    pub fn add_serving(&mut self) -> Result<(), ContainerError> {
        if self.assigned_ingredient.is_none() {
            log::warn!("cannot add serving to an unassigned container");
            return Err(ContainerError::NotAssigned);
        }
        if self.state == ContainerState::Full {
            log::warn!("cannot add serving, container is full");
            return Err(ContainerError::Full);
        }

        self.servings += 1;
        self.state = if self.servings >= self.max_capacity {
            ContainerState::Full
        } else {
            ContainerState::Filling
        };
        Ok(())
    }

    /// Dispense one serving; returns the ingredient id taken.
    ///
    /// Dispensing the last serving fully resets the container.
    pub fn remove_serving(&mut self) -> Result<String, ContainerError> {
        if self.servings == 0 {
            log::warn!("cannot take serving, container is empty");
            return Err(ContainerError::Empty);
        }
        let ingredient = self
            .assigned_ingredient
            .clone()
            .ok_or(ContainerError::NotAssigned)?;

        self.servings -= 1;
        if self.servings == 0 {
            self.reset();
        } else {
            self.state = ContainerState::Filling;
        }
        Ok(ingredient)
    }

    /// Add a serving of a specific ingredient, assigning the container on
    /// first fill. A different ingredient than the assigned one is
    /// rejected — containers stay single-ingredient until emptied.
    pub fn try_fill(&mut self, ingredient_id: &str) -> Result<(), ContainerError> {
        match &self.assigned_ingredient {
            None => {
                self.assign_ingredient(ingredient_id)?;
                self.add_serving()
            }
            Some(current) if current == ingredient_id => self.add_serving(),
            Some(current) => {
                log::warn!(
                    "container holds {}, rejecting fill with {}",
                    current,
                    ingredient_id
                );
                Err(ContainerError::IngredientMismatch {
                    assigned: current.clone(),
                    offered: ingredient_id.to_string(),
                })
            }
        }
    }

    /// Force-clear assignment and servings, back to Empty.
    pub fn reset(&mut self) {
        self.assigned_ingredient = None;
        self.servings = 0;
        self.state = ContainerState::Empty;
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn state(&self) -> ContainerState {
        self.state
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    pub fn assigned_ingredient(&self) -> Option<&str> {
        self.assigned_ingredient.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.servings == 0
    }

    pub fn is_full(&self) -> bool {
        self.servings >= self.max_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(capacity: u32, initial: u32) -> ContainerTypeRecord {
        ContainerTypeRecord {
            id: "standard_bin".to_string(),
            display_name: "Standard Bin".to_string(),
            max_capacity: capacity,
            initial_servings: initial,
            unlock_cost: 0,
        }
    }

    fn invariant_holds(c: &Container) -> bool {
        let empty = c.servings() == 0;
        (empty == (c.state() == ContainerState::Empty))
            && (empty == c.assigned_ingredient().is_none())
    }

    #[test]
    fn test_fill_and_drain_lifecycle() {
        let mut c = Container::new(&record(3, 0));
        assert_eq!(c.state(), ContainerState::Empty);

        c.try_fill("pepperoni").unwrap();
        assert_eq!(c.state(), ContainerState::Filling);
        c.try_fill("pepperoni").unwrap();
        c.try_fill("pepperoni").unwrap();
        assert_eq!(c.state(), ContainerState::Full);
        assert_eq!(c.try_fill("pepperoni"), Err(ContainerError::Full));

        assert_eq!(c.remove_serving().unwrap(), "pepperoni");
        assert_eq!(c.state(), ContainerState::Filling);
        c.remove_serving().unwrap();
        c.remove_serving().unwrap();

        // Draining the last serving resets everything
        assert_eq!(c.state(), ContainerState::Empty);
        assert_eq!(c.assigned_ingredient(), None);
        assert_eq!(c.remove_serving(), Err(ContainerError::Empty));
        assert!(invariant_holds(&c));
    }

    #[test]
    fn test_servings_clamped_to_capacity() {
        let mut c = Container::new(&record(2, 0));
        c.try_fill("olives").unwrap();
        c.try_fill("olives").unwrap();
        assert_eq!(c.try_fill("olives"), Err(ContainerError::Full));
        assert_eq!(c.servings(), 2);
    }

    #[test]
    fn test_single_ingredient_purity() {
        let mut c = Container::prefilled(&record(20, 3), "pepperoni");
        assert_eq!(c.servings(), 3);

        assert_eq!(
            c.assign_ingredient("mushrooms"),
            Err(ContainerError::AlreadyAssigned {
                current: "pepperoni".to_string()
            })
        );
        assert_eq!(
            c.try_fill("mushrooms"),
            Err(ContainerError::IngredientMismatch {
                assigned: "pepperoni".to_string(),
                offered: "mushrooms".to_string()
            })
        );

        // Rejection left the container untouched
        assert_eq!(c.assigned_ingredient(), Some("pepperoni"));
        assert_eq!(c.servings(), 3);
    }

    #[test]
    fn test_add_serving_requires_assignment() {
        let mut c = Container::new(&record(5, 0));
        assert_eq!(c.add_serving(), Err(ContainerError::NotAssigned));
        assert!(invariant_holds(&c));
    }

    #[test]
    fn test_reset_roundtrip_matches_fresh_container() {
        let mut used = Container::prefilled(&record(20, 10), "bacon");
        used.remove_serving().unwrap();
        used.reset();
        used.assign_ingredient("bacon").unwrap();
        for _ in 0..5 {
            used.add_serving().unwrap();
        }

        let fresh = Container::prefilled(&record(20, 5), "bacon");
        assert_eq!(used.state(), fresh.state());
        assert_eq!(used.servings(), fresh.servings());
        assert_eq!(used.assigned_ingredient(), fresh.assigned_ingredient());
    }

    #[test]
    fn test_prefilled_at_capacity_is_full() {
        let c = Container::prefilled(&record(4, 9), "olives");
        assert_eq!(c.servings(), 4);
        assert_eq!(c.state(), ContainerState::Full);
    }
}
