//! Assembly zone — a make-table slot that owns at most one pizza while it
//! is being built.

use hecs::Entity;

use pizzashop_logic::types::PizzaSize;

/// Zone workflow state, mirroring the owned pizza's completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneState {
    Empty,
    Assembling,
    Complete,
}

/// A workstation slot where one pizza is assembled.
///
/// The zone exclusively owns its pizza entity until the pizza is removed
/// (ownership passes to the caller) or cancelled (the pizza is destroyed).
#[derive(Debug, Clone)]
pub struct AssemblyZone {
    cell: (u32, u32),
    supported_size: PizzaSize,
    pizza: Option<Entity>,
    state: ZoneState,
}

impl AssemblyZone {
    pub fn new(cell: (u32, u32), supported_size: PizzaSize) -> Self {
        Self {
            cell,
            supported_size,
            pizza: None,
            state: ZoneState::Empty,
        }
    }

    pub fn cell(&self) -> (u32, u32) {
        self.cell
    }

    pub fn supported_size(&self) -> PizzaSize {
        self.supported_size
    }

    pub fn has_pizza(&self) -> bool {
        self.pizza.is_some()
    }

    pub fn pizza(&self) -> Option<Entity> {
        self.pizza
    }

    pub fn state(&self) -> ZoneState {
        self.state
    }

    pub(crate) fn begin_assembly(&mut self, pizza: Entity) {
        self.pizza = Some(pizza);
        self.state = ZoneState::Assembling;
    }

    pub(crate) fn mark_complete(&mut self) {
        if self.pizza.is_some() {
            self.state = ZoneState::Complete;
        }
    }

    /// Release the owned pizza to the caller and reset to Empty.
    pub(crate) fn release(&mut self) -> Option<Entity> {
        let pizza = self.pizza.take();
        self.state = ZoneState::Empty;
        pizza
    }
}
