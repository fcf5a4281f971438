//! Component definitions for the kitchen entities.
//!
//! Each component is a self-contained state machine with explicit
//! operations; world-level interplay between entities lives in the
//! systems modules.

mod container;
mod oven;
mod pizza;
mod zone;

pub use container::*;
pub use oven::*;
pub use pizza::*;
pub use zone::*;
