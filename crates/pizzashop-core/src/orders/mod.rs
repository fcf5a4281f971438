//! The order subsystem: timed customer requests, generation strategies,
//! and the manager that owns the order queue.

mod config;
mod manager;
mod order;
mod strategy;

pub use config::*;
pub use manager::*;
pub use order::*;
pub use strategy::*;
