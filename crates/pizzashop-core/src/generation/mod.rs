//! Generation — building the kitchen from catalog records.

mod kitchen;

pub use kitchen::*;
