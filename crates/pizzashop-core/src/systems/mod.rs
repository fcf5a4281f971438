//! Systems — world-level operations and per-frame ticking.

mod assembly;
mod cooking;

pub use assembly::*;
pub use cooking::*;
