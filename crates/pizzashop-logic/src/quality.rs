//! Cooking profiles — how elapsed oven time maps to cook quality.

use serde::{Deserialize, Serialize};

use crate::types::CookQuality;

/// Cooking profile for one pizza size.
///
/// `perfect_time` is the target, `burn_time` the point of no return.
/// Quality bands are fixed ratios of the perfect time, so larger pizzas
/// get proportionally wider windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CookingProfile {
    /// Seconds to reach perfect cook quality
    pub perfect_time: f32,
    /// Seconds before the pizza burns
    pub burn_time: f32,
}

impl CookingProfile {
    pub fn new(perfect_time: f32, burn_time: f32) -> Self {
        Self {
            perfect_time,
            burn_time,
        }
    }

    /// Quality after `elapsed` seconds in a hot oven.
    ///
    /// Bands: below 50% of perfect time → Raw, below 80% → Undercooked,
    /// below 120% → Perfect, below burn time → Overcooked, else Burnt.
    pub fn quality_at(&self, elapsed: f32) -> CookQuality {
        if elapsed < self.perfect_time * 0.5 {
            CookQuality::Raw
        } else if elapsed < self.perfect_time * 0.8 {
            CookQuality::Undercooked
        } else if elapsed < self.perfect_time * 1.2 {
            CookQuality::Perfect
        } else if elapsed < self.burn_time {
            CookQuality::Overcooked
        } else {
            CookQuality::Burnt
        }
    }

    /// Normalized progress toward perfect (clamped to 0-1)
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.perfect_time <= 0.0 {
            return 0.0;
        }
        (elapsed / self.perfect_time).clamp(0.0, 1.0)
    }
}
