//! Order spawn scheduling — intervals shrink as the shift wears on.

use serde::{Deserialize, Serialize};

/// Difficulty ramp for order generation.
///
/// Before `start_time` the base interval applies unchanged; between
/// `start_time` and `max_difficulty_time` it shrinks linearly to half the
/// base and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnScaling {
    pub enabled: bool,
    /// Game time (seconds) when scaling starts
    pub start_time: f32,
    /// Game time (seconds) when the interval bottoms out
    pub max_difficulty_time: f32,
}

impl Default for SpawnScaling {
    fn default() -> Self {
        Self {
            enabled: true,
            start_time: 300.0,
            max_difficulty_time: 1200.0,
        }
    }
}

/// Interval until the next order at `game_time`, before jitter.
pub fn scaled_interval(base: f32, scaling: &SpawnScaling, game_time: f32) -> f32 {
    if !scaling.enabled || game_time < scaling.start_time {
        return base;
    }

    let window = scaling.max_difficulty_time - scaling.start_time;
    if window <= 0.0 {
        return base * 0.5;
    }

    let t = ((game_time - scaling.start_time) / window).clamp(0.0, 1.0);
    base + (base * 0.5 - base) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_before_scaling_starts() {
        let s = SpawnScaling::default();
        assert_eq!(scaled_interval(30.0, &s, 0.0), 30.0);
        assert_eq!(scaled_interval(30.0, &s, 299.9), 30.0);
    }

    #[test]
    fn test_halves_at_max_difficulty() {
        let s = SpawnScaling::default();
        assert!((scaled_interval(30.0, &s, 1200.0) - 15.0).abs() < 1e-5);
        assert!((scaled_interval(30.0, &s, 99999.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_midpoint() {
        let s = SpawnScaling::default();
        // Halfway through the window: 75% of base
        assert!((scaled_interval(30.0, &s, 750.0) - 22.5).abs() < 1e-5);
    }

    #[test]
    fn test_disabled_scaling() {
        let s = SpawnScaling {
            enabled: false,
            ..SpawnScaling::default()
        };
        assert_eq!(scaled_interval(30.0, &s, 5000.0), 30.0);
    }

    #[test]
    fn test_interval_never_increases_over_time() {
        let s = SpawnScaling::default();
        let mut last = f32::INFINITY;
        for t in 0..200 {
            let i = scaled_interval(30.0, &s, t as f32 * 10.0);
            assert!(i <= last);
            last = i;
        }
    }
}
