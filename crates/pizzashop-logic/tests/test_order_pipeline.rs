//! Integration tests for the order math pipeline.
//!
//! Exercises: cooking profile → cook quality → order matching → payment,
//! the way the core wires them together during a service.

use std::collections::BTreeSet;

use pizzashop_logic::matching::{match_pizza, MatchFailure, OrderRequirements, PizzaContents};
use pizzashop_logic::payment::{bonus_for_base, payment_for_time, pizza_value};
use pizzashop_logic::quality::CookingProfile;
use pizzashop_logic::scheduling::{scaled_interval, SpawnScaling};
use pizzashop_logic::types::{CookLevel, CookQuality, PizzaSize, SauceType};
use pizzashop_logic::weighted::{pick_weighted, WeightedItem};

fn toppings(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// Cook a pizza for `elapsed` seconds and submit it against a well-done
/// order — the full decision chain a validation station runs.
fn submit_after(elapsed: f32, time_fraction: f32) -> Result<u32, MatchFailure> {
    let profile = CookingProfile::new(45.0, 60.0);
    let tops = toppings(&["pepperoni"]);

    let pizza = PizzaContents {
        size: PizzaSize::Medium,
        has_dough: true,
        sauce: Some(SauceType::Marinara),
        has_cheese: true,
        toppings: &tops,
        quality: profile.quality_at(elapsed),
    };
    let order = OrderRequirements {
        size: PizzaSize::Medium,
        sauce: SauceType::Marinara,
        requires_cheese: true,
        toppings: &tops,
        cook_level: CookLevel::WellDone,
    };

    match_pizza(&pizza, &order)?;
    let base = 17;
    Ok(payment_for_time(base, bonus_for_base(base), time_fraction))
}

#[test]
fn perfectly_cooked_pizza_pays_full_bonus() {
    assert_eq!(submit_after(45.0, 0.9), Ok(17 + 9));
}

#[test]
fn perfect_window_is_wide_enough_to_hit() {
    // Anywhere in [0.8, 1.2) x perfect time satisfies a well-done order
    assert!(submit_after(36.0, 0.9).is_ok());
    assert!(submit_after(53.9, 0.9).is_ok());
}

#[test]
fn undercooked_pizza_is_rejected_with_reason() {
    assert_eq!(submit_after(20.0, 0.9), Err(MatchFailure::WrongCookLevel));
}

#[test]
fn burnt_pizza_is_rejected() {
    assert_eq!(submit_after(60.0, 0.9), Err(MatchFailure::WrongCookLevel));
}

#[test]
fn late_submission_erodes_payment_but_still_matches() {
    let fast = submit_after(45.0, 1.0).unwrap();
    let mid = submit_after(45.0, 0.6).unwrap();
    let slow = submit_after(45.0, 0.1).unwrap();
    assert!(fast > mid);
    assert!(mid > slow);
}

#[test]
fn pizza_value_tracks_quality() {
    let profile = CookingProfile::new(45.0, 60.0);
    let perfect = pizza_value(PizzaSize::Medium, profile.quality_at(45.0));
    let overdone = pizza_value(PizzaSize::Medium, profile.quality_at(55.0));
    let burnt = pizza_value(PizzaSize::Medium, profile.quality_at(60.0));
    assert!(perfect > overdone);
    assert!(overdone > burnt);
    assert_eq!(burnt, 2); // 15 * 0.1 rounds to 2
}

#[test]
fn weighted_tables_drive_generation_deterministically() {
    let sizes = vec![
        WeightedItem::new(PizzaSize::Small, 1.0),
        WeightedItem::new(PizzaSize::Large, 0.0),
    ];
    for i in 0..50 {
        let roll = i as f32 / 50.0;
        assert_eq!(pick_weighted(&sizes, roll), Some(&PizzaSize::Small));
    }
}

#[test]
fn spawn_interval_floor_is_half_base() {
    let scaling = SpawnScaling::default();
    for t in 0..500 {
        let interval = scaled_interval(30.0, &scaling, t as f32 * 10.0);
        assert!(interval >= 15.0 - 1e-5);
        assert!(interval <= 30.0 + 1e-5);
    }
}
