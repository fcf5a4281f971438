//! PizzaShop Headless Simulation Harness
//!
//! Validates the simulation core and the shipped data catalog without any
//! rendering or input. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p pizzashop-simtest
//!   cargo run -p pizzashop-simtest -- --verbose

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pizzashop_core::catalog::DataCatalog;
use pizzashop_core::components::{Container, Pizza, PizzaState};
use pizzashop_core::engine::ShopEngine;
use pizzashop_core::events::ShopEvent;
use pizzashop_core::generation::{ContainerPlacement, KitchenSetup};
use pizzashop_core::orders::{OrderConfig, OrderGenerationMode, OrderManager};
use pizzashop_logic::matching::{match_pizza, OrderRequirements, PizzaContents};
use pizzashop_logic::payment::{bonus_for_base, payment_for_time};
use pizzashop_logic::quality::CookingProfile;
use pizzashop_logic::types::{CookLevel, CookQuality, IngredientCategory, PizzaSize, SauceType};
use pizzashop_logic::weighted::{pick_weighted, WeightedItem};

// ── Shared data (same JSON the core ships) ──────────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/catalog.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed,
        detail,
    }
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== PizzaShop Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog validation
    results.extend(validate_catalog(verbose));

    // 2. Container lifecycle sweep
    results.extend(validate_container_lifecycle(verbose));

    // 3. Cooking curve
    results.extend(validate_cooking_curve(verbose));

    // 4. Payment decay
    results.extend(validate_payment_decay(verbose));

    // 5. Order matching truth table
    results.extend(validate_matching(verbose));

    // 6. Weighted generation distribution
    results.extend(validate_generation_distribution(verbose));

    // 7. End-to-end service scenario
    results.extend(validate_full_service(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(_verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    let catalog = match DataCatalog::from_json(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(check("catalog_parse", false, format!("load error: {}", e)));
            return results;
        }
    };
    results.push(check(
        "catalog_parse",
        true,
        format!(
            "{} ingredients, {} containers, {} ovens, {} tables",
            catalog.ingredient_count(),
            catalog.container_count(),
            catalog.oven_count(),
            catalog.make_table_count()
        ),
    ));

    // Every structural category must be represented
    for category in [
        IngredientCategory::Base,
        IngredientCategory::Sauce,
        IngredientCategory::Cheese,
        IngredientCategory::Topping,
    ] {
        let count = catalog.ingredients_by_category(category).len();
        results.push(check(
            &format!("category_{:?}", category).to_lowercase(),
            count > 0,
            format!("{} records", count),
        ));
    }

    // Every oven profile must burn after it perfects
    let mut profiles_ok = true;
    for oven_id in ["standard_oven", "stone_deck_oven"] {
        if let Some(oven) = catalog.try_get_oven(oven_id) {
            for size in PizzaSize::ALL {
                let p = oven.profiles.profile_for(size);
                if p.burn_time <= p.perfect_time {
                    profiles_ok = false;
                }
            }
        } else {
            profiles_ok = false;
        }
    }
    results.push(check(
        "oven_profiles_ordered",
        profiles_ok,
        "burn_time > perfect_time for every size".to_string(),
    ));

    results
}

// ── 2. Containers ───────────────────────────────────────────────────────

fn validate_container_lifecycle(_verbose: bool) -> Vec<TestResult> {
    println!("--- Containers ---");
    let mut results = Vec::new();

    let catalog = match DataCatalog::from_json(CATALOG_JSON) {
        Ok(c) => c,
        Err(_) => return results,
    };
    let Some(record) = catalog.try_get_container("standard_bin") else {
        results.push(check("container_record", false, "standard_bin missing".into()));
        return results;
    };

    // Fill to capacity, drain to zero, checking the invariant throughout
    let mut container = Container::new(record);
    let mut invariant_ok = true;
    let mut clamp_ok = true;

    for _ in 0..record.max_capacity {
        if container.try_fill("pepperoni").is_err() {
            clamp_ok = false;
        }
    }
    clamp_ok &= container.try_fill("pepperoni").is_err();
    clamp_ok &= container.servings() == record.max_capacity;

    while !container.is_empty() {
        let empty = container.servings() == 0;
        invariant_ok &= empty == container.assigned_ingredient().is_none();
        if container.remove_serving().is_err() {
            invariant_ok = false;
            break;
        }
    }
    invariant_ok &= container.assigned_ingredient().is_none();
    invariant_ok &= container.remove_serving().is_err();

    results.push(check(
        "container_capacity_clamp",
        clamp_ok,
        format!("clamped at {}", record.max_capacity),
    ));
    results.push(check(
        "container_empty_invariant",
        invariant_ok,
        "servings==0 ⟺ unassigned ⟺ Empty".to_string(),
    ));

    // Purity: an assigned container rejects other ingredients
    let mut purity = Container::prefilled(record, "pepperoni");
    let rejected = purity.try_fill("mushrooms").is_err()
        && purity.assigned_ingredient() == Some("pepperoni");
    results.push(check(
        "container_purity",
        rejected,
        "mushrooms rejected from a pepperoni bin".to_string(),
    ));

    results
}

// ── 3. Cooking curve ────────────────────────────────────────────────────

fn validate_cooking_curve(verbose: bool) -> Vec<TestResult> {
    println!("--- Cooking Curve ---");
    let mut results = Vec::new();

    let profile = CookingProfile::new(60.0, 75.0);
    let expected = [
        (0.0, CookQuality::Raw),
        (29.9, CookQuality::Raw),
        (30.0, CookQuality::Undercooked),
        (48.0, CookQuality::Perfect),
        (71.9, CookQuality::Perfect),
        (72.0, CookQuality::Overcooked),
        (75.0, CookQuality::Burnt),
    ];
    let mut bands_ok = true;
    for (elapsed, want) in expected {
        let got = profile.quality_at(elapsed);
        if got != want {
            bands_ok = false;
            if verbose {
                println!("  band mismatch at t={}: {:?} != {:?}", elapsed, got, want);
            }
        }
    }
    results.push(check(
        "quality_bands",
        bands_ok,
        "0.5/0.8/1.2/burn thresholds".to_string(),
    ));

    // Once past the perfect window, quality never improves again
    let mut monotonic = true;
    let mut last = CookQuality::Raw;
    for tenth in 720..1000 {
        let q = profile.quality_at(tenth as f32 * 0.1);
        if q < last {
            monotonic = false;
        }
        last = q;
    }
    results.push(check(
        "quality_monotonic",
        monotonic,
        "no recovery past 1.2x perfect time".to_string(),
    ));

    results
}

// ── 4. Payment decay ────────────────────────────────────────────────────

fn validate_payment_decay(_verbose: bool) -> Vec<TestResult> {
    println!("--- Payment ---");
    let mut results = Vec::new();

    let mut non_increasing = true;
    for base in [10u32, 15, 20, 25] {
        let bonus = bonus_for_base(base);
        let mut last = u32::MAX;
        for pct in (0..=100).rev() {
            let p = payment_for_time(base, bonus, pct as f32 / 100.0);
            if p > last {
                non_increasing = false;
            }
            last = p;
        }
    }
    results.push(check(
        "payment_non_increasing",
        non_increasing,
        "payout never rises as time runs out".to_string(),
    ));

    let tiers_ok = payment_for_time(20, 10, 0.9) == 30
        && payment_for_time(20, 10, 0.6) == 25
        && payment_for_time(20, 10, 0.3) == 20
        && payment_for_time(20, 10, 0.1) == 15;
    results.push(check(
        "payment_tiers",
        tiers_ok,
        "75/50/25 percent breakpoints".to_string(),
    ));

    results
}

// ── 5. Matching ─────────────────────────────────────────────────────────

fn validate_matching(_verbose: bool) -> Vec<TestResult> {
    println!("--- Matching ---");
    let mut results = Vec::new();

    let want: std::collections::BTreeSet<String> =
        ["pepperoni".to_string()].into_iter().collect();
    let extra: std::collections::BTreeSet<String> =
        ["pepperoni".to_string(), "olives".to_string()].into_iter().collect();

    let order = OrderRequirements {
        size: PizzaSize::Medium,
        sauce: SauceType::Marinara,
        requires_cheese: true,
        toppings: &want,
        cook_level: CookLevel::WellDone,
    };

    let exact = PizzaContents {
        size: PizzaSize::Medium,
        has_dough: true,
        sauce: Some(SauceType::Marinara),
        has_cheese: true,
        toppings: &want,
        quality: CookQuality::Perfect,
    };
    results.push(check(
        "match_exact",
        match_pizza(&exact, &order).is_ok(),
        "identical pizza accepted".to_string(),
    ));

    let mut cases_ok = true;
    let wrong_size = PizzaContents {
        size: PizzaSize::Large,
        ..exact.clone()
    };
    cases_ok &= match_pizza(&wrong_size, &order).is_err();

    let wrong_sauce = PizzaContents {
        sauce: Some(SauceType::Bbq),
        ..exact.clone()
    };
    cases_ok &= match_pizza(&wrong_sauce, &order).is_err();

    let extra_toppings = PizzaContents {
        toppings: &extra,
        ..exact.clone()
    };
    cases_ok &= match_pizza(&extra_toppings, &order).is_err();

    let undercooked = PizzaContents {
        quality: CookQuality::Undercooked,
        ..exact.clone()
    };
    cases_ok &= match_pizza(&undercooked, &order).is_err();

    results.push(check(
        "match_rejections",
        cases_ok,
        "size, sauce, extras, doneness all enforced".to_string(),
    ));

    results
}

// ── 6. Generation distribution ──────────────────────────────────────────

fn validate_generation_distribution(verbose: bool) -> Vec<TestResult> {
    println!("--- Generation ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(20240917);

    // Zero-weight entries must never be drawn
    let table = vec![
        WeightedItem::new(PizzaSize::Small, 1.0),
        WeightedItem::new(PizzaSize::Large, 0.0),
    ];
    let mut zero_ok = true;
    for _ in 0..1000 {
        let roll: f32 = rng.gen();
        if pick_weighted(&table, roll) != Some(&PizzaSize::Small) {
            zero_ok = false;
        }
    }
    results.push(check(
        "zero_weight_excluded",
        zero_ok,
        "1000 draws, Small only".to_string(),
    ));

    // The configured tables should roughly follow their weights
    let config = OrderConfig::default();
    let mut marinara = 0usize;
    let samples = 2000;
    for _ in 0..samples {
        if config.random_sauce(&mut rng) == SauceType::Marinara {
            marinara += 1;
        }
    }
    // Marinara carries 3.0 of 5.5 total weight ≈ 54%
    let fraction = marinara as f64 / samples as f64;
    let in_band = (0.45..0.65).contains(&fraction);
    if verbose {
        println!("  marinara fraction: {:.3}", fraction);
    }
    results.push(check(
        "sauce_weights_followed",
        in_band,
        format!("marinara {:.1}% of {} draws", fraction * 100.0, samples),
    ));

    // Strategies honour the max-active cap through the manager
    let mut manager = OrderManager::new(OrderConfig::default(), OrderGenerationMode::TrendBased);
    let mut events = pizzashop_core::events::EventQueue::new();
    let mut cap_ok = true;
    for _ in 0..600 {
        manager.update(1.0, &mut rng, &mut events);
        if manager.active_orders().len() > manager.config().max_active_orders {
            cap_ok = false;
        }
    }
    results.push(check(
        "max_active_cap",
        cap_ok,
        format!(
            "{} generated over 10 minutes, cap {}",
            manager.total_orders_generated(),
            manager.config().max_active_orders
        ),
    ));

    results
}

// ── 7. Full service ─────────────────────────────────────────────────────

fn validate_full_service(verbose: bool) -> Vec<TestResult> {
    println!("--- Full Service ---");
    let mut results = Vec::new();

    let catalog = match DataCatalog::from_json(CATALOG_JSON) {
        Ok(c) => c,
        Err(_) => return results,
    };

    let mut engine = ShopEngine::with_seed(
        catalog,
        OrderConfig::default(),
        OrderGenerationMode::Simple,
        7,
    );
    if let Err(e) = engine.setup_kitchen(&KitchenSetup {
        make_table: "standard_table".to_string(),
        ovens: vec!["standard_oven".to_string()],
        containers: vec![ContainerPlacement {
            container_type: "standard_bin".to_string(),
            ingredient: Some("pepperoni".to_string()),
            cell: (0, 0),
        }],
    }) {
        results.push(check("kitchen_build", false, format!("{}", e)));
        return results;
    }
    results.push(check("kitchen_build", true, "2 zones, 1 oven, 1 bin".to_string()));

    engine.set_auto_generate(false);
    let order_id = match engine.generate_order_now() {
        Ok(id) => id,
        Err(e) => {
            results.push(check("order_generated", false, format!("{}", e)));
            return results;
        }
    };
    let toppings = engine
        .orders()
        .order_by_id(order_id)
        .map(|o| o.toppings().clone())
        .unwrap_or_default();
    results.push(check(
        "order_generated",
        true,
        format!("order {} with {} toppings", order_id, toppings.len()),
    ));

    let zone = engine.layout().unwrap().zones[0];
    let oven = engine.layout().unwrap().ovens[0];

    let service = (|| -> Result<u32, Box<dyn std::error::Error>> {
        engine.turn_oven_on(oven)?;
        let pizza = engine.start_pizza(zone, PizzaSize::Medium)?;
        engine.add_ingredient(zone, "dough")?;
        engine.add_ingredient(zone, "marinara")?;
        engine.add_ingredient(zone, "mozzarella")?;
        for topping in &toppings {
            engine.add_ingredient(zone, topping)?;
        }
        engine.pick_up_pizza(zone)?;

        engine.update(5.0);
        engine.place_pizza_in_oven(oven, pizza)?;
        engine.update(45.0);
        let cooked = engine.remove_cooked_pizza(oven)?;
        Ok(engine.submit_pizza(cooked)?)
    })();

    match service {
        Ok(payment) => {
            results.push(check(
                "service_completed",
                payment > 0 && engine.orders().completed_orders().len() == 1,
                format!("earned ${}", payment),
            ));
        }
        Err(e) => {
            results.push(check("service_completed", false, format!("{}", e)));
            return results;
        }
    }

    // The event stream must tell the whole story
    let events = engine.drain_events();
    let saw = |pred: &dyn Fn(&ShopEvent) -> bool| events.iter().any(|e| pred(e));
    let story_ok = saw(&|e| matches!(e, ShopEvent::OrderReceived { .. }))
        && saw(&|e| matches!(e, ShopEvent::PizzaStarted { .. }))
        && saw(&|e| matches!(e, ShopEvent::PizzaCompleted { .. }))
        && saw(&|e| matches!(e, ShopEvent::PizzaPlacedInOven { .. }))
        && saw(&|e| matches!(e, ShopEvent::PizzaCooked { .. }))
        && saw(&|e| matches!(e, ShopEvent::PizzaRemovedFromOven { .. }))
        && saw(&|e| matches!(e, ShopEvent::OrderCompleted { .. }))
        && saw(&|e| matches!(e, ShopEvent::MoneyEarned { .. }));
    results.push(check(
        "event_stream_complete",
        story_ok,
        format!("{} events recorded", events.len()),
    ));
    if verbose {
        for event in &events {
            println!("  {:?}", event);
        }
    }

    // A bare pizza must report incomplete and refuse to cook
    let mut leftover = Pizza::new(PizzaSize::Medium);
    let unservable = leftover.state() == PizzaState::NoDough
        && !leftover.is_complete()
        && leftover.start_cooking().is_err();
    results.push(check(
        "incomplete_pizza_unservable",
        unservable,
        "bare pizza refuses to cook".to_string(),
    ));

    results
}
