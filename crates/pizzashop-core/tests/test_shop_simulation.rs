//! Integration tests for the full shop simulation.
//!
//! Exercises: catalog → kitchen build → assembly → cooking → order
//! submission, against the shipped data catalog.

use pizzashop_core::catalog::DataCatalog;
use pizzashop_core::components::{Container, ContainerState, Pizza, PizzaState};
use pizzashop_core::engine::{ShopEngine, ShopError};
use pizzashop_core::events::ShopEvent;
use pizzashop_core::generation::{ContainerPlacement, KitchenSetup};
use pizzashop_core::orders::{OrderConfig, OrderGenerationMode};
use pizzashop_logic::types::{CookQuality, PizzaSize};

const CATALOG_JSON: &str = include_str!("../../../data/catalog.json");

fn engine(mode: OrderGenerationMode) -> ShopEngine {
    let catalog = DataCatalog::from_json(CATALOG_JSON).expect("catalog must parse");
    let mut engine = ShopEngine::with_seed(catalog, OrderConfig::default(), mode, 4242);
    engine
        .setup_kitchen(&KitchenSetup {
            make_table: "standard_table".to_string(),
            ovens: vec!["standard_oven".to_string()],
            containers: vec![
                ContainerPlacement {
                    container_type: "standard_bin".to_string(),
                    ingredient: Some("pepperoni".to_string()),
                    cell: (0, 0),
                },
                ContainerPlacement {
                    container_type: "small_bin".to_string(),
                    ingredient: None,
                    cell: (1, 0),
                },
            ],
        })
        .expect("kitchen must build");
    engine
}

#[test]
fn shipped_catalog_is_coherent() {
    let catalog = DataCatalog::from_json(CATALOG_JSON).unwrap();
    assert!(catalog.ingredient_count() >= 10);
    assert!(catalog.try_get_ingredient("dough").is_some());
    assert!(catalog.try_get_oven("standard_oven").is_some());
    assert!(catalog.try_get_make_table("standard_table").is_some());
    assert!(catalog.try_get_ingredient("anchovies").is_none());
}

#[test]
fn order_lifecycle_with_simple_strategy() {
    let mut e = engine(OrderGenerationMode::Simple);
    e.set_auto_generate(false);

    let order_id = e.generate_order_now().unwrap();
    let (toppings, size) = {
        let order = e.orders().order_by_id(order_id).unwrap();
        (order.toppings().clone(), order.size())
    };
    assert_eq!(size, PizzaSize::Medium);

    let zone = e.layout().unwrap().zones[0]; // the Medium zone
    let oven = e.layout().unwrap().ovens[0];

    e.turn_oven_on(oven).unwrap();

    let pizza = e.start_pizza(zone, PizzaSize::Medium).unwrap();
    e.add_ingredient(zone, "dough").unwrap();
    e.add_ingredient(zone, "marinara").unwrap();
    e.add_ingredient(zone, "mozzarella").unwrap();
    for topping in &toppings {
        e.add_ingredient(zone, topping).unwrap();
    }
    e.pick_up_pizza(zone).unwrap();

    e.update(5.0); // heat up
    e.place_pizza_in_oven(oven, pizza).unwrap();
    e.update(45.0); // medium perfect time

    let cooked = e.remove_cooked_pizza(oven).unwrap();
    let money_before = e.orders().total_money_earned();
    let payment = e.submit_pizza(cooked).unwrap();

    assert!(payment > 0);
    assert_eq!(e.orders().total_money_earned(), money_before + payment as u64);
    assert!(e.orders().active_orders().is_empty());
    assert_eq!(e.orders().completed_orders().len(), 1);

    let events = e.drain_events();
    assert!(events.iter().any(|ev| matches!(ev, ShopEvent::OrderReceived { .. })));
    assert!(events.iter().any(|ev| matches!(ev, ShopEvent::PizzaCompleted { .. })));
    assert!(events.iter().any(|ev| matches!(ev, ShopEvent::PizzaCooked { .. })));
    assert!(events.iter().any(
        |ev| matches!(ev, ShopEvent::OrderCompleted { payment: p, .. } if *p == payment)
    ));
}

#[test]
fn oven_scenario_two_slots_small_profile() {
    // Small profile on the standard oven: perfect at 30s, burnt at 45s.
    // The standard table has no Small zone, so assemble the pizza directly.
    let mut e = engine(OrderGenerationMode::WeightedRandom);
    e.set_auto_generate(false);
    let oven = e.layout().unwrap().ovens[0];
    e.turn_oven_on(oven).unwrap();
    e.update(5.0);

    let (dough, sauce, cheese) = {
        let catalog = e.catalog();
        (
            catalog.try_get_ingredient("dough").unwrap().clone(),
            catalog.try_get_ingredient("marinara").unwrap().clone(),
            catalog.try_get_ingredient("mozzarella").unwrap().clone(),
        )
    };
    let mut small = Pizza::new(PizzaSize::Small);
    small.try_add_ingredient(&dough).unwrap();
    small.try_add_ingredient(&sauce).unwrap();
    small.try_add_ingredient(&cheese).unwrap();
    let pizza = e.world.spawn((small,));

    e.place_pizza_in_oven(oven, pizza).unwrap();

    e.update(29.0);
    assert_eq!(
        e.world.get::<&Pizza>(pizza).unwrap().quality(),
        CookQuality::Perfect
    );

    e.update(16.0); // total 45 = burn time
    {
        let p = e.world.get::<&Pizza>(pizza).unwrap();
        assert_eq!(p.quality(), CookQuality::Burnt);
        assert_eq!(p.state(), PizzaState::Burnt);
    }
    {
        use pizzashop_core::components::Oven;
        let o = e.world.get::<&Oven>(oven).unwrap();
        assert!(!o.slots()[0].is_cooking());
    }

    // Burnt pizzas cannot be removed
    assert!(matches!(
        e.remove_cooked_pizza(oven),
        Err(ShopError::RemovePizza(_))
    ));
}

#[test]
fn container_purity_scenario() {
    let mut e = engine(OrderGenerationMode::Simple);
    let bin = e.layout().unwrap().containers.cell(0, 0).unwrap();

    // Prefilled pepperoni bin rejects a different ingredient
    {
        let c = e.world.get::<&Container>(bin).unwrap();
        assert_eq!(c.assigned_ingredient(), Some("pepperoni"));
        assert_eq!(c.servings(), 10);
    }
    assert!(matches!(
        e.refill_container(bin, "mushrooms"),
        Err(ShopError::Container(_))
    ));
    {
        let c = e.world.get::<&Container>(bin).unwrap();
        assert_eq!(c.assigned_ingredient(), Some("pepperoni"));
        assert_eq!(c.servings(), 10);
    }

    // The empty bin accepts any first ingredient
    let empty_bin = e.layout().unwrap().containers.cell(1, 0).unwrap();
    e.refill_container(empty_bin, "mushrooms").unwrap();
    {
        let c = e.world.get::<&Container>(empty_bin).unwrap();
        assert_eq!(c.state(), ContainerState::Filling);
        assert_eq!(c.assigned_ingredient(), Some("mushrooms"));
    }
}

#[test]
fn expired_orders_move_out_of_active() {
    let mut e = engine(OrderGenerationMode::Simple);
    e.set_auto_generate(false);

    let id = e.generate_order_now().unwrap();
    let limit = e.orders().order_by_id(id).unwrap().time_limit();

    // Tick in one-second frames past the limit
    let frames = limit as usize + 2;
    for _ in 0..frames {
        e.update(1.0);
    }

    assert!(e.orders().active_orders().is_empty());
    assert_eq!(e.orders().expired_orders().len(), 1);
    let events = e.drain_events();
    assert!(events
        .iter()
        .any(|ev| matches!(ev, ShopEvent::OrderExpired { order_id } if *order_id == id)));
}

#[test]
fn active_orders_never_exceed_configured_max() {
    let mut e = engine(OrderGenerationMode::WeightedRandom);
    let max = e.orders().config().max_active_orders;

    // Half an hour of service in one-second frames
    for _ in 0..1800 {
        e.update(1.0);
        assert!(e.orders().active_orders().len() <= max);
    }
    assert!(e.orders().total_orders_generated() > 0);
}

#[test]
fn unsupported_zone_size_is_rejected() {
    let mut e = engine(OrderGenerationMode::Simple);
    let zone = e.layout().unwrap().zones[0]; // Medium zone

    assert!(matches!(
        e.start_pizza(zone, PizzaSize::XLarge),
        Err(ShopError::Assembly(_))
    ));
    // And the zone is still usable afterwards
    assert!(e.start_pizza(zone, PizzaSize::Medium).is_ok());
}
