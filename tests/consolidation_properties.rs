//! Property tests for the consolidation engine.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use std::collections::HashMap;
use u_consolidate::consolidation::{ConsolidationConfig, ConsolidationEngine, ConsolidationResult};
use u_consolidate::container::ContainerLimits;
use u_consolidate::item::{Item, RouteKey};
use u_consolidate::ordering::{SortKey, SortSpec};

const ROUTES: [(&str, &str); 3] = [
    ("PickupA", "DeliverA"),
    ("PickupA", "DeliverB"),
    ("PickupB", "DeliverB"),
];

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
}

/// Items carry a unique supplier so they can be traced through the engine.
fn build_items(rows: &[(usize, u32, u32, i64)]) -> Vec<Item> {
    rows
        .iter()
        .enumerate()
        .map(|(n, &(route, volume, weight, offset))| {
            let (pickup, deliver) = ROUTES[route];
            Item::new(
                RouteKey::new(pickup, deliver).unwrap(),
                base_day() + Duration::days(offset),
            )
            .with_supplier(format!("item-{n:03}"))
            .with_volume(f64::from(volume))
            .unwrap()
            .with_weight(f64::from(weight))
            .unwrap()
        })
        .collect()
}

fn item_rows() -> impl Strategy<Value = Vec<(usize, u32, u32, i64)>> {
    prop::collection::vec((0..ROUTES.len(), 0u32..50, 0u32..1000, 0i64..30), 0..60)
}

fn sort_orders() -> impl Strategy<Value = SortSpec> {
    (
        prop::sample::select(vec![
            SortKey::ReadyDate,
            SortKey::Supplier,
            SortKey::TotalVolume,
            SortKey::TotalWeight,
        ]),
        any::<bool>(),
    )
        .prop_map(|(key, descending)| {
            if descending {
                SortSpec::descending(key)
            } else {
                SortSpec::ascending(key)
            }
        })
}

fn run(items: Vec<Item>, sort: SortSpec) -> ConsolidationResult {
    ConsolidationEngine::new(ConsolidationConfig::default().with_sort(sort))
        .unwrap()
        .run(items)
}

/// Independent restatement of the admission rule.
fn admits(limits: &ContainerLimits, state: &(f64, f64, NaiveDate), item: &Item) -> bool {
    let (volume, weight, anchor) = *state;
    let volume_ok = limits
        .max_volume
        .is_none_or(|max| volume + item.total_volume() <= max);
    let weight_ok = limits
        .max_weight
        .is_none_or(|max| weight + item.total_weight() <= max);
    let window = i64::from(limits.ready_date_window_days);
    volume_ok && weight_ok && (item.ready_date() - anchor).num_days().abs() <= window
}

proptest! {
    #[test]
    fn prop_route_purity(rows in item_rows(), sort in sort_orders()) {
        let result = run(build_items(&rows), sort);
        for container in &result.containers {
            prop_assert!(container.items.iter().all(|i| i.route() == &container.route));
        }
    }

    #[test]
    fn prop_capacity_and_window(rows in item_rows(), sort in sort_orders()) {
        let result = run(build_items(&rows), sort);
        for container in &result.containers {
            prop_assert!(container.total_volume <= ContainerLimits::MAX_VOLUME);
            prop_assert!(container.total_weight <= ContainerLimits::MAX_WEIGHT);

            let anchor = container.items[0].ready_date();
            prop_assert_eq!(anchor, container.ready_date);
            prop_assert_eq!(container.items[0].supplier(), container.supplier.as_str());
            for item in &container.items {
                prop_assert!((item.ready_date() - anchor).num_days().abs() <= 7);
            }

            let volume: f64 = container.items.iter().map(Item::total_volume).sum();
            prop_assert!((volume - container.total_volume).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_conservation(rows in item_rows(), sort in sort_orders()) {
        let items = build_items(&rows);
        let mut expected: Vec<String> = items.iter().map(|i| i.supplier().to_string()).collect();
        let result = run(items, sort);

        let mut placed: Vec<String> = result
            .containers
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.supplier().to_string()))
            .collect();
        expected.sort();
        placed.sort();
        prop_assert_eq!(placed, expected);
        prop_assert_eq!(result.item_count, rows.len());
    }

    #[test]
    fn prop_deterministic(rows in item_rows(), sort in sort_orders()) {
        let items = build_items(&rows);
        prop_assert_eq!(run(items.clone(), sort), run(items, sort));
    }

    #[test]
    fn prop_first_fit(rows in item_rows(), sort in sort_orders()) {
        let items = build_items(&rows);
        let result = run(items.clone(), sort);
        let limits = ContainerLimits::default();

        // container index (within its route) of every placed item
        let mut placement: HashMap<String, usize> = HashMap::new();
        for route in ROUTES {
            let route = RouteKey::new(route.0, route.1).unwrap();
            for (index, container) in result.for_route(&route).enumerate() {
                for item in &container.items {
                    placement.insert(item.supplier().to_string(), index);
                }
            }
        }

        // replay each route in sorted order against the recorded placements
        for route in ROUTES {
            let route = RouteKey::new(route.0, route.1).unwrap();
            let mut bucket: Vec<Item> = items
                .iter()
                .filter(|i| i.route() == &route)
                .cloned()
                .collect();
            sort.sort(&mut bucket);

            let mut states: Vec<(f64, f64, NaiveDate)> = Vec::new();
            for item in &bucket {
                let target = placement[item.supplier()];
                for state in &states[..target.min(states.len())] {
                    prop_assert!(!admits(&limits, state, item));
                }
                if target == states.len() {
                    states.push((item.total_volume(), item.total_weight(), item.ready_date()));
                } else {
                    prop_assert!(target < states.len());
                    prop_assert!(admits(&limits, &states[target], item));
                    states[target].0 += item.total_volume();
                    states[target].1 += item.total_weight();
                }
            }
        }
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #[test]
    fn prop_parallel_matches_sequential(rows in item_rows(), sort in sort_orders()) {
        let items = build_items(&rows);
        let config = ConsolidationConfig::default().with_sort(sort);
        let sequential = ConsolidationEngine::new(config.clone()).unwrap().run(items.clone());
        let parallel = ConsolidationEngine::new(config.with_parallel(true)).unwrap().run(items);
        prop_assert_eq!(sequential, parallel);
    }
}
