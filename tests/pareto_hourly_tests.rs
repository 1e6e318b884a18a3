use approx::assert_abs_diff_eq;
use loomshift::core::calculator::hourly::hourly_production;
use loomshift::core::calculator::pareto::{ith_pareto, rank, stop_pareto, top_counts};
use loomshift::models::entries::IthIntervention;
use loomshift::models::state::default_settings;

mod common;
use common::{MINUTE, at, reading, stop};

fn labels(items: &[loomshift::core::calculator::pareto::ParetoItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

#[test]
fn test_rank_groups_sorts_and_accumulates() {
    let items = rank(vec![
        ("Limpeza".to_string(), 10.0),
        ("Mecânica".to_string(), 30.0),
        ("Limpeza".to_string(), 20.0),
        ("Elétrica".to_string(), 40.0),
    ]);

    assert_eq!(labels(&items), vec!["Elétrica", "Limpeza", "Mecânica"]);
    assert_abs_diff_eq!(items[0].percentage, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(items[1].value, 30.0);
    assert_abs_diff_eq!(items[1].cumulative, 70.0, epsilon = 1e-9);
    assert_abs_diff_eq!(items.last().unwrap().cumulative, 100.0, epsilon = 1e-9);
}

#[test]
fn test_rank_ties_break_by_label() {
    let items = rank(vec![
        ("b".to_string(), 5.0),
        ("c".to_string(), 5.0),
        ("a".to_string(), 5.0),
    ]);
    assert_eq!(labels(&items), vec!["a", "b", "c"]);

    let reversed = rank(vec![
        ("a".to_string(), 5.0),
        ("c".to_string(), 5.0),
        ("b".to_string(), 5.0),
    ]);
    assert_eq!(items, reversed);
}

#[test]
fn test_rank_empty_and_zero_total() {
    assert!(rank(Vec::<(String, f64)>::new()).is_empty());

    let items = rank(vec![("x".to_string(), 0.0)]);
    assert_abs_diff_eq!(items[0].percentage, 0.0);
    assert_abs_diff_eq!(items[0].cumulative, 0.0);
}

#[test]
fn test_stop_pareto_in_minutes_with_open_stop() {
    let start = at(2025, 3, 10, 6, 0);
    let stops = [
        stop("s1", "LOOM-1", "Limpeza", start, Some(start + 10 * MINUTE)),
        stop("s2", "LOOM-2", "Mecânica", start, None),
    ];

    let items = stop_pareto(stops.iter(), start + 30 * MINUTE);

    assert_eq!(labels(&items), vec!["Mecânica", "Limpeza"]);
    assert_abs_diff_eq!(items[0].value, 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(items[1].value, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(items[0].percentage, 75.0, epsilon = 1e-9);
}

#[test]
fn test_ith_pareto_counts_and_unknown_reason() {
    let settings = default_settings();
    let ith = |id: &str, reason: &str| IthIntervention {
        id: id.to_string(),
        loom_id: "LOOM-1".to_string(),
        reason_id: reason.to_string(),
        timestamp: 0,
    };

    let interventions = [
        ith("i1", "ith-2"),
        ith("i2", "ith-2"),
        ith("i3", "ith-1"),
        ith("i4", "gone"),
    ];

    let items = ith_pareto(interventions.iter(), &settings);

    assert_eq!(items[0].label, "02 - Quebra de urdume");
    assert_abs_diff_eq!(items[0].value, 2.0);
    assert_eq!(
        labels(&items[1..]),
        vec!["01 - Quebra de trama", "ITH Desc."]
    );
    assert_abs_diff_eq!(items[2].cumulative, 100.0, epsilon = 1e-9);
}

#[test]
fn test_top_counts_limits_output() {
    let labels = ["a", "b", "a", "c", "b", "a", "d"]
        .iter()
        .map(|s| s.to_string());

    let top = top_counts(labels, 2);

    assert_eq!(top, vec![("a".to_string(), 3), ("b".to_string(), 2)]);
}

#[test]
fn test_hourly_delta_goes_to_later_reading_hour() {
    let base = at(2025, 3, 10, 6, 0);
    let entries = [
        reading("r0", "LOOM-1", 0.0, base),
        reading("r1", "LOOM-1", 40.0, at(2025, 3, 10, 6, 50)),
        // spans two clock hours: all of it lands at 08:00
        reading("r2", "LOOM-1", 100.0, at(2025, 3, 10, 8, 5)),
        reading("r3", "LOOM-1", 130.0, at(2025, 3, 10, 8, 40)),
    ];
    let refs: Vec<_> = entries.iter().collect();

    let buckets = hourly_production(&refs);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].hour, 6);
    assert_eq!(buckets[0].label, "06:00");
    assert_abs_diff_eq!(buckets[0].production, 40.0);
    assert_eq!(buckets[1].hour, 8);
    assert_abs_diff_eq!(buckets[1].production, 90.0);
}

#[test]
fn test_hourly_sorts_input_and_ignores_negative_delta() {
    let entries = [
        reading("r2", "LOOM-1", 10.0, at(2025, 3, 10, 7, 30)),
        reading("r0", "LOOM-1", 0.0, at(2025, 3, 10, 6, 0)),
        reading("r1", "LOOM-1", 50.0, at(2025, 3, 10, 7, 0)),
    ];
    let refs: Vec<_> = entries.iter().collect();

    let buckets = hourly_production(&refs);

    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].hour, 7);
    assert_abs_diff_eq!(buckets[0].production, 50.0);
}

#[test]
fn test_hourly_needs_two_readings() {
    let entries = [reading("r0", "LOOM-1", 0.0, at(2025, 3, 10, 6, 0))];
    let refs: Vec<_> = entries.iter().collect();

    assert!(hourly_production(&refs).is_empty());
}
