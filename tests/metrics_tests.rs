use approx::assert_abs_diff_eq;
use loomshift::core::calculator::aggregate::ShiftSummary;
use loomshift::core::calculator::goal::{hourly_goal, product_goal, to_kg};
use loomshift::core::calculator::loom::{
    LoomMetrics, current_production, ith_efficiency, oee, quality_factor,
};
#[allow(deprecated)]
use loomshift::core::calculator::loom::legacy_fixed_quality_oee;
use loomshift::models::entries::{IthIntervention, QualityEntry};
use loomshift::models::state::AppState;
use loomshift::models::stop_kind::StopKind;

mod common;
use common::{HOUR, MINUTE, at, reading, shift_mut, state_with_shift, stop};

#[test]
fn test_product_goal_from_rpm_and_density() {
    let state = AppState::default();

    let goal_a = product_goal(state.product("prod-1").unwrap()).unwrap();
    let goal_b = product_goal(state.product("prod-2").unwrap()).unwrap();

    assert_abs_diff_eq!(goal_a, 97.5, epsilon = 1e-9);
    assert_abs_diff_eq!(goal_b, 72.0, epsilon = 1e-9);
}

#[test]
fn test_goal_falls_back_to_settings_without_density() {
    let state = AppState::default();
    let mut product = state.product("prod-1").unwrap().clone();
    product.thread_density = 0.0;

    assert!(product_goal(&product).is_none());
    assert_abs_diff_eq!(hourly_goal(Some(&product), &state.settings), 15.0);
    assert_abs_diff_eq!(hourly_goal(None, &state.settings), 15.0);
}

#[test]
fn test_to_kg_uses_width_and_grammage() {
    let state = AppState::default();
    let product = state.product("prod-1");

    assert_abs_diff_eq!(to_kg(100.0, product), 14.4, epsilon = 1e-9);
    assert_abs_diff_eq!(to_kg(100.0, None), 0.0);
}

#[test]
fn test_current_production_is_last_minus_first() {
    assert_abs_diff_eq!(current_production(&[]), 0.0);
    assert_abs_diff_eq!(current_production(&[120.0]), 0.0);
    assert_abs_diff_eq!(current_production(&[10.0, 25.0, 40.0]), 30.0);
    // counter reset never yields negative production
    assert_abs_diff_eq!(current_production(&[50.0, 20.0]), 0.0);
}

#[test]
fn test_quality_factor_bounds() {
    assert_abs_diff_eq!(quality_factor(0.0, 5.0), 1.0);
    assert_abs_diff_eq!(quality_factor(100.0, 10.0), 0.9, epsilon = 1e-9);
    assert_abs_diff_eq!(quality_factor(10.0, 50.0), 0.0);
}

#[test]
fn test_oee_is_clamped() {
    assert_abs_diff_eq!(oee(0.75, 0.8, 1.0), 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(oee(1.0, 1.6, 1.0), 100.0);
    assert_abs_diff_eq!(oee(-0.5, 1.0, 1.0), 0.0);
    assert_abs_diff_eq!(oee(f64::NAN, 1.0, 1.0), 0.0);
}

#[test]
fn test_ith_efficiency_cases() {
    assert_abs_diff_eq!(ith_efficiency(0, 0), 100.0);
    assert_abs_diff_eq!(ith_efficiency(1, 0), 100.0);
    assert_abs_diff_eq!(ith_efficiency(1, 2), 0.0);
    assert_abs_diff_eq!(ith_efficiency(5, 1), 75.0);
    assert_abs_diff_eq!(ith_efficiency(3, 5), 0.0);
}

#[test]
fn test_loom_metrics_efficiency_and_oee() {
    let start = at(2025, 3, 10, 6, 0);
    let as_of = start + 2 * HOUR;
    let mut state = state_with_shift(start);

    // LOOM-2 runs prod-2: 72 m/h
    {
        let shift = shift_mut(&mut state);
        shift
            .production
            .push(reading("prod-LOOM-2-a", "LOOM-2", 90.0, as_of));
        shift.interventions.push(stop(
            "intervention-1",
            "LOOM-2",
            "Limpeza",
            start + 30 * MINUTE,
            Some(start + 60 * MINUTE),
        ));
    }

    let shift = state.active_shift.as_ref().unwrap();
    let loom = state.loom("LOOM-2").unwrap();
    let m = LoomMetrics::compute(
        shift,
        loom,
        state.product_of(loom),
        &state.settings,
        as_of,
    );

    assert_abs_diff_eq!(m.hourly_goal, 72.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.current_production, 90.0);
    assert_abs_diff_eq!(m.expected_production, 144.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.efficiency, 62.5, epsilon = 1e-9);
    assert_eq!(m.downtime_ms, 30 * MINUTE);
    assert_abs_diff_eq!(m.availability, 0.75, epsilon = 1e-9);
    assert_abs_diff_eq!(m.actual_rate, 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.performance, 60.0 / 72.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.quality_factor, 1.0);
    assert_abs_diff_eq!(m.oee, 62.5, epsilon = 1e-9);
    assert_abs_diff_eq!(m.difference(), -54.0, epsilon = 1e-9);
    assert!(m.active_stop.is_none());
}

#[test]
fn test_off_spec_fabric_lowers_oee() {
    let start = at(2025, 3, 10, 6, 0);
    let as_of = start + 2 * HOUR;
    let mut state = state_with_shift(start);

    {
        let shift = shift_mut(&mut state);
        shift
            .production
            .push(reading("prod-LOOM-2-a", "LOOM-2", 144.0, as_of));
        shift.quality_entries.push(QualityEntry {
            id: "quality-1".to_string(),
            loom_id: "LOOM-2".to_string(),
            timestamp: as_of,
            residue_kg: 1.5,
            off_spec_fabric_meters: 14.4,
            notes: None,
        });
    }

    let shift = state.active_shift.as_ref().unwrap();
    let loom = state.loom("LOOM-2").unwrap();
    let m = LoomMetrics::compute(shift, loom, state.product_of(loom), &state.settings, as_of);

    assert_abs_diff_eq!(m.efficiency, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.quality_factor, 0.9, epsilon = 1e-9);
    assert_abs_diff_eq!(m.oee, 90.0, epsilon = 1e-9);
}

#[test]
fn test_open_stop_counts_until_as_of() {
    let start = at(2025, 3, 10, 6, 0);
    let as_of = start + HOUR;
    let mut state = state_with_shift(start);

    shift_mut(&mut state).maintenance.push(stop(
        "maintenance-1",
        "LOOM-1",
        "Mecânica",
        start + 45 * MINUTE,
        None,
    ));

    let shift = state.active_shift.as_ref().unwrap();
    let loom = state.loom("LOOM-1").unwrap();
    let m = LoomMetrics::compute(shift, loom, state.product_of(loom), &state.settings, as_of);

    assert_eq!(m.downtime_ms, 15 * MINUTE);
    let active = m.active_stop.expect("active stop");
    assert_eq!(active.kind, StopKind::Maintenance);
    assert_eq!(active.reason, "Mecânica");
    // 15 minutes at 97.5 m/h
    assert_abs_diff_eq!(m.downtime_loss_meters, 24.375, epsilon = 1e-9);
}

#[test]
fn test_ith_loss_is_one_minute_of_goal() {
    let start = at(2025, 3, 10, 6, 0);
    let as_of = start + HOUR;
    let mut state = state_with_shift(start);

    {
        let shift = shift_mut(&mut state);
        for (i, offset) in [5, 20].into_iter().enumerate() {
            shift.ith_interventions.push(IthIntervention {
                id: format!("ith-{i}"),
                loom_id: "LOOM-1".to_string(),
                reason_id: "ith-1".to_string(),
                timestamp: start + offset * MINUTE,
            });
        }
    }

    let shift = state.active_shift.as_ref().unwrap();
    let loom = state.loom("LOOM-1").unwrap();
    let m = LoomMetrics::compute(shift, loom, state.product_of(loom), &state.settings, as_of);

    assert_eq!(m.ith_count, 2);
    assert_abs_diff_eq!(m.ith_loss_meters, 2.0 * 97.5 / 60.0, epsilon = 1e-9);
    // baseline only: no interval, interventions present
    assert_abs_diff_eq!(m.ith_efficiency, 0.0);
}

#[test]
fn test_shift_summary_uses_ratio_of_sums() {
    let start = at(2025, 3, 10, 6, 0);
    let as_of = start + HOUR;
    let mut state = state_with_shift(start);

    {
        let shift = shift_mut(&mut state);
        shift
            .production
            .push(reading("prod-LOOM-1-a", "LOOM-1", 97.5, as_of));
        shift
            .production
            .push(reading("prod-LOOM-2-a", "LOOM-2", 36.0, as_of));
    }

    let shift = state.active_shift.as_ref().unwrap();
    let summary = ShiftSummary::compute(shift, &state, as_of).expect("summary");

    // 8 looms on prod-1 (97.5 m/h) and 7 on prod-2 (72 m/h)
    let expected = 8.0 * 97.5 + 7.0 * 72.0;
    assert_abs_diff_eq!(summary.total_production_m, 133.5, epsilon = 1e-9);
    assert_abs_diff_eq!(summary.total_expected_m, expected, epsilon = 1e-9);
    assert_abs_diff_eq!(
        summary.avg_efficiency,
        133.5 / expected * 100.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(summary.avg_productivity, 133.5, epsilon = 1e-9);
}

#[test]
fn test_shift_summary_none_before_window_start() {
    let start = at(2025, 3, 10, 6, 0);
    let state = state_with_shift(start);
    let shift = state.active_shift.as_ref().unwrap();

    assert!(ShiftSummary::compute(shift, &state, start).is_none());
    assert!(ShiftSummary::compute(shift, &state, start - MINUTE).is_none());
}

#[test]
#[allow(deprecated)]
fn test_legacy_card_oee_ignores_quality_entries() {
    let start = at(2025, 3, 10, 6, 0);
    let as_of = start + 2 * HOUR;
    let mut state = state_with_shift(start);

    {
        let shift = shift_mut(&mut state);
        shift
            .production
            .push(reading("prod-LOOM-2-a", "LOOM-2", 144.0, as_of));
        shift.quality_entries.push(QualityEntry {
            id: "quality-1".to_string(),
            loom_id: "LOOM-2".to_string(),
            timestamp: as_of,
            residue_kg: 0.0,
            off_spec_fabric_meters: 72.0,
            notes: None,
        });
    }

    let shift = state.active_shift.as_ref().unwrap();
    let loom = state.loom("LOOM-2").unwrap();
    let m = LoomMetrics::compute(shift, loom, state.product_of(loom), &state.settings, as_of);

    assert_abs_diff_eq!(m.oee, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(legacy_fixed_quality_oee(&m), 85.0, epsilon = 1e-9);
}

#[test]
fn test_no_elapsed_time_means_zero_efficiency() {
    let start = at(2025, 3, 10, 6, 0);
    let mut state = state_with_shift(start);

    shift_mut(&mut state)
        .production
        .push(reading("prod-LOOM-1-a", "LOOM-1", 200.0, start));

    let shift = state.active_shift.as_ref().unwrap();
    let loom = state.loom("LOOM-1").unwrap();

    for as_of in [start, start - 5 * MINUTE] {
        let m = LoomMetrics::compute(shift, loom, state.product_of(loom), &state.settings, as_of);

        assert_abs_diff_eq!(m.current_production, 200.0);
        assert_abs_diff_eq!(m.efficiency, 0.0);
        assert_abs_diff_eq!(m.availability, 0.0);
        assert_abs_diff_eq!(m.oee, 0.0);
    }
}
