use loomshift::core::readings::{ReadingInput, validate_readings};
use loomshift::core::reducer::{Action, reduce};
use loomshift::errors::AppError;
use loomshift::models::catalog::Loom;
use loomshift::models::entries::IthIntervention;
use loomshift::models::state::AppState;
use loomshift::models::stop_kind::StopKind;
use loomshift::models::{BASELINE_NOTE, Millis};
use std::collections::BTreeMap;

mod common;
use common::{HOUR, MINUTE, at, reading, shift_mut, state_with_shift};

fn start_shift(state: &AppState, now: Millis) -> Result<AppState, AppError> {
    reduce(
        state,
        Action::StartShift {
            responsible: "Ana".to_string(),
            recorder: "Bruno".to_string(),
        },
        now,
    )
}

fn log_ith(state: &AppState, now: Millis) -> Result<AppState, AppError> {
    reduce(
        state,
        Action::LogIth {
            loom_id: "LOOM-1".to_string(),
            reason_id: "ith-1".to_string(),
        },
        now,
    )
}

#[test]
fn test_start_shift_creates_baselines_at_window_start() {
    let now = at(2025, 3, 10, 10, 15);
    let next = start_shift(&AppState::default(), now).unwrap();

    let shift = next.active_shift.as_ref().unwrap();
    assert_eq!(shift.shift_name, "1º Turno");
    assert_eq!(shift.shift_start_time, at(2025, 3, 10, 6, 0));
    assert_eq!(shift.user_start_time, now);
    assert_eq!(shift.production.len(), next.looms.len());
    assert!(shift.production.iter().all(|p| p.reading == 0.0
        && p.timestamp == shift.shift_start_time
        && p.notes.as_deref() == Some(BASELINE_NOTE)));
}

#[test]
fn test_start_shift_after_midnight_belongs_to_previous_day() {
    let now = at(2025, 3, 10, 2, 0);
    let next = start_shift(&AppState::default(), now).unwrap();

    let shift = next.active_shift.as_ref().unwrap();
    assert_eq!(shift.shift_name, "3º Turno");
    assert_eq!(shift.shift_start_time, at(2025, 3, 9, 22, 40));
}

#[test]
fn test_start_shift_without_matching_window() {
    let mut state = AppState::default();
    state.settings.shifts.clear();

    let err = start_shift(&state, at(2025, 3, 10, 10, 0)).unwrap_err();
    assert!(matches!(err, AppError::NoShiftWindow));
}

#[test]
fn test_end_shift_moves_it_to_history_front() {
    let start = at(2025, 3, 10, 6, 0);
    let state = state_with_shift(start);

    let next = reduce(
        &state,
        Action::EndShift {
            summary: "ok".to_string(),
            action_plans: "check T-03".to_string(),
        },
        start + 8 * HOUR,
    )
    .unwrap();

    assert!(next.active_shift.is_none());
    assert_eq!(next.shift_history.len(), 1);
    let record = &next.shift_history[0];
    assert_eq!(record.end, start + 8 * HOUR);
    assert_eq!(record.action_plans, "check T-03");
    assert_eq!(&record.shift, state.active_shift.as_ref().unwrap());

    // a second end is a no-op
    let again = reduce(
        &next,
        Action::EndShift {
            summary: String::new(),
            action_plans: String::new(),
        },
        start + 9 * HOUR,
    )
    .unwrap();
    assert_eq!(again, next);
}

#[test]
fn test_recording_requires_active_shift() {
    let state = AppState::default();

    let err = reduce(
        &state,
        Action::LogReadings(vec![ReadingInput {
            loom_id: "LOOM-1".to_string(),
            reading: 10.0,
        }]),
        0,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::NoActiveShift));
}

#[test]
fn test_log_readings_share_timestamp_and_unique_ids() {
    let start = at(2025, 3, 10, 6, 0);
    let now = start + HOUR;
    let state = state_with_shift(start);

    let next = reduce(
        &state,
        Action::LogReadings(vec![
            ReadingInput {
                loom_id: "LOOM-1".to_string(),
                reading: 50.0,
            },
            ReadingInput {
                loom_id: "LOOM-1".to_string(),
                reading: 60.0,
            },
            ReadingInput {
                loom_id: "LOOM-2".to_string(),
                reading: f64::NAN,
            },
        ]),
        now,
    )
    .unwrap();

    let added: Vec<_> = next
        .active_shift
        .as_ref()
        .unwrap()
        .production
        .iter()
        .filter(|p| p.timestamp == now)
        .collect();

    assert_eq!(added.len(), 2);
    assert_eq!(added[0].id, format!("prod-LOOM-1-{now}"));
    assert_eq!(added[1].id, format!("prod-LOOM-1-{now}-2"));
}

#[test]
fn test_validate_readings_rejects_whole_batch() {
    let start = at(2025, 3, 10, 6, 0);
    let mut state = state_with_shift(start);
    shift_mut(&mut state)
        .production
        .push(reading("prod-LOOM-2-x", "LOOM-2", 80.0, start + HOUR));

    let shift = state.active_shift.as_ref().unwrap();
    let raw = vec![
        ("LOOM-1".to_string(), "12,5".to_string()),
        ("LOOM-2".to_string(), "70".to_string()),
        ("LOOM-3".to_string(), "abc".to_string()),
        ("LOOM-4".to_string(), "  ".to_string()),
    ];

    match validate_readings(shift, &state, &raw) {
        Err(AppError::InvalidReadings(errors)) => {
            let looms: Vec<_> = errors.iter().map(|e| e.loom.as_str()).collect();
            assert_eq!(looms, vec!["T-02", "T-03"]);
        }
        other => panic!("expected InvalidReadings, got {other:?}"),
    }

    let ok = validate_readings(shift, &state, &raw[..1]).unwrap();
    assert_eq!(ok[0].reading, 12.5);
}

#[test]
fn test_validate_readings_checks_earlier_values_in_batch() {
    let start = at(2025, 3, 10, 6, 0);
    let state = state_with_shift(start);
    let shift = state.active_shift.as_ref().unwrap();

    let raw = vec![
        ("LOOM-1".to_string(), "50".to_string()),
        ("LOOM-1".to_string(), "10".to_string()),
    ];
    match validate_readings(shift, &state, &raw) {
        Err(AppError::InvalidReadings(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].loom, "T-01");
            assert!(errors[0].message.contains("below the last reading 50"));
        }
        other => panic!("expected InvalidReadings, got {other:?}"),
    }

    let rising = vec![
        ("LOOM-1".to_string(), "10".to_string()),
        ("LOOM-1".to_string(), "50".to_string()),
    ];
    let ok = validate_readings(shift, &state, &rising).unwrap();
    assert_eq!(ok.len(), 2);
}

#[test]
fn test_baseline_reading_cannot_be_deleted() {
    let start = at(2025, 3, 10, 6, 0);
    let state = state_with_shift(start);
    let baseline_id = state.active_shift.as_ref().unwrap().production[0].id.clone();

    let err = reduce(&state, Action::DeleteProductionEntry(baseline_id), start).unwrap_err();
    assert!(matches!(err, AppError::BaselineEntryLocked));

    let err = reduce(
        &state,
        Action::DeleteProductionEntry("missing".to_string()),
        start,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[test]
fn test_ith_cooldown_boundary() {
    let start = at(2025, 3, 10, 6, 0);
    let t = start + HOUR;
    let state = log_ith(&state_with_shift(start), t).unwrap();

    match log_ith(&state, t + 59_999) {
        Err(AppError::IthCooldown {
            loom,
            remaining_secs,
        }) => {
            assert_eq!(loom, "T-01");
            assert_eq!(remaining_secs, 1);
        }
        other => panic!("expected cooldown, got {other:?}"),
    }

    let next = log_ith(&state, t + MINUTE).unwrap();
    assert_eq!(next.active_shift.unwrap().ith_interventions.len(), 2);
}

#[test]
fn test_ith_edit_bypasses_cooldown() {
    let start = at(2025, 3, 10, 6, 0);
    let t = start + HOUR;
    let state = log_ith(&state_with_shift(start), t).unwrap();
    let id = state.active_shift.as_ref().unwrap().ith_interventions[0]
        .id
        .clone();

    let next = reduce(
        &state,
        Action::UpdateIth(IthIntervention {
            id: id.clone(),
            loom_id: "LOOM-1".to_string(),
            reason_id: "ith-3".to_string(),
            timestamp: t + 1000,
        }),
        t + 1000,
    )
    .unwrap();

    let ith = &next.active_shift.as_ref().unwrap().ith_interventions[0];
    assert_eq!(ith.reason_id, "ith-3");

    let next = reduce(&next, Action::DeleteIth(id), t + 2000).unwrap();
    assert!(next.active_shift.unwrap().ith_interventions.is_empty());
}

#[test]
fn test_stop_start_and_end() {
    let start = at(2025, 3, 10, 6, 0);
    let state = state_with_shift(start);

    let next = reduce(
        &state,
        Action::StartStop {
            loom_id: "LOOM-5".to_string(),
            kind: StopKind::Operational,
            reason: "Limpeza".to_string(),
            notes: Some("  ".to_string()),
        },
        start + HOUR,
    )
    .unwrap();

    let shift = next.active_shift.as_ref().unwrap();
    let stop = shift.active_stop("LOOM-5", StopKind::Operational).unwrap();
    assert!(stop.notes.is_none());
    assert!(shift.active_stop("LOOM-5", StopKind::Maintenance).is_none());
    let stop_id = stop.id.clone();

    let next = reduce(
        &next,
        Action::EndStop {
            stop_id: stop_id.clone(),
            kind: StopKind::Operational,
        },
        start + 2 * HOUR,
    )
    .unwrap();
    let ended = &next.active_shift.as_ref().unwrap().interventions[0];
    assert_eq!(ended.end, Some(start + 2 * HOUR));

    let err = reduce(
        &next,
        Action::EndStop {
            stop_id,
            kind: StopKind::Operational,
        },
        start + 3 * HOUR,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidValue(_)));
}

#[test]
fn test_stop_reasons_trimmed_and_unique() {
    let state = AppState::default();

    let next = reduce(
        &state,
        Action::AddStopReason {
            kind: StopKind::Maintenance,
            reason: "  Hidráulica ".to_string(),
        },
        0,
    )
    .unwrap();
    assert!(
        next.settings
            .stop_reasons
            .maintenance
            .contains(&"Hidráulica".to_string())
    );

    let err = reduce(
        &next,
        Action::AddStopReason {
            kind: StopKind::Maintenance,
            reason: "Hidráulica".to_string(),
        },
        0,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::DuplicateReason(r) if r == "Hidráulica"));

    let unchanged = reduce(
        &next,
        Action::AddStopReason {
            kind: StopKind::Operational,
            reason: "   ".to_string(),
        },
        0,
    )
    .unwrap();
    assert_eq!(unchanged, next);
}

#[test]
fn test_duplicate_ith_code_rejected() {
    let err = reduce(
        &AppState::default(),
        Action::AddIthReason {
            code: "02".to_string(),
            description: "again".to_string(),
        },
        0,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::DuplicateIthCode(c) if c == "02"));
}

#[test]
fn test_add_loom_rejects_duplicate_code() {
    let loom = |code: &str| Loom {
        id: String::new(),
        code: code.to_string(),
        sector: String::new(),
        operator_ids: BTreeMap::new(),
        product_id: "prod-1".to_string(),
    };

    let next = reduce(&AppState::default(), Action::AddLoom(loom("T-99")), 1_000).unwrap();
    assert!(next.looms.iter().any(|l| l.code == "T-99" && l.id == "LOOM-1000"));

    let err = reduce(&next, Action::AddLoom(loom("t-99")), 2_000).unwrap_err();
    assert!(matches!(err, AppError::InvalidValue(_)));
}

#[test]
fn test_delete_operator_drops_assignments() {
    let next = reduce(
        &AppState::default(),
        Action::DeleteOperator("op-1".to_string()),
        0,
    )
    .unwrap();

    assert!(next.operator("op-1").is_none());
    assert!(next.looms.iter().all(|l| l.operator_for("1º Turno").is_none()));
    assert!(next.looms.iter().all(|l| l.operator_for("2º Turno") == Some("op-2")));
}

#[test]
fn test_rejected_action_leaves_state_untouched() {
    let start = at(2025, 3, 10, 6, 0);
    let state = state_with_shift(start);
    let before = state.clone();

    let _ = reduce(&state, Action::DeleteIth("nope".to_string()), start);
    let _ = reduce(&state, Action::RemoveLoom("nope".to_string()), start);

    assert_eq!(state, before);
}

#[test]
fn test_restore_replaces_document() {
    let mut other = AppState::default();
    other.settings.company_name = "Tecelagem Norte".to_string();

    let next = reduce(
        &state_with_shift(at(2025, 3, 10, 6, 0)),
        Action::Restore(Box::new(other.clone())),
        0,
    )
    .unwrap();

    assert_eq!(next, other);
}
