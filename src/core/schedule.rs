//! Resolution of the configured shift windows against wall-clock time.

use crate::errors::AppResult;
use crate::models::settings::ShiftTime;
use crate::models::Millis;
use crate::utils::time::{local_to_ms, minutes_of_day, parse_time_strict};
use chrono::{DateTime, Local, Timelike};

fn window(shift: &ShiftTime) -> AppResult<(u32, u32)> {
    Ok((minutes_of_day(&shift.start)?, minutes_of_day(&shift.end)?))
}

fn contains(start: u32, end: u32, current: u32) -> bool {
    if start > end {
        // crosses midnight
        current >= start || current < end
    } else {
        current >= start && current < end
    }
}

/// First configured shift whose window contains `now`.
/// Windows with malformed times are skipped.
pub fn current_shift<'a>(shifts: &'a [ShiftTime], now: &DateTime<Local>) -> Option<&'a ShiftTime> {
    let current = now.hour() * 60 + now.minute();

    shifts.iter().find(|shift| match window(shift) {
        Ok((start, end)) => contains(start, end, current),
        Err(e) => {
            tracing::warn!(shift = %shift.name, error = %e, "skipping malformed shift window");
            false
        }
    })
}

/// Start instant of the occurrence of `shift` that contains `now`.
/// For a window crossing midnight, the part after midnight belongs to the
/// occurrence that started the previous day.
pub fn shift_start(shift: &ShiftTime, now: &DateTime<Local>) -> AppResult<Millis> {
    let (start, end) = window(shift)?;
    let current = now.hour() * 60 + now.minute();

    let mut date = now.date_naive();
    if start > end && current < end {
        date = date.pred_opt().unwrap_or(date);
    }

    let start_time = parse_time_strict(&shift.start)?;
    local_to_ms(date.and_time(start_time))
}
