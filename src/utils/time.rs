//! Time utilities: "HH:mm" parsing, epoch-millisecond conversions and
//! duration formatting.

use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_time_strict(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Minutes since midnight of an "HH:mm" string.
pub fn minutes_of_day(t: &str) -> AppResult<u32> {
    let time = parse_time_strict(t)?;
    Ok(time.hour() * 60 + time.minute())
}

pub fn now_ms() -> Millis {
    Local::now().timestamp_millis()
}

pub fn to_local(ms: Millis) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// Resolve a local wall-clock time, taking the earlier instant on DST folds.
pub fn local_to_ms(naive: NaiveDateTime) -> AppResult<Millis> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| AppError::InvalidTime(naive.format("%Y-%m-%d %H:%M").to_string()))
}

/// Local clock hour (0-23) of a timestamp.
pub fn hour_of(ms: Millis) -> u32 {
    to_local(ms).map(|dt| dt.hour()).unwrap_or(0)
}

pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

pub fn format_clock(ms: Millis) -> String {
    to_local(ms)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

pub fn format_datetime(ms: Millis) -> String {
    to_local(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// "Xh Ym"; negative durations render as "0h 0m".
pub fn format_duration(ms: Millis) -> String {
    if ms < 0 {
        return "0h 0m".to_string();
    }
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    format!("{hours}h {minutes}m")
}

/// Parse "HH:MM" on the date of `reference`, or a full "YYYY-MM-DD HH:MM".
pub fn parse_instant(s: &str, reference: Millis) -> AppResult<Millis> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M") {
        return local_to_ms(dt);
    }
    let time = parse_time_strict(s)?;
    let date = to_local(reference)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
    local_to_ms(date.and_time(time))
}
