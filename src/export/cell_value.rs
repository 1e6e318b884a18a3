//! Typed workbook cells. Report tables carry text; the workbook gets real
//! timestamps, durations and numbers where the text is one of ours.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub(crate) enum CellValue<'a> {
    /// Excel serial (days since 1899-12-30) with its number format.
    Serial(f64, &'static str),
    Number(f64),
    Text(&'a str),
}

const SECONDS_PER_DAY: f64 = 86_400.0;

fn excel_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

fn serial_of(dt: NaiveDateTime) -> Option<f64> {
    let since = dt - excel_epoch()?;
    Some(since.num_seconds() as f64 / SECONDS_PER_DAY)
}

fn time_fraction(t: NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 / SECONDS_PER_DAY
}

/// "Xh Ym" as written by `format_duration`.
fn duration_fraction(s: &str) -> Option<f64> {
    let (h, m) = s.split_once("h ")?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.strip_suffix('m')?.parse().ok()?;
    Some((hours * 3600 + minutes * 60) as f64 / SECONDS_PER_DAY)
}

pub(crate) fn classify(s: &str) -> CellValue<'_> {
    let s = s.trim();

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        && let Some(serial) = serial_of(dt)
    {
        return CellValue::Serial(serial, "yyyy-mm-dd hh:mm");
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(serial) = d.and_hms_opt(0, 0, 0).and_then(serial_of)
    {
        return CellValue::Serial(serial, "yyyy-mm-dd");
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return CellValue::Serial(time_fraction(t), "hh:mm:ss");
    }
    if let Some(fraction) = duration_fraction(s) {
        return CellValue::Serial(fraction, "[h]:mm");
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(s),
    }
}

