use crate::errors::{AppError, AppResult};
use crate::models::Millis;
use crate::utils::time::to_local;
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn parse_date_strict(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// `--date` argument or today.
pub fn date_or_today(s: Option<&String>) -> AppResult<NaiveDate> {
    match s {
        Some(d) => parse_date_strict(d),
        None => Ok(today()),
    }
}

/// Local calendar date of a timestamp.
pub fn local_date_of(ms: Millis) -> Option<NaiveDate> {
    to_local(ms).map(|dt| dt.date_naive())
}

pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
