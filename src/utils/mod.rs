pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::{fmt_kg, fmt_meters, fmt_pct};
pub use time::format_duration;
