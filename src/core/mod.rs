pub mod backup;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod ids;
pub mod ith;
pub mod log;
pub mod quality;
pub mod readings;
pub mod reducer;
pub mod schedule;
pub mod shift;
pub mod stops;
pub mod store;
