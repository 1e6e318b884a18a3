//! Derived shift metrics. Every function here is a pure function of the
//! event logs and an as-of instant; nothing is cached between calls.

pub mod aggregate;
pub mod goal;
pub mod hourly;
pub mod loom;
pub mod pareto;
pub mod reports;
