/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Efficiency color against the goal:
/// at or above goal → green,
/// within 90% of goal → yellow,
/// otherwise → red.
pub fn color_for_efficiency(efficiency: f64, goal: f64) -> &'static str {
    if efficiency >= goal {
        GREEN
    } else if efficiency >= goal * 0.9 {
        YELLOW
    } else {
        RED
    }
}

/// Positive difference green, negative red.
pub fn color_for_difference(value: f64) -> &'static str {
    if value >= 0.0 { GREEN } else { RED }
}

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
