use crate::models::Millis;

/// `<prefix>-<now>`, with a numeric suffix when that id is already taken
/// (several records created by one batch share the same instant).
pub fn unique_id<F>(prefix: &str, now: Millis, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = format!("{prefix}-{now}");
    if !taken(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
