use crate::errors::AppResult;
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdin. Anything but "y"/"yes" is a no,
/// including a closed stdin.
pub fn confirm(question: &str) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
