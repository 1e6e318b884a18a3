//! loomshift main entrypoint.

use loomshift::run;
use loomshift::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
