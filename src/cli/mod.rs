//! Command-line interface.

pub mod commands;
pub mod output;
pub mod table;
pub mod types;

pub use types::{Cli, Commands};

/// Print a top-level error and exit with a failure code.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
