//! Configuration command handler.
//!
//! Prints every setting with the place its value came from:
//!
//! ```json
//! {
//!   "stack_size": {
//!     "value": 20000,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// `CliError::Config` when the configuration file or an `ACTLINE_*`
/// variable is invalid.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "stack_size": {
            "value": config.stack_size,
            "source": sources.stack_size,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "num_streets": {
            "value": config.num_streets,
            "source": sources.num_streets,
        },
        "workers": {
            "value": config.workers,
            "source": sources.workers,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        }
    });
    let json_str = serde_json::to_string_pretty(&display)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
