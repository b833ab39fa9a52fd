//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value next to where it
//! came from (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "seats": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seats": { "value": config.seats, "source": sources.seats },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "start_bb": { "value": config.start_bb, "source": sources.start_bb },
        "seed": { "value": config.seed, "source": sources.seed },
        "mode": { "value": config.mode, "source": sources.mode },
        "min_buy_bb": { "value": config.min_buy_bb, "source": sources.min_buy_bb },
        "max_buy_bb": { "value": config.max_buy_bb, "source": sources.max_buy_bb },
        "rebuy_hands": { "value": config.rebuy_hands, "source": sources.rebuy_hands },
        "personas": { "value": config.personas, "source": sources.personas },
        "coach_tier": { "value": config.coach_tier, "source": sources.coach_tier },
        "ranges": { "value": config.ranges, "source": sources.ranges },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
