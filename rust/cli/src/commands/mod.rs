//! Command handler modules for the `holdem` CLI.
//!
//! Each command lives in its own file with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and stdin (`&mut dyn BufRead`) passed in
//! - Errors propagated via `CliError`; `run` turns them into exit codes

pub mod cfg;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use std::io::Write;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;

/// Loads the configuration, reporting a failure on `err` first.
pub(crate) fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    match config::load() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            Err(CliError::Config(format!("Invalid configuration: {}", e)))
        }
    }
}
