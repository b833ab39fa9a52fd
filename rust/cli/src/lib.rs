//! # holdem CLI Library
//!
//! Terminal driver for the hold'em engine: seats persona bots (and you),
//! feeds actions into the state machine, prints the hand log, handles
//! rebuys between hands, and reads the table configuration.
//!
//! ## Main Entry Point
//!
//! [`run`] parses command-line arguments and executes the subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "play", "--hands", "10"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play hands against persona bots, with coach hints
//! - `sim`: Let bots play every seat and summarise the results
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod bankroll;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod session;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_play_command, handle_sim_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Exit code: `0` for success (including `--help` and `--version`), `2` for
/// usage errors and failed commands.
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "sim", "--hands", "3", "--seed", "42"];
/// let mut out = Vec::new();
/// let code = holdem_cli::run(args, &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = HoldemCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return 2;
                    }
                    0
                }
                _ => {
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Hold'em CLI").is_err()
                        || writeln!(err, "Usage: holdem <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return 2;
                    }
                    for c in Commands::NAMES {
                        if writeln!(err, "  {}", c).is_err() {
                            return 2;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: holdem --help").is_err() {
                        return 2;
                    }
                    2
                }
            }
        }
        Ok(cli) => {
            let result = match cli.cmd {
                Commands::Cfg => handle_cfg_command(out, err),
                Commands::Play { hands, seed } => {
                    let stdin = std::io::stdin();
                    let mut stdin_lock = stdin.lock();
                    handle_play_command(hands, seed, out, err, &mut stdin_lock)
                }
                Commands::Sim { hands, seed, json } => {
                    handle_sim_command(hands, seed, json, out, err)
                }
            };
            match result {
                Ok(()) => 0,
                Err(e) => {
                    tracing::debug!(error = %e, "command failed");
                    if writeln!(err, "Error: {}", e).is_err() {
                        return 2;
                    }
                    2
                }
            }
        }
    }
}
