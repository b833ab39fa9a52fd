//! Simulation command handler: persona bots in every seat.
//!
//! Prints one summary line per hand and the final stacks, or with `--json`
//! the final table snapshot. Busted bots sit out; the run stops early once
//! fewer than two seats have chips.

use std::io::Write;

use holdem_engine::errors::GameError;

use crate::commands::load_config;
use crate::error::CliError;
use crate::formatters::format_award;
use crate::session::Session;
use crate::ui;

pub const DEFAULT_SIM_HANDS: u32 = 100;

pub fn handle_sim_command(
    hands: Option<u32>,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(DEFAULT_SIM_HANDS);
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = load_config(err)?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut session = Session::new(&cfg, false, seed)?;
    let chips = session.state().chips_in_play();
    if !json {
        writeln!(out, "sim: seats={} hands={} seed={}", cfg.seats, hands, seed)?;
    }

    let mut played = 0u32;
    for i in 1..=hands {
        if i > 1 {
            match session.start_hand() {
                Ok(()) => {}
                Err(GameError::NotEnoughPlayers { .. }) => {
                    if !json {
                        writeln!(out, "Table broke after {} hands.", played)?;
                    }
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        session.run_bots();
        let st = session.state();
        if !st.is_hand_ended() {
            return Err(CliError::Engine(format!(
                "hand {} stopped with no seat to act",
                session.engine().hand_number()
            )));
        }
        if st.chips_in_play() != chips {
            tracing::warn!(
                expected = chips,
                found = st.chips_in_play(),
                "chip total changed"
            );
        }
        played += 1;
        if !json {
            let awards: Vec<String> = st.awards().iter().map(|a| format_award(st, a)).collect();
            writeln!(
                out,
                "Hand {}: {}",
                session.engine().hand_number(),
                awards.join("; ")
            )?;
        }
    }

    if json {
        let snapshot = serde_json::json!({
            "seed": seed,
            "hands": played,
            "state": session.state(),
        });
        let json_str = serde_json::to_string_pretty(&snapshot).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json_str)?;
        return Ok(());
    }

    writeln!(out, "Final stacks:")?;
    for p in session.state().players() {
        writeln!(out, "  {:<12} {}", p.name(), p.stack())?;
    }
    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}
