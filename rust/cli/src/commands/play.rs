//! # Play Command
//!
//! Interactive table: the human sits in seat 0, persona bots fill the rest.
//!
//! - Every engine log line is echoed as it happens
//! - `h` asks the coach, using the configured coach range tier
//! - Busted players are offered rebuys between hands; `topup` at the action
//!   prompt schedules a top-up for the next hand
//! - `q` or end of input stops the session

use std::io::{BufRead, Write};

use holdem_ai::coach;
use holdem_ai::ranges::RangeCfg;
use holdem_engine::errors::GameError;
use holdem_engine::player::{Player, PlayerAction};

use crate::bankroll::{Bankroll, BankrollOption};
use crate::commands::load_config;
use crate::error::CliError;
use crate::formatters::{format_award, format_seats, format_turn};
use crate::io_utils::read_stdin_line;
use crate::session::{HUMAN_SEAT, Session};
use crate::ui;
use crate::validation::{BankrollChoice, ParseResult, parse_bankroll_choice, parse_player_action};

/// Handle the play command.
///
/// `hands` defaults to 1. The seed comes from `--seed`, then the
/// configuration (`HOLDEM_SEED` or the file), then a random draw; it is
/// printed so a session can be replayed.
pub fn handle_play_command(
    hands: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let hands = hands.unwrap_or(1);
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = load_config(err)?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    writeln!(
        out,
        "play: seats={} blinds={}/{} mode={} hands={} seed={}",
        cfg.seats, cfg.small_blind, cfg.big_blind, cfg.mode, hands, seed
    )?;

    let mut session = Session::new(&cfg, true, seed)?;
    let mut bankroll = Bankroll::new(cfg.mode, cfg.buy_ins(), cfg.rebuy_hands);
    let coach_cfg = cfg.ranges.get(cfg.coach_tier).clone();

    let mut played = 0u32;
    for i in 1..=hands {
        if i > 1 {
            match offer_bankroll(&mut session, &bankroll, out, err, stdin)? {
                Between::Continue => {}
                Between::Quit => break,
                Between::Eliminated => {
                    writeln!(out, "Eliminated (rebuy closed).")?;
                    break;
                }
            }
            match session.start_hand() {
                Ok(()) => {}
                Err(GameError::NotEnoughPlayers { .. }) => {
                    writeln!(out, "Not enough players with chips. Session over.")?;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        bankroll.hand_started();

        writeln!(out)?;
        writeln!(out, "=== Hand {} ===", session.engine().hand_number())?;
        ui::write_lines(out, &format_seats(session.state(), Some(HUMAN_SEAT)))?;

        let outcome = play_hand(&mut session, &bankroll, &coach_cfg, out, err, stdin)?;
        ui::write_lines(out, &session.fresh_log())?;
        if outcome == HandOutcome::Quit {
            break;
        }
        played += 1;
        write_summary(&session, out)?;
    }

    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandOutcome {
    Finished,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Between {
    Continue,
    Quit,
    Eliminated,
}

fn play_hand(
    session: &mut Session,
    bankroll: &Bankroll,
    coach_cfg: &RangeCfg,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<HandOutcome, CliError> {
    let mut top_up: Option<BankrollOption> = None;
    loop {
        session.run_bots();
        ui::write_lines(out, &session.fresh_log())?;
        if session.actor().is_none() {
            break;
        }

        writeln!(out, "{}", format_turn(session.state(), HUMAN_SEAT))?;
        write!(out, "Action (f/c/r N/a/h/t/q): ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(HandOutcome::Quit);
        };
        match parse_player_action(&line) {
            ParseResult::Action(action) => session.act(action),
            ParseResult::AllIn => {
                let to = session
                    .state()
                    .player(HUMAN_SEAT)
                    .map_or(0, |p| p.bet() + p.stack());
                session.act(PlayerAction::Raise { to });
            }
            ParseResult::Hint => {
                let advice = coach::advise(session.state(), HUMAN_SEAT, coach_cfg);
                writeln!(out, "Coach: {}", advice)?;
            }
            ParseResult::TopUp => {
                top_up = bankroll
                    .options(stack_of(session))
                    .into_iter()
                    .find(|o| matches!(o, BankrollOption::TopUp { .. }));
                match top_up {
                    Some(option) => writeln!(out, "Will {} after this hand.", option)?,
                    None => ui::display_warning(err, "Top-up not available")?,
                }
            }
            ParseResult::Quit => return Ok(HandOutcome::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }

    // stacks may have moved during the hand; re-check before applying
    if let Some(BankrollOption::TopUp { .. }) = top_up {
        let current = bankroll
            .options(stack_of(session))
            .into_iter()
            .find(|o| matches!(o, BankrollOption::TopUp { .. }));
        if let Some(option) = current {
            let stack = bankroll.apply(session.engine_mut(), HUMAN_SEAT, option)?;
            writeln!(out, "Topped up to {}.", stack)?;
        }
    }
    Ok(HandOutcome::Finished)
}

fn stack_of(session: &Session) -> u32 {
    session.state().player(HUMAN_SEAT).map_or(0, Player::stack)
}

/// Prompts a busted player for a rebuy before the next hand.
fn offer_bankroll(
    session: &mut Session,
    bankroll: &Bankroll,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Between, CliError> {
    let stack = session.engine().next_stack(HUMAN_SEAT).unwrap_or(0);
    if stack > 0 {
        return Ok(Between::Continue);
    }
    let options = bankroll.options(stack);
    if options.contains(&BankrollOption::Eliminated) {
        return Ok(Between::Eliminated);
    }

    loop {
        let listed: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(k, o)| format!("{}) {}", k + 1, o))
            .collect();
        writeln!(out, "You are out of chips. {}", listed.join("  "))?;
        write!(out, "Rebuy (number, Enter to sit out, q): ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(Between::Quit);
        };
        match parse_bankroll_choice(&line, &options) {
            BankrollChoice::Take(option) => {
                let stack = bankroll.apply(session.engine_mut(), HUMAN_SEAT, option)?;
                writeln!(out, "Rebought. Stack {}.", stack)?;
                return Ok(Between::Continue);
            }
            BankrollChoice::Skip => return Ok(Between::Continue),
            BankrollChoice::Quit => return Ok(Between::Quit),
            BankrollChoice::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}

fn write_summary(session: &Session, out: &mut dyn Write) -> Result<(), CliError> {
    let st = session.state();
    for award in st.awards() {
        writeln!(out, "{}", format_award(st, award))?;
    }
    let stacks: Vec<String> = st
        .players()
        .iter()
        .map(|p| format!("{} {}", p.name(), p.stack()))
        .collect();
    writeln!(out, "Stacks: {}", stacks.join(" | "))?;
    Ok(())
}
