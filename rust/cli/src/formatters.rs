//! Table, seat and award formatters for terminal display.
//!
//! Pure functions over the read-only [`GameState`]; nothing here mutates the
//! hand.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::format_board;
//!
//! assert_eq!(format_board(&[]), "[]");
//! let board = [Card::new(Rank::Ace, Suit::Spades)];
//! assert!(format_board(&board).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, format_cards};
use holdem_engine::game::{Award, AwardKind, GameState};
use holdem_engine::player::Player;

pub fn format_board(board: &[Card]) -> String {
    format!("[{}]", format_cards(board))
}

/// Short position tag used in seat listings.
pub fn position_tag(state: &GameState, seat: usize) -> &'static str {
    use holdem_engine::player::Position;
    match state.position_of(seat) {
        Some(Position::Button) => "BTN",
        Some(Position::SmallBlind) => "SB",
        Some(Position::BigBlind) => "BB",
        Some(Position::UnderTheGun) => "UTG",
        Some(Position::Hijack) => "HJ",
        Some(Position::Cutoff) => "CO",
        None => "--",
    }
}

fn seat_flags(p: &Player) -> &'static str {
    if p.hole_cards().is_empty() {
        " (sitting out)"
    } else if p.is_folded() {
        " (folded)"
    } else if p.is_all_in() {
        " (all-in)"
    } else {
        ""
    }
}

/// One line per seat. Hole cards are shown for `hero` only, and for every
/// live seat once the hand reached showdown.
pub fn format_seats(state: &GameState, hero: Option<usize>) -> Vec<String> {
    let showdown = state.is_hand_ended() && state.board().len() == 5;
    state
        .players()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let reveal = Some(i) == hero || (showdown && !p.is_folded());
            let cards = if reveal && !p.hole_cards().is_empty() {
                format!(" {}", format_cards(p.hole_cards()))
            } else {
                String::new()
            };
            format!(
                "  {:<3} {:<10} stack {:>6} bet {:>5}{}{}",
                position_tag(state, i),
                p.name(),
                p.stack(),
                p.bet(),
                cards,
                seat_flags(p)
            )
        })
        .collect()
}

/// Prompt line shown to the seat about to act.
pub fn format_turn(state: &GameState, seat: usize) -> String {
    let Some(p) = state.player(seat) else {
        return String::new();
    };
    let need = state.to_call(seat);
    let call = if need == 0 {
        "check".to_string()
    } else if p.stack() <= need {
        format!("call {} (all-in)", p.stack())
    } else {
        format!("call {}", need)
    };
    format!(
        "{} | Board {} | Pot {} | {} | min raise to {} | all-in to {}",
        format_cards(p.hole_cards()),
        format_board(state.board()),
        state.pot_total(),
        call,
        state.min_raise_target(),
        p.bet() + p.stack()
    )
}

pub fn format_award(state: &GameState, award: &Award) -> String {
    let name = state.player(award.seat).map_or("?", Player::name);
    match award.kind {
        AwardKind::Uncontested => format!("{} takes {} uncontested", name, award.amount),
        AwardKind::Pot { index: 1 } => format!("{} wins {} from the main pot", name, award.amount),
        AwardKind::Pot { index } => {
            format!("{} wins {} from side pot {}", name, award.amount, index - 1)
        }
        AwardKind::Refund => format!("{} gets {} back", name, award.amount),
    }
}
