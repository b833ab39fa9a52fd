//! Advice for the human seat.
//!
//! Walks the same preflop tree as the bots but never draws randomness, so the
//! same spot always produces the same recommendation.

use std::fmt;

use holdem_engine::cards::Card;
use holdem_engine::game::GameState;
use holdem_engine::hand::{best_hand, Category};
use holdem_engine::logger::Street;
use serde::Serialize;

use crate::ranges::RangeCfg;
use crate::rating::{LineAction, PreflopLine, preflop_line};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdviceAction {
    Fold,
    Check,
    Call,
    Raise,
}

impl fmt::Display for AdviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdviceAction::Fold => "Fold",
            AdviceAction::Check => "Check",
            AdviceAction::Call => "Call",
            AdviceAction::Raise => "Raise",
        };
        f.write_str(s)
    }
}

/// One recommendation. `action` is `None` when there is nothing to decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub action: Option<AdviceAction>,
    pub reason: String,
}

impl Advice {
    fn neutral(reason: &str) -> Self {
        Self {
            action: None,
            reason: reason.to_string(),
        }
    }

    fn new(action: AdviceAction, reason: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Some(action) => write!(f, "{action}: {}", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

fn line_advice(line: PreflopLine, need: u32) -> AdviceAction {
    match line.action() {
        LineAction::Raise => AdviceAction::Raise,
        LineAction::Call if need == 0 => AdviceAction::Check,
        LineAction::Call => AdviceAction::Call,
        LineAction::Fold => AdviceAction::Fold,
    }
}

pub fn advise(state: &GameState, seat: usize, cfg: &RangeCfg) -> Advice {
    if state.is_hand_ended() || state.street() == Street::Showdown {
        return Advice::neutral("Hand over.");
    }
    let Some(p) = state.player(seat) else {
        return Advice::neutral("No such seat.");
    };
    if p.hole_cards().len() < 2 {
        return Advice::neutral("Sitting out. Rebuy between hands to get cards.");
    }
    if p.is_folded() {
        return Advice::neutral("Folded. Wait for the next hand.");
    }
    if p.is_all_in() {
        return Advice::neutral("All-in. Nothing left to decide.");
    }

    let need = state.to_call(seat);

    if state.street() == Street::Preflop {
        let label = state.position_of(seat).map_or("Seat", |pos| pos.label());
        return match preflop_line(state, seat, cfg) {
            Some(line) => Advice::new(line_advice(line, need), format!("{label}. {}", line.reason())),
            None => Advice::neutral("No preflop read."),
        };
    }

    let mut cards: Vec<Card> = p.hole_cards().to_vec();
    cards.extend_from_slice(state.board());
    let Some((score, _)) = best_hand(&cards) else {
        return Advice::neutral("No board yet.");
    };
    let made = format!("{}.", score.describe());
    if need == 0 {
        return Advice::new(AdviceAction::Check, made);
    }
    let decent = score.category >= Category::TwoPair
        || (score.category == Category::OnePair && score.kickers[0] >= 12);
    if decent {
        Advice::new(AdviceAction::Call, made)
    } else {
        Advice::new(AdviceAction::Fold, "Weak vs bet.")
    }
}
