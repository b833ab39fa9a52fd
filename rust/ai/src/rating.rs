//! Preflop hand rating and the decision tree shared by bots and the coach.

use holdem_engine::cards::Card;
use holdem_engine::game::GameState;
use holdem_engine::logger::Street;
use holdem_engine::player::Position;

use crate::ranges::RangeCfg;

/// Heuristic strength of two hole cards.
///
/// Pair bonus `40 + 2·rank`, +3 suited, broadway bonus (+6 for a jack-or-better
/// top card, +3 more if both are), +2 connected / +1 one-gap, plus the high
/// rank and a tenth of the low rank.
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_ai::rating::preflop_rating;
///
/// let aa = preflop_rating(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts));
/// let aks = preflop_rating(Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::King, Suit::Spades));
/// assert!(aa > aks);
/// ```
pub fn preflop_rating(a: Card, b: Card) -> f64 {
    let (hi, lo) = if a.rank >= b.rank {
        (a.rank.value(), b.rank.value())
    } else {
        (b.rank.value(), a.rank.value())
    };
    let pair = if hi == lo { 40.0 + 2.0 * hi as f64 } else { 0.0 };
    let suited = if a.suit == b.suit { 3.0 } else { 0.0 };
    let broadway = (if hi >= 11 { 6.0 } else { 0.0 }) + (if lo >= 11 { 3.0 } else { 0.0 });
    let connected = match hi - lo {
        0 | 1 => 2.0,
        2 => 1.0,
        _ => 0.0,
    };
    pair + suited + broadway + connected + hi as f64 + lo as f64 / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflopContext {
    /// Only the blinds are in
    Unopened,
    /// One or more players flatted the big blind
    Limped,
    /// Someone raised
    Raised,
}

pub fn preflop_context(state: &GameState) -> PreflopContext {
    let bb = state.big_blind();
    let max = state.max_bet();
    let posted = state.players().iter().filter(|p| p.bet() > 0).count();
    if max <= bb && posted <= 2 {
        PreflopContext::Unopened
    } else if max == bb && posted > 2 {
        PreflopContext::Limped
    } else {
        PreflopContext::Raised
    }
}

/// Broad action class of a [`PreflopLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Fold,
    /// Call, or check when nothing is owed
    Call,
    Raise,
}

/// Leaf of the preflop decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflopLine {
    RaiseOption,
    CheckOption,
    Open,
    Limp,
    FoldUnopened,
    IsoRaise,
    OverLimp,
    FoldToLimp,
    ThreeBet,
    Defend,
    FoldToRaise,
}

impl PreflopLine {
    pub fn action(self) -> LineAction {
        match self {
            PreflopLine::RaiseOption
            | PreflopLine::Open
            | PreflopLine::IsoRaise
            | PreflopLine::ThreeBet => LineAction::Raise,
            PreflopLine::CheckOption
            | PreflopLine::Limp
            | PreflopLine::OverLimp
            | PreflopLine::Defend => LineAction::Call,
            PreflopLine::FoldUnopened | PreflopLine::FoldToLimp | PreflopLine::FoldToRaise => {
                LineAction::Fold
            }
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            PreflopLine::RaiseOption => "Raise your option.",
            PreflopLine::CheckOption => "Free flop.",
            PreflopLine::Open => "Open (≈2.5×).",
            PreflopLine::Limp => "Limp is fine here.",
            PreflopLine::FoldUnopened => "Too weak to open.",
            PreflopLine::IsoRaise => "Iso-raise over limpers.",
            PreflopLine::OverLimp => "Over-limp okay.",
            PreflopLine::FoldToLimp => "Skip.",
            PreflopLine::ThreeBet => "3-bet premium.",
            PreflopLine::Defend => "Defend at this price.",
            PreflopLine::FoldToRaise => "Weak or too expensive.",
        }
    }
}

/// Largest price still worth flatting a raise: `max(3bb, 40% of the pot)`.
pub(crate) fn defend_price(state: &GameState) -> u32 {
    let pot = state.pot_total() as f64;
    (state.big_blind() * 3).max((pot * 0.4).floor() as u32)
}

/// Walks the preflop tree for `seat`. `None` off the preflop street or
/// when the seat holds no cards.
pub fn preflop_line(state: &GameState, seat: usize, cfg: &RangeCfg) -> Option<PreflopLine> {
    if state.street() != Street::Preflop {
        return None;
    }
    let hole = state.player(seat)?.hole_cards();
    let [a, b] = hole else {
        return None;
    };
    let pos = state.position_of(seat)?;
    let r = preflop_rating(*a, *b);
    let need = state.to_call(seat);
    let context = preflop_context(state);
    let big_blind_option = pos == Position::BigBlind && need == 0;

    let option = || {
        if r >= cfg.iso_at(pos) {
            PreflopLine::RaiseOption
        } else {
            PreflopLine::CheckOption
        }
    };

    match context {
        PreflopContext::Unopened if big_blind_option => return Some(option()),
        PreflopContext::Unopened if pos != Position::BigBlind => {
            return Some(if r >= cfg.open_at(pos) {
                PreflopLine::Open
            } else if r >= cfg.call_at(pos) {
                PreflopLine::Limp
            } else {
                PreflopLine::FoldUnopened
            });
        }
        PreflopContext::Limped if big_blind_option => return Some(option()),
        PreflopContext::Limped => {
            return Some(if r >= cfg.iso_at(pos) {
                PreflopLine::IsoRaise
            } else if r >= cfg.call_at(pos) {
                PreflopLine::OverLimp
            } else {
                PreflopLine::FoldToLimp
            });
        }
        // a short big blind facing a completed blind lands here too
        _ => {}
    }

    Some(if r >= cfg.three_bet {
        PreflopLine::ThreeBet
    } else if r >= cfg.call_at(pos) && need <= defend_price(state) {
        PreflopLine::Defend
    } else {
        PreflopLine::FoldToRaise
    })
}
