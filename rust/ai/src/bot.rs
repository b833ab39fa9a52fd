//! Persona-driven bot.
//!
//! Preflop it walks the shared [`preflop_line`] tree against its tier's
//! thresholds and sizes raises by context. Postflop it value-bets made hands,
//! fires continuation bets and semi-bluffs at persona frequencies, and
//! otherwise checks, calls when priced, or folds.

use holdem_engine::cards::Card;
use holdem_engine::game::GameState;
use holdem_engine::hand::{best_hand, has_flush_draw, has_straight_draw, Category, Score};
use holdem_engine::logger::Street;
use holdem_engine::player::PlayerAction;
use rand::{Rng, RngCore};

use crate::AIOpponent;
use crate::persona::Persona;
use crate::ranges::{RangeCfg, RangeTable};
use crate::rating::{LineAction, PreflopLine, preflop_line};

#[derive(Debug, Clone)]
pub struct PersonaBot {
    persona: Persona,
    ranges: RangeCfg,
}

/// Pair with a jack-or-better top rank, or trips and up.
pub fn is_made_strong(score: &Score) -> bool {
    score.category >= Category::OnePair
        && (score.category >= Category::ThreeOfAKind || score.kickers[0] >= 11)
}

fn round_chips(x: f64) -> u32 {
    x.round().max(0.0) as u32
}

impl PersonaBot {
    pub fn new(persona: Persona, ranges: RangeCfg) -> Self {
        Self { persona, ranges }
    }

    /// Bot reading the tier its persona maps to.
    pub fn from_table(persona: Persona, table: &RangeTable) -> Self {
        Self::new(persona, table.get(persona.tier()).clone())
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn decide(&self, state: &GameState, seat: usize, rng: &mut dyn RngCore) -> PlayerAction {
        let Some(p) = state.player(seat) else {
            return PlayerAction::Call;
        };
        if p.is_folded() || p.is_all_in() {
            return PlayerAction::Call;
        }
        let action = if state.street() == Street::Preflop {
            self.preflop(state, seat)
        } else {
            self.postflop(state, seat, rng)
        };
        tracing::debug!(seat, persona = %self.persona, ?action, "bot decision");
        action
    }

    fn preflop(&self, state: &GameState, seat: usize) -> PlayerAction {
        let Some(line) = preflop_line(state, seat, &self.ranges) else {
            return PlayerAction::Call;
        };
        let bb = state.big_blind();
        let min = state.min_raise_target();
        let max = state.max_bet();
        let need = state.to_call(seat);
        let to = match line {
            PreflopLine::RaiseOption => min.max(bb * 3),
            PreflopLine::Open => min.max(round_chips(bb as f64 * 2.5)),
            PreflopLine::IsoRaise => min.max(max + (bb * 2).max(need * 2)),
            PreflopLine::ThreeBet => min.max(max + round_chips(need as f64 * 2.5).max(bb * 2)),
            _ => {
                return match line.action() {
                    LineAction::Fold => PlayerAction::Fold,
                    _ => PlayerAction::Call,
                };
            }
        };
        PlayerAction::Raise { to }
    }

    fn postflop(&self, state: &GameState, seat: usize, rng: &mut dyn RngCore) -> PlayerAction {
        if state.count_eligible() <= 1 {
            return PlayerAction::Call;
        }
        let Some(p) = state.player(seat) else {
            return PlayerAction::Call;
        };
        let mut cards: Vec<Card> = p.hole_cards().to_vec();
        cards.extend_from_slice(state.board());
        let Some((score, _)) = best_hand(&cards) else {
            return PlayerAction::Call;
        };
        let strong = is_made_strong(&score);
        let drawy = has_flush_draw(&cards) || has_straight_draw(&cards);
        let need = state.to_call(seat);
        let pot = state.pot_total() as f64;
        let aggression = self.persona.aggression();
        let bet = |fraction: f64| PlayerAction::Raise {
            to: state
                .min_raise_target()
                .max(state.max_bet() + round_chips(pot * fraction)),
        };

        if need > 0 {
            if strong {
                return PlayerAction::Call;
            }
            let price = (state.big_blind() * 3).max((pot * 0.35).floor() as u32);
            return if drawy && need <= price {
                PlayerAction::Call
            } else {
                PlayerAction::Fold
            };
        }

        if strong {
            return bet(0.5);
        }
        let cbet = match state.street() {
            Street::Flop => Some(aggression.cbet_flop),
            Street::Turn => Some(aggression.cbet_turn),
            _ => None,
        };
        if let Some(freq) = cbet {
            if state.prev_aggressor() == Some(seat) && rng.random::<f64>() < freq {
                return bet(0.5);
            }
        }
        if drawy && rng.random::<f64>() < aggression.bluff {
            return bet(0.4);
        }
        PlayerAction::Call
    }
}

impl AIOpponent for PersonaBot {
    fn get_action(&self, state: &GameState, seat: usize, rng: &mut dyn RngCore) -> PlayerAction {
        self.decide(state, seat, rng)
    }

    fn name(&self) -> &str {
        self.persona.code()
    }
}

