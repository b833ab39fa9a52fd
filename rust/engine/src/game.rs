use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::{ActionRecord, HandLog, Street};
use crate::player::{Player, Position};
use crate::rules;

/// Most seats a table may have; positions and range tables cover six.
pub const MAX_SEATS: usize = 6;

/// Ceiling on the chips a table may hold, so street arithmetic stays in `u32`.
pub const MAX_TABLE_CHIPS: u64 = (u32::MAX / 2) as u64;

/// Blind sizes for a table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 5,
            big_blind: 10,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.big_blind == 0 || self.small_blind > self.big_blind {
            return Err(GameError::InvalidBlinds {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum AwardKind {
    /// Everyone else folded
    Uncontested,
    /// Share of the numbered pot (1 = main pot) won at showdown
    Pot { index: usize },
    /// Uncalled chips handed back
    Refund,
}

/// Chips paid out to a seat when the hand settled.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub seat: usize,
    pub amount: u32,
    pub kind: AwardKind,
}

/// Authoritative state of one hand.
///
/// A fresh `GameState` is built for every hand, carrying stacks and
/// identities over from the previous one. It is mutated only through
/// [`GameState::step`]; everything here is a read-only view for drivers,
/// renderers and the decision policy.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    #[serde(skip)]
    pub(crate) deck: Deck,
    pub(crate) board: Vec<Card>,
    pub(crate) players: Vec<Player>,
    pub(crate) button: usize,
    pub(crate) sb_seat: usize,
    pub(crate) bb_seat: usize,
    pub(crate) street: Street,
    pub(crate) config: TableConfig,
    /// Chips swept off the table from settled betting rounds
    pub(crate) pot_committed: u32,
    /// Cumulative chips put in this hand, per seat
    pub(crate) contributions: Vec<u32>,
    pub(crate) current: usize,
    /// Minimum raise increment on the current street
    pub(crate) last_raise: u32,
    pub(crate) log: HandLog,
    pub(crate) actions: Vec<ActionRecord>,
    pub(crate) awards: Vec<Award>,
    pub(crate) hand_ended: bool,
    pub(crate) aggressor: Option<usize>,
    pub(crate) preflop_aggressor: Option<usize>,
    pub(crate) prev_aggressor: Option<usize>,
}

impl GameState {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn button(&self) -> usize {
        self.button
    }

    pub fn small_blind_seat(&self) -> usize {
        self.sb_seat
    }

    pub fn big_blind_seat(&self) -> usize {
        self.bb_seat
    }

    pub fn config(&self) -> TableConfig {
        self.config
    }

    pub fn small_blind(&self) -> u32 {
        self.config.small_blind
    }

    pub fn big_blind(&self) -> u32 {
        self.config.big_blind
    }

    pub fn pot_committed(&self) -> u32 {
        self.pot_committed
    }

    pub fn contributions(&self) -> &[u32] {
        &self.contributions
    }

    /// Seat expected to act next.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn last_raise(&self) -> u32 {
        self.last_raise
    }

    pub fn log(&self) -> &HandLog {
        &self.log
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn awards(&self) -> &[Award] {
        &self.awards
    }

    pub fn is_hand_ended(&self) -> bool {
        self.hand_ended
    }

    /// Last raiser on the current postflop street.
    pub fn aggressor(&self) -> Option<usize> {
        self.aggressor
    }

    pub fn preflop_aggressor(&self) -> Option<usize> {
        self.preflop_aggressor
    }

    /// Aggressor of the street before the current one (continuation bets).
    pub fn prev_aggressor(&self) -> Option<usize> {
        self.prev_aggressor
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn max_bet(&self) -> u32 {
        self.players.iter().map(Player::bet).max().unwrap_or(0)
    }

    /// Chips `seat` must add to match the street's highest bet.
    pub fn to_call(&self, seat: usize) -> u32 {
        self.players
            .get(seat)
            .map_or(0, |p| self.max_bet().saturating_sub(p.bet()))
    }

    pub fn min_raise_target(&self) -> u32 {
        rules::min_raise_target(self.max_bet(), self.last_raise, self.config.big_blind)
    }

    /// Committed pot plus every bet still in front of the players.
    pub fn pot_total(&self) -> u32 {
        self.pot_committed + self.players.iter().map(Player::bet).sum::<u32>()
    }

    /// Players still able to act (not folded, not all-in, chips behind).
    pub fn count_eligible(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Sum of stacks, street bets and committed pot. Constant across `step`.
    pub fn chips_in_play(&self) -> u64 {
        let stacks: u64 = self.players.iter().map(|p| p.stack() as u64).sum();
        let bets: u64 = self.players.iter().map(|p| p.bet() as u64).sum();
        stacks + bets + self.pot_committed as u64
    }

    pub fn is_dealt_in(&self, seat: usize) -> bool {
        self.players
            .get(seat)
            .is_some_and(|p| p.hole_cards().len() == 2)
    }

    /// Position of `seat` for this hand, or `None` for seats sitting out.
    pub fn position_of(&self, seat: usize) -> Option<Position> {
        if !self.is_dealt_in(seat) {
            return None;
        }
        if seat == self.button {
            return Some(Position::Button);
        }
        if seat == self.sb_seat {
            return Some(Position::SmallBlind);
        }
        if seat == self.bb_seat {
            return Some(Position::BigBlind);
        }
        let n = self.players.len();
        let between: Vec<usize> = (1..n)
            .map(|k| (self.bb_seat + k) % n)
            .take_while(|&s| s != self.button)
            .filter(|&s| self.is_dealt_in(s))
            .collect();
        let idx = between.iter().position(|&s| s == seat)?;
        Some(match between.len() - idx {
            1 => Position::Cutoff,
            2 => Position::Hijack,
            _ => Position::UnderTheGun,
        })
    }
}
