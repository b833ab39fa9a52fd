use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Seat position relative to the button for the current hand.
/// Indexes position-keyed range tables (see [`Position::index`]).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Button (also the small blind heads-up)
    Button,
    /// Small blind
    SmallBlind,
    /// Big blind
    BigBlind,
    /// First seat after the big blind, and any early seats before the hijack
    UnderTheGun,
    /// Two seats before the button
    Hijack,
    /// Seat right before the button
    Cutoff,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Button,
        Position::SmallBlind,
        Position::BigBlind,
        Position::UnderTheGun,
        Position::Hijack,
        Position::Cutoff,
    ];

    pub fn index(self) -> usize {
        match self {
            Position::Button => 0,
            Position::SmallBlind => 1,
            Position::BigBlind => 2,
            Position::UnderTheGun => 3,
            Position::Hijack => 4,
            Position::Cutoff => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Button => "Button",
            Position::SmallBlind => "Small Blind",
            Position::BigBlind => "Big Blind",
            Position::UnderTheGun => "UTG",
            Position::Hijack => "Hijack",
            Position::Cutoff => "Cutoff",
        }
    }
}

/// Represents a player action submitted to [`crate::game::GameState::step`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Call the current bet, or check when nothing is owed
    Call,
    /// Raise the street bet to the given total chip level
    Raise { to: u32 },
}

/// Seat description used to open a table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatSpec {
    pub name: String,
    pub is_human: bool,
    pub stack: u32,
}

impl SeatSpec {
    pub fn new(name: impl Into<String>, is_human: bool, stack: u32) -> Self {
        Self {
            name: name.into(),
            is_human,
            stack,
        }
    }
}

/// Per-hand player state. Identity and stack carry over between hands; the
/// rest is reset when the next hand is constructed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Player {
    id: usize,
    name: String,
    is_human: bool,
    stack: u32,
    /// Chips put in on the current street
    bet: u32,
    folded: bool,
    all_in: bool,
    /// Has acted since the last raise on this street
    acted: bool,
    hole: Vec<Card>,
}

impl Player {
    pub fn new(id: usize, spec: SeatSpec) -> Self {
        Self {
            id,
            name: spec.name,
            is_human: spec.is_human,
            stack: spec.stack,
            bet: 0,
            folded: false,
            all_in: false,
            acted: false,
            hole: Vec::with_capacity(2),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_human(&self) -> bool {
        self.is_human
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn bet(&self) -> u32 {
        self.bet
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }

    /// Still able to act: not folded, not all-in, chips behind.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && self.stack > 0
    }

    /// Copy for the next hand: same identity and stack, everything else reset.
    /// Busted seats sit out by starting folded.
    pub(crate) fn reset_for_hand(&self, stack: u32) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            is_human: self.is_human,
            stack,
            bet: 0,
            folded: stack == 0,
            all_in: false,
            acted: false,
            hole: Vec::with_capacity(2),
        }
    }

    pub(crate) fn give_card(&mut self, c: Card) {
        self.hole.push(c);
    }

    /// Moves up to `amount` from stack to the street bet and returns what was
    /// actually paid. Exhausting the stack puts the player all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let pay = amount.min(self.stack);
        self.stack -= pay;
        self.bet += pay;
        if self.stack == 0 {
            self.all_in = true;
        }
        pay
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
        self.acted = true;
    }

    pub(crate) fn set_acted(&mut self, acted: bool) {
        self.acted = acted;
    }

    pub(crate) fn clear_bet(&mut self) -> u32 {
        std::mem::take(&mut self.bet)
    }
}
