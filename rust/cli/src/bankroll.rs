//! Rebuys and top-ups between hands.
//!
//! The engine never decides who gets chips; this module works out what a
//! seat is allowed to buy and hands the resulting stack to
//! [`Engine::set_stack`], which refuses while a hand is running.

use std::fmt;

use holdem_engine::engine::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankrollMode {
    Cash,
    Tournament,
}

impl BankrollMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BankrollMode::Cash => "cash",
            BankrollMode::Tournament => "tournament",
        }
    }
}

impl fmt::Display for BankrollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buy-in amounts in chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuyIns {
    pub min: u32,
    pub start: u32,
    pub max: u32,
}

impl BuyIns {
    pub fn from_big_blinds(min_bb: u32, start_bb: u32, max_bb: u32, big_blind: u32) -> Self {
        Self {
            min: min_bb.saturating_mul(big_blind),
            start: start_bb.saturating_mul(big_blind),
            max: max_bb.saturating_mul(big_blind),
        }
    }
}

/// What a seat may do with its stack before the next hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankrollOption {
    /// Busted seat buys back in for exactly this many chips
    Rebuy(u32),
    /// Short stack adds chips up to this total
    TopUp { to: u32 },
    /// Tournament seat with no chips after the rebuy window closed
    Eliminated,
}

impl fmt::Display for BankrollOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankrollOption::Rebuy(amount) => write!(f, "rebuy {}", amount),
            BankrollOption::TopUp { to } => write!(f, "top-up to {}", to),
            BankrollOption::Eliminated => f.write_str("eliminated (rebuy closed)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bankroll {
    mode: BankrollMode,
    buy_ins: BuyIns,
    rebuy_hands_left: u32,
}

impl Bankroll {
    /// `rebuy_window` is the number of hands rebuys stay open in tournament
    /// mode; cash tables ignore it.
    pub fn new(mode: BankrollMode, buy_ins: BuyIns, rebuy_window: u32) -> Self {
        let rebuy_hands_left = match mode {
            BankrollMode::Cash => 0,
            BankrollMode::Tournament => rebuy_window,
        };
        Self {
            mode,
            buy_ins,
            rebuy_hands_left,
        }
    }

    pub fn mode(&self) -> BankrollMode {
        self.mode
    }

    pub fn buy_ins(&self) -> BuyIns {
        self.buy_ins
    }

    pub fn rebuy_hands_left(&self) -> u32 {
        self.rebuy_hands_left
    }

    /// Counts one more dealt hand against the tournament rebuy window.
    pub fn hand_started(&mut self) {
        if self.mode == BankrollMode::Tournament {
            self.rebuy_hands_left = self.rebuy_hands_left.saturating_sub(1);
        }
    }

    pub fn options(&self, stack: u32) -> Vec<BankrollOption> {
        match self.mode {
            BankrollMode::Cash if stack == 0 => {
                let mut amounts = vec![self.buy_ins.min, self.buy_ins.start, self.buy_ins.max];
                amounts.dedup();
                amounts.into_iter().map(BankrollOption::Rebuy).collect()
            }
            BankrollMode::Cash if stack < self.buy_ins.max => {
                vec![BankrollOption::TopUp {
                    to: self.buy_ins.max,
                }]
            }
            BankrollMode::Cash => Vec::new(),
            BankrollMode::Tournament if stack == 0 => {
                if self.rebuy_hands_left > 0 {
                    vec![BankrollOption::Rebuy(self.buy_ins.start)]
                } else {
                    vec![BankrollOption::Eliminated]
                }
            }
            BankrollMode::Tournament => Vec::new(),
        }
    }

    /// Applies `option` to `seat` for the next hand and returns its new stack.
    pub fn apply(
        &self,
        engine: &mut Engine,
        seat: usize,
        option: BankrollOption,
    ) -> Result<u32, CliError> {
        let stack = engine
            .next_stack(seat)
            .ok_or_else(|| CliError::InvalidInput(format!("no seat {}", seat)))?;
        if !self.options(stack).contains(&option) {
            return Err(CliError::InvalidInput(format!(
                "{} is not available with a stack of {}",
                option, stack
            )));
        }
        let new_stack = match option {
            BankrollOption::Rebuy(amount) => stack.saturating_add(amount),
            BankrollOption::TopUp { to } => to.max(stack),
            BankrollOption::Eliminated => {
                return Err(CliError::InvalidInput("seat is eliminated".to_string()));
            }
        };
        engine.set_stack(seat, new_stack)?;
        tracing::info!(seat, %option, new_stack, "bankroll applied");
        Ok(new_stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::game::TableConfig;
    use holdem_engine::player::{PlayerAction, SeatSpec};

    fn buy_ins() -> BuyIns {
        BuyIns::from_big_blinds(50, 100, 200, 10)
    }

    #[test]
    fn cash_busted_seat_gets_three_rebuys() {
        let b = Bankroll::new(BankrollMode::Cash, buy_ins(), 30);
        assert_eq!(
            b.options(0),
            vec![
                BankrollOption::Rebuy(500),
                BankrollOption::Rebuy(1000),
                BankrollOption::Rebuy(2000),
            ]
        );
    }

    #[test]
    fn cash_short_stack_may_top_up_to_max() {
        let b = Bankroll::new(BankrollMode::Cash, buy_ins(), 30);
        assert_eq!(b.options(700), vec![BankrollOption::TopUp { to: 2000 }]);
        assert!(b.options(2000).is_empty());
        assert!(b.options(2500).is_empty());
    }

    #[test]
    fn tournament_rebuy_window_closes() {
        let mut b = Bankroll::new(BankrollMode::Tournament, buy_ins(), 2);
        assert_eq!(b.options(0), vec![BankrollOption::Rebuy(1000)]);
        assert!(b.options(300).is_empty());
        b.hand_started();
        b.hand_started();
        b.hand_started();
        assert_eq!(b.rebuy_hands_left(), 0);
        assert_eq!(b.options(0), vec![BankrollOption::Eliminated]);
    }

    #[test]
    fn apply_waits_for_the_hand_to_end() {
        let seats = vec![
            SeatSpec::new("You", true, 1000),
            SeatSpec::new("Bot 1", false, 1000),
        ];
        let mut eng = Engine::new(seats, TableConfig::default(), 3).unwrap();
        let b = Bankroll::new(BankrollMode::Cash, buy_ins(), 0);
        let top_up = BankrollOption::TopUp { to: 2000 };
        assert!(b.apply(&mut eng, 0, top_up).is_err());

        eng.step(PlayerAction::Fold);
        assert!(eng.state().is_hand_ended());
        let stack = eng.next_stack(0).unwrap();
        assert_eq!(b.apply(&mut eng, 0, top_up).unwrap(), 2000);
        assert!(stack < 2000);
        eng.start_hand().unwrap();
        let p = eng.state().player(0).unwrap();
        assert_eq!(p.stack() + p.bet(), 2000);
    }

    #[test]
    fn apply_rejects_options_not_on_offer() {
        let seats = vec![
            SeatSpec::new("You", true, 1000),
            SeatSpec::new("Bot 1", false, 1000),
        ];
        let mut eng = Engine::new(seats, TableConfig::default(), 3).unwrap();
        eng.step(PlayerAction::Fold);
        let b = Bankroll::new(BankrollMode::Cash, buy_ins(), 0);
        assert!(b.apply(&mut eng, 0, BankrollOption::Rebuy(500)).is_err());
    }
}
