//! A table of persona bots, optionally with one human, driven hand by hand.

use holdem_ai::{AIOpponent, create_ai};
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::GameState;
use holdem_engine::player::{PlayerAction, SeatSpec};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::config::Config;

/// The human always sits in seat 0.
pub const HUMAN_SEAT: usize = 0;

pub struct Session {
    engine: Engine,
    /// `None` for the human seat
    bots: Vec<Option<Box<dyn AIOpponent>>>,
    rng: ChaCha20Rng,
    /// Log lines of the current hand already handed out
    seen: usize,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("hand", &self.engine.hand_number())
            .field("seen", &self.seen)
            .finish()
    }
}

impl Session {
    /// Seats `cfg.seats` players at `cfg.starting_stack()` each and deals the
    /// first hand. Shuffles use `seed`; bot decisions use a stream derived
    /// from it.
    pub fn new(cfg: &Config, with_human: bool, seed: u64) -> Result<Self, GameError> {
        let stack = cfg.starting_stack();
        let mut seats = Vec::with_capacity(cfg.seats);
        let mut bots: Vec<Option<Box<dyn AIOpponent>>> = Vec::with_capacity(cfg.seats);
        for seat in 0..cfg.seats {
            if with_human && seat == HUMAN_SEAT {
                seats.push(SeatSpec::new("You", true, stack));
                bots.push(None);
            } else {
                let persona = cfg.persona_for(seat);
                seats.push(SeatSpec::new(format!("Bot {} ({})", seat, persona), false, stack));
                bots.push(Some(create_ai(persona, &cfg.ranges)));
            }
        }
        let engine = Engine::new(seats, cfg.table(), seed)?;
        tracing::info!(seats = cfg.seats, seed, with_human, "session started");
        Ok(Self {
            engine,
            bots,
            rng: ChaCha20Rng::seed_from_u64(seed.wrapping_add(1)),
            seen: 0,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    /// Seat that has to act, or `None` once the hand is over.
    pub fn actor(&self) -> Option<usize> {
        let st = self.engine.state();
        (!st.is_hand_ended()).then(|| st.current())
    }

    /// Lets bots act until the hand ends or a seat without a bot is to act.
    /// Returns the number of bot actions taken.
    pub fn run_bots(&mut self) -> usize {
        let mut taken = 0;
        while let Some(seat) = self.actor() {
            let Some(bot) = self.bots.get(seat).and_then(Option::as_ref) else {
                break;
            };
            let action = bot.get_action(self.engine.state(), seat, &mut self.rng);
            self.engine.step(action);
            taken += 1;
        }
        taken
    }

    pub fn act(&mut self, action: PlayerAction) {
        self.engine.step(action);
    }

    /// Log lines appended since the previous call.
    pub fn fresh_log(&mut self) -> Vec<String> {
        let log = self.engine.state().log();
        let lines = log.since(self.seen).to_vec();
        self.seen = log.len();
        lines
    }

    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.engine.start_hand()?;
        self.seen = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bots_stop_at_the_human_seat() {
        let cfg = Config {
            seats: 3,
            ..Config::default()
        };
        let mut s = Session::new(&cfg, true, 21).unwrap();
        s.run_bots();
        match s.actor() {
            Some(seat) => assert_eq!(seat, HUMAN_SEAT),
            None => assert!(s.state().is_hand_ended()),
        }
    }

    #[test]
    fn all_bot_table_finishes_hands() {
        let cfg = Config {
            seats: 4,
            ..Config::default()
        };
        let mut s = Session::new(&cfg, false, 5).unwrap();
        for _ in 0..5 {
            s.run_bots();
            assert!(s.state().is_hand_ended());
            assert_eq!(s.state().chips_in_play(), 4000);
            if s.start_hand().is_err() {
                break;
            }
        }
    }

    #[test]
    fn fresh_log_only_returns_new_lines() {
        let cfg = Config {
            seats: 2,
            ..Config::default()
        };
        let mut s = Session::new(&cfg, true, 8).unwrap();
        let first = s.fresh_log();
        assert!(first.iter().any(|l| l.contains("posts SB")));
        assert!(s.fresh_log().is_empty());
        s.act(PlayerAction::Fold);
        let next = s.fresh_log();
        assert!(next.iter().any(|l| l.contains("folds")));
    }
}
