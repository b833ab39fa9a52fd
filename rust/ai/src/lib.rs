//! # holdem-ai: Persona Decision Policy
//!
//! Read-only consumers of [`holdem_engine::game::GameState`] that turn a
//! spot into either a bot action or advice for the human seat.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait implemented by every automated seat
//! - [`create_ai`] - Factory building a bot for a persona
//! - [`bot`] - Persona bot (preflop ranges, postflop aggression)
//! - [`coach`] - Deterministic advice for the human seat
//! - [`rating`] - Preflop rating and the shared preflop decision tree
//! - [`ranges`] - Position-indexed thresholds per range tier
//! - [`persona`] - Personas and their aggression frequencies
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::persona::Persona;
//! use holdem_ai::ranges::RangeTable;
//! use holdem_ai::{create_ai, AIOpponent};
//! use holdem_engine::deck::Deck;
//! use holdem_engine::game::{GameState, TableConfig};
//! use holdem_engine::player::SeatSpec;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let seats = vec![SeatSpec::new("You", true, 1000), SeatSpec::new("Bot", false, 1000)];
//! let state = GameState::start_hand(seats, TableConfig::default(), 0, Deck::new_with_seed(1)).unwrap();
//!
//! let ai = create_ai(Persona::TightAggressive, &RangeTable::default());
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let action = ai.get_action(&state, state.current(), &mut rng);
//! println!("{} chose {:?}", ai.name(), action);
//! ```

use holdem_engine::game::GameState;
use holdem_engine::player::PlayerAction;
use rand::RngCore;

pub mod bot;
pub mod coach;
pub mod errors;
pub mod persona;
pub mod ranges;
pub mod rating;

use crate::persona::Persona;
use crate::ranges::RangeTable;

/// Interface for automated seats.
///
/// Implementations only read the state; the driver feeds the returned action
/// to [`GameState::step`].
pub trait AIOpponent: Send + Sync {
    /// Chooses an action for `seat`. Randomized choices draw from `rng` only.
    fn get_action(&self, state: &GameState, seat: usize, rng: &mut dyn RngCore) -> PlayerAction;

    fn name(&self) -> &str;
}

/// Builds a bot for `persona` reading its tier from `ranges`.
///
/// ```rust
/// use holdem_ai::create_ai;
/// use holdem_ai::persona::Persona;
/// use holdem_ai::ranges::RangeTable;
///
/// let ai = create_ai(Persona::LooseAggressive, &RangeTable::default());
/// assert_eq!(ai.name(), "LAG");
/// ```
pub fn create_ai(persona: Persona, ranges: &RangeTable) -> Box<dyn AIOpponent> {
    Box::new(bot::PersonaBot::from_table(persona, ranges))
}
