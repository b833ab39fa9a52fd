//! # holdem-engine: No-Limit Hold'em Rules Engine
//!
//! Deterministic table engine for 2 to 6 seats: card model, hand evaluator,
//! betting state machine and side-pot settlement. All randomness comes in
//! through the [`deck::Deck`] a hand is built with, so every hand can be
//! replayed from a seed or pinned with a stacked deck.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - Shuffling and dealing with a caller-supplied random source
//! - [`hand`] - Five-card ranking and best-of-seven selection
//! - [`rules`] - Minimum raise and action clamping
//! - [`pot`] - Main and side pots rebuilt from contributions
//! - [`player`] - Per-hand player state and submitted actions
//! - [`game`] - The hand state and its read-only queries
//! - [`engine`] - Hand construction, `step`, showdown and the multi-hand session
//! - [`logger`] - Streets, action records and the hand history
//! - [`errors`] - Setup errors
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//! use holdem_engine::game::{GameState, TableConfig};
//! use holdem_engine::player::{PlayerAction, SeatSpec};
//!
//! let seats = vec![
//!     SeatSpec::new("Hero", true, 1000),
//!     SeatSpec::new("Villain", false, 1000),
//! ];
//! let mut st = GameState::start_hand(seats, TableConfig::default(), 0, Deck::new_with_seed(7))
//!     .expect("two funded seats");
//! st.step(PlayerAction::Fold);
//! assert!(st.is_hand_ended());
//! assert_eq!(st.chips_in_play(), 2000);
//! ```
//!
//! ## Hand Evaluation
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{best5of7, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//! let (score, _five) = best5of7(&cards);
//! assert_eq!(score.category, Category::StraightFlush);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
