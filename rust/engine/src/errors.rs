use thiserror::Error;

/// Errors raised by table setup and between-hand operations.
///
/// In-hand actions never produce an error: they are clamped by
/// [`crate::rules::resolve_action`] instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid blinds: small blind {small}, big blind {big}")]
    InvalidBlinds { small: u32, big: u32 },
    #[error("At least two seats with chips are required (found {funded})")]
    NotEnoughPlayers { funded: usize },
    #[error("Too many seats: {seats} (at most {max})")]
    TooManySeats { seats: usize, max: usize },
    #[error("Table holds {total} chips (at most {max})")]
    TooManyChips { total: u64, max: u64 },
    #[error("Hand still in progress")]
    HandInProgress,
    #[error("Seat {seat} out of range (table has {seats} seats)")]
    SeatOutOfRange { seat: usize, seats: usize },
}
