use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules::ValidatedAction;

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
    /// Hands are compared and pots awarded
    Showdown,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "PREFLOP",
            Street::Flop => "FLOP",
            Street::Turn => "TURN",
            Street::River => "RIVER",
            Street::Showdown => "SHOWDOWN",
        };
        f.write_str(s)
    }
}

/// Records a single validated action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index of the acting player
    pub seat: usize,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action after clamping
    pub action: ValidatedAction,
}

/// Append-only, human-readable hand history.
///
/// Lines are written for display only; nothing in the engine reads them back.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct HandLog {
    lines: Vec<String>,
}

impl HandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!(target: "holdem_engine::log", "{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines appended after the first `seen` ones; drivers use this to print
    /// only what changed since their last look.
    pub fn since(&self, seen: usize) -> &[String] {
        self.lines.get(seen..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_returns_only_new_lines() {
        let mut log = HandLog::new();
        log.push("a");
        log.push("b");
        assert_eq!(log.since(1), ["b".to_string()]);
        assert!(log.since(2).is_empty());
        assert!(log.since(10).is_empty());
    }
}
