use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RangeError;
use crate::ranges::RangeTier;

/// Bot archetype. Drives which range tier the bot reads and how often it
/// fires continuation bets and bluffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "NIT")]
    TightPassive,
    #[serde(rename = "TAG")]
    TightAggressive,
    #[serde(rename = "LAG")]
    LooseAggressive,
}

/// Postflop frequencies, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggression {
    pub cbet_flop: f64,
    pub cbet_turn: f64,
    pub bluff: f64,
}

impl Persona {
    pub const ALL: [Persona; 3] = [
        Persona::TightPassive,
        Persona::TightAggressive,
        Persona::LooseAggressive,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Persona::TightPassive => "NIT",
            Persona::TightAggressive => "TAG",
            Persona::LooseAggressive => "LAG",
        }
    }

    pub fn tier(self) -> RangeTier {
        match self {
            Persona::TightPassive => RangeTier::Tight,
            Persona::TightAggressive => RangeTier::Standard,
            Persona::LooseAggressive => RangeTier::Loose,
        }
    }

    pub fn aggression(self) -> Aggression {
        match self {
            Persona::TightPassive => Aggression {
                cbet_flop: 0.45,
                cbet_turn: 0.25,
                bluff: 0.08,
            },
            Persona::TightAggressive => Aggression {
                cbet_flop: 0.62,
                cbet_turn: 0.38,
                bluff: 0.12,
            },
            Persona::LooseAggressive => Aggression {
                cbet_flop: 0.75,
                cbet_turn: 0.50,
                bluff: 0.22,
            },
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Persona {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NIT" => Ok(Persona::TightPassive),
            "TAG" => Ok(Persona::TightAggressive),
            "LAG" => Ok(Persona::LooseAggressive),
            _ => Err(RangeError::UnknownPersona(s.to_string())),
        }
    }
}
