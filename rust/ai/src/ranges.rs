//! Position-indexed preflop thresholds.
//!
//! Each tier holds six-slot arrays indexed by [`Position::index`] (button,
//! small blind, big blind, UTG, hijack, cutoff) compared against
//! [`crate::rating::preflop_rating`].

use std::fmt;
use std::str::FromStr;

use holdem_engine::player::Position;
use serde::{Deserialize, Serialize};

use crate::errors::RangeError;

/// Thresholds for one range tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCfg {
    /// Minimum rating to open an unopened pot
    pub open: [f64; 6],
    /// Minimum rating to flat (limp, over-limp, defend)
    pub call: [f64; 6],
    /// Minimum rating to raise over limpers or from the big blind option
    pub iso: [f64; 6],
    /// Minimum rating to re-raise, any position
    pub three_bet: f64,
}

impl RangeCfg {
    pub fn open_at(&self, pos: Position) -> f64 {
        self.open[pos.index()]
    }

    pub fn call_at(&self, pos: Position) -> f64 {
        self.call[pos.index()]
    }

    pub fn iso_at(&self, pos: Position) -> f64 {
        self.iso[pos.index()]
    }

    pub fn loose() -> Self {
        Self {
            open: [20.0, 26.0, 999.0, 22.0, 20.0, 18.0],
            call: [18.0, 20.0, 18.0, 18.0, 16.0, 14.0],
            iso: [24.0, 28.0, 999.0, 24.0, 22.0, 20.0],
            three_bet: 48.0,
        }
    }

    pub fn standard() -> Self {
        Self {
            open: [24.0, 28.0, 999.0, 24.0, 22.0, 18.0],
            call: [20.0, 22.0, 18.0, 20.0, 18.0, 16.0],
            iso: [28.0, 30.0, 999.0, 26.0, 24.0, 22.0],
            three_bet: 50.0,
        }
    }

    pub fn tight() -> Self {
        Self {
            open: [28.0, 32.0, 999.0, 26.0, 24.0, 20.0],
            call: [22.0, 24.0, 20.0, 22.0, 20.0, 18.0],
            iso: [32.0, 34.0, 999.0, 30.0, 28.0, 24.0],
            three_bet: 54.0,
        }
    }

    /// Thresholds must be finite and non-negative, and flatting can never
    /// require more than raising.
    pub fn validate(&self) -> Result<(), RangeError> {
        let check = |field: &'static str, values: &[f64]| {
            for (position, &value) in values.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(RangeError::InvalidThreshold {
                        field,
                        position,
                        value,
                    });
                }
            }
            Ok(())
        };
        check("open", &self.open)?;
        check("call", &self.call)?;
        check("iso", &self.iso)?;
        check("three_bet", &[self.three_bet])?;

        for position in 0..6 {
            let call = self.call[position];
            for (field, other) in [("open", self.open[position]), ("iso", self.iso[position])] {
                if call > other {
                    return Err(RangeError::CallAboveRaise {
                        field,
                        position,
                        call,
                        other,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeTier {
    Loose,
    Standard,
    Tight,
}

impl RangeTier {
    pub const ALL: [RangeTier; 3] = [RangeTier::Loose, RangeTier::Standard, RangeTier::Tight];

    pub fn as_str(self) -> &'static str {
        match self {
            RangeTier::Loose => "loose",
            RangeTier::Standard => "standard",
            RangeTier::Tight => "tight",
        }
    }
}

impl fmt::Display for RangeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeTier {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loose" => Ok(RangeTier::Loose),
            "standard" => Ok(RangeTier::Standard),
            "tight" => Ok(RangeTier::Tight),
            _ => Err(RangeError::UnknownTier(s.to_string())),
        }
    }
}

/// One [`RangeCfg`] per tier. Bots read the tier of their persona; the coach
/// may be pointed at any tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTable {
    #[serde(default = "RangeCfg::loose")]
    pub loose: RangeCfg,
    #[serde(default = "RangeCfg::standard")]
    pub standard: RangeCfg,
    #[serde(default = "RangeCfg::tight")]
    pub tight: RangeCfg,
}

impl Default for RangeTable {
    fn default() -> Self {
        Self {
            loose: RangeCfg::loose(),
            standard: RangeCfg::standard(),
            tight: RangeCfg::tight(),
        }
    }
}

impl RangeTable {
    pub fn get(&self, tier: RangeTier) -> &RangeCfg {
        match tier {
            RangeTier::Loose => &self.loose,
            RangeTier::Standard => &self.standard,
            RangeTier::Tight => &self.tight,
        }
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        for tier in RangeTier::ALL {
            self.get(tier).validate().map_err(|source| RangeError::Tier {
                tier,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}
