use std::fs;

use holdem_ai::persona::Persona;
use holdem_ai::ranges::{RangeTable, RangeTier};
use holdem_engine::game::{MAX_TABLE_CHIPS, TableConfig};
use serde::{Deserialize, Serialize};

use crate::bankroll::{BankrollMode, BuyIns};

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = holdem_engine::game::MAX_SEATS;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Config {
    pub seats: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Starting stack, in big blinds
    pub start_bb: u32,
    pub seed: Option<u64>,
    pub mode: BankrollMode,
    pub min_buy_bb: u32,
    pub max_buy_bb: u32,
    /// Hands the tournament rebuy window stays open
    pub rebuy_hands: u32,
    /// Bot personas for seats 1.., repeated when shorter than the table
    pub personas: Vec<Persona>,
    pub coach_tier: RangeTier,
    pub ranges: RangeTable,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seats: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub start_bb: ValueSource,
    pub seed: ValueSource,
    pub mode: ValueSource,
    pub min_buy_bb: ValueSource,
    pub max_buy_bb: ValueSource,
    pub rebuy_hands: ValueSource,
    pub personas: ValueSource,
    pub coach_tier: ValueSource,
    pub ranges: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seats: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            start_bb: ValueSource::Default,
            seed: ValueSource::Default,
            mode: ValueSource::Default,
            min_buy_bb: ValueSource::Default,
            max_buy_bb: ValueSource::Default,
            rebuy_hands: ValueSource::Default,
            personas: ValueSource::Default,
            coach_tier: ValueSource::Default,
            ranges: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seats: 6,
            small_blind: 5,
            big_blind: 10,
            start_bb: 100,
            seed: None,
            mode: BankrollMode::Cash,
            min_buy_bb: 50,
            max_buy_bb: 200,
            rebuy_hands: 30,
            personas: vec![
                Persona::TightAggressive,
                Persona::TightPassive,
                Persona::TightAggressive,
                Persona::LooseAggressive,
                Persona::TightAggressive,
            ],
            coach_tier: RangeTier::Loose,
            ranges: RangeTable::default(),
        }
    }
}

impl Config {
    pub fn table(&self) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
        }
    }

    pub fn starting_stack(&self) -> u32 {
        self.start_bb.saturating_mul(self.big_blind)
    }

    pub fn buy_ins(&self) -> BuyIns {
        BuyIns::from_big_blinds(self.min_buy_bb, self.start_bb, self.max_buy_bb, self.big_blind)
    }

    /// Persona for a bot seat (seat 0 included when every seat is a bot).
    pub fn persona_for(&self, seat: usize) -> Persona {
        if self.personas.is_empty() {
            return Persona::TightAggressive;
        }
        let idx = seat.saturating_sub(1) % self.personas.len();
        self.personas[idx]
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOLDEM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Ok(seed) = std::env::var("HOLDEM_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(seats) = std::env::var("HOLDEM_SEATS")
        && !seats.is_empty()
    {
        cfg.seats = seats
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid seats".into()))?;
        sources.seats = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.personas {
        cfg.personas = v;
        sources.personas = ValueSource::File;
    }
    if let Some(v) = f.coach_tier {
        cfg.coach_tier = v;
        sources.coach_tier = ValueSource::File;
    }
    if let Some(v) = f.ranges {
        cfg.ranges = v;
        sources.ranges = ValueSource::File;
    }
    if let Some(t) = f.table {
        if let Some(v) = t.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = t.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = t.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = t.start_bb {
            cfg.start_bb = v;
            sources.start_bb = ValueSource::File;
        }
    }
    if let Some(b) = f.bankroll {
        if let Some(v) = b.mode {
            cfg.mode = v;
            sources.mode = ValueSource::File;
        }
        if let Some(v) = b.min_buy_bb {
            cfg.min_buy_bb = v;
            sources.min_buy_bb = ValueSource::File;
        }
        if let Some(v) = b.max_buy_bb {
            cfg.max_buy_bb = v;
            sources.max_buy_bb = ValueSource::File;
        }
        if let Some(v) = b.rebuy_hands {
            cfg.rebuy_hands = v;
            sources.rebuy_hands = ValueSource::File;
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    personas: Option<Vec<Persona>>,
    #[serde(default)]
    coach_tier: Option<RangeTier>,
    #[serde(default)]
    table: Option<FileTable>,
    #[serde(default)]
    bankroll: Option<FileBankroll>,
    #[serde(default)]
    ranges: Option<RangeTable>,
}

#[derive(Debug, Deserialize)]
struct FileTable {
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    start_bb: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct FileBankroll {
    #[serde(default)]
    mode: Option<BankrollMode>,
    #[serde(default)]
    min_buy_bb: Option<u32>,
    #[serde(default)]
    max_buy_bb: Option<u32>,
    #[serde(default)]
    rebuy_hands: Option<u32>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&cfg.seats) {
        return Err(ConfigError::Invalid(format!(
            "seats must be between {} and {}",
            MIN_SEATS, MAX_SEATS
        )));
    }
    cfg.table()
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if cfg.start_bb == 0 {
        return Err(ConfigError::Invalid("start_bb must be >0".into()));
    }
    if cfg.min_buy_bb == 0 || cfg.min_buy_bb > cfg.start_bb || cfg.start_bb > cfg.max_buy_bb {
        return Err(ConfigError::Invalid(
            "buy-ins must satisfy 0 < min_buy_bb <= start_bb <= max_buy_bb".into(),
        ));
    }
    let table_max = u64::from(cfg.max_buy_bb) * u64::from(cfg.big_blind) * cfg.seats as u64;
    if table_max > MAX_TABLE_CHIPS {
        return Err(ConfigError::Invalid(format!(
            "max_buy_bb x big_blind x seats must not exceed {} chips",
            MAX_TABLE_CHIPS
        )));
    }
    if cfg.personas.is_empty() {
        return Err(ConfigError::Invalid("personas must not be empty".into()));
    }
    cfg.ranges
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(())
}
