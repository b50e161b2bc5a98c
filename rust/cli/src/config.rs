//! Table and run configuration.
//!
//! Values start from [`Config::default`], are overridden by the TOML file
//! named in `ACTLINE_CONFIG`, then by individual `ACTLINE_*` environment
//! variables. The origin of every field is kept for the `cfg` command.

use actline_engine::rules::HandContext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

/// Decider name that replays the client tokens stored in each transcript.
pub const SCRIPTED_AI: &str = "scripted";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub stack_size: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub num_streets: u8,
    pub workers: usize,
    pub ai: String,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub stack_size: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub num_streets: ValueSource,
    pub workers: ValueSource,
    pub ai: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            stack_size: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            num_streets: ValueSource::Default,
            workers: ValueSource::Default,
            ai: ValueSource::Default,
            seed: ValueSource::Default,
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
        let table = HandContext::default();
        Self {
            stack_size: table.stack_size,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            num_streets: table.num_streets,
            workers: 1,
            ai: "random".into(),
            seed: None,
        }
    }
}

impl Config {
    /// The engine's view of the table described by this configuration.
    pub fn hand_context(&self) -> Result<HandContext, ConfigError> {
        HandContext::new(
            self.stack_size,
            self.small_blind,
            self.big_blind,
            self.num_streets,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
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
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("ACTLINE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.stack_size {
            cfg.stack_size = v;
            sources.stack_size = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.num_streets {
            cfg.num_streets = v;
            sources.num_streets = ValueSource::File;
        }
        if let Some(v) = f.workers {
            cfg.workers = v;
            sources.workers = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_value("ACTLINE_STACK_SIZE")? {
        cfg.stack_size = v;
        sources.stack_size = ValueSource::Env;
    }
    if let Some(v) = env_value("ACTLINE_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("ACTLINE_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_value("ACTLINE_NUM_STREETS")? {
        cfg.num_streets = v;
        sources.num_streets = ValueSource::Env;
    }
    if let Some(v) = env_value("ACTLINE_WORKERS")? {
        cfg.workers = v;
        sources.workers = ValueSource::Env;
    }
    if let Some(v) = env_value::<String>("ACTLINE_AI")? {
        cfg.ai = v;
        sources.ai = ValueSource::Env;
    }
    if let Some(v) = env_value("ACTLINE_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    stack_size: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    num_streets: Option<u8>,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
}

/// Reads and parses an environment variable; unset or empty means `None`.
fn env_value<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", name, raw))),
        _ => Ok(None),
    }
}

/// Checks an AI name against the deciders this build can create.
pub fn validate_ai(name: &str) -> Result<(), ConfigError> {
    if name == SCRIPTED_AI || actline_ai::AI_TYPES.contains(&name) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "Unknown ai {:?} (expected one of: {}, {})",
            name,
            actline_ai::AI_TYPES.join(", "),
            SCRIPTED_AI
        )))
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.hand_context()?;
    if cfg.workers == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: workers must be >=1".into(),
        ));
    }
    validate_ai(&cfg.ai)
}
