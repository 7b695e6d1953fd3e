use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

use crate::equity::Showdown;

/// Engine settings shared by tables and equity simulations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub seats: usize,
    pub seed: Option<u64>,
    pub trials: usize,
    pub parallel: bool,
    pub showdown: Showdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigSources {
    pub seats: ValueSource,
    pub seed: ValueSource,
    pub trials: ValueSource,
    pub parallel: ValueSource,
    pub showdown: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seats: ValueSource::Default,
            seed: ValueSource::Default,
            trials: ValueSource::Default,
            parallel: ValueSource::Default,
            showdown: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: EngineConfig,
    pub sources: ConfigSources,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seats: 9,
            seed: None,
            trials: 10_000,
            parallel: true,
            showdown: Showdown::Direct,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub const CONFIG_ENV: &str = "BLUFF_CONFIG";

pub fn load() -> Result<EngineConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `BLUFF_CONFIG`, then `BLUFF_*`
/// environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Same layering as [`load_with_sources`], reading variables through `lookup`.
pub fn resolve<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = EngineConfig::default();
    let mut sources = ConfigSources::default();
    // Empty variables count as unset.
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(path) = var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.trials {
            cfg.trials = v;
            sources.trials = ValueSource::File;
        }
        if let Some(v) = f.parallel {
            cfg.parallel = v;
            sources.parallel = ValueSource::File;
        }
        if let Some(v) = f.showdown {
            cfg.showdown = v;
            sources.showdown = ValueSource::File;
        }
    }

    if let Some(seed) = var("BLUFF_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("invalid seed {seed:?}")))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(trials) = var("BLUFF_TRIALS") {
        cfg.trials = trials
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid trials {trials:?}")))?;
        sources.trials = ValueSource::Env;
    }
    if let Some(seats) = var("BLUFF_SEATS") {
        cfg.seats = seats
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid seats {seats:?}")))?;
        sources.seats = ValueSource::Env;
    }
    if let Some(par) = var("BLUFF_PARALLEL") {
        cfg.parallel = parse_bool(&par)
            .ok_or_else(|| ConfigError::Invalid(format!("invalid parallel {par:?}")))?;
        sources.parallel = ValueSource::Env;
    }
    if let Some(showdown) = var("BLUFF_SHOWDOWN") {
        cfg.showdown = parse_showdown(&showdown)
            .ok_or_else(|| ConfigError::Invalid(format!("invalid showdown {showdown:?}")))?;
        sources.showdown = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    trials: Option<usize>,
    #[serde(default)]
    parallel: Option<bool>,
    #[serde(default)]
    showdown: Option<Showdown>,
}

fn validate(cfg: &EngineConfig) -> Result<(), ConfigError> {
    if cfg.seats == 0 {
        return Err(ConfigError::Invalid("seats must be >=1".into()));
    }
    if cfg.trials == 0 {
        return Err(ConfigError::Invalid("trials must be >0".into()));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_showdown(s: &str) -> Option<Showdown> {
    match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "direct" => Some(Showdown::Direct),
        "bestfive" | "best5" => Some(Showdown::BestFive),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_and_showdown_spellings() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_showdown("best_five"), Some(Showdown::BestFive));
        assert_eq!(parse_showdown("Direct"), Some(Showdown::Direct));
        assert_eq!(parse_showdown("river"), None);
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let resolved = resolve(|_| None).unwrap();
        assert_eq!(resolved.config, EngineConfig::default());
        assert_eq!(resolved.sources, ConfigSources::default());
    }
}
