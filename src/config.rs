use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::best_conversion::DEFAULT_MAX_HOPS;
use crate::core::types::{ConversionEdge, SearchStrategy};
use crate::error::SwapError;
use crate::utils::str_to_bigdecimal;
use num_traits::Zero;

/// Prefix for environment overrides, e.g. `BEST_SWAP__SEARCH__DEFAULT_MAX_HOPS=4`.
pub const ENV_PREFIX: &str = "BEST_SWAP";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub pairs: Vec<PairConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_max_hops: i32,
    pub strategy: SearchStrategy,
}

/// One conversion pair as written in a config file. The rate stays text until
/// it is validated so that `1.1` is read as exactly 1.1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConfig {
    pub from: String,
    pub to: String,
    pub rate: String,
}

impl PairConfig {
    fn new(from: &str, to: &str, rate: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            rate: rate.to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_hops: DEFAULT_MAX_HOPS,
            strategy: SearchStrategy::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search: SearchConfig::default(),
            pairs: vec![
                PairConfig::new("A", "B", "1"),
                PairConfig::new("B", "C", "2"),
                PairConfig::new("A", "C", "1.5"),
                PairConfig::new("B", "D", "2"),
                PairConfig::new("D", "A", "3"),
            ],
        }
    }
}

impl Config {
    /// Built-in defaults overlaid with `BEST_SWAP__*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Defaults, then the optional TOML file, then the environment.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().context("failed to read configuration")?;
        let config: Config = settings
            .try_deserialize()
            .map_err(SwapError::from)
            .context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document on top of the defaults, without consulting the
    /// environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(SwapError::from)?
            .try_deserialize()
            .map_err(SwapError::from)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SwapError> {
        self.conversion_edges().map(|_| ())
    }

    /// Validated conversion edges in file order.
    pub fn conversion_edges(&self) -> Result<Vec<ConversionEdge>, SwapError> {
        self.pairs
            .iter()
            .enumerate()
            .map(|(index, pair)| {
                let from = pair.from.trim();
                let to = pair.to.trim();
                if from.is_empty() || to.is_empty() {
                    return Err(SwapError::EmptyCurrency { index });
                }

                let rate = str_to_bigdecimal(&pair.rate)?;
                if rate <= BigDecimal::zero() {
                    return Err(SwapError::NonPositiveRate {
                        from: from.to_string(),
                        to: to.to_string(),
                        rate: pair.rate.clone(),
                    });
                }
                Ok(ConversionEdge::new(from, to, rate))
            })
            .collect()
    }
}
