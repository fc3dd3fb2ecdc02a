use clap::ValueEnum;
use guandan_bot::bot::StrategyParams;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Root agent configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub strategy: StrategyParams,
    pub logging: LoggingConfig,
}

impl AgentConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AgentConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_strategy(&self.strategy)?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }
}

fn validate_strategy(strategy: &StrategyParams) -> Result<(), ValidationError> {
    let cost = &strategy.cost_weights;
    let quality = &strategy.quality_weights;
    let weights = [
        ("strategy.pass_cost".to_string(), strategy.pass_cost),
        ("strategy.cost_weights.base".to_string(), cost.base),
        ("strategy.cost_weights.break".to_string(), cost.breaking),
        ("strategy.cost_weights.balance".to_string(), cost.balance),
        ("strategy.cost_weights.stage".to_string(), cost.stage),
        ("strategy.quality_weights.completeness".to_string(), quality.completeness),
        ("strategy.quality_weights.isolated_penalty".to_string(), quality.isolated_penalty),
        ("strategy.quality_weights.bomb_bonus".to_string(), quality.bomb_bonus),
        ("strategy.quality_weights.steps_factor".to_string(), quality.steps_factor),
    ]
    .into_iter()
    .chain(
        strategy
            .protection
            .iter()
            .map(|(name, weight)| (format!("strategy.protection.{name}"), weight)),
    );

    for (field, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(field, "must be a finite, non-negative number"));
        }
    }

    if strategy.max_candidates == 0 {
        return Err(invalid(
            "strategy.max_candidates",
            "enumeration cap must be greater than zero",
        ));
    }

    if quality.cards_per_step == 0 {
        return Err(invalid(
            "strategy.quality_weights.cards_per_step",
            "cards per step must be at least 1",
        ));
    }

    if strategy.opening_priority.is_empty() {
        return Err(invalid(
            "strategy.opening_priority",
            "at least one opening shape must be listed",
        ));
    }

    let mut seen = HashSet::new();
    for shape in &strategy.opening_priority {
        if !seen.insert(shape) {
            return Err(invalid(
                "strategy.opening_priority",
                format!("{shape:?} listed more than once"),
            ));
        }
    }

    if strategy.stage.mid_cards > strategy.stage.early_cards {
        return Err(invalid(
            "strategy.stage.mid_cards",
            format!(
                "mid_cards ({}) must not exceed early_cards ({})",
                strategy.stage.mid_cards, strategy.stage.early_cards
            ),
        ));
    }

    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.into(),
        message: message.into(),
    }
}

/// Subscriber output style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration; events go to stderr unless a file is given.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            tracing_level: default_tracing_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(invalid(
                "logging.tracing_level",
                format!("unknown level '{}'", self.tracing_level),
            ));
        }
        if let Some(file) = &self.file
            && file.as_os_str().is_empty()
        {
            return Err(invalid("logging.file", "path must not be empty"));
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
