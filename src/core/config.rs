//! Configuration surfaces for loggers and channels
//!
//! Level configuration arrives as raw strings (`level`, `levels`) and is
//! validated into a [`LevelSelector`] before anything is applied. When both
//! forms are present the single `level` wins; when neither is present the
//! current levels are left alone.

use super::error::{LoggerError, Result};
use super::log_level::LevelSelector;
use super::options::LogOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<String>>,
}

impl LevelConfig {
    /// Select the contiguous range starting at `level`
    pub fn level(level: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
            levels: None,
        }
    }

    /// Select exactly these severities
    pub fn levels<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            level: None,
            levels: Some(levels.into_iter().map(Into::into).collect()),
        }
    }

    pub fn selector(&self) -> Result<Option<LevelSelector>> {
        if let Some(level) = &self.level {
            return LevelSelector::parse_level(level).map(Some);
        }
        if let Some(levels) = &self.levels {
            return LevelSelector::parse_levels(levels).map(Some);
        }
        Ok(None)
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.levels.is_none()
    }
}

/// Dispatcher configuration
///
/// # Example
///
/// ```
/// use channel_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json(
///     r#"{ "level": "info", "channels": { "console": { "levels": ["error", "fatal"] } } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.levels.level.as_deref(), Some("info"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(flatten)]
    pub levels: LevelConfig,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub channels: BTreeMap<String, LevelConfig>,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelConfig) -> Self {
        self.levels = levels;
        self
    }

    #[must_use]
    pub fn with_channel(mut self, name: impl Into<String>, levels: LevelConfig) -> Self {
        self.channels.insert(name.into(), levels);
        self
    }

    /// Validate every level selector in the configuration
    pub(crate) fn validate(&self) -> Result<ValidatedLoggerConfig> {
        let levels = self.levels.selector()?;
        let mut channels = Vec::with_capacity(self.channels.len());
        for (name, config) in &self.channels {
            if name.is_empty() {
                return Err(LoggerError::config("Logger", "channel name must not be empty"));
            }
            channels.push((name.clone(), config.selector()?));
        }
        Ok(ValidatedLoggerConfig { levels, channels })
    }
}

pub(crate) struct ValidatedLoggerConfig {
    pub(crate) levels: Option<LevelSelector>,
    pub(crate) channels: Vec<(String, Option<LevelSelector>)>,
}

/// Channel configuration: level selection plus sink options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(flatten)]
    pub levels: LevelConfig,
    /// Render maskable models through their masked view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<bool>,
}

impl ChannelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelConfig) -> Self {
        self.levels = levels;
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: bool) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Scoped decorator configuration
#[derive(Debug, Clone, Default)]
pub struct DomainLoggerConfig {
    pub levels: LevelConfig,
    pub options: Option<LogOptions>,
}

impl DomainLoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelConfig) -> Self {
        self.levels = levels;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: LogOptions) -> Self {
        self.options = Some(options);
        self
    }
}
