//! Log level definitions
//!
//! Severities are ordered `trace < debug < info < warn < error < fatal` and map
//! to the numbers `1..=6`. The sentinels `all` and `off` exist only as
//! [`LevelName`]s used when selecting a threshold; they never appear in a
//! [`LevelSet`].

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every literal accepted when setting a single level threshold
pub const LEVEL_NAMES: &[&str] = &["all", "trace", "debug", "info", "warn", "error", "fatal", "off"];

/// Every literal accepted inside an explicit level list
pub const SEVERITY_NAMES: &[&str] = &["trace", "debug", "info", "warn", "error", "fatal"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 1,
    Debug = 2,
    Info = 3,
    Warn = 4,
    Error = 5,
    Fatal = 6,
}

impl Level {
    /// All severities in ascending order
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Upper-cased tag used in rendered lines
    pub fn tag(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    #[inline]
    pub fn as_number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Level::Trace),
            2 => Some(Level::Debug),
            3 => Some(Level::Info),
            4 => Some(Level::Warn),
            5 => Some(Level::Error),
            6 => Some(Level::Fatal),
            _ => None,
        }
    }

    /// Parse one of the six severity names; sentinels are rejected.
    pub fn parse_severity(name: &str) -> Result<Self> {
        match name {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LoggerError::invalid_level(name, SEVERITY_NAMES)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Level::parse_severity(s)
    }
}

/// A level literal as accepted by `set_level`: a severity or a sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelName {
    All,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Off,
}

impl LevelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelName::All => "all",
            LevelName::Trace => "trace",
            LevelName::Debug => "debug",
            LevelName::Info => "info",
            LevelName::Warn => "warn",
            LevelName::Error => "error",
            LevelName::Fatal => "fatal",
            LevelName::Off => "off",
        }
    }

    /// Lowest severity this name enables; `None` for `off`.
    pub fn threshold(&self) -> Option<Level> {
        match self {
            LevelName::All | LevelName::Trace => Some(Level::Trace),
            LevelName::Debug => Some(Level::Debug),
            LevelName::Info => Some(Level::Info),
            LevelName::Warn => Some(Level::Warn),
            LevelName::Error => Some(Level::Error),
            LevelName::Fatal => Some(Level::Fatal),
            LevelName::Off => None,
        }
    }

    /// The contiguous range `[threshold, fatal]`, or nothing for `off`
    pub fn to_set(&self) -> LevelSet {
        self.threshold()
            .map(LevelSet::from_threshold)
            .unwrap_or_else(LevelSet::empty)
    }
}

impl fmt::Display for LevelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelName {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(LevelName::All),
            "trace" => Ok(LevelName::Trace),
            "debug" => Ok(LevelName::Debug),
            "info" => Ok(LevelName::Info),
            "warn" => Ok(LevelName::Warn),
            "error" => Ok(LevelName::Error),
            "fatal" => Ok(LevelName::Fatal),
            "off" => Ok(LevelName::Off),
            _ => Err(LoggerError::invalid_level(s, LEVEL_NAMES)),
        }
    }
}

impl From<Level> for LevelName {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LevelName::Trace,
            Level::Debug => LevelName::Debug,
            Level::Info => LevelName::Info,
            Level::Warn => LevelName::Warn,
            Level::Error => LevelName::Error,
            Level::Fatal => LevelName::Fatal,
        }
    }
}

/// Set of enabled severities, stored as a bitmask over the numeric levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LevelSet(u8);

impl LevelSet {
    #[inline]
    pub const fn empty() -> Self {
        LevelSet(0)
    }

    #[inline]
    pub const fn all() -> Self {
        LevelSet(0b0111_1110)
    }

    /// `[threshold, fatal]`
    pub fn from_threshold(threshold: Level) -> Self {
        Level::ALL
            .iter()
            .filter(|level| **level >= threshold)
            .copied()
            .collect()
    }

    /// Validate every name before building the set
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        names
            .iter()
            .map(|name| Level::parse_severity(name.as_ref()))
            .collect()
    }

    #[inline]
    pub fn contains(&self, level: Level) -> bool {
        self.0 & (1 << level.as_number()) != 0
    }

    pub fn insert(&mut self, level: Level) {
        self.0 |= 1 << level.as_number();
    }

    pub fn remove(&mut self, level: Level) {
        self.0 &= !(1 << level.as_number());
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn intersection(&self, other: LevelSet) -> LevelSet {
        LevelSet(self.0 & other.0)
    }

    /// Members in ascending severity
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL.into_iter().filter(move |level| self.contains(*level))
    }

    pub fn to_vec(&self) -> Vec<Level> {
        self.iter().collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|level| level.as_str()).collect()
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        let mut set = LevelSet::empty();
        for level in iter {
            set.insert(level);
        }
        set
    }
}

impl From<&[Level]> for LevelSet {
    fn from(levels: &[Level]) -> Self {
        levels.iter().copied().collect()
    }
}

/// How a filter should be updated: exactly one of the two forms is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSelector {
    /// Enable the contiguous range starting at this level (`off` enables nothing)
    Threshold(LevelName),
    /// Enable exactly these severities
    Only(LevelSet),
}

impl LevelSelector {
    pub fn parse_level(name: &str) -> Result<Self> {
        Ok(LevelSelector::Threshold(name.parse()?))
    }

    pub fn parse_levels<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        Ok(LevelSelector::Only(LevelSet::parse(names)?))
    }

    pub fn to_set(&self) -> LevelSet {
        match self {
            LevelSelector::Threshold(name) => name.to_set(),
            LevelSelector::Only(set) => *set,
        }
    }
}

impl From<LevelName> for LevelSelector {
    fn from(name: LevelName) -> Self {
        LevelSelector::Threshold(name)
    }
}

impl From<Level> for LevelSelector {
    fn from(level: Level) -> Self {
        LevelSelector::Threshold(level.into())
    }
}

impl From<LevelSet> for LevelSelector {
    fn from(set: LevelSet) -> Self {
        LevelSelector::Only(set)
    }
}
