//! Core logger types and traits

pub mod channel;
pub mod config;
pub mod domain_logger;
pub mod error;
pub mod level_filter;
pub mod log;
pub mod log_level;
pub mod log_value;
pub mod logger;
pub mod metrics;
pub mod normalizer;
pub mod options;
pub mod timestamp;

pub use channel::Channel;
pub use config::{ChannelConfig, DomainLoggerConfig, LevelConfig, LoggerConfig};
pub use domain_logger::{DomainLogger, DomainLoggerBuilder};
pub use error::{LoggerError, Result};
pub use level_filter::LevelFilter;
pub use log::Log;
pub use log_level::{Level, LevelName, LevelSelector, LevelSet, LEVEL_NAMES, SEVERITY_NAMES};
pub use log_value::{ErrorValue, LogValue, Maskable};
pub use logger::{ChannelRegistry, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use normalizer::{Normalizer, DEFAULT_MAX_DEPTH, TRUNCATED_MARKER};
pub use options::{LogMetadata, LogOptions};
pub use timestamp::{fixed_clock, system_clock, Clock, TimestampFormat};
