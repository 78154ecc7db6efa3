//! Channel trait for log output destinations

use super::config::ChannelConfig;
use super::error::Result;
use super::level_filter::LevelFilter;
use super::log_level::{Level, LevelSet};
use super::log_value::LogValue;
use super::options::LogOptions;
use async_trait::async_trait;

/// A sink that receives filtered log calls and performs the actual emission
///
/// Implementors provide [`emit`](Channel::emit) and a [`LevelFilter`]; the
/// per-severity methods delegate to `emit` unless overridden. Emission may
/// complete synchronously or asynchronously. The dispatcher has already
/// checked levels before calling in, so implementations need not re-check.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use channel_logger::core::{Channel, Level, LevelFilter, LogOptions, LogValue, Result};
///
/// struct NullChannel {
///     levels: LevelFilter,
/// }
///
/// #[async_trait]
/// impl Channel for NullChannel {
///     fn name(&self) -> &str {
///         "null"
///     }
///
///     fn level_filter(&self) -> &LevelFilter {
///         &self.levels
///     }
///
///     async fn emit(&self, _level: Level, _message: &LogValue, _options: Option<&LogOptions>) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    fn level_filter(&self) -> &LevelFilter;

    async fn emit(&self, level: Level, message: &LogValue, options: Option<&LogOptions>) -> Result<()>;

    /// Apply level selection and sink options; nothing changes on error
    fn setup(&self, config: &ChannelConfig) -> Result<()> {
        if let Some(selector) = config.levels.selector()? {
            self.level_filter().apply(selector);
        }
        Ok(())
    }

    fn levels(&self) -> LevelSet {
        self.level_filter().snapshot()
    }

    fn set_level(&self, level: &str) -> Result<()> {
        self.level_filter().set_level(level)
    }

    fn set_levels(&self, levels: &[&str]) -> Result<()> {
        self.level_filter().set_levels(levels)
    }

    async fn trace(&self, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        self.emit(Level::Trace, message, options).await
    }

    async fn debug(&self, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        self.emit(Level::Debug, message, options).await
    }

    async fn info(&self, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        self.emit(Level::Info, message, options).await
    }

    async fn warn(&self, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        self.emit(Level::Warn, message, options).await
    }

    async fn error(&self, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        self.emit(Level::Error, message, options).await
    }

    async fn fatal(&self, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        self.emit(Level::Fatal, message, options).await
    }
}
