//! Interface shared by the dispatcher and scoped loggers

use super::error::Result;
use super::level_filter::LevelFilter;
use super::log_level::{Level, LevelSelector};
use super::log_value::LogValue;
use super::options::LogOptions;
use async_trait::async_trait;

/// Anything a caller can log through
///
/// Implemented by [`Logger`](super::logger::Logger) and
/// [`DomainLogger`](super::domain_logger::DomainLogger), so a scoped logger can
/// wrap either one and nesting is plain composition. Severity methods never
/// fail: a call that is filtered out or whose channels break still completes.
///
/// `setup` is not part of this trait: [`Logger::setup`](super::logger::Logger::setup)
/// and [`DomainLogger::setup`](super::domain_logger::DomainLogger::setup) take
/// different configuration types.
#[async_trait]
pub trait Log: Send + Sync {
    fn level_filter(&self) -> &LevelFilter;

    async fn log(&self, level: Level, message: LogValue, options: Option<LogOptions>);

    /// Configured levels in ascending severity
    fn levels(&self) -> Vec<Level> {
        self.level_filter().levels()
    }

    fn set_level(&self, level: &str) -> Result<()> {
        self.level_filter().set_level(level)
    }

    fn set_levels(&self, levels: &[&str]) -> Result<()> {
        self.level_filter().set_levels(levels)
    }

    fn apply_levels(&self, selector: LevelSelector) {
        self.level_filter().apply(selector);
    }

    async fn trace(&self, message: LogValue, options: Option<LogOptions>) {
        self.log(Level::Trace, message, options).await
    }

    async fn debug(&self, message: LogValue, options: Option<LogOptions>) {
        self.log(Level::Debug, message, options).await
    }

    async fn info(&self, message: LogValue, options: Option<LogOptions>) {
        self.log(Level::Info, message, options).await
    }

    async fn warn(&self, message: LogValue, options: Option<LogOptions>) {
        self.log(Level::Warn, message, options).await
    }

    async fn error(&self, message: LogValue, options: Option<LogOptions>) {
        self.log(Level::Error, message, options).await
    }

    async fn fatal(&self, message: LogValue, options: Option<LogOptions>) {
        self.log(Level::Fatal, message, options).await
    }
}

/// Call the severity method of `logger` matching `level`
pub(crate) async fn forward(logger: &dyn Log, level: Level, message: LogValue, options: Option<LogOptions>) {
    match level {
        Level::Trace => logger.trace(message, options).await,
        Level::Debug => logger.debug(message, options).await,
        Level::Info => logger.info(message, options).await,
        Level::Warn => logger.warn(message, options).await,
        Level::Error => logger.error(message, options).await,
        Level::Fatal => logger.fatal(message, options).await,
    }
}
