//! Scoped logger that layers default options over another logger
//!
//! A `DomainLogger` wraps anything implementing [`Log`]: the dispatcher or
//! another `DomainLogger`. It never touches channels. Each call is first
//! checked against the scope's own level set (if one is configured), then
//! forwarded with the scope's default options merged under the call's.

use super::{
    config::DomainLoggerConfig,
    error::Result,
    level_filter::LevelFilter,
    log::{forward, Log},
    log_level::{Level, LevelName, LevelSelector, LevelSet},
    log_value::LogValue,
    options::{LogMetadata, LogOptions},
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct DomainLogger {
    inner: Arc<dyn Log>,
    levels: LevelFilter,
    options: RwLock<Option<LogOptions>>,
}

impl DomainLogger {
    /// Wrap `inner` with no level set and no default options
    pub fn new(inner: Arc<dyn Log>) -> Self {
        Self {
            inner,
            levels: LevelFilter::unrestricted(),
            options: RwLock::new(None),
        }
    }

    pub fn builder(inner: Arc<dyn Log>) -> DomainLoggerBuilder {
        DomainLoggerBuilder::new(inner)
    }

    /// Apply a level update and replace the default options
    ///
    /// The levels are validated first; on error neither levels nor options change.
    pub fn setup(&self, config: DomainLoggerConfig) -> Result<()> {
        let selector = config.levels.selector()?;
        if let Some(selector) = selector {
            self.levels.apply(selector);
        }
        *self.options.write() = config.options;
        Ok(())
    }

    pub fn options(&self) -> Option<LogOptions> {
        self.options.read().clone()
    }

    pub fn set_options(&self, options: Option<LogOptions>) {
        *self.options.write() = options;
    }

    /// Whether this scope narrows levels on its own
    pub fn is_restricted(&self) -> bool {
        self.levels.is_restricted()
    }

    /// Remove this scope's own level set so every call is forwarded
    pub fn clear_levels(&self) {
        self.levels.clear();
    }

    /// The logger this scope forwards to
    pub fn inner(&self) -> &Arc<dyn Log> {
        &self.inner
    }

    fn merged_options(&self, call: Option<LogOptions>) -> Option<LogOptions> {
        let defaults = self.options.read();
        LogOptions::merge(defaults.as_ref(), call)
    }
}

#[async_trait]
impl Log for DomainLogger {
    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    async fn log(&self, level: Level, message: LogValue, options: Option<LogOptions>) {
        if !self.levels.allows(level) {
            return;
        }

        let options = self.merged_options(options);
        forward(self.inner.as_ref(), level, message, options).await;
    }
}

/// Builder for a [`DomainLogger`]
///
/// # Example
///
/// ```
/// use channel_logger::prelude::*;
/// use std::sync::Arc;
///
/// let base: Arc<dyn Log> = Arc::new(Logger::builder().build());
/// let billing = DomainLogger::builder(base)
///     .metadata(LogMetadata::new().organization("acme").app("billing"))
///     .level(Level::Info)
///     .build();
///
/// assert_eq!(billing.levels(), vec![Level::Info, Level::Warn, Level::Error, Level::Fatal]);
/// ```
pub struct DomainLoggerBuilder {
    inner: Arc<dyn Log>,
    levels: Option<LevelSelector>,
    options: Option<LogOptions>,
}

impl DomainLoggerBuilder {
    pub fn new(inner: Arc<dyn Log>) -> Self {
        Self {
            inner,
            levels: None,
            options: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<LevelName>) -> Self {
        self.levels = Some(LevelSelector::Threshold(level.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: impl Into<LevelSet>) -> Self {
        self.levels = Some(LevelSelector::Only(levels.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: LogOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Set default metadata, keeping any default prefix or postfix
    #[must_use = "builder methods return a new value"]
    pub fn metadata(mut self, metadata: LogMetadata) -> Self {
        self.options = Some(self.options.unwrap_or_default().metadata(metadata));
        self
    }

    pub fn build(self) -> DomainLogger {
        let logger = DomainLogger::new(self.inner);
        if let Some(selector) = self.levels {
            logger.levels.apply(selector);
        }
        *logger.options.write() = self.options;
        logger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LevelConfig;
    use parking_lot::Mutex;

    /// Records every call it receives, without filtering
    struct Spy {
        levels: LevelFilter,
        calls: Mutex<Vec<(Level, Option<LogOptions>)>>,
    }

    impl Spy {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                levels: LevelFilter::unrestricted(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn levels_seen(&self) -> Vec<Level> {
            self.calls.lock().iter().map(|(level, _)| *level).collect()
        }

        fn last_metadata(&self) -> Option<LogMetadata> {
            self.calls
                .lock()
                .last()
                .and_then(|(_, options)| options.as_ref())
                .and_then(|options| options.metadata.clone())
        }
    }

    #[async_trait]
    impl Log for Spy {
        fn level_filter(&self) -> &LevelFilter {
            &self.levels
        }

        async fn log(&self, level: Level, _message: LogValue, options: Option<LogOptions>) {
            self.calls.lock().push((level, options));
        }
    }

    async fn log_every_level(logger: &dyn Log) {
        for level in Level::ALL {
            logger.log(level, LogValue::from(level.as_str()), None).await;
        }
    }

    #[test]
    fn test_unrestricted_scope_forwards_everything() {
        let spy = Spy::new();
        let scope = DomainLogger::new(spy.clone());

        tokio_test::block_on(log_every_level(&scope));

        assert_eq!(spy.levels_seen(), Level::ALL.to_vec());
        assert!(!scope.is_restricted());
    }

    #[test]
    fn test_scope_narrows_levels() {
        let spy = Spy::new();
        let scope = DomainLogger::new(spy.clone());
        scope.set_level("info").unwrap();

        tokio_test::block_on(log_every_level(&scope));

        assert_eq!(
            spy.levels_seen(),
            vec![Level::Info, Level::Warn, Level::Error, Level::Fatal]
        );
    }

    #[test]
    fn test_scope_off_silences_everything() {
        let spy = Spy::new();
        let scope = DomainLogger::new(spy.clone());
        scope.set_level("off").unwrap();

        tokio_test::block_on(log_every_level(&scope));

        assert!(spy.levels_seen().is_empty());
        assert!(scope.is_restricted());

        scope.clear_levels();
        tokio_test::block_on(scope.warn("back".into(), None));
        assert_eq!(spy.levels_seen(), vec![Level::Warn]);
    }

    #[test]
    fn test_metadata_merge() {
        let spy = Spy::new();
        let scope = DomainLogger::builder(spy.clone())
            .metadata(LogMetadata::new().organization("O").context("C"))
            .build();

        let call = LogOptions::new().metadata(LogMetadata::new().context("C2").correlation_id("X"));
        tokio_test::block_on(scope.info("merged".into(), Some(call)));

        assert_eq!(
            spy.last_metadata(),
            Some(LogMetadata::new().organization("O").context("C2").correlation_id("X"))
        );
    }

    #[test]
    fn test_defaults_apply_without_call_options() {
        let spy = Spy::new();
        let scope = DomainLogger::builder(spy.clone())
            .metadata(LogMetadata::new().app("api"))
            .build();

        tokio_test::block_on(scope.debug("plain".into(), None));

        assert_eq!(spy.last_metadata(), Some(LogMetadata::new().app("api")));
    }

    #[test]
    fn test_nested_scopes_layer_metadata_and_levels() {
        let spy = Spy::new();
        let outer = Arc::new(
            DomainLogger::builder(spy.clone())
                .metadata(LogMetadata::new().organization("acme").context("payments"))
                .level(Level::Debug)
                .build(),
        );
        let inner = DomainLogger::builder(outer.clone())
            .metadata(LogMetadata::new().app("refunds").source_class("RefundService"))
            .levels(LevelSet::parse(&["trace", "error"]).unwrap())
            .build();

        tokio_test::block_on(log_every_level(&inner));

        // trace passes the inner scope but not the outer one
        assert_eq!(spy.levels_seen(), vec![Level::Error]);
        assert_eq!(
            spy.last_metadata(),
            Some(
                LogMetadata::new()
                    .organization("acme")
                    .context("payments")
                    .app("refunds")
                    .source_class("RefundService")
            )
        );
    }

    #[test]
    fn test_setup_validates_before_mutation() {
        let spy = Spy::new();
        let scope = DomainLogger::new(spy);
        scope.set_level("warn").unwrap();

        let bad = DomainLoggerConfig::new()
            .with_levels(LevelConfig::levels(["info", "shout"]))
            .with_options(LogOptions::new().prefix("ignored"));

        assert!(scope.setup(bad).is_err());
        assert_eq!(scope.levels(), vec![Level::Warn, Level::Error, Level::Fatal]);
        assert!(scope.options().is_none());
    }

    #[test]
    fn test_setup_replaces_options() {
        let spy = Spy::new();
        let scope = DomainLogger::builder(spy)
            .metadata(LogMetadata::new().app("old"))
            .build();

        let config = DomainLoggerConfig::new()
            .with_levels(LevelConfig::level("error"))
            .with_options(LogOptions::new().metadata(LogMetadata::new().app("new")));
        scope.setup(config).unwrap();

        assert_eq!(scope.levels(), vec![Level::Error, Level::Fatal]);
        assert_eq!(
            scope.options().and_then(|options| options.metadata),
            Some(LogMetadata::new().app("new"))
        );
    }
}
