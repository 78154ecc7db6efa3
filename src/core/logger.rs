//! Dispatcher: global and per-channel filtering with concurrent fan-out

use super::{
    channel::Channel,
    config::{LevelConfig, LoggerConfig},
    error::Result,
    level_filter::LevelFilter,
    log::Log,
    log_level::{Level, LevelName, LevelSelector, LevelSet},
    log_value::LogValue,
    metrics::LoggerMetrics,
    options::LogOptions,
};
use async_trait::async_trait;
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use parking_lot::RwLock;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Registered channels keyed by name
pub type ChannelRegistry = BTreeMap<String, Arc<dyn Channel>>;

pub struct Logger {
    levels: LevelFilter,
    channels: RwLock<ChannelRegistry>,
    /// Per-channel overrides; a channel without one uses its own filter
    channel_levels: RwLock<HashMap<String, LevelSet>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// A dispatcher with no channels whose level set is empty
    #[must_use]
    pub fn new() -> Self {
        Self::with_channels(ChannelRegistry::new())
    }

    #[must_use]
    pub fn with_channels(channels: ChannelRegistry) -> Self {
        Self {
            levels: LevelFilter::closed(),
            channels: RwLock::new(channels),
            channel_levels: RwLock::new(HashMap::new()),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Apply a whole configuration, validated up front
    pub fn setup(&self, config: &LoggerConfig) -> Result<()> {
        let validated = config.validate()?;

        if let Some(selector) = validated.levels {
            self.levels.apply(selector);
        }
        for (name, selector) in validated.channels {
            self.apply_channel_selector(name, selector);
        }
        Ok(())
    }

    /// Replace the whole channel registry
    ///
    /// Per-channel level overrides are kept by name.
    pub fn set_channels(&self, channels: ChannelRegistry) {
        *self.channels.write() = channels;
    }

    /// Register a channel under its own name, replacing any channel of that name
    pub fn add_channel(&self, channel: Arc<dyn Channel>) {
        let name = channel.name().to_string();
        self.channels.write().insert(name, channel);
    }

    pub fn add_named_channel(&self, name: impl Into<String>, channel: Arc<dyn Channel>) {
        self.channels.write().insert(name.into(), channel);
    }

    pub fn remove_channel(&self, name: &str) -> Option<Arc<dyn Channel>> {
        self.channels.write().remove(name)
    }

    pub fn channel_names(&self) -> Vec<String> {
        self.channels.read().keys().cloned().collect()
    }

    /// Set one channel's level set, same semantics as the global set
    ///
    /// Configuration may precede registration of the named channel.
    pub fn set_channel_configs(&self, name: &str, config: &LevelConfig) -> Result<()> {
        let selector = config.selector()?;
        self.apply_channel_selector(name.to_string(), selector);
        Ok(())
    }

    /// Set several channels' level sets; all are validated before any applies
    pub fn set_channels_configs(&self, configs: &BTreeMap<String, LevelConfig>) -> Result<()> {
        let validated = configs
            .iter()
            .map(|(name, config)| Ok((name.clone(), config.selector()?)))
            .collect::<Result<Vec<_>>>()?;

        for (name, selector) in validated {
            self.apply_channel_selector(name, selector);
        }
        Ok(())
    }

    /// Effective level set for a channel, if it is configured or registered
    pub fn channel_levels(&self, name: &str) -> Option<Vec<Level>> {
        if let Some(set) = self.channel_levels.read().get(name) {
            return Some(set.to_vec());
        }
        self.channels
            .read()
            .get(name)
            .map(|channel| channel.levels().to_vec())
    }

    /// Drop a per-channel override so the channel's own filter applies again
    pub fn clear_channel_configs(&self, name: &str) {
        self.channel_levels.write().remove(name);
    }

    /// Get the dispatcher metrics
    ///
    /// # Example
    ///
    /// ```
    /// use channel_logger::Logger;
    ///
    /// let logger = Logger::new();
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.deliveries(), 0);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn apply_channel_selector(&self, name: String, selector: Option<LevelSelector>) {
        // A config naming neither form leaves the channel with nothing enabled.
        let set = selector.map(|s| s.to_set()).unwrap_or_else(LevelSet::empty);
        self.channel_levels.write().insert(name, set);
    }

    /// Channels eligible for `level`, snapshotted so no lock is held while emitting
    fn eligible_channels(&self, level: Level) -> Vec<(String, Arc<dyn Channel>)> {
        let overrides = self.channel_levels.read();
        self.channels
            .read()
            .iter()
            .filter(|(name, channel)| match overrides.get(name.as_str()) {
                Some(set) => set.contains(level),
                None => channel.level_filter().allows(level),
            })
            .map(|(name, channel)| (name.clone(), Arc::clone(channel)))
            .collect()
    }

    /// Invoke one channel, absorbing both errors and panics
    async fn deliver(
        &self,
        name: &str,
        channel: &dyn Channel,
        level: Level,
        message: &LogValue,
        options: Option<&LogOptions>,
    ) {
        let started = std::panic::catch_unwind(AssertUnwindSafe(|| {
            severity_call(channel, level, message, options)
        }));
        let outcome = match started {
            Ok(call) => AssertUnwindSafe(call).catch_unwind().await,
            Err(panic) => Err(panic),
        };

        match outcome {
            Ok(Ok(())) => {
                self.metrics.record_delivered();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Channel '{}' failed: {}", name, e);
                self.metrics.record_channel_failure();
            }
            Err(panic) => {
                eprintln!(
                    "[LOGGER CRITICAL] Channel '{}' panicked: {}. \
                     Other channels continue to function.",
                    name,
                    panic_message(panic.as_ref())
                );
                self.metrics.record_channel_failure();
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Log for Logger {
    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    async fn log(&self, level: Level, message: LogValue, options: Option<LogOptions>) {
        if !self.levels.allows(level) {
            self.metrics.record_filtered();
            return;
        }
        self.metrics.record_dispatched();

        let channels = self.eligible_channels(level);
        if channels.is_empty() {
            return;
        }

        let options = options.as_ref();
        let deliveries = channels
            .iter()
            .map(|(name, channel)| self.deliver(name, channel.as_ref(), level, &message, options));
        join_all(deliveries).await;
    }
}

/// The channel's severity method matching `level`
fn severity_call<'a>(
    channel: &'a dyn Channel,
    level: Level,
    message: &'a LogValue,
    options: Option<&'a LogOptions>,
) -> BoxFuture<'a, Result<()>> {
    match level {
        Level::Trace => channel.trace(message, options),
        Level::Debug => channel.debug(message, options),
        Level::Info => channel.info(message, options),
        Level::Warn => channel.warn(message, options),
        Level::Error => channel.error(message, options),
        Level::Fatal => channel.fatal(message, options),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use channel_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level(LevelName::Info)
///     .channel(Arc::new(ConsoleChannel::new()))
///     .build();
///
/// assert_eq!(logger.levels(), vec![Level::Info, Level::Warn, Level::Error, Level::Fatal]);
/// ```
pub struct LoggerBuilder {
    levels: LevelSelector,
    channels: ChannelRegistry,
    channel_levels: Vec<(String, LevelSelector)>,
}

impl LoggerBuilder {
    /// Create a new builder; the built logger accepts every severity by default
    pub fn new() -> Self {
        Self {
            levels: LevelSelector::Only(LevelSet::all()),
            channels: ChannelRegistry::new(),
            channel_levels: Vec::new(),
        }
    }

    /// Enable the contiguous range starting at `level`
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<LevelName>) -> Self {
        self.levels = LevelSelector::Threshold(level.into());
        self
    }

    /// Enable exactly these severities
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: impl Into<LevelSet>) -> Self {
        self.levels = LevelSelector::Only(levels.into());
        self
    }

    /// Register a channel under its own name
    #[must_use = "builder methods return a new value"]
    pub fn channel(mut self, channel: Arc<dyn Channel>) -> Self {
        self.channels.insert(channel.name().to_string(), channel);
        self
    }

    /// Register a channel under an explicit name
    #[must_use = "builder methods return a new value"]
    pub fn named_channel(mut self, name: impl Into<String>, channel: Arc<dyn Channel>) -> Self {
        self.channels.insert(name.into(), channel);
        self
    }

    /// Override the level set of one channel
    #[must_use = "builder methods return a new value"]
    pub fn channel_levels(mut self, name: impl Into<String>, selector: impl Into<LevelSelector>) -> Self {
        self.channel_levels.push((name.into(), selector.into()));
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::with_channels(self.channels);
        logger.levels.apply(self.levels);
        for (name, selector) in self.channel_levels {
            logger.apply_channel_selector(name, Some(selector));
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
