//! Shared test channels

#![allow(dead_code)]

use async_trait::async_trait;
use futures::future::BoxFuture;
use channel_logger::core::{Channel, Level, LevelFilter, LevelSet, LogOptions, LogValue, LoggerError, Result};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One call as seen by a channel
#[derive(Debug, Clone)]
pub struct Received {
    pub level: Level,
    pub message: LogValue,
    pub options: Option<LogOptions>,
}

/// Records every call it receives
pub struct RecordingChannel {
    name: String,
    levels: LevelFilter,
    received: Mutex<Vec<Received>>,
}

impl RecordingChannel {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            levels: LevelFilter::with_levels(LevelSet::all()),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().clone()
    }

    pub fn levels_seen(&self) -> Vec<Level> {
        self.received.lock().iter().map(|r| r.level).collect()
    }

    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    async fn emit(&self, level: Level, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        self.received.lock().push(Received {
            level,
            message: message.clone(),
            options: options.cloned(),
        });
        Ok(())
    }
}

/// Counts calls without keeping them
pub struct CountingChannel {
    name: String,
    levels: LevelFilter,
    count: AtomicUsize,
}

impl CountingChannel {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            levels: LevelFilter::with_levels(LevelSet::all()),
            count: AtomicUsize::new(0),
        })
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Channel for CountingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    async fn emit(&self, _level: Level, _message: &LogValue, _options: Option<&LogOptions>) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Panics from its `error` method; every other severity succeeds
pub struct ExplodingChannel {
    levels: LevelFilter,
}

impl ExplodingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            levels: LevelFilter::with_levels(LevelSet::all()),
        })
    }
}

#[async_trait]
impl Channel for ExplodingChannel {
    fn name(&self) -> &str {
        "exploding"
    }

    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    async fn emit(&self, _level: Level, _message: &LogValue, _options: Option<&LogOptions>) -> Result<()> {
        Ok(())
    }

    async fn error(&self, _message: &LogValue, _options: Option<&LogOptions>) -> Result<()> {
        panic!("error sink exploded");
    }
}

/// Panics while starting `error`, before returning a future
pub struct RejectingChannel {
    levels: LevelFilter,
}

impl RejectingChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            levels: LevelFilter::with_levels(LevelSet::all()),
        })
    }
}

#[async_trait]
impl Channel for RejectingChannel {
    fn name(&self) -> &str {
        "rejecting"
    }

    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    async fn emit(&self, _level: Level, _message: &LogValue, _options: Option<&LogOptions>) -> Result<()> {
        Ok(())
    }

    fn error<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _message: &'life1 LogValue,
        _options: Option<&'life2 LogOptions>,
    ) -> BoxFuture<'async_trait, Result<()>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        panic!("error sink rejected the call");
    }
}

/// Always returns an error
pub struct BrokenChannel {
    levels: LevelFilter,
}

impl BrokenChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            levels: LevelFilter::with_levels(LevelSet::all()),
        })
    }
}

#[async_trait]
impl Channel for BrokenChannel {
    fn name(&self) -> &str {
        "broken"
    }

    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    async fn emit(&self, _level: Level, _message: &LogValue, _options: Option<&LogOptions>) -> Result<()> {
        Err(LoggerError::channel("broken", "connection refused"))
    }
}
