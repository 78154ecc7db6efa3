//! Console channel implementation
//!
//! Renders one line per call:
//!
//! ```text
//! [org.context.app] 2025-01-08T10:30:45.123Z (correlation-id) INFO [SourceClass] prefix message postfix
//! ```
//!
//! Absent segments are skipped. Composite prefix, message and postfix values
//! go through the [`Normalizer`] and are written as compact JSON.

use crate::core::{
    system_clock, Channel, ChannelConfig, Clock, Level, LevelFilter, LevelSet, LogOptions, LogValue,
    Normalizer, Result, TimestampFormat,
};
use async_trait::async_trait;
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Which console stream a severity is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleTarget {
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleTarget {
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Trace | Level::Debug => ConsoleTarget::Debug,
            Level::Info => ConsoleTarget::Info,
            Level::Warn => ConsoleTarget::Warn,
            Level::Error | Level::Fatal => ConsoleTarget::Error,
        }
    }
}

/// Destination for rendered console lines
pub trait ConsoleOutput: Send + Sync {
    fn write_line(&self, target: ConsoleTarget, line: &str) -> std::io::Result<()>;
}

/// Debug and info lines to stdout, warn and error lines to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl ConsoleOutput for StdConsole {
    fn write_line(&self, target: ConsoleTarget, line: &str) -> std::io::Result<()> {
        match target {
            ConsoleTarget::Debug | ConsoleTarget::Info => writeln!(std::io::stdout().lock(), "{}", line),
            ConsoleTarget::Warn | ConsoleTarget::Error => writeln!(std::io::stderr().lock(), "{}", line),
        }
    }
}

/// Keeps rendered lines in memory
#[derive(Debug, Default)]
pub struct BufferedConsole {
    lines: Mutex<Vec<(ConsoleTarget, String)>>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(ConsoleTarget, String)> {
        self.lines.lock().clone()
    }

    /// Remove and return everything captured so far
    pub fn take(&self) -> Vec<(ConsoleTarget, String)> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl ConsoleOutput for BufferedConsole {
    fn write_line(&self, target: ConsoleTarget, line: &str) -> std::io::Result<()> {
        self.lines.lock().push((target, line.to_string()));
        Ok(())
    }
}

pub struct ConsoleChannel {
    name: String,
    levels: LevelFilter,
    mask: AtomicBool,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    clock: Clock,
    output: Arc<dyn ConsoleOutput>,
}

impl ConsoleChannel {
    /// A console channel accepting every severity, writing to stdout/stderr
    pub fn new() -> Self {
        Self {
            name: "console".to_string(),
            levels: LevelFilter::with_levels(LevelSet::all()),
            mask: AtomicBool::new(false),
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
            clock: system_clock(),
            output: Arc::new(StdConsole),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Colorize the severity tag with ANSI codes
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Render maskable models through their masked view
    #[must_use]
    pub fn with_mask(self, mask: bool) -> Self {
        self.mask.store(mask, Ordering::Relaxed);
        self
    }

    /// Set the timestamp format for this channel
    ///
    /// # Examples
    ///
    /// ```
    /// use channel_logger::channels::ConsoleChannel;
    /// use channel_logger::core::TimestampFormat;
    ///
    /// let channel = ConsoleChannel::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: Arc<dyn ConsoleOutput>) -> Self {
        self.output = output;
        self
    }

    pub fn is_masking(&self) -> bool {
        self.mask.load(Ordering::Relaxed)
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.is_masking())
    }

    /// Build the line for one call without writing it
    pub fn format_line(&self, level: Level, message: &LogValue, options: Option<&LogOptions>) -> String {
        let normalizer = self.normalizer();
        let metadata = options.and_then(|options| options.metadata.as_ref());
        let mut parts: Vec<String> = Vec::with_capacity(8);

        if let Some(label) = metadata.and_then(|metadata| metadata.scope_label()) {
            parts.push(format!("[{}]", label));
        }

        parts.push(self.timestamp_format.format(&(self.clock)()));

        if let Some(correlation_id) = metadata.and_then(|metadata| metadata.correlation_id.as_ref()) {
            parts.push(format!("({})", correlation_id));
        }

        parts.push(self.level_tag(level));

        if let Some(source_class) = metadata.and_then(|metadata| metadata.source_class.as_ref()) {
            parts.push(format!("[{}]", source_class));
        }

        let prefix = options.and_then(|options| options.prefix.as_ref());
        let postfix = options.and_then(|options| options.postfix.as_ref());
        for segment in [prefix, Some(message), postfix].into_iter().flatten() {
            if let Some(text) = normalizer.render(segment) {
                parts.push(text);
            }
        }

        parts.join(" ")
    }

    fn level_tag(&self, level: Level) -> String {
        if self.use_colors {
            level.tag().color(color_code(level)).to_string()
        } else {
            level.tag().to_string()
        }
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

fn color_code(level: Level) -> colored::Color {
    use colored::Color::*;
    match level {
        Level::Trace => BrightBlack,
        Level::Debug => Blue,
        Level::Info => Green,
        Level::Warn => Yellow,
        Level::Error => Red,
        Level::Fatal => BrightRed,
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn level_filter(&self) -> &LevelFilter {
        &self.levels
    }

    fn setup(&self, config: &ChannelConfig) -> Result<()> {
        if let Some(selector) = config.levels.selector()? {
            self.levels.apply(selector);
        }
        if let Some(mask) = config.mask {
            self.mask.store(mask, Ordering::Relaxed);
        }
        Ok(())
    }

    async fn emit(&self, level: Level, message: &LogValue, options: Option<&LogOptions>) -> Result<()> {
        let line = self.format_line(level, message, options);
        self.output.write_line(ConsoleTarget::for_level(level), &line)?;
        Ok(())
    }
}
