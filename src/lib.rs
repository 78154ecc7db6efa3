//! # Channel Logger
//!
//! A leveled log pipeline: severity filtering, scoped loggers that layer
//! default metadata, concurrent best-effort fan-out to channels, and a value
//! normalizer that turns error chains, containers and maskable models into
//! safe JSON.
//!
//! ## Features
//!
//! - **Layered Filtering**: A global level set plus independent per-channel sets
//! - **Scoped Loggers**: Nestable decorators that merge default metadata
//! - **Failure Isolation**: A broken channel never breaks the caller or other channels
//! - **Safe Rendering**: Error causes flattened, sensitive models masked
//!
//! ## Example
//!
//! ```
//! use channel_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let console = Arc::new(ConsoleChannel::new());
//! let logger: Arc<dyn Log> = Arc::new(Logger::builder().level(Level::Info).channel(console).build());
//!
//! let payments = DomainLogger::builder(logger)
//!     .metadata(LogMetadata::new().organization("acme").app("payments"))
//!     .build();
//!
//! tokio_test::block_on(payments.info("ready".into(), None));
//! ```

pub mod channels;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::channels::{BufferedConsole, ConsoleChannel, ConsoleTarget};
    pub use crate::core::{
        Channel, ChannelConfig, DomainLogger, DomainLoggerConfig, ErrorValue, Level, LevelConfig,
        LevelFilter, LevelName, LevelSet, Log, LogMetadata, LogOptions, LogValue, Logger,
        LoggerConfig, LoggerError, LoggerMetrics, Maskable, Normalizer, Result,
    };
}

#[cfg(feature = "console")]
pub use channels::ConsoleChannel;
pub use core::{
    Channel, ChannelConfig, ChannelRegistry, DomainLogger, DomainLoggerBuilder, DomainLoggerConfig,
    ErrorValue, Level, LevelConfig, LevelFilter, LevelName, LevelSelector, LevelSet, Log,
    LogMetadata, LogOptions, LogValue, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Maskable, Normalizer, Result, TimestampFormat, LEVEL_NAMES, SEVERITY_NAMES,
};
