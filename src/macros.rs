//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and returns the logging
//! future, which must be awaited. Per-call options go before the format
//! string as `options = <expr>;`.
//!
//! # Examples
//!
//! ```
//! use channel_logger::prelude::*;
//! use channel_logger::info;
//!
//! let logger = Logger::builder().build();
//!
//! tokio_test::block_on(async {
//!     info!(logger, "Server started").await;
//!
//!     let port = 8080;
//!     info!(logger, "Server listening on port {}", port).await;
//!
//!     let options = LogOptions::new().metadata(LogMetadata::new().correlation_id("req-1"));
//!     info!(logger, options = options; "Handled {} requests", 3).await;
//! });
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use channel_logger::log;
/// # tokio_test::block_on(async {
/// log!(logger, Level::Info, "Simple message").await;
/// log!(logger, Level::Error, "Error code: {}", 500).await;
/// # });
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, options = $options:expr; $($arg:tt)+) => {{
        use $crate::core::Log as _;
        $logger.log($level, $crate::core::LogValue::from(format!($($arg)+)), Some($options))
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::core::Log as _;
        $logger.log($level, $crate::core::LogValue::from(format!($($arg)+)), None)
    }};
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use channel_logger::trace;
/// # tokio_test::block_on(async {
/// trace!(logger, "Entering function: calculate()").await;
/// trace!(logger, "Variable value: {}", 42).await;
/// # });
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use channel_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use channel_logger::error;
/// # tokio_test::block_on(async {
/// error!(logger, "Failed to connect to database").await;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").await;
/// # });
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Fatal, $($arg)+)
    };
}
