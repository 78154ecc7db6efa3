//! Dispatcher metrics for observability
//!
//! Counts how log calls were handled: filtered out before any channel was
//! touched, dispatched to channels, and how each channel delivery ended.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for dispatcher observability
///
/// # Example
///
/// ```
/// use channel_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_channel_failure();
///
/// assert_eq!(metrics.deliveries(), 1);
/// assert_eq!(metrics.channel_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Calls rejected by the global level set
    calls_filtered: AtomicU64,

    /// Calls that passed the global level set
    calls_dispatched: AtomicU64,

    /// Channel invocations that completed successfully
    deliveries: AtomicU64,

    /// Channel invocations that returned an error or panicked
    channel_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            calls_filtered: AtomicU64::new(0),
            calls_dispatched: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            channel_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn calls_filtered(&self) -> u64 {
        self.calls_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn calls_dispatched(&self) -> u64 {
        self.calls_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn channel_failures(&self) -> u64 {
        self.channel_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.calls_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.calls_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_channel_failure(&self) -> u64 {
        self.channel_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of channel invocations that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no channel has been invoked.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.channel_failures() as f64;
        let total = self.deliveries() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.calls_filtered.store(0, Ordering::Relaxed);
        self.calls_dispatched.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.channel_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            calls_filtered: AtomicU64::new(self.calls_filtered()),
            calls_dispatched: AtomicU64::new(self.calls_dispatched()),
            deliveries: AtomicU64::new(self.deliveries()),
            channel_failures: AtomicU64::new(self.channel_failures()),
        }
    }
}
