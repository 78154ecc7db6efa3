//! Timestamp formatting for rendered log lines

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::sync::Arc;

/// Source of the current time, replaceable for deterministic output
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The system clock
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// A clock that always reports `instant`
pub fn fixed_clock(instant: DateTime<Utc>) -> Clock {
    Arc::new(move || instant)
}

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use channel_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Iso8601.format(&instant), "2025-01-08T10:30:45.000Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible format string; an invalid one falls back to `Iso8601`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Iso8601.format(datetime),
                }
            }
        }
    }

    /// Whether every specifier of a custom format is recognized
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => {
                !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
            + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn test_formats() {
        let instant = instant();
        assert_eq!(TimestampFormat::Iso8601.format(&instant), "2025-01-08T10:30:45.123Z");
        assert_eq!(
            TimestampFormat::Iso8601Micros.format(&instant),
            "2025-01-08T10:30:45.123000Z"
        );
        assert_eq!(TimestampFormat::Rfc3339.format(&instant), "2025-01-08T10:30:45.123+00:00");
        assert_eq!(TimestampFormat::UnixMillis.format(&instant), "1736332245123");
        assert_eq!(
            TimestampFormat::Custom("%Y/%m/%d".to_string()).format(&instant),
            "2025/01/08"
        );
    }

    #[test]
    fn test_invalid_custom_format_falls_back() {
        let format = TimestampFormat::Custom("%Q".to_string());
        assert!(!format.is_valid());
        assert_eq!(format.format(&instant()), "2025-01-08T10:30:45.123Z");

        assert!(TimestampFormat::Custom("%H:%M".to_string()).is_valid());
        assert!(TimestampFormat::UnixMillis.is_valid());
    }

    #[test]
    fn test_fixed_clock() {
        let clock = fixed_clock(instant());
        assert_eq!(clock(), instant());
    }
}
