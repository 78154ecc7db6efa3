//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A level name outside the accepted literals
    #[error("Level must be: {}", quote_names(.accepted))]
    InvalidLevel {
        level: String,
        accepted: &'static [&'static str],
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A channel failed to emit a message
    #[error("Channel '{channel}' failed: {message}")]
    ChannelError { channel: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

fn quote_names(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl LoggerError {
    /// Create an invalid level error listing the names accepted in that position
    pub fn invalid_level(level: impl Into<String>, accepted: &'static [&'static str]) -> Self {
        LoggerError::InvalidLevel {
            level: level.into(),
            accepted,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a channel emission error
    pub fn channel(channel: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ChannelError {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Accepted level names when this is an [`LoggerError::InvalidLevel`]
    pub fn accepted_levels(&self) -> Option<&'static [&'static str]> {
        match self {
            LoggerError::InvalidLevel { accepted, .. } => Some(accepted),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::{LEVEL_NAMES, SEVERITY_NAMES};

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("loud", LEVEL_NAMES);
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::config("Logger", "unknown channel");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::channel("console", "broken pipe");
        assert!(matches!(err, LoggerError::ChannelError { .. }));
    }

    #[test]
    fn test_invalid_level_display() {
        let err = LoggerError::invalid_level("loud", LEVEL_NAMES);
        assert_eq!(
            err.to_string(),
            "Level must be: 'all', 'trace', 'debug', 'info', 'warn', 'error', 'fatal', 'off'"
        );

        let err = LoggerError::invalid_level("all", SEVERITY_NAMES);
        assert_eq!(
            err.to_string(),
            "Level must be: 'trace', 'debug', 'info', 'warn', 'error', 'fatal'"
        );
        assert_eq!(err.accepted_levels(), Some(SEVERITY_NAMES));
    }

    #[test]
    fn test_channel_error_display() {
        let err = LoggerError::channel("console", "stdout closed");
        assert_eq!(err.to_string(), "Channel 'console' failed: stdout closed");
        assert_eq!(err.accepted_levels(), None);
    }
}
