//! Per-call options and metadata

use super::log_value::LogValue;
use serde::{Deserialize, Serialize};

/// Descriptive metadata attached to a log call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl LogMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    #[must_use]
    pub fn source_class(mut self, source_class: impl Into<String>) -> Self {
        self.source_class = Some(source_class.into());
        self
    }

    #[must_use]
    pub fn correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Fields of `self` win; anything `self` leaves unset comes from `base`
    #[must_use]
    pub fn merged_over(&self, base: &LogMetadata) -> LogMetadata {
        LogMetadata {
            organization: self.organization.clone().or_else(|| base.organization.clone()),
            context: self.context.clone().or_else(|| base.context.clone()),
            app: self.app.clone().or_else(|| base.app.clone()),
            source_class: self.source_class.clone().or_else(|| base.source_class.clone()),
            correlation_id: self.correlation_id.clone().or_else(|| base.correlation_id.clone()),
        }
    }

    /// `organization.context.app` with absent or empty segments skipped
    pub fn scope_label(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.organization, &self.context, &self.app]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("."))
        }
    }
}

/// Options travelling with a single log call
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub prefix: Option<LogValue>,
    pub postfix: Option<LogValue>,
    pub metadata: Option<LogMetadata>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<LogValue>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn postfix(mut self, postfix: impl Into<LogValue>) -> Self {
        self.postfix = Some(postfix.into());
        self
    }

    #[must_use]
    pub fn metadata(mut self, metadata: LogMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Layer per-call options over scope defaults
    ///
    /// Top-level fields set on the call replace the defaults. Metadata is
    /// merged field by field, with the call's fields winning.
    pub fn merge(defaults: Option<&LogOptions>, call: Option<LogOptions>) -> Option<LogOptions> {
        let Some(defaults) = defaults else {
            return call;
        };
        let Some(call) = call else {
            return Some(defaults.clone());
        };

        let metadata = match (&defaults.metadata, call.metadata) {
            (Some(base), Some(own)) => Some(own.merged_over(base)),
            (base, own) => own.or_else(|| base.clone()),
        };

        Some(LogOptions {
            prefix: call.prefix.or_else(|| defaults.prefix.clone()),
            postfix: call.postfix.or_else(|| defaults.postfix.clone()),
            metadata,
        })
    }
}

impl From<LogMetadata> for LogOptions {
    fn from(metadata: LogMetadata) -> Self {
        LogOptions::new().metadata(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_merge_call_wins() {
        let defaults = LogOptions::new().metadata(LogMetadata::new().organization("O").context("C"));
        let call = LogOptions::new().metadata(LogMetadata::new().context("C2").correlation_id("X"));

        let merged = LogOptions::merge(Some(&defaults), Some(call)).unwrap();
        assert_eq!(
            merged.metadata,
            Some(LogMetadata {
                organization: Some("O".to_string()),
                context: Some("C2".to_string()),
                app: None,
                source_class: None,
                correlation_id: Some("X".to_string()),
            })
        );
    }

    #[test]
    fn test_scope_label_skips_empty_segments() {
        assert_eq!(LogMetadata::new().organization("").scope_label(), None);
        assert_eq!(
            LogMetadata::new().organization("acme").context("").app("api").scope_label(),
            Some("acme.api".to_string())
        );
        assert_eq!(LogMetadata::new().source_class("Svc").scope_label(), None);
    }

    #[test]
    fn test_merge_without_defaults_returns_call() {
        let call = LogOptions::new().prefix("p");
        let merged = LogOptions::merge(None, Some(call)).unwrap();
        assert!(matches!(merged.prefix, Some(LogValue::String(ref s)) if s == "p"));
        assert!(LogOptions::merge(None, None).is_none());
    }

    #[test]
    fn test_merge_without_call_returns_defaults() {
        let defaults = LogOptions::new()
            .postfix("end")
            .metadata(LogMetadata::new().app("api"));
        let merged = LogOptions::merge(Some(&defaults), None).unwrap();
        assert_eq!(merged.metadata, Some(LogMetadata::new().app("api")));
        assert!(merged.postfix.is_some());
    }

    #[test]
    fn test_merge_top_level_fields() {
        let defaults = LogOptions::new().prefix("default").postfix("tail");
        let call = LogOptions::new()
            .prefix("call")
            .metadata(LogMetadata::new().source_class("Svc"));

        let merged = LogOptions::merge(Some(&defaults), Some(call)).unwrap();
        assert!(matches!(merged.prefix, Some(LogValue::String(ref s)) if s == "call"));
        assert!(matches!(merged.postfix, Some(LogValue::String(ref s)) if s == "tail"));
        assert_eq!(merged.metadata, Some(LogMetadata::new().source_class("Svc")));
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(LogMetadata::new().scope_label(), None);
        assert_eq!(
            LogMetadata::new().organization("acme").app("billing").scope_label(),
            Some("acme.billing".to_string())
        );
        assert_eq!(
            LogMetadata::new()
                .organization("acme")
                .context("payments")
                .app("billing")
                .scope_label(),
            Some("acme.payments.billing".to_string())
        );
    }

    #[test]
    fn test_metadata_deserializes_camel_case() {
        let metadata: LogMetadata =
            serde_json::from_str(r#"{"sourceClass":"Repo","correlationId":"42"}"#).unwrap();
        assert_eq!(metadata, LogMetadata::new().source_class("Repo").correlation_id("42"));
    }
}
