//! Value normalization
//!
//! Converts a [`LogValue`] into plain JSON:
//!
//! - errors become `{name, message, stack?, cause?}` records, with the whole
//!   cause chain flattened; a non-error cause is normalized and ends the chain
//! - keyed containers become objects; composite keys are serialized to text
//! - set containers become arrays
//! - maskable models are replaced by their visible or masked view
//! - big integers are coerced to plain numbers: exact within ±2^53, floats
//!   (losing precision) beyond
//! - symbols become their `Symbol(description)` text
//!
//! Values nested deeper than [`Normalizer::max_depth`] are replaced by
//! [`TRUNCATED_MARKER`].

use super::log_value::{ErrorValue, LogValue};
use serde_json::{Map, Number, Value};

/// Default nesting limit before values are truncated
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Stands in for values below the depth limit
pub const TRUNCATED_MARKER: &str = "[Truncated]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    mask: bool,
    max_depth: usize,
}

impl Normalizer {
    pub fn new(mask: bool) -> Self {
        Self {
            mask,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn mask(&self) -> bool {
        self.mask
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn normalize(&self, value: &LogValue) -> Value {
        self.normalize_at(value, 0)
    }

    /// Text form of one message segment; `None` for null values
    ///
    /// Scalars render as their text, composites as compact JSON.
    pub fn render(&self, value: &LogValue) -> Option<String> {
        match value {
            LogValue::Null => None,
            LogValue::String(s) => Some(s.clone()),
            LogValue::Bool(b) => Some(b.to_string()),
            LogValue::Int(i) => Some(i.to_string()),
            LogValue::UInt(u) => Some(u.to_string()),
            LogValue::Float(f) => Some(f.to_string()),
            LogValue::BigInt(i) => Some(i.to_string()),
            LogValue::Symbol(description) => Some(symbol_text(description.as_deref())),
            LogValue::Json(Value::Null) => None,
            LogValue::Json(Value::String(s)) => Some(s.clone()),
            LogValue::Json(json) if !json.is_object() && !json.is_array() => Some(json.to_string()),
            composite => Some(self.normalize(composite).to_string()),
        }
    }

    fn normalize_at(&self, value: &LogValue, depth: usize) -> Value {
        if depth > self.max_depth {
            return Value::String(TRUNCATED_MARKER.to_string());
        }

        match value {
            LogValue::Null => Value::Null,
            LogValue::Bool(b) => Value::Bool(*b),
            LogValue::Int(i) => Value::from(*i),
            LogValue::UInt(u) => Value::from(*u),
            LogValue::Float(f) => float(*f),
            LogValue::BigInt(i) => big_int(*i),
            LogValue::String(s) => Value::String(s.clone()),
            LogValue::Symbol(description) => Value::String(symbol_text(description.as_deref())),
            LogValue::Error(error) => self.normalize_error(error, depth),
            LogValue::Array(elements) | LogValue::Set(elements) => Value::Array(
                elements
                    .iter()
                    .map(|element| self.normalize_at(element, depth + 1))
                    .collect(),
            ),
            LogValue::Object(fields) => {
                let mut object = Map::with_capacity(fields.len());
                for (key, field) in fields {
                    object.insert(key.clone(), self.normalize_at(field, depth + 1));
                }
                Value::Object(object)
            }
            LogValue::Map(entries) => {
                let mut object = Map::with_capacity(entries.len());
                for (key, entry) in entries {
                    let key = key_text(self.normalize_at(key, depth + 1));
                    object.insert(key, self.normalize_at(entry, depth + 1));
                }
                Value::Object(object)
            }
            LogValue::Model(model) => {
                if self.mask {
                    model.masked_view()
                } else {
                    model.visible_view()
                }
            }
            LogValue::Json(json) => json.clone(),
        }
    }

    /// Flatten an error chain without recursing per link
    fn normalize_error(&self, error: &ErrorValue, depth: usize) -> Value {
        let mut chain = vec![error];
        let mut tail = None;
        let mut next = error.cause.as_ref();

        while let Some(cause) = next {
            let cause_depth = depth + chain.len();
            match cause {
                LogValue::Error(inner) if cause_depth <= self.max_depth => {
                    chain.push(inner);
                    next = inner.cause.as_ref();
                }
                other => {
                    // also yields the marker for an error link past the limit
                    tail = Some(self.normalize_at(other, cause_depth));
                    next = None;
                }
            }
        }

        chain.iter().rev().fold(tail, |cause, link| {
            let mut record = Map::new();
            record.insert("name".to_string(), Value::String(link.name.clone()));
            record.insert("message".to_string(), Value::String(link.message.clone()));
            if let Some(stack) = &link.stack {
                record.insert("stack".to_string(), Value::String(stack.clone()));
            }
            if let Some(cause) = cause {
                record.insert("cause".to_string(), cause);
            }
            Some(Value::Object(record))
        })
        .unwrap_or(Value::Null)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Compact JSON text of a normalized value
pub fn serialize(value: &Value) -> String {
    value.to_string()
}

fn float(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// Largest magnitude an f64 holds exactly
const MAX_SAFE_INTEGER: i128 = (1 << 53) - 1;

fn big_int(i: i128) -> Value {
    if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&i) {
        Value::from(i as i64)
    } else {
        float(i as f64)
    }
}

fn symbol_text(description: Option<&str>) -> String {
    format!("Symbol({})", description.unwrap_or_default())
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => serialize(&other),
    }
}
