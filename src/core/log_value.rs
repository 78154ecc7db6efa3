//! Runtime values carried by a log call
//!
//! Messages, prefixes and postfixes are arbitrary values: primitives, error
//! chains, keyed and set containers, maskable domain models, or already-plain
//! JSON. The [`Normalizer`](super::normalizer::Normalizer) turns any of them
//! into something safe to serialize.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// A domain object that can present either its full or a redacted view
///
/// # Example
///
/// ```
/// use channel_logger::Maskable;
/// use serde_json::{json, Value};
///
/// struct User {
///     email: String,
/// }
///
/// impl Maskable for User {
///     fn visible_view(&self) -> Value {
///         json!({ "email": self.email })
///     }
///
///     fn masked_view(&self) -> Value {
///         json!({ "email": "***" })
///     }
/// }
/// ```
pub trait Maskable: Send + Sync {
    /// Every property, as plain JSON
    fn visible_view(&self) -> serde_json::Value;

    /// Properties with sensitive data redacted, as plain JSON
    fn masked_view(&self) -> serde_json::Value;
}

/// An error record with an optional cause chain
#[derive(Debug, Clone)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    pub cause: Option<LogValue>,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            cause: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<LogValue>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Capture a Rust error and its `source()` chain
    ///
    /// The outer error is named after its type; sources are reached through
    /// `dyn Error` and are named `Error`.
    pub fn from_error<E: std::error::Error + 'static>(error: &E) -> Self {
        let mut value = Self::new(short_type_name::<E>(), error.to_string());
        value.cause = error
            .source()
            .map(|source| LogValue::Error(Box::new(Self::from_source(source))));
        value
    }

    fn from_source(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut value = Self::new("Error", error.to_string());
        value.cause = error
            .source()
            .map(|source| LogValue::Error(Box::new(Self::from_source(source))));
        value
    }
}

fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[derive(Clone, Default)]
pub enum LogValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Arbitrary-precision integer; coerced to a float when normalized
    BigInt(i128),
    String(String),
    /// Interned identifier with an optional description
    Symbol(Option<String>),
    Error(Box<ErrorValue>),
    Array(Vec<LogValue>),
    /// Plain object with fields in insertion order
    Object(Vec<(String, LogValue)>),
    /// Keyed container with keys of any shape
    Map(Vec<(LogValue, LogValue)>),
    /// Container of unique elements without keys
    Set(Vec<LogValue>),
    Model(Arc<dyn Maskable>),
    /// Already-plain data, passed through untouched
    Json(serde_json::Value),
}

impl LogValue {
    pub fn symbol(description: impl Into<String>) -> Self {
        LogValue::Symbol(Some(description.into()))
    }

    pub fn model<M: Maskable + 'static>(model: M) -> Self {
        LogValue::Model(Arc::new(model))
    }

    pub fn error(error: ErrorValue) -> Self {
        LogValue::Error(Box::new(error))
    }

    /// Build an object from `(field, value)` pairs, keeping their order
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<LogValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        LogValue::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<LogValue>,
        V: Into<LogValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        LogValue::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn set<V, I>(elements: I) -> Self
    where
        V: Into<LogValue>,
        I: IntoIterator<Item = V>,
    {
        LogValue::Set(elements.into_iter().map(Into::into).collect())
    }

    /// Capture anything `Serialize` as plain JSON
    ///
    /// Values that fail to serialize are logged as their error text.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => LogValue::Json(json),
            Err(e) => LogValue::String(format!("<unserializable: {}>", e)),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, LogValue::Null | LogValue::Json(serde_json::Value::Null))
    }

    /// Whether this value is composite and needs normalization before output
    pub fn is_composite(&self) -> bool {
        match self {
            LogValue::Error(_)
            | LogValue::Array(_)
            | LogValue::Object(_)
            | LogValue::Map(_)
            | LogValue::Set(_)
            | LogValue::Model(_) => true,
            LogValue::Json(json) => json.is_object() || json.is_array(),
            _ => false,
        }
    }
}

impl fmt::Debug for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Null => f.write_str("Null"),
            LogValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            LogValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            LogValue::UInt(u) => f.debug_tuple("UInt").field(u).finish(),
            LogValue::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            LogValue::BigInt(i) => f.debug_tuple("BigInt").field(i).finish(),
            LogValue::String(s) => f.debug_tuple("String").field(s).finish(),
            LogValue::Symbol(s) => f.debug_tuple("Symbol").field(s).finish(),
            LogValue::Error(e) => f.debug_tuple("Error").field(e).finish(),
            LogValue::Array(a) => f.debug_tuple("Array").field(a).finish(),
            LogValue::Object(o) => f.debug_tuple("Object").field(o).finish(),
            LogValue::Map(m) => f.debug_tuple("Map").field(m).finish(),
            LogValue::Set(s) => f.debug_tuple("Set").field(s).finish(),
            LogValue::Model(_) => f.write_str("Model(..)"),
            LogValue::Json(j) => f.debug_tuple("Json").field(j).finish(),
        }
    }
}

impl From<()> for LogValue {
    fn from(_: ()) -> Self {
        LogValue::Null
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for LogValue {
                fn from(value: $source) -> Self {
                    LogValue::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt as u64: u8, u16, u32, u64, usize);
impl_from_int!(BigInt as i128: i128);

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        LogValue::Float(value as f64)
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        LogValue::Float(value)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::String(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::String(s)
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::String(s.clone())
    }
}

impl From<ErrorValue> for LogValue {
    fn from(error: ErrorValue) -> Self {
        LogValue::Error(Box::new(error))
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(json: serde_json::Value) -> Self {
        LogValue::Json(json)
    }
}

impl From<Arc<dyn Maskable>> for LogValue {
    fn from(model: Arc<dyn Maskable>) -> Self {
        LogValue::Model(model)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(LogValue::Null)
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(values: Vec<T>) -> Self {
        LogValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<LogValue>, V: Into<LogValue>> From<HashMap<K, V>> for LogValue {
    fn from(map: HashMap<K, V>) -> Self {
        LogValue::map(map)
    }
}

impl<K: Into<LogValue>, V: Into<LogValue>> From<BTreeMap<K, V>> for LogValue {
    fn from(map: BTreeMap<K, V>) -> Self {
        LogValue::map(map)
    }
}

impl<T: Into<LogValue>> From<HashSet<T>> for LogValue {
    fn from(set: HashSet<T>) -> Self {
        LogValue::set(set)
    }
}

impl<T: Into<LogValue>> From<BTreeSet<T>> for LogValue {
    fn from(set: BTreeSet<T>) -> Self {
        LogValue::set(set)
    }
}
