use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{PlotError, PlotResult};

/// Ordered option object. Key order follows first insertion, so merged
/// output stays stable across runs.
pub type OptionMap = IndexMap<String, OptionValue>;

/// One data row as supplied by the caller.
pub type Datum = serde_json::Map<String, Value>;

type CallbackFn = dyn Fn(&[OptionValue]) -> OptionValue + Send + Sync;

/// Caller-supplied function stored inside an option tree (style of a data
/// point, value formatter, event handler).
///
/// Callbacks are leaves: merging never looks inside them, and equality is
/// identity of the underlying function.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[OptionValue]) -> OptionValue + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[OptionValue]) -> OptionValue {
        (self.0)(args)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(<fn>)")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Node of a plot configuration tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<OptionValue>),
    Object(OptionMap),
    Callback(Callback),
}

impl OptionValue {
    #[must_use]
    pub fn object() -> Self {
        Self::Object(OptionMap::new())
    }

    #[must_use]
    pub fn from_datum(datum: &Datum) -> Self {
        Self::from(Value::Object(datum.clone()))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[OptionValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&OptionMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut OptionMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Self::Callback(callback) => Some(callback),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up a dotted path such as `label.style.fill`.
    #[must_use]
    pub fn pointer(&self, path: &str) -> Option<&OptionValue> {
        path.split('.')
            .try_fold(self, |node, segment| node.get(segment))
    }

    /// Writes `value` at a dotted path, creating intermediate objects and
    /// replacing non-object intermediates.
    pub fn set_path(&mut self, path: &str, value: OptionValue) {
        let mut node = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if !matches!(node, Self::Object(_)) {
                *node = Self::object();
            }
            let Self::Object(map) = node else {
                unreachable!("node was just replaced with an object");
            };
            if segments.peek().is_none() {
                map.insert(segment.to_owned(), value);
                return;
            }
            node = map
                .entry(segment.to_owned())
                .or_insert_with(OptionValue::object);
        }
    }

    /// Deep-merges `source` into `self`.
    ///
    /// Objects merge key by key, recursively. Every other kind of value
    /// (scalars, arrays, callbacks, null) replaces the target wholesale.
    pub fn merge_from(&mut self, source: &OptionValue) {
        match (self, source) {
            (Self::Object(target), Self::Object(source)) => {
                for (key, value) in source {
                    match target.get_mut(key) {
                        Some(existing) => existing.merge_from(value),
                        None => {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            (target, source) => *target = source.clone(),
        }
    }

    #[must_use]
    pub fn merged(mut self, source: &OptionValue) -> Self {
        self.merge_from(source);
        self
    }

    /// Converts back to JSON. Callbacks have no JSON form and become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null | Self::Callback(_) => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::String(value) => Value::String(value.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(number) => number.as_f64().map(Self::Number).unwrap_or(Self::Null),
            Value::String(value) => Self::String(value),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<OptionMap> for OptionValue {
    fn from(value: OptionMap) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<OptionValue>> for OptionValue {
    fn from(value: Vec<OptionValue>) -> Self {
        Self::Array(value)
    }
}

impl From<Callback> for OptionValue {
    fn from(value: Callback) -> Self {
        Self::Callback(value)
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null | Self::Callback(_) => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// Options after the three-source merge: pipeline base defaults, then
/// plot-type defaults, then caller configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedOptions {
    root: OptionValue,
}

impl ResolvedOptions {
    /// Merges the three sources in increasing precedence.
    ///
    /// The caller configuration must be an object (or null, meaning "no
    /// overrides").
    pub fn resolve(
        base: &OptionValue,
        defaults: &OptionValue,
        user: &OptionValue,
    ) -> PlotResult<Self> {
        if !matches!(user, OptionValue::Object(_) | OptionValue::Null) {
            return Err(PlotError::InvalidOption {
                path: "<root>".to_owned(),
                reason: "plot configuration must be an object".to_owned(),
            });
        }
        let mut root = OptionValue::object();
        for source in [base, defaults, user] {
            if matches!(source, OptionValue::Object(_)) {
                root.merge_from(source);
            }
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn as_value(&self) -> &OptionValue {
        &self.root
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&OptionValue> {
        self.root.pointer(path)
    }

    /// Presence check. An explicit `null` counts as absent.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some_and(|value| !value.is_null())
    }

    #[must_use]
    pub fn bool_at(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(OptionValue::as_bool)
    }

    #[must_use]
    pub fn f64_at(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(OptionValue::as_f64)
    }

    #[must_use]
    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(OptionValue::as_str)
    }

    pub fn require_str(&self, path: &str) -> PlotResult<&str> {
        self.str_at(path)
            .ok_or_else(|| PlotError::MissingOption(path.to_owned()))
    }

    pub fn set(&mut self, path: &str, value: impl Into<OptionValue>) {
        self.root.set_path(path, value.into());
    }
}
