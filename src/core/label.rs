use serde::Serialize;
use serde_json::json;

use crate::core::options::{OptionMap, OptionValue};

/// Symbolic label placement relative to the geometry element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPosition {
    Top,
    Middle,
    Bottom,
    Other(String),
}

impl LabelPosition {
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "top" => Self::Top,
            "middle" => Self::Middle,
            "bottom" => Self::Bottom,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
            Self::Other(name) => name,
        }
    }

    /// Base entry of the placement table.
    #[must_use]
    pub fn base_options(&self) -> OptionValue {
        let entry = match self {
            Self::Middle => json!({ "offset": 0, "style": { "textBaseline": "middle" } }),
            Self::Top | Self::Bottom => {
                json!({ "offset": 4, "style": { "textBaseline": "bottom" } })
            }
            Self::Other(_) => json!({ "offset": 0 }),
        };
        OptionValue::from(entry)
    }
}

/// Fully resolved label configuration for one geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDescriptor {
    pub visible: bool,
    pub offset: f64,
    pub style: OptionMap,
    pub fields: Vec<String>,
    pub label_type: Option<String>,
    pub position: Option<String>,
    /// Remaining caller keys (formatter, adjustColor, ...), passed through.
    pub extra: OptionMap,
}

impl LabelDescriptor {
    /// Fills `fields` and `label_type` only when the caller did not set them.
    #[must_use]
    pub fn with_defaults(mut self, fields: &[&str], label_type: &str) -> Self {
        if self.fields.is_empty() {
            self.fields = fields.iter().map(|field| (*field).to_owned()).collect();
        }
        if self.label_type.is_none() {
            self.label_type = Some(label_type.to_owned());
        }
        self
    }
}

/// Stateless resolver for label placement defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelPolicy;

impl LabelPolicy {
    /// Merges the table entry for `position` with `overrides`.
    ///
    /// Returns `None` when the merged configuration is explicitly hidden;
    /// that is a normal outcome, not an error.
    #[must_use]
    pub fn resolve(position: &str, overrides: &OptionValue) -> Option<LabelDescriptor> {
        let mut merged = LabelPosition::parse(position).base_options();
        if matches!(overrides, OptionValue::Object(_)) {
            merged.merge_from(overrides);
        }
        let OptionValue::Object(mut merged) = merged else {
            return None;
        };

        let visible = merged
            .shift_remove("visible")
            .and_then(|value| value.as_bool())
            .unwrap_or(true);
        if !visible {
            return None;
        }

        let offset = merged
            .shift_remove("offset")
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        let style = match merged.shift_remove("style") {
            Some(OptionValue::Object(style)) => style,
            _ => OptionMap::new(),
        };
        let fields = merged
            .shift_remove("fields")
            .and_then(|value| {
                value.as_array().map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_owned))
                        .collect()
                })
            })
            .unwrap_or_default();
        let label_type = merged
            .shift_remove("labelType")
            .and_then(|value| value.as_str().map(str::to_owned));
        let position = merged
            .shift_remove("position")
            .and_then(|value| value.as_str().map(str::to_owned))
            .or_else(|| (!position.is_empty()).then(|| position.to_owned()));

        Some(LabelDescriptor {
            visible,
            offset,
            style,
            fields,
            label_type,
            position,
            extra: merged,
        })
    }
}

/// Label component produced by the component factory and attached to a
/// geometry binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelHandle {
    pub component: String,
    pub descriptor: LabelDescriptor,
}
