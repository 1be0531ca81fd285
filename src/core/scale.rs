use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::options::{OptionValue, ResolvedOptions};
use crate::error::PlotResult;

/// Scale family understood by the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleType {
    Cat,
    TimeCat,
    Time,
    Linear,
    Log,
    Pow,
}

impl ScaleType {
    /// Parses an axis `type` string. `value` is accepted as an alias of
    /// `linear`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "cat" => Some(Self::Cat),
            "timeCat" => Some(Self::TimeCat),
            "time" => Some(Self::Time),
            "linear" | "value" => Some(Self::Linear),
            "log" => Some(Self::Log),
            "pow" => Some(Self::Pow),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::TimeCat => "timeCat",
            Self::Time => "time",
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Pow => "pow",
        }
    }

    #[must_use]
    pub fn is_discrete(self) -> bool {
        matches!(self, Self::Cat | Self::TimeCat)
    }
}

/// Per-field scale record handed to the engine.
///
/// Every field is optional: an empty descriptor means "let the engine infer".
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleDescriptor {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_interval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<OptionValue>,
}

impl ScaleDescriptor {
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn of_type(scale_type: ScaleType) -> Self {
        Self {
            scale_type: Some(scale_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Scale descriptors keyed by field name, in resolution order.
pub type ScaleSet = IndexMap<String, ScaleDescriptor>;

/// Copies scale-affecting keys from an axis configuration into `descriptor`.
///
/// Keys absent from `axis` leave the descriptor untouched; the axis
/// configuration itself is only read.
pub fn extract_scale(descriptor: &mut ScaleDescriptor, axis: &OptionValue) {
    let Some(axis) = axis.as_object() else {
        return;
    };

    if let Some(value) = axis.get("type") {
        match value.as_str().and_then(ScaleType::parse) {
            Some(scale_type) => descriptor.scale_type = Some(scale_type),
            None => warn!(value = ?value, "ignoring unrecognized axis scale type"),
        }
    }
    if let Some(min) = axis.get("min").and_then(OptionValue::as_f64) {
        descriptor.min = Some(min);
    }
    if let Some(max) = axis.get("max").and_then(OptionValue::as_f64) {
        descriptor.max = Some(max);
    }
    if let Some(min_limit) = axis.get("minLimit").and_then(OptionValue::as_f64) {
        descriptor.min_limit = Some(min_limit);
    }
    if let Some(max_limit) = axis.get("maxLimit").and_then(OptionValue::as_f64) {
        descriptor.max_limit = Some(max_limit);
    }
    if let Some(nice) = axis.get("nice").and_then(OptionValue::as_bool) {
        descriptor.nice = Some(nice);
    }
    if let Some(count) = axis.get("tickCount").and_then(OptionValue::as_f64) {
        if count.is_finite() && count >= 0.0 {
            descriptor.tick_count = Some(count.round() as u32);
        } else {
            warn!(tick_count = count, "ignoring invalid axis tick count");
        }
    }
    if let Some(interval) = axis.get("tickInterval").and_then(OptionValue::as_f64) {
        descriptor.tick_interval = Some(interval);
    }
    if let Some(mask) = axis.get("mask").and_then(OptionValue::as_str) {
        descriptor.mask = Some(mask.to_owned());
    }
    if let Some(alias) = axis.get("alias").and_then(OptionValue::as_str) {
        descriptor.alias = Some(alias.to_owned());
    }
    if let Some(formatter) = axis.get("formatter").filter(|value| !value.is_null()) {
        descriptor.formatter = Some(formatter.clone());
    }
}

/// One field the resolver must describe, with its starting descriptor and
/// the option key of the axis that may constrain it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleField {
    pub field: String,
    pub baseline: ScaleDescriptor,
    pub axis_key: Option<&'static str>,
}

impl ScaleField {
    #[must_use]
    pub fn new(field: impl Into<String>, baseline: ScaleDescriptor) -> Self {
        Self {
            field: field.into(),
            baseline,
            axis_key: None,
        }
    }

    #[must_use]
    pub fn with_axis(mut self, axis_key: &'static str) -> Self {
        self.axis_key = Some(axis_key);
        self
    }
}

/// Stateless resolver from field list + options to a `ScaleSet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleResolver;

impl ScaleResolver {
    /// Produces exactly one descriptor per field. When a field appears twice
    /// the first baseline wins and later axis configs still apply.
    #[must_use]
    pub fn resolve(fields: &[ScaleField], options: &ResolvedOptions) -> ScaleSet {
        let mut scales = ScaleSet::with_capacity(fields.len());
        for entry in fields {
            let descriptor = scales
                .entry(entry.field.clone())
                .or_insert_with(|| entry.baseline.clone());
            if let Some(axis) = entry.axis_key.and_then(|key| options.get(key)) {
                extract_scale(descriptor, axis);
            }
        }
        scales
    }

    /// Cartesian resolution: `xField` with `x_baseline` constrained by
    /// `xAxis`, `yField` unconstrained except by `yAxis`, and a discrete
    /// descriptor for a non-positional `colorField`.
    pub fn resolve_cartesian(
        options: &ResolvedOptions,
        x_baseline: ScaleDescriptor,
    ) -> PlotResult<ScaleSet> {
        let x_field = options.require_str("xField")?;
        let y_field = options.require_str("yField")?;

        let mut fields = vec![
            ScaleField::new(x_field, x_baseline).with_axis("xAxis"),
            ScaleField::new(y_field, ScaleDescriptor::unconstrained()).with_axis("yAxis"),
        ];
        if let Some(color_field) = options.str_at("colorField") {
            fields.push(ScaleField::new(
                color_field,
                ScaleDescriptor::of_type(ScaleType::Cat),
            ));
        }
        Ok(Self::resolve(&fields, options))
    }
}
