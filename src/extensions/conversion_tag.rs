use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::core::{BBox, Callback, OptionMap, OptionValue};
use crate::render::{RenderedElement, RenderedScene};

/// Resolved conversion-tag configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionTagSpec {
    pub visible: bool,
    pub field: String,
    /// `true` when elements are laid out along x (columns) and tags sit in
    /// the horizontal gaps between them.
    pub transpose: bool,
    pub animation: bool,
    pub size: f64,
    pub spacing: f64,
    pub offset: f64,
    pub arrow_visible: bool,
    pub arrow_head_size: f64,
    pub arrow_style: OptionMap,
    pub value_visible: bool,
    pub value_style: OptionMap,
    #[serde(skip)]
    pub formatter: Option<Callback>,
}

impl ConversionTagSpec {
    fn default_options() -> OptionValue {
        OptionValue::from(json!({
            "visible": true,
            "size": 32,
            "spacing": 8,
            "offset": 0,
            "arrow": {
                "visible": true,
                "headSize": 12,
                "style": { "fill": "rgba(0, 0, 0, 0.05)" }
            },
            "value": {
                "visible": true,
                "style": { "fontSize": 12, "fill": "rgba(0, 0, 0, 0.85)" }
            }
        }))
    }

    /// Overlay defaults, then the layer-supplied parameters, then the
    /// caller's `conversionTag` overrides.
    #[must_use]
    pub fn resolve(field: &str, transpose: bool, animation: bool, overrides: &OptionValue) -> Self {
        let mut merged = Self::default_options();
        merged.merge_from(&OptionValue::from(json!({
            "field": field,
            "transpose": transpose,
            "animation": animation,
        })));
        if matches!(overrides, OptionValue::Object(_)) {
            merged.merge_from(overrides);
        }

        let flag = |path: &str, default: bool| {
            merged
                .pointer(path)
                .and_then(OptionValue::as_bool)
                .unwrap_or(default)
        };
        let number = |path: &str, default: f64| {
            merged
                .pointer(path)
                .and_then(OptionValue::as_f64)
                .unwrap_or(default)
        };
        let style = |path: &str| {
            merged
                .pointer(path)
                .and_then(OptionValue::as_object)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            visible: flag("visible", true),
            field: merged
                .pointer("field")
                .and_then(OptionValue::as_str)
                .unwrap_or(field)
                .to_owned(),
            transpose: flag("transpose", transpose),
            animation: flag("animation", animation),
            size: number("size", 32.0),
            spacing: number("spacing", 8.0),
            offset: number("offset", 0.0),
            arrow_visible: flag("arrow.visible", true),
            arrow_head_size: number("arrow.headSize", 12.0),
            arrow_style: style("arrow.style"),
            value_visible: flag("value.visible", true),
            value_style: style("value.style"),
            formatter: merged
                .pointer("value.formatter")
                .and_then(OptionValue::as_callback)
                .cloned(),
        }
    }
}

/// One tag between two adjacent elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionTagItem {
    pub from_index: usize,
    pub to_index: usize,
    pub text: Option<String>,
    /// Arrow body; `None` when hidden or when the gap is too narrow.
    pub arrow: Option<BBox>,
    pub text_x: f64,
    pub text_y: f64,
}

/// Conversion-rate overlay computed from a rendered scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionTag {
    pub spec: ConversionTagSpec,
    pub items: Vec<ConversionTagItem>,
}

impl ConversionTag {
    /// Builds the overlay from element positions. Returns `None` when the
    /// tag is hidden.
    #[must_use]
    pub fn attach(scene: &RenderedScene, spec: ConversionTagSpec) -> Option<Self> {
        if !spec.visible {
            return None;
        }

        let items: Vec<ConversionTagItem> = scene
            .elements
            .windows(2)
            .map(|pair| tag_between(&pair[0], &pair[1], &spec))
            .collect();
        debug!(
            field = %spec.field,
            transpose = spec.transpose,
            tags = items.len(),
            "attached conversion tag"
        );
        Some(Self { spec, items })
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.spec.field
    }
}

fn tag_between(
    prev: &RenderedElement,
    next: &RenderedElement,
    spec: &ConversionTagSpec,
) -> ConversionTagItem {
    let (gap_start, gap_end, cross_center) = if spec.transpose {
        // Shorter column has the larger top coordinate.
        let top = prev.bbox.min_y.max(next.bbox.min_y);
        let base = prev.bbox.max_y.max(next.bbox.max_y);
        (
            prev.bbox.max_x + spec.spacing,
            next.bbox.min_x - spec.spacing,
            (top + base) / 2.0 + spec.offset,
        )
    } else {
        let end = prev.bbox.max_x.min(next.bbox.max_x);
        let start = prev.bbox.min_x.min(next.bbox.min_x);
        (
            prev.bbox.max_y + spec.spacing,
            next.bbox.min_y - spec.spacing,
            (start + end) / 2.0 + spec.offset,
        )
    };

    let half = spec.size / 2.0;
    let arrow = (spec.arrow_visible && gap_end > gap_start).then(|| {
        if spec.transpose {
            BBox::new(gap_start, cross_center - half, gap_end, cross_center + half)
        } else {
            BBox::new(cross_center - half, gap_start, cross_center + half, gap_end)
        }
    });
    let along_center = (gap_start + gap_end) / 2.0;
    let (text_x, text_y) = if spec.transpose {
        (along_center, cross_center)
    } else {
        (cross_center, along_center)
    };

    ConversionTagItem {
        from_index: prev.index,
        to_index: next.index,
        text: spec
            .value_visible
            .then(|| conversion_text(prev, next, spec)),
        arrow,
        text_x,
        text_y,
    }
}

fn conversion_text(prev: &RenderedElement, next: &RenderedElement, spec: &ConversionTagSpec) -> String {
    let prev_value = prev.datum.get(&spec.field).and_then(Value::as_f64);
    let next_value = next.datum.get(&spec.field).and_then(Value::as_f64);

    if let Some(formatter) = &spec.formatter {
        let args = [
            prev_value.map_or(OptionValue::Null, OptionValue::Number),
            next_value.map_or(OptionValue::Null, OptionValue::Number),
        ];
        return match formatter.call(&args) {
            OptionValue::String(text) => text,
            other => other.to_json().to_string(),
        };
    }

    match (prev_value, next_value) {
        (Some(prev), Some(next)) if prev != 0.0 => format!("{:.2}%", 100.0 * next / prev),
        _ => "-".to_owned(),
    }
}
