use serde_json::Value;

use crate::core::{BBox, Datum, GeometryKind, LabelPosition, ScaleSet};
use crate::error::PlotResult;
use crate::render::{RenderPlan, RenderedElement, RenderedLabel, RenderedScene, SceneRenderer};

/// Band fraction used by intervals when no overlay reserved space.
const DEFAULT_INTERVAL_WIDTH_RATIO: f64 = 0.5;
const DEFAULT_POINT_SIZE_PX: f64 = 4.0;

/// Headless renderer used by tests and non-drawing consumers.
///
/// It lays elements out deterministically (bands for intervals, linear or
/// band positions for points) so overlays and responsive rules have real
/// positions to work with, and it validates the produced scene.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_element_count: usize,
    pub last_label_count: usize,
}

impl SceneRenderer for NullRenderer {
    fn render(&mut self, plan: &RenderPlan<'_>) -> PlotResult<RenderedScene> {
        let mut scene = RenderedScene::new(plan.viewport);
        let fields = &plan.geometry.position_fields;
        if let (Some(x_field), Some(y_field)) = (fields.first(), fields.get(1)) {
            scene.elements = match plan.geometry.kind {
                GeometryKind::Interval => layout_intervals(plan, y_field),
                GeometryKind::Point => layout_points(plan, x_field, y_field),
            };
        }
        if let Some(handle) = plan.geometry.label.handle() {
            let descriptor = &handle.descriptor;
            let position = LabelPosition::parse(descriptor.position.as_deref().unwrap_or("top"));
            for element in &scene.elements {
                let Some(text) = descriptor
                    .fields
                    .first()
                    .and_then(|field| element.datum.get(field))
                    .map(display_value)
                else {
                    continue;
                };
                let y = match position {
                    LabelPosition::Middle => element.bbox.center_y(),
                    LabelPosition::Bottom => element.bbox.max_y - descriptor.offset,
                    LabelPosition::Top | LabelPosition::Other(_) => {
                        element.bbox.min_y - descriptor.offset
                    }
                };
                scene.labels.push(RenderedLabel {
                    element_index: element.index,
                    text,
                    x: element.bbox.center_x(),
                    y,
                });
            }
        }

        scene.validate()?;
        self.render_count += 1;
        self.last_element_count = scene.elements.len();
        self.last_label_count = scene.labels.len();
        Ok(scene)
    }
}

fn layout_intervals(plan: &RenderPlan<'_>, y_field: &str) -> Vec<RenderedElement> {
    let width = f64::from(plan.viewport.width);
    let height = f64::from(plan.viewport.height);
    let count = plan.data.len();
    if count == 0 {
        return Vec::new();
    }

    let band = width / count as f64;
    let ratio = plan
        .geometry
        .width_ratio
        .unwrap_or(DEFAULT_INTERVAL_WIDTH_RATIO);
    let mut column_width = band * ratio;
    if let Some(max_width) = plan.geometry.max_width {
        column_width = column_width.min(max_width);
    }
    if let Some(min_width) = plan.geometry.min_width {
        column_width = column_width.max(min_width);
    }

    let (_, y_max) = value_domain(plan.data, y_field, plan.scales);
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    plan.data
        .iter()
        .enumerate()
        .map(|(index, datum)| {
            let value = numeric(datum, y_field).unwrap_or(0.0).max(0.0);
            let bar_height = (value / y_max).min(1.0) * height;
            let center = band * (index as f64 + 0.5);
            RenderedElement {
                index,
                datum: datum.clone(),
                bbox: BBox::new(
                    center - column_width / 2.0,
                    height - bar_height,
                    center + column_width / 2.0,
                    height,
                ),
            }
        })
        .collect()
}

fn layout_points(plan: &RenderPlan<'_>, x_field: &str, y_field: &str) -> Vec<RenderedElement> {
    let width = f64::from(plan.viewport.width);
    let height = f64::from(plan.viewport.height);
    let count = plan.data.len();
    if count == 0 {
        return Vec::new();
    }

    let discrete_x = plan
        .scales
        .get(x_field)
        .and_then(|scale| scale.scale_type)
        .is_some_and(|scale_type| scale_type.is_discrete())
        || plan.data.iter().any(|datum| numeric(datum, x_field).is_none());
    let (x_min, x_max) = value_domain(plan.data, x_field, plan.scales);
    let (y_min, y_max) = value_domain(plan.data, y_field, plan.scales);
    let radius = plan
        .geometry
        .size
        .as_ref()
        .and_then(|size| size.as_f64())
        .unwrap_or(DEFAULT_POINT_SIZE_PX);

    plan.data
        .iter()
        .enumerate()
        .map(|(index, datum)| {
            let x = if discrete_x {
                width / count as f64 * (index as f64 + 0.5)
            } else {
                normalize(numeric(datum, x_field).unwrap_or(x_min), x_min, x_max) * width
            };
            let y = height
                - normalize(numeric(datum, y_field).unwrap_or(y_min), y_min, y_max) * height;
            RenderedElement {
                index,
                datum: datum.clone(),
                bbox: BBox::new(x - radius, y - radius, x + radius, y + radius),
            }
        })
        .collect()
}

fn numeric(datum: &Datum, field: &str) -> Option<f64> {
    datum.get(field).and_then(Value::as_f64)
}

/// Zero-anchored data extent of `field`, overridden by explicit scale
/// `min`/`max`.
fn value_domain(data: &[Datum], field: &str, scales: &ScaleSet) -> (f64, f64) {
    let (data_min, data_max) = data
        .iter()
        .filter_map(|datum| numeric(datum, field))
        .fold((0.0_f64, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });
    let scale = scales.get(field);
    let min = scale.and_then(|scale| scale.min).unwrap_or(data_min);
    let max = scale.and_then(|scale| scale.max).unwrap_or(data_max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    (min, max)
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
