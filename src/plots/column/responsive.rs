use std::sync::OnceLock;

use serde_json::Value;

use crate::api::{ResponsiveContext, ResponsiveRule, ResponsiveRuleSet, ResponsiveStage};
use crate::core::Datum;
use crate::error::PlotResult;
use crate::render::RenderedScene;

const TICK_SPACING_PX: f64 = 40.0;
const MIN_TICK_COUNT: u32 = 2;
const MAX_TICK_COUNT: u32 = 8;
const CHAR_WIDTH_PX: f64 = 7.0;

/// Column rules, built once and shared by every column layer.
#[must_use]
pub fn column_responsive_rules() -> &'static ResponsiveRuleSet {
    static RULES: OnceLock<ResponsiveRuleSet> = OnceLock::new();
    RULES.get_or_init(|| {
        ResponsiveRuleSet::new()
            .with_rule(ResponsiveRule::new(
                "yAxisTickCount",
                ResponsiveStage::PreRender,
                y_axis_tick_count,
            ))
            .with_rule(ResponsiveRule::new(
                "xAxisLabelDensity",
                ResponsiveStage::AfterRender,
                x_axis_label_density,
            ))
            .with_rule(ResponsiveRule::new(
                "columnLabelFit",
                ResponsiveStage::AfterRender,
                column_label_fit,
            ))
    })
}

/// Rough pixel width of `text` at the default label font.
#[must_use]
pub fn estimate_text_width(text: &str) -> f64 {
    text.chars().count() as f64 * CHAR_WIDTH_PX
}

fn y_axis_tick_count(context: &mut ResponsiveContext<'_>) -> PlotResult<()> {
    let by_height = (f64::from(context.viewport.height) / TICK_SPACING_PX).floor() as u32;
    let tick_count = by_height.clamp(MIN_TICK_COUNT, MAX_TICK_COUNT);
    context.options.set("yAxis.tickCount", tick_count);
    Ok(())
}

fn x_axis_label_density(context: &mut ResponsiveContext<'_>) -> PlotResult<()> {
    let Some(scene) = context.scene else {
        return Ok(());
    };
    let x_field = context.options.require_str("xField")?;
    let widest = widest_text(context.data, x_field);
    let crowded = widest > band_width(scene);
    context.options.set("xAxis.label.autoRotate", crowded);
    context.options.set("xAxis.label.autoHide", crowded);
    Ok(())
}

fn column_label_fit(context: &mut ResponsiveContext<'_>) -> PlotResult<()> {
    let Some(scene) = context.scene else {
        return Ok(());
    };
    let y_field = context.options.require_str("yField")?;
    let widest = widest_text(context.data, y_field);
    let column_width = scene
        .elements
        .iter()
        .map(|element| element.bbox.width())
        .fold(f64::INFINITY, f64::min);
    let fits = column_width.is_finite() && widest <= column_width;
    context.options.set("label.adjustPosition", !fits);
    Ok(())
}

/// Distance between adjacent element centers, or the whole width for a
/// single element.
fn band_width(scene: &RenderedScene) -> f64 {
    match scene.elements.as_slice() {
        [first, second, ..] => (second.bbox.center_x() - first.bbox.center_x()).abs(),
        _ => f64::from(scene.viewport.width),
    }
}

fn widest_text(data: &[Datum], field: &str) -> f64 {
    data.iter()
        .filter_map(|datum| datum.get(field))
        .map(|value| match value {
            Value::String(text) => estimate_text_width(text),
            other => estimate_text_width(&other.to_string()),
        })
        .fold(0.0, f64::max)
}
