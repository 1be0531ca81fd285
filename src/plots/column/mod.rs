//! Column plot: one interval per category, with an optional conversion-tag
//! overlay between adjacent columns.

mod events;
mod responsive;

pub use events::COLUMN_EVENTS;
pub use responsive::{column_responsive_rules, estimate_text_width};

use serde_json::json;

use crate::api::{PlotType, ResponsiveRuleSet};
use crate::core::{
    GeometryBinding, GeometryNameMap, OptionValue, ResolvedOptions, ScaleDescriptor,
    ScaleResolver, ScaleSet, ScaleType,
};
use crate::error::PlotResult;
use crate::extensions::{ConversionTag, ConversionTagSpec};
use crate::interaction::EventMapping;
use crate::render::RenderedScene;

pub static COLUMN_GEOMETRY_NAMES: GeometryNameMap =
    GeometryNameMap::new(&[("column", "interval")], &[("interval", "column")]);

/// Column shapes accepted through the `type` option.
const COLUMN_SHAPES: [&str; 3] = ["rect", "triangle", "round"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnPlot;

impl PlotType for ColumnPlot {
    fn name(&self) -> &'static str {
        "column"
    }

    fn geometry_names(&self) -> &'static GeometryNameMap {
        &COLUMN_GEOMETRY_NAMES
    }

    fn default_options(&self) -> OptionValue {
        OptionValue::from(json!({
            "xAxis": {
                "visible": true,
                "tickLine": { "visible": false },
                "title": { "visible": true }
            },
            "yAxis": {
                "title": { "visible": true },
                "label": { "visible": true },
                "grid": { "visible": true }
            },
            "tooltip": {
                "visible": true,
                "shared": true,
                "crosshairs": { "type": "rect" }
            },
            "label": {
                "visible": false,
                "position": "top",
                "adjustColor": true
            },
            "legend": { "visible": true, "position": "top-left" },
            "conversionTag": { "visible": false }
        }))
    }

    fn geometry_variant(&self) -> &'static str {
        "main"
    }

    fn label_type(&self) -> &'static str {
        "columnLabel"
    }

    fn event_table(&self) -> &'static [EventMapping] {
        COLUMN_EVENTS
    }

    fn responsive_rules(&self) -> &'static ResponsiveRuleSet {
        column_responsive_rules()
    }

    /// Categorical x baseline.
    fn scale(&self, options: &ResolvedOptions) -> PlotResult<ScaleSet> {
        ScaleResolver::resolve_cartesian(options, ScaleDescriptor::of_type(ScaleType::Cat))
    }

    fn overlay_enabled(&self, options: &ResolvedOptions) -> bool {
        options.bool_at("conversionTag.visible") == Some(true)
    }

    fn adjust_geometry(
        &self,
        geometry: &mut GeometryBinding,
        options: &ResolvedOptions,
    ) -> PlotResult<()> {
        if let Some(shape) = options
            .str_at("type")
            .filter(|shape| COLUMN_SHAPES.contains(shape))
        {
            geometry.shape = Some(shape.to_owned());
        }
        Ok(())
    }

    fn attach_overlay(
        &self,
        scene: &RenderedScene,
        options: &ResolvedOptions,
    ) -> Option<ConversionTag> {
        if !self.overlay_enabled(options) {
            return None;
        }
        let field = options.str_at("yField")?;
        let animation = options.bool_at("animation") != Some(false);
        let overrides = options.get("conversionTag").cloned().unwrap_or_default();
        let spec = ConversionTagSpec::resolve(field, true, animation, &overrides);
        ConversionTag::attach(scene, spec)
    }
}
