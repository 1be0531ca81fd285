use std::sync::Arc;

use chart_plan::api::{PlotConfig, PlotType};
use chart_plan::core::{GeometryNameMap, OptionValue};
use chart_plan::plots::{ColumnPlot, ScatterPlot};
use chart_plan::render::NullRenderer;
use chart_plan::{PlotError, PlotTypeRegistry};
use serde_json::json;

static WATERFALL_NAMES: GeometryNameMap =
    GeometryNameMap::new(&[("waterfall", "interval")], &[("interval", "waterfall")]);

struct WaterfallPlot;

impl PlotType for WaterfallPlot {
    fn name(&self) -> &'static str {
        "waterfall"
    }

    fn geometry_names(&self) -> &'static GeometryNameMap {
        &WATERFALL_NAMES
    }

    fn default_options(&self) -> OptionValue {
        OptionValue::from(json!({ "label": { "visible": true, "position": "middle" } }))
    }

    fn geometry_variant(&self) -> &'static str {
        "main"
    }
}

// Maps its own name to nothing the engine knows.
static ORPHAN_NAMES: GeometryNameMap = GeometryNameMap::new(&[], &[]);

struct OrphanPlot;

impl PlotType for OrphanPlot {
    fn name(&self) -> &'static str {
        "orphan"
    }

    fn geometry_names(&self) -> &'static GeometryNameMap {
        &ORPHAN_NAMES
    }

    fn default_options(&self) -> OptionValue {
        OptionValue::object()
    }

    fn geometry_variant(&self) -> &'static str {
        "main"
    }
}

static TREND_NAMES: GeometryNameMap =
    GeometryNameMap::new(&[("trend", "line")], &[("line", "trend")]);

struct TrendPlot;

impl PlotType for TrendPlot {
    fn name(&self) -> &'static str {
        "trend"
    }

    fn geometry_names(&self) -> &'static GeometryNameMap {
        &TREND_NAMES
    }

    fn default_options(&self) -> OptionValue {
        OptionValue::object()
    }

    fn geometry_variant(&self) -> &'static str {
        "main"
    }
}

fn xy_config() -> PlotConfig {
    PlotConfig::new(OptionValue::from(json!({ "xField": "x", "yField": "y" })))
}

#[test]
fn builtin_registry_lists_column_and_scatter() {
    let registry = PlotTypeRegistry::builtin();

    assert_eq!(registry.names().collect::<Vec<_>>(), ["column", "scatter"]);
    assert!(registry.contains("column"));
    assert!(registry.get("pie").is_none());
    assert!(std::ptr::eq(registry, PlotTypeRegistry::builtin()));
}

#[test]
fn disabled_animation_holds_for_every_builtin_plot_type() {
    let registry = PlotTypeRegistry::builtin();
    for name in registry.names() {
        let config = PlotConfig::new(OptionValue::from(json!({
            "xField": "x",
            "yField": "y",
            "animation": false
        })))
        .with_data(vec![
            json!({ "x": 1, "y": 2 }).as_object().cloned().expect("row"),
            json!({ "x": 2, "y": 4 }).as_object().cloned().expect("row"),
        ]);
        let mut layer = registry
            .create(name, NullRenderer::default(), config)
            .expect("layer");
        layer.render().expect("render");

        let geometry = layer.geometry().expect("geometry");
        assert_eq!(geometry.animate, Some(false), "{name} kept motion");
        assert!(!geometry.is_animated());
    }
}

#[test]
fn unknown_plot_type_is_an_error() {
    let err = PlotTypeRegistry::builtin()
        .create("pie", NullRenderer::default(), xy_config())
        .expect_err("pie is not registered");

    assert!(matches!(err, PlotError::UnknownPlotType(ref name) if name == "pie"));
}

#[test]
fn custom_plot_type_runs_the_shared_pipeline() {
    let mut registry = PlotTypeRegistry::with_builtin_plots();
    let previous = registry
        .register("waterfall", Arc::new(WaterfallPlot))
        .expect("register");
    assert!(previous.is_none());

    let mut layer = registry
        .create("waterfall", NullRenderer::default(), xy_config())
        .expect("create");
    layer.render().expect("render");

    let handle = layer
        .geometry()
        .expect("geometry")
        .label
        .handle()
        .expect("label bound");
    assert_eq!(handle.descriptor.label_type.as_deref(), Some("label"));
    assert_eq!(handle.descriptor.position.as_deref(), Some("middle"));
    assert_eq!(registry.len(), 3);
}

#[test]
fn duplicate_registration_replaces_and_returns_previous() {
    let mut registry = PlotTypeRegistry::with_builtin_plots();

    let previous = registry
        .register("column", Arc::new(ScatterPlot))
        .expect("register")
        .expect("column was registered");

    assert_eq!(previous.name(), "column");
    assert_eq!(registry.get("column").expect("entry").name(), "scatter");
    assert_eq!(registry.len(), 2);
}

#[test]
fn empty_name_is_rejected() {
    let mut registry = PlotTypeRegistry::new();

    let result = registry.register("", Arc::new(ColumnPlot));
    assert!(matches!(result, Err(PlotError::InvalidOption { .. })));
    assert!(registry.is_empty());
}

#[test]
fn unregister_removes_entry() {
    let mut registry = PlotTypeRegistry::with_builtin_plots();

    assert!(registry.unregister("scatter"));
    assert!(!registry.unregister("scatter"));
    assert_eq!(registry.names().collect::<Vec<_>>(), ["column"]);
}

#[test]
fn unmapped_geometry_fails_add_geometry() {
    let mut registry = PlotTypeRegistry::new();
    registry
        .register("orphan", Arc::new(OrphanPlot))
        .expect("register");
    let mut layer = registry
        .create("orphan", NullRenderer::default(), xy_config())
        .expect("create");

    let err = layer.render().expect_err("no geometry mapping");
    assert!(matches!(
        err,
        PlotError::UnknownGeometry { ref plot_type, ref name }
            if plot_type == "orphan" && name == "orphan"
    ));
}

#[test]
fn engine_kind_without_a_primitive_fails_add_geometry() {
    let mut registry = PlotTypeRegistry::new();
    registry.register("trend", Arc::new(TrendPlot)).expect("register");
    let mut layer = registry
        .create("trend", NullRenderer::default(), xy_config())
        .expect("create");

    let err = layer.render().expect_err("line is not a bound primitive");
    assert!(matches!(
        err,
        PlotError::UnknownGeometry { ref plot_type, ref name }
            if plot_type == "trend" && name == "line"
    ));
}
