use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use chart_plan::api::{
    PlotConfig, PlotType, ResponsiveContext, ResponsiveEngine, ResponsiveRule, ResponsiveRuleSet,
    ResponsiveStage,
};
use chart_plan::core::{Datum, GeometryNameMap, OptionValue, ResolvedOptions, Viewport};
use chart_plan::error::{PlotError, PlotResult};
use chart_plan::plots::ColumnPlot;
use chart_plan::render::NullRenderer;
use chart_plan::PlotLayer;
use serde_json::{Value, json};

static SPY_NAMES: GeometryNameMap =
    GeometryNameMap::new(&[("spy", "interval")], &[("interval", "spy")]);

static GATED_CALLS: AtomicUsize = AtomicUsize::new(0);
static ENABLED_CALLS: AtomicUsize = AtomicUsize::new(0);

fn count_gated(_context: &mut ResponsiveContext<'_>) -> PlotResult<()> {
    GATED_CALLS.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

fn count_enabled(_context: &mut ResponsiveContext<'_>) -> PlotResult<()> {
    ENABLED_CALLS.fetch_add(1, Ordering::SeqCst);
    Ok(())
}

fn gated_rules() -> &'static ResponsiveRuleSet {
    static RULES: OnceLock<ResponsiveRuleSet> = OnceLock::new();
    RULES.get_or_init(|| {
        ResponsiveRuleSet::new()
            .with_rule(ResponsiveRule::new("spyPre", ResponsiveStage::PreRender, count_gated))
            .with_rule(ResponsiveRule::new("spyAfter", ResponsiveStage::AfterRender, count_gated))
    })
}

fn enabled_rules() -> &'static ResponsiveRuleSet {
    static RULES: OnceLock<ResponsiveRuleSet> = OnceLock::new();
    RULES.get_or_init(|| {
        ResponsiveRuleSet::new()
            .with_rule(ResponsiveRule::new("spyPre", ResponsiveStage::PreRender, count_enabled))
            .with_rule(ResponsiveRule::new("spyAfter", ResponsiveStage::AfterRender, count_enabled))
    })
}

struct SpyPlot {
    rules: fn() -> &'static ResponsiveRuleSet,
}

impl PlotType for SpyPlot {
    fn name(&self) -> &'static str {
        "spy"
    }

    fn geometry_names(&self) -> &'static GeometryNameMap {
        &SPY_NAMES
    }

    fn default_options(&self) -> OptionValue {
        OptionValue::object()
    }

    fn geometry_variant(&self) -> &'static str {
        "main"
    }

    fn responsive_rules(&self) -> &'static ResponsiveRuleSet {
        (self.rules)()
    }
}

fn rows(value: Value) -> Vec<Datum> {
    value
        .as_array()
        .expect("array of rows")
        .iter()
        .map(|row| row.as_object().cloned().expect("row object"))
        .collect()
}

fn layer_with(plot: Arc<dyn PlotType>, options: Value, data: Vec<Datum>) -> PlotLayer<NullRenderer> {
    let config = PlotConfig::new(OptionValue::from(options)).with_data(data);
    PlotLayer::new(plot, NullRenderer::default(), config).expect("layer")
}

#[test]
fn auto_padding_skips_responsive_rules_at_both_checkpoints() {
    let plot = Arc::new(SpyPlot { rules: gated_rules });
    let mut layer = layer_with(
        plot,
        json!({ "xField": "x", "yField": "y", "responsive": true, "padding": "auto" }),
        Vec::new(),
    );

    layer.render().expect("render");
    layer.resize(Viewport::new(200, 200)).expect("resize");

    assert_eq!(GATED_CALLS.load(Ordering::SeqCst), 0);
    assert_eq!(
        layer.apply_responsive(ResponsiveStage::AfterRender).expect("apply"),
        0
    );
}

#[test]
fn explicit_padding_runs_rules_in_stage_order() {
    let plot = Arc::new(SpyPlot { rules: enabled_rules });
    let mut layer = layer_with(
        plot,
        json!({ "xField": "x", "yField": "y", "responsive": true, "padding": [20, 20, 20, 20] }),
        Vec::new(),
    );

    layer.render().expect("render");

    assert_eq!(ENABLED_CALLS.load(Ordering::SeqCst), 2);
}

#[test]
fn failing_rule_is_rolled_back_and_later_rules_still_run() {
    fn poison(context: &mut ResponsiveContext<'_>) -> PlotResult<()> {
        context.options.set("poisoned", true);
        Err(PlotError::Collaborator("measurement unavailable".to_owned()))
    }
    fn mark(context: &mut ResponsiveContext<'_>) -> PlotResult<()> {
        context.options.set("marked", true);
        Ok(())
    }

    let rules = ResponsiveRuleSet::new()
        .with_rule(ResponsiveRule::new("poison", ResponsiveStage::PreRender, poison))
        .with_rule(ResponsiveRule::new("mark", ResponsiveStage::PreRender, mark));
    let mut options = ResolvedOptions::resolve(
        &OptionValue::object(),
        &OptionValue::Null,
        &OptionValue::from(json!({ "xField": "x" })),
    )
    .expect("resolve");
    let mut context = ResponsiveContext {
        options: &mut options,
        viewport: Viewport::new(400, 300),
        data: &[],
        scene: None,
    };

    let completed = ResponsiveEngine::apply(ResponsiveStage::PreRender, &rules, &mut context);

    assert_eq!(completed, 1);
    assert!(!options.contains("poisoned"));
    assert_eq!(options.bool_at("marked"), Some(true));
}

#[test]
fn after_render_rules_require_a_scene() {
    let mut layer = layer_with(
        Arc::new(ColumnPlot),
        json!({ "xField": "x", "yField": "y", "responsive": true, "padding": 16 }),
        Vec::new(),
    );

    let err = layer
        .apply_responsive(ResponsiveStage::AfterRender)
        .expect_err("not rendered");
    assert!(matches!(
        err,
        PlotError::InvalidStage { requested: "afterRender", required: "render" }
    ));
}

#[test]
fn y_axis_tick_count_follows_height_and_feeds_the_scale() {
    let data = rows(json!([{ "x": "a", "y": 1 }, { "x": "b", "y": 2 }]));
    let mut layer = layer_with(
        Arc::new(ColumnPlot),
        json!({ "xField": "x", "yField": "y", "responsive": true, "padding": 16 }),
        data,
    );

    layer.render().expect("render");
    assert_eq!(layer.options().f64_at("yAxis.tickCount"), Some(7.0));
    assert_eq!(layer.scales()["y"].tick_count, Some(7));

    layer.resize(Viewport::new(400, 100)).expect("resize");
    assert_eq!(layer.scales()["y"].tick_count, Some(2));

    layer.resize(Viewport::new(400, 1000)).expect("resize");
    assert_eq!(layer.scales()["y"].tick_count, Some(8));
}

#[test]
fn long_categories_enable_label_rotation() {
    let data = rows(json!([
        { "x": "an unusually long category", "y": 3 },
        { "x": "b", "y": 2 },
        { "x": "c", "y": 1 }
    ]));
    let mut layer = layer_with(
        Arc::new(ColumnPlot),
        json!({ "xField": "x", "yField": "y", "responsive": true, "padding": 16 }),
        data,
    );

    layer.render().expect("render");

    assert_eq!(layer.options().bool_at("xAxis.label.autoRotate"), Some(true));
    assert_eq!(layer.options().bool_at("xAxis.label.autoHide"), Some(true));
    assert_eq!(layer.options().bool_at("label.adjustPosition"), Some(false));
}

#[test]
fn after_render_rules_are_idempotent() {
    let data = rows(json!([{ "x": "a", "y": 10 }, { "x": "b", "y": 20 }]));
    let mut layer = layer_with(
        Arc::new(ColumnPlot),
        json!({ "xField": "x", "yField": "y", "responsive": true, "padding": [8, 8, 8, 8] }),
        data,
    );
    layer.render().expect("render");
    let after_first_pass = layer.options().clone();

    let completed = layer
        .apply_responsive(ResponsiveStage::AfterRender)
        .expect("apply");

    assert_eq!(completed, 2);
    assert_eq!(layer.options(), &after_first_pass);
    assert_eq!(layer.options().bool_at("xAxis.label.autoRotate"), Some(false));
}

#[test]
fn after_render_changes_reach_the_bound_label() {
    let data = rows(json!([
        { "x": "a", "y": 123456789012_i64 },
        { "x": "b", "y": 2 },
        { "x": "c", "y": 1 }
    ]));
    let mut layer = layer_with(
        Arc::new(ColumnPlot),
        json!({
            "xField": "x",
            "yField": "y",
            "responsive": true,
            "padding": 16,
            "label": { "visible": true }
        }),
        data,
    );

    layer.render().expect("render");

    assert_eq!(layer.options().bool_at("label.adjustPosition"), Some(true));
    let label = layer
        .geometry()
        .and_then(|geometry| geometry.label.handle())
        .expect("label bound");
    assert_eq!(
        label.descriptor.extra.get("adjustPosition"),
        Some(&OptionValue::Bool(true))
    );
    assert_eq!(layer.renderer().render_count, 2);
}
