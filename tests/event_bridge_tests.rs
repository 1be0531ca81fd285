use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chart_plan::api::{ColumnConfig, PlotConfig, ScatterConfig};
use chart_plan::core::{Callback, Datum, OptionValue};
use chart_plan::interaction::{
    EngineEvent, EventBridge, EventContext, EventMapping, SemanticEvent, semantic_event_name,
};
use chart_plan::plots::column::{COLUMN_EVENTS, COLUMN_GEOMETRY_NAMES};
use chart_plan::plots::{ColumnPlot, ScatterPlot};
use chart_plan::render::NullRenderer;
use chart_plan::PlotLayer;
use serde_json::json;

fn datum(value: serde_json::Value) -> Datum {
    value.as_object().cloned().expect("object datum")
}

fn recording_callback() -> (Callback, Arc<Mutex<Vec<OptionValue>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback = Callback::new(move |args| {
        sink.lock()
            .expect("sink lock")
            .extend(args.iter().cloned());
        OptionValue::Null
    });
    (callback, seen)
}

#[test]
fn geometry_targets_take_the_semantic_name() {
    assert_eq!(
        semantic_event_name(&COLUMN_GEOMETRY_NAMES, "interval:click"),
        "column:click"
    );
    assert_eq!(
        semantic_event_name(&COLUMN_GEOMETRY_NAMES, "plot:mousemove"),
        "plot:mousemove"
    );
    assert_eq!(
        semantic_event_name(&COLUMN_GEOMETRY_NAMES, "axis-label:click"),
        "axis-label:click"
    );
    assert_eq!(semantic_event_name(&COLUMN_GEOMETRY_NAMES, "ready"), "ready");
}

#[test]
fn column_click_reaches_registered_handler_with_datum() {
    let (on_click, seen) = recording_callback();
    let config = ColumnConfig::new("x", "y").with_event("onColumnClick", on_click);
    let mut layer = PlotLayer::new(
        Arc::new(ColumnPlot),
        NullRenderer::default(),
        PlotConfig::from(config),
    )
    .expect("layer");
    layer.render().expect("render");

    let event = EngineEvent::new("interval:click", 12.0, 34.0)
        .with_datum(datum(json!({ "x": "a", "y": 1 })));
    let delivered = layer.dispatch_event(&event);

    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].name, "column:click");
    assert_eq!(delivered[0].handler_key, "onColumnClick");
    assert_eq!(delivered[0].plot_type, "column");

    let seen = seen.lock().expect("seen lock");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].pointer("datum.x"), Some(&OptionValue::from("a")));
    assert_eq!(seen[0].get("handlerKey"), Some(&OptionValue::from("onColumnClick")));
    assert_eq!(seen[0].get("x"), Some(&OptionValue::Number(12.0)));
}

#[test]
fn events_without_handlers_are_not_delivered() {
    let (on_click, seen) = recording_callback();
    let config = ScatterConfig::new("x", "y").with_event("onPointClick", on_click);
    let mut layer = PlotLayer::new(
        Arc::new(ScatterPlot),
        NullRenderer::default(),
        PlotConfig::from(config),
    )
    .expect("layer");
    layer.render().expect("render");

    assert!(layer.dispatch_event(&EngineEvent::new("point:dblclick", 0.0, 0.0)).is_empty());
    assert!(layer.dispatch_event(&EngineEvent::new("interval:click", 0.0, 0.0)).is_empty());
    assert_eq!(layer.dispatch_event(&EngineEvent::new("point:click", 0.0, 0.0)).len(), 1);
    assert_eq!(seen.lock().expect("seen lock").len(), 1);
}

#[test]
fn unknown_keys_and_non_callbacks_are_ignored() {
    let (on_click, _seen) = recording_callback();
    let mut events = OptionValue::object();
    events.set_path("onColumnClick", on_click.into());
    events.set_path("onBarClick", Callback::new(|_| OptionValue::Null).into());
    events.set_path("onPlotClick", OptionValue::from("not a function"));

    let bindings = EventBridge::parse(
        "column",
        COLUMN_EVENTS,
        &COLUMN_GEOMETRY_NAMES,
        Some(&events),
    );

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.handler_keys().collect::<Vec<_>>(), ["onColumnClick"]);
}

#[test]
fn missing_events_option_yields_no_bindings() {
    let bindings = EventBridge::parse("column", COLUMN_EVENTS, &COLUMN_GEOMETRY_NAMES, None);

    assert!(bindings.is_empty());
}

#[test]
fn custom_payload_shaper_is_applied() {
    fn without_datum(event: &EngineEvent, context: EventContext<'_>) -> SemanticEvent {
        SemanticEvent {
            name: context.semantic_name.to_owned(),
            handler_key: context.handler_key,
            plot_type: context.plot_type.to_owned(),
            x: event.x.round(),
            y: event.y.round(),
            datum: None,
        }
    }
    static TABLE: [EventMapping; 1] =
        [EventMapping::new("onColumnHover", "interval:mousemove").with_shape(without_datum)];

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut events = OptionValue::object();
    events.set_path(
        "onColumnHover",
        Callback::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            OptionValue::Null
        })
        .into(),
    );

    let bindings = EventBridge::parse("column", &TABLE, &COLUMN_GEOMETRY_NAMES, Some(&events));
    let event = EngineEvent::new("interval:mousemove", 1.4, 2.6)
        .with_datum(datum(json!({ "x": "a" })));
    let delivered = bindings.dispatch(&event);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(delivered[0].name, "column:mousemove");
    assert_eq!(delivered[0].x, 1.0);
    assert_eq!(delivered[0].y, 3.0);
    assert_eq!(delivered[0].datum, None);
}

#[test]
fn event_target_is_the_prefix() {
    assert_eq!(EngineEvent::new("label:click", 0.0, 0.0).target(), "label");
    assert_eq!(EngineEvent::new("ready", 0.0, 0.0).target(), "ready");
}
