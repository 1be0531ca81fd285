use chart_plan::api::{
    AxisConfig, ColumnConfig, ConversionTagConfig, LabelConfig, Padding, PlotConfig, ScatterConfig,
};
use chart_plan::core::{Callback, OptionValue, Viewport};
use chart_plan::PlotError;
use serde_json::json;

#[test]
fn json_description_lifts_data_and_size() {
    let config = PlotConfig::from_json_str(
        r#"{
            "width": 800,
            "height": 600,
            "xField": "city",
            "yField": "sales",
            "label": { "visible": true },
            "data": [{ "city": "Lyon", "sales": 3 }, { "city": "Nice", "sales": 5 }]
        }"#,
    )
    .expect("parse");

    assert_eq!(config.viewport, Viewport::new(800, 600));
    assert_eq!(config.data.len(), 2);
    assert_eq!(config.data[1]["city"], "Nice");
    assert_eq!(config.options.get("data"), None);
    assert_eq!(config.options.get("width"), None);
    assert_eq!(config.options.pointer("label.visible"), Some(&OptionValue::Bool(true)));
}

#[test]
fn json_without_size_uses_default_viewport() {
    let config = PlotConfig::from_json_str(r#"{ "xField": "x", "yField": "y" }"#).expect("parse");

    assert_eq!(config.viewport, Viewport::default());
    assert!(config.data.is_empty());
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = PlotConfig::from_json_str("{ not json").expect_err("malformed");

    assert!(matches!(err, PlotError::Json(_)));
}

#[test]
fn non_object_json_root_is_rejected() {
    let err = PlotConfig::from_json_str("[1, 2]").expect_err("array root");

    assert!(matches!(err, PlotError::InvalidOption { ref path, .. } if path == "<root>"));
}

#[test]
fn non_object_rows_are_rejected_with_their_index() {
    let err = PlotConfig::from_json_str(r#"{ "data": [{ "x": 1 }, 7] }"#).expect_err("bad row");

    assert!(matches!(err, PlotError::InvalidOption { ref path, .. } if path == "data.1"));
}

#[test]
fn negative_size_is_rejected() {
    let err = PlotConfig::from_json_str(r#"{ "width": -5 }"#).expect_err("negative width");

    assert!(matches!(err, PlotError::InvalidOption { ref path, .. } if path == "width"));
}

#[test]
fn column_builder_emits_option_keys() {
    let options = ColumnConfig::new("x", "y")
        .with_responsive(true)
        .with_padding(Padding::Sides([10.0, 20.0, 10.0, 20.0]))
        .with_animation(false)
        .with_x_axis(AxisConfig::new().with_scale_type("cat").with_title_visible(false))
        .with_y_axis(AxisConfig::new().with_tick_count(4).with_nice(true))
        .with_label(LabelConfig::hidden())
        .with_conversion_tag(
            ConversionTagConfig::visible()
                .with_size(24.0)
                .with_arrow_visible(false)
                .with_value_visible(true),
        )
        .into_options();

    assert_eq!(
        options.to_json(),
        json!({
            "xField": "x",
            "yField": "y",
            "xAxis": { "type": "cat", "title": { "visible": false } },
            "yAxis": { "nice": true, "tickCount": 4.0 },
            "label": { "visible": false },
            "responsive": true,
            "padding": [10.0, 20.0, 10.0, 20.0],
            "animation": false,
            "conversionTag": {
                "visible": true,
                "size": 24.0,
                "arrow": { "visible": false },
                "value": { "visible": true }
            }
        })
    );
}

#[test]
fn scatter_builder_emits_point_keys() {
    let formatter = Callback::new(|_| OptionValue::from("n/a"));
    let options = ScatterConfig::new("h", "w")
        .with_point_size(6.0)
        .with_shape("diamond")
        .with_padding(Padding::Uniform(12.0))
        .with_x_axis(AxisConfig::new().with_formatter(formatter.clone()))
        .into_options();

    assert_eq!(options.get("pointSize"), Some(&OptionValue::Number(6.0)));
    assert_eq!(options.get("shape"), Some(&OptionValue::from("diamond")));
    assert_eq!(options.get("padding"), Some(&OptionValue::Number(12.0)));
    assert_eq!(
        options.pointer("xAxis.formatter"),
        Some(&OptionValue::Callback(formatter))
    );
}

#[test]
fn auto_padding_serializes_as_keyword() {
    assert_eq!(OptionValue::from(Padding::Auto), OptionValue::from("auto"));
}
