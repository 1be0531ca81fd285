use serde_json::Value;

use crate::core::{Callback, Datum, OptionMap, OptionValue, Viewport};
use crate::error::{PlotError, PlotResult};

/// Caller input for one chart: the option tree, the rows to plot and the
/// container size.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub options: OptionValue,
    pub data: Vec<Datum>,
    pub viewport: Viewport,
}

impl PlotConfig {
    #[must_use]
    pub fn new(options: impl Into<OptionValue>) -> Self {
        Self {
            options: options.into(),
            data: Vec::new(),
            viewport: Viewport::default(),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<Datum>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Parses a JSON chart description. Top-level `data`, `width` and
    /// `height` are lifted out; every other key is an option.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let Value::Object(mut root) = serde_json::from_str::<Value>(input)? else {
            return Err(PlotError::InvalidOption {
                path: "<root>".to_owned(),
                reason: "chart description must be a JSON object".to_owned(),
            });
        };

        let data = match root.remove("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(rows)) => rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| match row {
                    Value::Object(datum) => Ok(datum),
                    _ => Err(PlotError::InvalidOption {
                        path: format!("data.{index}"),
                        reason: "data rows must be objects".to_owned(),
                    }),
                })
                .collect::<PlotResult<Vec<_>>>()?,
            Some(_) => {
                return Err(PlotError::InvalidOption {
                    path: "data".to_owned(),
                    reason: "data must be an array of objects".to_owned(),
                });
            }
        };

        let mut viewport = Viewport::default();
        if let Some(width) = take_dimension(&mut root, "width")? {
            viewport.width = width;
        }
        if let Some(height) = take_dimension(&mut root, "height")? {
            viewport.height = height;
        }

        Ok(Self {
            options: OptionValue::from(Value::Object(root)),
            data,
            viewport,
        })
    }
}

fn take_dimension(root: &mut serde_json::Map<String, Value>, key: &str) -> PlotResult<Option<u32>> {
    match root.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .map(Some)
            .ok_or_else(|| PlotError::InvalidOption {
                path: key.to_owned(),
                reason: "must be a non-negative integer pixel size".to_owned(),
            }),
    }
}

/// Chart padding; `Auto` lets the engine size paddings and disables
/// responsive rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Padding {
    Auto,
    Uniform(f64),
    /// Top, right, bottom, left.
    Sides([f64; 4]),
}

impl From<Padding> for OptionValue {
    fn from(value: Padding) -> Self {
        match value {
            Padding::Auto => OptionValue::from("auto"),
            Padding::Uniform(px) => OptionValue::Number(px),
            Padding::Sides(sides) => {
                OptionValue::Array(sides.into_iter().map(OptionValue::Number).collect())
            }
        }
    }
}

/// Element style: a static style object or a function of the data point.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSpec {
    Static(OptionMap),
    PerDatum(Callback),
}

impl From<StyleSpec> for OptionValue {
    fn from(value: StyleSpec) -> Self {
        match value {
            StyleSpec::Static(style) => OptionValue::Object(style),
            StyleSpec::PerDatum(callback) => OptionValue::Callback(callback),
        }
    }
}

fn put(map: &mut OptionMap, key: &str, value: Option<impl Into<OptionValue>>) {
    if let Some(value) = value {
        map.insert(key.to_owned(), value.into());
    }
}

fn put_object(map: &mut OptionMap, key: &str, value: OptionMap) {
    if !value.is_empty() {
        map.insert(key.to_owned(), OptionValue::Object(value));
    }
}

/// Axis options that affect the scale or the axis component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisConfig {
    pub visible: Option<bool>,
    pub scale_type: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub nice: Option<bool>,
    pub tick_count: Option<u32>,
    pub tick_interval: Option<f64>,
    pub mask: Option<String>,
    pub formatter: Option<Callback>,
    pub title_visible: Option<bool>,
    pub extra: OptionMap,
}

impl AxisConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    #[must_use]
    pub fn with_scale_type(mut self, scale_type: impl Into<String>) -> Self {
        self.scale_type = Some(scale_type.into());
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = Some(nice);
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: u32) -> Self {
        self.tick_count = Some(tick_count);
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: f64) -> Self {
        self.tick_interval = Some(tick_interval);
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Callback) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_title_visible(mut self, visible: bool) -> Self {
        self.title_visible = Some(visible);
        self
    }

    #[must_use]
    pub fn into_options(self) -> OptionMap {
        let mut map = self.extra;
        put(&mut map, "visible", self.visible);
        put(&mut map, "type", self.scale_type);
        put(&mut map, "min", self.min);
        put(&mut map, "max", self.max);
        put(&mut map, "nice", self.nice);
        put(&mut map, "tickCount", self.tick_count);
        put(&mut map, "tickInterval", self.tick_interval);
        put(&mut map, "mask", self.mask);
        put(&mut map, "formatter", self.formatter);
        if let Some(visible) = self.title_visible {
            let mut title = OptionMap::new();
            title.insert("visible".to_owned(), visible.into());
            map.insert("title".to_owned(), title.into());
        }
        map
    }
}

/// Geometry label options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelConfig {
    pub visible: Option<bool>,
    pub position: Option<String>,
    pub offset: Option<f64>,
    pub style: OptionMap,
    pub formatter: Option<Callback>,
    pub extra: OptionMap,
}

impl LabelConfig {
    #[must_use]
    pub fn visible() -> Self {
        Self {
            visible: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: Some(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Callback) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn into_options(self) -> OptionMap {
        let mut map = self.extra;
        put(&mut map, "visible", self.visible);
        put(&mut map, "position", self.position);
        put(&mut map, "offset", self.offset);
        put_object(&mut map, "style", self.style);
        put(&mut map, "formatter", self.formatter);
        map
    }
}

/// Conversion-tag overlay options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionTagConfig {
    pub visible: Option<bool>,
    pub size: Option<f64>,
    pub spacing: Option<f64>,
    pub offset: Option<f64>,
    pub arrow_visible: Option<bool>,
    pub value_visible: Option<bool>,
    pub formatter: Option<Callback>,
}

impl ConversionTagConfig {
    #[must_use]
    pub fn visible() -> Self {
        Self {
            visible: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_arrow_visible(mut self, visible: bool) -> Self {
        self.arrow_visible = Some(visible);
        self
    }

    #[must_use]
    pub fn with_value_visible(mut self, visible: bool) -> Self {
        self.value_visible = Some(visible);
        self
    }

    /// Formatter called with `(previous, next)` values.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Callback) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn into_options(self) -> OptionMap {
        let mut map = OptionMap::new();
        put(&mut map, "visible", self.visible);
        put(&mut map, "size", self.size);
        put(&mut map, "spacing", self.spacing);
        put(&mut map, "offset", self.offset);
        if let Some(visible) = self.arrow_visible {
            let mut arrow = OptionMap::new();
            arrow.insert("visible".to_owned(), visible.into());
            map.insert("arrow".to_owned(), arrow.into());
        }
        let mut value = OptionMap::new();
        put(&mut value, "visible", self.value_visible);
        put(&mut value, "formatter", self.formatter);
        put_object(&mut map, "value", value);
        map
    }
}

/// Options shared by the cartesian plot builders.
#[derive(Debug, Clone, PartialEq, Default)]
struct CommonOptions {
    x_field: String,
    y_field: String,
    color_field: Option<String>,
    x_axis: Option<AxisConfig>,
    y_axis: Option<AxisConfig>,
    label: Option<LabelConfig>,
    responsive: Option<bool>,
    padding: Option<Padding>,
    animation: Option<bool>,
    events: OptionMap,
    extra: OptionMap,
}

impl CommonOptions {
    fn new(x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        Self {
            x_field: x_field.into(),
            y_field: y_field.into(),
            ..Self::default()
        }
    }

    fn into_options(self) -> OptionMap {
        let mut map = self.extra;
        map.insert("xField".to_owned(), self.x_field.into());
        map.insert("yField".to_owned(), self.y_field.into());
        put(&mut map, "colorField", self.color_field);
        put(&mut map, "xAxis", self.x_axis.map(AxisConfig::into_options));
        put(&mut map, "yAxis", self.y_axis.map(AxisConfig::into_options));
        put(&mut map, "label", self.label.map(LabelConfig::into_options));
        put(&mut map, "responsive", self.responsive);
        put(&mut map, "padding", self.padding);
        put(&mut map, "animation", self.animation);
        put_object(&mut map, "events", self.events);
        map
    }
}

macro_rules! common_builder_methods {
    () => {
        #[must_use]
        pub fn with_color_field(mut self, field: impl Into<String>) -> Self {
            self.common.color_field = Some(field.into());
            self
        }

        #[must_use]
        pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
            self.common.x_axis = Some(axis);
            self
        }

        #[must_use]
        pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
            self.common.y_axis = Some(axis);
            self
        }

        #[must_use]
        pub fn with_label(mut self, label: LabelConfig) -> Self {
            self.common.label = Some(label);
            self
        }

        #[must_use]
        pub fn with_responsive(mut self, responsive: bool) -> Self {
            self.common.responsive = Some(responsive);
            self
        }

        #[must_use]
        pub fn with_padding(mut self, padding: Padding) -> Self {
            self.common.padding = Some(padding);
            self
        }

        #[must_use]
        pub fn with_animation(mut self, animation: bool) -> Self {
            self.common.animation = Some(animation);
            self
        }

        /// Registers a handler under its event key (`onColumnClick`, ...).
        #[must_use]
        pub fn with_event(mut self, handler_key: impl Into<String>, handler: Callback) -> Self {
            self.common
                .events
                .insert(handler_key.into(), OptionValue::Callback(handler));
            self
        }

        /// Sets any other option; later builder calls for the same key win.
        #[must_use]
        pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
            self.common.extra.insert(key.into(), value.into());
            self
        }
    };
}

/// Typed configuration for the `column` plot type.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConfig {
    common: CommonOptions,
    pub column_size: Option<f64>,
    pub max_width: Option<f64>,
    pub min_width: Option<f64>,
    pub column_style: Option<StyleSpec>,
    pub conversion_tag: Option<ConversionTagConfig>,
}

impl ColumnConfig {
    #[must_use]
    pub fn new(x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        Self {
            common: CommonOptions::new(x_field, y_field),
            column_size: None,
            max_width: None,
            min_width: None,
            column_style: None,
            conversion_tag: None,
        }
    }

    common_builder_methods!();

    #[must_use]
    pub fn with_column_size(mut self, column_size: f64) -> Self {
        self.column_size = Some(column_size);
        self
    }

    #[must_use]
    pub fn with_width_clamp(mut self, min_width: f64, max_width: f64) -> Self {
        self.min_width = Some(min_width);
        self.max_width = Some(max_width);
        self
    }

    #[must_use]
    pub fn with_column_style(mut self, style: StyleSpec) -> Self {
        self.column_style = Some(style);
        self
    }

    #[must_use]
    pub fn with_conversion_tag(mut self, conversion_tag: ConversionTagConfig) -> Self {
        self.conversion_tag = Some(conversion_tag);
        self
    }

    #[must_use]
    pub fn into_options(self) -> OptionValue {
        let mut map = self.common.into_options();
        put(&mut map, "columnSize", self.column_size);
        put(&mut map, "maxWidth", self.max_width);
        put(&mut map, "minWidth", self.min_width);
        put(&mut map, "columnStyle", self.column_style);
        put(
            &mut map,
            "conversionTag",
            self.conversion_tag.map(ConversionTagConfig::into_options),
        );
        OptionValue::Object(map)
    }
}

impl From<ColumnConfig> for PlotConfig {
    fn from(value: ColumnConfig) -> Self {
        PlotConfig::new(value.into_options())
    }
}

/// Typed configuration for the `scatter` plot type.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterConfig {
    common: CommonOptions,
    pub point_size: Option<f64>,
    pub point_style: Option<StyleSpec>,
    pub shape: Option<String>,
}

impl ScatterConfig {
    #[must_use]
    pub fn new(x_field: impl Into<String>, y_field: impl Into<String>) -> Self {
        Self {
            common: CommonOptions::new(x_field, y_field),
            point_size: None,
            point_style: None,
            shape: None,
        }
    }

    common_builder_methods!();

    #[must_use]
    pub fn with_point_size(mut self, point_size: f64) -> Self {
        self.point_size = Some(point_size);
        self
    }

    #[must_use]
    pub fn with_point_style(mut self, style: StyleSpec) -> Self {
        self.point_style = Some(style);
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    #[must_use]
    pub fn into_options(self) -> OptionValue {
        let mut map = self.common.into_options();
        put(&mut map, "pointSize", self.point_size);
        put(&mut map, "pointStyle", self.point_style);
        put(&mut map, "shape", self.shape);
        OptionValue::Object(map)
    }
}

impl From<ScatterConfig> for PlotConfig {
    fn from(value: ScatterConfig) -> Self {
        PlotConfig::new(value.into_options())
    }
}
