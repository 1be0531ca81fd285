//! Scatter plot: one point per row on two continuous dimensions.

mod events;

pub use events::SCATTER_EVENTS;

use serde_json::json;

use crate::api::PlotType;
use crate::core::{GeometryNameMap, OptionValue};
use crate::interaction::EventMapping;

pub static SCATTER_GEOMETRY_NAMES: GeometryNameMap =
    GeometryNameMap::new(&[("scatter", "point")], &[("point", "scatter")]);

#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterPlot;

impl PlotType for ScatterPlot {
    fn name(&self) -> &'static str {
        "scatter"
    }

    fn geometry_names(&self) -> &'static GeometryNameMap {
        &SCATTER_GEOMETRY_NAMES
    }

    fn default_options(&self) -> OptionValue {
        OptionValue::from(json!({
            "pointSize": 4,
            "pointStyle": {
                "strokeOpacity": 1,
                "fillOpacity": 0.4,
                "opacity": 0.65
            },
            "tooltip": {
                "visible": true,
                "shared": false,
                "crosshairs": { "type": "rect" }
            },
            "label": { "visible": false, "position": "top" },
            "shape": "circle"
        }))
    }

    fn geometry_variant(&self) -> &'static str {
        "circle"
    }

    fn label_type(&self) -> &'static str {
        "pointLabel"
    }

    fn event_table(&self) -> &'static [EventMapping] {
        SCATTER_EVENTS
    }
}
