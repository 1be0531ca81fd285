use serde_json::json;

use crate::core::OptionValue;

/// Pipeline-wide defaults shared by every plot type; the lowest-precedence
/// merge source.
#[must_use]
pub fn base_defaults() -> OptionValue {
    OptionValue::from(json!({
        "renderer": "canvas",
        "padding": "auto",
        "title": { "visible": false, "text": "" },
        "description": { "visible": false, "text": "" },
        "legend": { "visible": true, "position": "bottom-center" },
        "tooltip": {
            "visible": true,
            "shared": true,
            "crosshairs": { "type": "y" }
        },
        "xAxis": {
            "visible": true,
            "grid": { "visible": false },
            "line": { "visible": true },
            "tickLine": { "visible": true },
            "label": { "visible": true, "autoRotate": true, "autoHide": true },
            "title": { "visible": false, "offset": 12 }
        },
        "yAxis": {
            "visible": true,
            "grid": { "visible": true },
            "line": { "visible": false },
            "tickLine": { "visible": false },
            "label": { "visible": true, "autoRotate": false, "autoHide": true },
            "title": { "visible": false, "autoRotate": true, "offset": 12 }
        },
        "label": { "visible": false },
        "interactions": [
            { "type": "tooltip" },
            { "type": "legend-active" },
            { "type": "legend-filter" }
        ],
        "animation": true,
        "responsive": false
    }))
}
