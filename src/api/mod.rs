//! Plot layer pipeline: configuration, stage orchestration, responsive rules
//! and the plot type registry.

mod config;
mod defaults;
mod geometry_binder;
mod layer;
mod plot_type;
mod registry;
mod responsive;

pub use config::{
    AxisConfig, ColumnConfig, ConversionTagConfig, LabelConfig, Padding, PlotConfig,
    ScatterConfig, StyleSpec,
};
pub use defaults::base_defaults;
pub use geometry_binder::{GeometryBinder, OVERLAY_PRIMARY_WIDTH_RATIO};
pub use layer::{LifecycleStage, PlotLayer};
pub use plot_type::PlotType;
pub use registry::PlotTypeRegistry;
pub use responsive::{
    ResponsiveContext, ResponsiveEngine, ResponsiveMethod, ResponsiveRule, ResponsiveRuleSet,
    ResponsiveStage,
};
