//! chart-plan: declarative plot layers compiled into render-ready plans.
//!
//! A plot type (column, scatter) turns a nested option tree into scales, a
//! bound geometry, labels, overlays and event bindings through a fixed stage
//! pipeline. Drawing is delegated to a `SceneRenderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod plots;
pub mod render;
pub mod telemetry;

pub use api::{
    ColumnConfig, LifecycleStage, PlotConfig, PlotLayer, PlotType, PlotTypeRegistry,
    ScatterConfig,
};
pub use crate::core::{Callback, OptionValue, ResolvedOptions, Viewport};
pub use error::{PlotError, PlotResult};
