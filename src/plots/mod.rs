//! Built-in plot types.

pub mod column;
pub mod scatter;

pub use column::ColumnPlot;
pub use scatter::ScatterPlot;
