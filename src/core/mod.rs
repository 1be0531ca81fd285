pub mod geometry;
pub mod geometry_map;
pub mod label;
pub mod options;
pub mod scale;
pub mod types;

pub use geometry::{GeometryBinding, GeometryKind, LabelSlot, PositionFields};
pub use geometry_map::GeometryNameMap;
pub use label::{LabelDescriptor, LabelHandle, LabelPolicy, LabelPosition};
pub use options::{Callback, Datum, OptionMap, OptionValue, ResolvedOptions};
pub use scale::{ScaleDescriptor, ScaleField, ScaleResolver, ScaleSet, ScaleType, extract_scale};
pub use types::{BBox, Viewport};
