//! Post-render overlays attached on top of the primary geometry.

pub mod conversion_tag;

pub use conversion_tag::{ConversionTag, ConversionTagItem, ConversionTagSpec};
