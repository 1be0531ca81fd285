use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::core::label::LabelHandle;
use crate::core::options::{OptionMap, OptionValue};

/// Engine-level geometry primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    Interval,
    Point,
}

impl GeometryKind {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "interval" => Some(Self::Interval),
            "point" => Some(Self::Point),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interval => "interval",
            Self::Point => "point",
        }
    }
}

/// Position fields of a binding; cartesian plots use exactly two.
pub type PositionFields = SmallVec<[String; 2]>;

/// Label attachment state of a geometry binding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LabelSlot {
    /// No label configuration reached the binder.
    #[default]
    Unset,
    /// Label configuration was present but hidden.
    Suppressed,
    Bound(LabelHandle),
}

impl LabelSlot {
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }

    #[must_use]
    pub fn handle(&self) -> Option<&LabelHandle> {
        match self {
            Self::Bound(handle) => Some(handle),
            _ => None,
        }
    }
}

impl Serialize for LabelSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_unit(),
            Self::Suppressed => serializer.serialize_bool(false),
            Self::Bound(handle) => handle.serialize(serializer),
        }
    }
}

/// Geometry bound to data fields, ready for the rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryBinding {
    pub kind: GeometryKind,
    pub variant: String,
    pub position_fields: PositionFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    /// Fraction of the band claimed by this geometry. Set only when an
    /// overlay reserves the rest of the band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_ratio: Option<f64>,
    pub label: LabelSlot,
    /// `None` leaves motion to the engine default (enabled).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
    /// Type-specific additions (error bars, jitter, ...).
    #[serde(skip_serializing_if = "OptionMap::is_empty")]
    pub adjustments: OptionMap,
}

impl GeometryBinding {
    #[must_use]
    pub fn new(kind: GeometryKind, variant: impl Into<String>) -> Self {
        Self {
            kind,
            variant: variant.into(),
            position_fields: PositionFields::new(),
            color_field: None,
            color: None,
            size: None,
            shape: None,
            style: None,
            min_width: None,
            max_width: None,
            width_ratio: None,
            label: LabelSlot::Unset,
            animate: None,
            adjustments: OptionMap::new(),
        }
    }

    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.animate != Some(false)
    }
}
