use serde::Serialize;

use crate::core::{BBox, Datum, GeometryBinding, ResolvedOptions, ScaleSet, Viewport};
use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateKind {
    Rect,
    Polar,
}

/// Coordinate system chosen by the `coordinate` stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinateSpec {
    pub kind: CoordinateKind,
    pub transposed: bool,
}

impl Default for CoordinateSpec {
    fn default() -> Self {
        Self {
            kind: CoordinateKind::Rect,
            transposed: false,
        }
    }
}

/// Everything a backend needs for one draw pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderPlan<'a> {
    pub viewport: Viewport,
    pub options: &'a ResolvedOptions,
    pub scales: &'a ScaleSet,
    pub coordinate: CoordinateSpec,
    pub geometry: &'a GeometryBinding,
    pub data: &'a [Datum],
}

/// One drawn geometry element and the row it represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedElement {
    pub index: usize,
    pub datum: Datum,
    pub bbox: BBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLabel {
    pub element_index: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Backend report of a finished draw pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedScene {
    pub viewport: Viewport,
    pub elements: Vec<RenderedElement>,
    pub labels: Vec<RenderedLabel>,
}

impl RenderedScene {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for element in &self.elements {
            if !element.bbox.is_finite() {
                return Err(PlotError::Collaborator(format!(
                    "element {} has non-finite bounds",
                    element.index
                )));
            }
        }
        for label in &self.labels {
            if !label.x.is_finite() || !label.y.is_finite() {
                return Err(PlotError::Collaborator(format!(
                    "label of element {} has non-finite position",
                    label.element_index
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.labels.is_empty()
    }
}
