//! Collaborator boundary between the plot pipeline and the rendering engine.
//!
//! The pipeline only talks to the engine through the three traits below.
//! Headless defaults are provided so layers can be compiled and inspected
//! without a drawing backend.

mod factory;
mod null_renderer;
mod scene;

pub use factory::{DefaultComponentFactory, DefaultGeometryFactory, GeomRequest};
pub use null_renderer::NullRenderer;
pub use scene::{
    CoordinateKind, CoordinateSpec, RenderPlan, RenderedElement, RenderedLabel, RenderedScene,
};

use crate::core::{GeometryBinding, GeometryKind, LabelDescriptor, LabelHandle};
use crate::error::PlotResult;

/// Produces engine geometry objects for a primitive kind and variant
/// (`interval`/`main`, `point`/`circle`, ...).
pub trait GeometryFactory: Send + Sync {
    fn get_geom(
        &self,
        kind: GeometryKind,
        variant: &str,
        request: &GeomRequest<'_>,
    ) -> PlotResult<GeometryBinding>;
}

/// Produces auxiliary components such as labels.
pub trait ComponentFactory: Send + Sync {
    fn get_component(&self, kind: &str, descriptor: LabelDescriptor) -> PlotResult<LabelHandle>;
}

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully compiled `RenderPlan` and report where each
/// element landed, which post-render overlays depend on.
pub trait SceneRenderer {
    fn render(&mut self, plan: &RenderPlan<'_>) -> PlotResult<RenderedScene>;
}
