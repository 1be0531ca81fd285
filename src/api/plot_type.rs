use crate::core::{
    GeometryBinding, GeometryNameMap, OptionValue, ResolvedOptions, ScaleDescriptor,
    ScaleResolver, ScaleSet,
};
use crate::error::PlotResult;
use crate::extensions::ConversionTag;
use crate::interaction::EventMapping;
use crate::render::{CoordinateSpec, RenderedScene};

use super::{GeometryBinder, ResponsiveRuleSet};

/// Behavior of one plot family.
///
/// `PlotLayer` drives the stages in a fixed order; a plot type only
/// overrides the hooks it customizes. Every hook has a base implementation,
/// and overriding a hook replaces that stage's work without removing the
/// checkpoint from the pipeline.
pub trait PlotType: Send + Sync {
    /// Registry name and semantic geometry name (`column`, `scatter`).
    fn name(&self) -> &'static str;

    fn geometry_names(&self) -> &'static GeometryNameMap;

    /// Plot-type static defaults, layered over the pipeline base defaults.
    fn default_options(&self) -> OptionValue;

    /// Variant requested from the geometry factory (`main`, `circle`).
    fn geometry_variant(&self) -> &'static str;

    /// Default `labelType` attached to label components.
    fn label_type(&self) -> &'static str {
        "label"
    }

    fn event_table(&self) -> &'static [EventMapping] {
        &[]
    }

    fn responsive_rules(&self) -> &'static ResponsiveRuleSet {
        ResponsiveRuleSet::empty()
    }

    fn before_init(&self, _options: &mut ResolvedOptions) -> PlotResult<()> {
        Ok(())
    }

    /// Cartesian scales with an unconstrained x baseline.
    fn scale(&self, options: &ResolvedOptions) -> PlotResult<ScaleSet> {
        ScaleResolver::resolve_cartesian(options, ScaleDescriptor::unconstrained())
    }

    fn coordinate(&self, _options: &ResolvedOptions) -> CoordinateSpec {
        CoordinateSpec::default()
    }

    /// Whether an overlay claims part of the band next to the primary
    /// geometry.
    fn overlay_enabled(&self, _options: &ResolvedOptions) -> bool {
        false
    }

    fn add_geometry(
        &self,
        binder: &GeometryBinder<'_>,
        options: &ResolvedOptions,
    ) -> PlotResult<GeometryBinding> {
        binder.bind(self, options)
    }

    /// Type-specific geometry mutation run after fields, width reservation
    /// and labels are attached.
    fn adjust_geometry(
        &self,
        _geometry: &mut GeometryBinding,
        _options: &ResolvedOptions,
    ) -> PlotResult<()> {
        Ok(())
    }

    /// Extra animation settings. `animation: false` is applied by the layer
    /// after this hook regardless of what it does.
    fn animation(&self, _geometry: &mut GeometryBinding, _options: &ResolvedOptions) {}

    /// Post-render overlay computed from the rendered scene.
    fn attach_overlay(
        &self,
        _scene: &RenderedScene,
        _options: &ResolvedOptions,
    ) -> Option<ConversionTag> {
        None
    }
}
