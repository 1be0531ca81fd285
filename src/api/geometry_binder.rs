use smallvec::smallvec;
use tracing::trace;

use crate::core::{
    GeometryBinding, GeometryKind, LabelPolicy, LabelSlot, OptionValue, ResolvedOptions,
};
use crate::error::{PlotError, PlotResult};
use crate::render::{ComponentFactory, GeomRequest, GeometryFactory};

use super::PlotType;

/// Band fraction kept by the primary geometry when an overlay is shown; the
/// overlay uses the remainder.
pub const OVERLAY_PRIMARY_WIDTH_RATIO: f64 = 2.0 / 5.0;

/// Requests geometries from the factory and attaches fields, width
/// reservation and labels. Holds no state between calls.
#[derive(Clone, Copy)]
pub struct GeometryBinder<'a> {
    geometry_factory: &'a dyn GeometryFactory,
    component_factory: &'a dyn ComponentFactory,
}

impl<'a> GeometryBinder<'a> {
    #[must_use]
    pub fn new(
        geometry_factory: &'a dyn GeometryFactory,
        component_factory: &'a dyn ComponentFactory,
    ) -> Self {
        Self {
            geometry_factory,
            component_factory,
        }
    }

    /// Binds the plot type's primary geometry, resolving its engine kind
    /// through the plot type's geometry name map.
    pub fn bind<P: PlotType + ?Sized>(
        &self,
        plot: &P,
        options: &ResolvedOptions,
    ) -> PlotResult<GeometryBinding> {
        let unknown = |name: &str| PlotError::UnknownGeometry {
            plot_type: plot.name().to_owned(),
            name: name.to_owned(),
        };
        let engine_name = plot
            .geometry_names()
            .to_engine_name(plot.name())
            .ok_or_else(|| unknown(plot.name()))?;
        let kind = GeometryKind::parse(engine_name).ok_or_else(|| unknown(engine_name))?;
        self.bind_kind(plot, kind, plot.geometry_variant(), options)
    }

    /// Binds an explicit engine geometry kind and variant.
    pub fn bind_kind<P: PlotType + ?Sized>(
        &self,
        plot: &P,
        kind: GeometryKind,
        variant: &str,
        options: &ResolvedOptions,
    ) -> PlotResult<GeometryBinding> {
        let x_field = options.require_str("xField")?;
        let y_field = options.require_str("yField")?;

        let request = GeomRequest {
            plot_type: plot.name(),
            options,
        };
        let mut geometry = self.geometry_factory.get_geom(kind, variant, &request)?;

        geometry.position_fields = smallvec![x_field.to_owned(), y_field.to_owned()];

        if plot.overlay_enabled(options) {
            geometry.width_ratio = Some(OVERLAY_PRIMARY_WIDTH_RATIO);
        }

        if let Some(label) = options.get("label").filter(|label| !label.is_null()) {
            geometry.label = self.resolve_label(plot.label_type(), label, y_field)?;
        }

        plot.adjust_geometry(&mut geometry, options)?;

        trace!(
            plot_type = plot.name(),
            kind = kind.as_str(),
            variant,
            width_ratio = ?geometry.width_ratio,
            label_bound = geometry.label.handle().is_some(),
            "bound geometry"
        );
        Ok(geometry)
    }

    fn resolve_label(
        &self,
        label_type: &str,
        label: &OptionValue,
        y_field: &str,
    ) -> PlotResult<LabelSlot> {
        if label.as_bool() == Some(false) {
            return Ok(LabelSlot::Suppressed);
        }
        let position = label
            .get("position")
            .and_then(OptionValue::as_str)
            .unwrap_or_default();
        let Some(descriptor) = LabelPolicy::resolve(position, label) else {
            return Ok(LabelSlot::Suppressed);
        };
        let descriptor = descriptor.with_defaults(&[y_field], label_type);
        let handle = self.component_factory.get_component("label", descriptor)?;
        Ok(LabelSlot::Bound(handle))
    }
}
