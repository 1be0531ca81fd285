use crate::core::{
    GeometryBinding, GeometryKind, LabelDescriptor, LabelHandle, OptionValue, ResolvedOptions,
};
use crate::error::{PlotError, PlotResult};

use super::{ComponentFactory, GeometryFactory};

/// Inputs for a geometry request.
#[derive(Debug, Clone, Copy)]
pub struct GeomRequest<'a> {
    pub plot_type: &'a str,
    pub options: &'a ResolvedOptions,
}

/// Geometry factory reading the conventional per-variant option keys.
///
/// - `interval`/`main`: `colorField`, `color`, `columnSize`, `columnStyle`,
///   `minWidth`, `maxWidth`
/// - `point`/`circle` (and other point shapes): `colorField`, `color`,
///   `pointSize`, `pointStyle`, `shape`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGeometryFactory;

impl GeometryFactory for DefaultGeometryFactory {
    fn get_geom(
        &self,
        kind: GeometryKind,
        variant: &str,
        request: &GeomRequest<'_>,
    ) -> PlotResult<GeometryBinding> {
        let options = request.options;
        let mut geometry = GeometryBinding::new(kind, variant);
        geometry.color_field = options.str_at("colorField").map(str::to_owned);
        geometry.color = present(options, "color");

        match (kind, variant) {
            (GeometryKind::Interval, "main") => {
                geometry.size = present(options, "columnSize");
                geometry.style = present(options, "columnStyle");
                geometry.min_width = options.f64_at("minWidth");
                geometry.max_width = options.f64_at("maxWidth");
            }
            (GeometryKind::Interval, _) => {
                return Err(PlotError::Collaborator(format!(
                    "interval geometry has no `{variant}` variant"
                )));
            }
            (GeometryKind::Point, shape) => {
                geometry.size = present(options, "pointSize");
                geometry.style = present(options, "pointStyle");
                geometry.shape = Some(options.str_at("shape").unwrap_or(shape).to_owned());
            }
        }
        Ok(geometry)
    }
}

fn present(options: &ResolvedOptions, path: &str) -> Option<OptionValue> {
    options.get(path).filter(|value| !value.is_null()).cloned()
}

/// Component factory that wraps descriptors as label handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComponentFactory;

impl ComponentFactory for DefaultComponentFactory {
    fn get_component(&self, kind: &str, descriptor: LabelDescriptor) -> PlotResult<LabelHandle> {
        if kind != "label" {
            return Err(PlotError::UnsupportedComponent(kind.to_owned()));
        }
        Ok(LabelHandle {
            component: kind.to_owned(),
            descriptor,
        })
    }
}
