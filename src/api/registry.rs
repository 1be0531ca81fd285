use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{PlotError, PlotResult};
use crate::plots::{ColumnPlot, ScatterPlot};
use crate::render::SceneRenderer;

use super::{PlotConfig, PlotLayer, PlotType};

/// Name → plot type lookup. Immutable once shared; build a private registry
/// to add custom plot types.
#[derive(Clone, Default)]
pub struct PlotTypeRegistry {
    entries: IndexMap<String, Arc<dyn PlotType>>,
}

impl PlotTypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `column` and `scatter`.
    #[must_use]
    pub fn with_builtin_plots() -> Self {
        let mut registry = Self::new();
        for plot_type in [
            Arc::new(ColumnPlot) as Arc<dyn PlotType>,
            Arc::new(ScatterPlot) as Arc<dyn PlotType>,
        ] {
            let name = plot_type.name();
            registry.entries.insert(name.to_owned(), plot_type);
        }
        registry
    }

    /// Process-wide registry of the built-in plot types.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<PlotTypeRegistry> = OnceLock::new();
        BUILTIN.get_or_init(Self::with_builtin_plots)
    }

    /// Registers `plot_type` under `name`. A duplicate name replaces the
    /// earlier entry, which is returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        plot_type: Arc<dyn PlotType>,
    ) -> PlotResult<Option<Arc<dyn PlotType>>> {
        let name = name.into();
        if name.is_empty() {
            return Err(PlotError::InvalidOption {
                path: "name".to_owned(),
                reason: "plot type name must not be empty".to_owned(),
            });
        }
        let previous = self.entries.insert(name.clone(), plot_type);
        if previous.is_some() {
            warn!(plot_type = %name, "plot type re-registered; previous entry replaced");
        } else {
            debug!(plot_type = %name, "registered plot type");
        }
        Ok(previous)
    }

    /// Removes a plot type. Returns `true` when removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.entries.shift_remove(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn PlotType>> {
        self.entries.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn plot_types(&self) -> impl Iterator<Item = &Arc<dyn PlotType>> + '_ {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiates a layer for the plot type registered under `name`.
    pub fn create<R: SceneRenderer>(
        &self,
        name: &str,
        renderer: R,
        config: PlotConfig,
    ) -> PlotResult<PlotLayer<R>> {
        let plot_type = self
            .get(name)
            .ok_or_else(|| PlotError::UnknownPlotType(name.to_owned()))?;
        PlotLayer::new(plot_type, renderer, config)
    }
}

impl std::fmt::Debug for PlotTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotTypeRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
