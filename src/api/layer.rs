use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{Datum, GeometryBinding, ResolvedOptions, ScaleSet, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::extensions::ConversionTag;
use crate::interaction::{EngineEvent, EventBindings, EventBridge, SemanticEvent};
use crate::render::{
    ComponentFactory, CoordinateSpec, DefaultComponentFactory, DefaultGeometryFactory,
    GeometryFactory, RenderPlan, RenderedScene, SceneRenderer,
};

use super::{
    GeometryBinder, PlotConfig, PlotType, ResponsiveContext, ResponsiveEngine, ResponsiveStage,
    base_defaults,
};

/// Last pipeline stage a layer completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleStage {
    Construct,
    Options,
    BeforeInit,
    Scale,
    Coordinate,
    AddGeometry,
    Animation,
    ParseEvents,
    Render,
    AfterRender,
}

impl LifecycleStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Construct => "construct",
            Self::Options => "getOptions",
            Self::BeforeInit => "beforeInit",
            Self::Scale => "scale",
            Self::Coordinate => "coordinate",
            Self::AddGeometry => "addGeometry",
            Self::Animation => "animation",
            Self::ParseEvents => "parseEvents",
            Self::Render => "render",
            Self::AfterRender => "afterRender",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanExport<'a> {
    plot_type: &'static str,
    stage: LifecycleStage,
    viewport: Viewport,
    options: &'a ResolvedOptions,
    scales: &'a ScaleSet,
    coordinate: CoordinateSpec,
    geometry: Option<&'a GeometryBinding>,
    conversion_tag: Option<&'a ConversionTag>,
}

/// Per-chart orchestrator.
///
/// Owns the resolved options and every artifact the pipeline compiles from
/// them. Stages run in a fixed order; the plot type customizes individual
/// stages through its `PlotType` hooks.
pub struct PlotLayer<R: SceneRenderer> {
    plot_type: Arc<dyn PlotType>,
    renderer: R,
    geometry_factory: Arc<dyn GeometryFactory>,
    component_factory: Arc<dyn ComponentFactory>,
    viewport: Viewport,
    data: Vec<Datum>,
    options: ResolvedOptions,
    scales: ScaleSet,
    coordinate: CoordinateSpec,
    geometry: Option<GeometryBinding>,
    scene: Option<RenderedScene>,
    overlay: Option<ConversionTag>,
    events: EventBindings,
    stage: LifecycleStage,
    /// Set once `render` has parsed events; `resize` and `change_data`
    /// redraw only after that.
    rendered: bool,
}

impl<R: SceneRenderer> PlotLayer<R> {
    /// Runs `construct` and `getOptions`: validates the viewport and merges
    /// base defaults, plot-type defaults and caller options.
    pub fn new(plot_type: Arc<dyn PlotType>, renderer: R, config: PlotConfig) -> PlotResult<Self> {
        let PlotConfig {
            options,
            data,
            viewport,
        } = config;
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        trace!(plot_type = plot_type.name(), stage = "construct", "plot layer stage");

        let options =
            ResolvedOptions::resolve(&base_defaults(), &plot_type.default_options(), &options)?;
        trace!(plot_type = plot_type.name(), stage = "getOptions", "plot layer stage");
        debug!(
            plot_type = plot_type.name(),
            width = viewport.width,
            height = viewport.height,
            rows = data.len(),
            "created plot layer"
        );

        Ok(Self {
            plot_type,
            renderer,
            geometry_factory: Arc::new(DefaultGeometryFactory),
            component_factory: Arc::new(DefaultComponentFactory),
            viewport,
            data,
            options,
            scales: ScaleSet::new(),
            coordinate: CoordinateSpec::default(),
            geometry: None,
            scene: None,
            overlay: None,
            events: EventBindings::default(),
            stage: LifecycleStage::Options,
            rendered: false,
        })
    }

    /// Replaces the engine collaborators used by `addGeometry`.
    #[must_use]
    pub fn with_factories(
        mut self,
        geometry_factory: Arc<dyn GeometryFactory>,
        component_factory: Arc<dyn ComponentFactory>,
    ) -> Self {
        self.geometry_factory = geometry_factory;
        self.component_factory = component_factory;
        self
    }

    /// Runs every stage after `getOptions`, through `afterRender`.
    pub fn render(&mut self) -> PlotResult<()> {
        self.plot_type.before_init(&mut self.options)?;
        self.enter(LifecycleStage::BeforeInit);
        self.apply_responsive(ResponsiveStage::PreRender)?;

        self.compile()?;

        self.events = EventBridge::parse(
            self.plot_type.name(),
            self.plot_type.event_table(),
            self.plot_type.geometry_names(),
            self.options.get("events"),
        );
        self.enter(LifecycleStage::ParseEvents);
        self.rendered = true;

        self.draw()
    }

    /// Re-lays the chart out for a new container size. Event bindings are
    /// kept.
    pub fn resize(&mut self, viewport: Viewport) -> PlotResult<()> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !self.rendered {
            return Err(PlotError::InvalidStage {
                requested: "resize",
                required: LifecycleStage::Render.as_str(),
            });
        }
        debug!(
            plot_type = self.plot_type.name(),
            width = viewport.width,
            height = viewport.height,
            "resizing plot layer"
        );
        self.viewport = viewport;
        self.apply_responsive(ResponsiveStage::PreRender)?;
        self.compile()?;
        self.draw()
    }

    /// Swaps the bound rows; a rendered layer is redrawn with the new data.
    pub fn change_data(&mut self, data: Vec<Datum>) -> PlotResult<()> {
        debug!(
            plot_type = self.plot_type.name(),
            rows = data.len(),
            "changing plot data"
        );
        self.data = data;
        if !self.rendered {
            return Ok(());
        }
        self.compile()?;
        self.draw()
    }

    /// Translates an engine event and invokes the matching caller handlers.
    pub fn dispatch_event(&self, event: &EngineEvent) -> Vec<SemanticEvent> {
        self.events.dispatch(event)
    }

    /// Runs the responsive rules of `stage` when the layer enables them.
    /// Returns the number of rules that completed; `0` when gated off.
    pub fn apply_responsive(&mut self, stage: ResponsiveStage) -> PlotResult<usize> {
        if stage == ResponsiveStage::AfterRender && self.scene.is_none() {
            return Err(PlotError::InvalidStage {
                requested: stage.as_str(),
                required: LifecycleStage::Render.as_str(),
            });
        }
        if !ResponsiveEngine::is_enabled(&self.options) {
            trace!(stage = stage.as_str(), "responsive rules gated off");
            return Ok(0);
        }
        let mut context = ResponsiveContext {
            options: &mut self.options,
            viewport: self.viewport,
            data: &self.data,
            scene: self.scene.as_ref(),
        };
        Ok(ResponsiveEngine::apply(
            stage,
            self.plot_type.responsive_rules(),
            &mut context,
        ))
    }

    /// `scale`, `coordinate`, `addGeometry` and `animation`.
    fn compile(&mut self) -> PlotResult<()> {
        self.scales = self.plot_type.scale(&self.options)?;
        self.enter(LifecycleStage::Scale);

        self.coordinate = self.plot_type.coordinate(&self.options);
        self.enter(LifecycleStage::Coordinate);

        let binder = GeometryBinder::new(
            self.geometry_factory.as_ref(),
            self.component_factory.as_ref(),
        );
        let mut geometry = self.plot_type.add_geometry(&binder, &self.options)?;
        self.enter(LifecycleStage::AddGeometry);

        self.plot_type.animation(&mut geometry, &self.options);
        if self.options.bool_at("animation") == Some(false) {
            geometry.animate = Some(false);
        }
        self.geometry = Some(geometry);
        self.enter(LifecycleStage::Animation);
        Ok(())
    }

    /// `render` followed by `afterRender`. When an afterRender rule changes
    /// the options, the plan is compiled and drawn once more so the bound
    /// geometry reflects them.
    fn draw(&mut self) -> PlotResult<()> {
        self.render_scene()?;

        let snapshot = ResponsiveEngine::is_enabled(&self.options).then(|| self.options.clone());
        self.apply_responsive(ResponsiveStage::AfterRender)?;
        if snapshot.is_some_and(|before| before != self.options) {
            debug!(
                plot_type = self.plot_type.name(),
                "afterRender rules changed options; recompiling"
            );
            self.compile()?;
            self.render_scene()?;
        }

        self.overlay = self
            .scene
            .as_ref()
            .and_then(|scene| self.plot_type.attach_overlay(scene, &self.options));
        self.enter(LifecycleStage::AfterRender);
        Ok(())
    }

    /// The `render` stage. A failed draw drops the previous scene and
    /// overlay so they never describe a different geometry.
    fn render_scene(&mut self) -> PlotResult<()> {
        let geometry = self.geometry.as_ref().ok_or(PlotError::InvalidStage {
            requested: LifecycleStage::Render.as_str(),
            required: LifecycleStage::AddGeometry.as_str(),
        })?;
        let plan = RenderPlan {
            viewport: self.viewport,
            options: &self.options,
            scales: &self.scales,
            coordinate: self.coordinate,
            geometry,
            data: &self.data,
        };
        let scene = match self.renderer.render(&plan) {
            Ok(scene) => scene,
            Err(err) => {
                self.scene = None;
                self.overlay = None;
                return Err(err);
            }
        };
        debug!(
            plot_type = self.plot_type.name(),
            elements = scene.elements.len(),
            labels = scene.labels.len(),
            "rendered plot layer"
        );
        self.scene = Some(scene);
        self.enter(LifecycleStage::Render);
        Ok(())
    }

    fn enter(&mut self, stage: LifecycleStage) {
        trace!(
            plot_type = self.plot_type.name(),
            stage = stage.as_str(),
            "plot layer stage"
        );
        self.stage = stage;
    }

    #[must_use]
    pub fn plot_type(&self) -> &dyn PlotType {
        self.plot_type.as_ref()
    }

    #[must_use]
    pub fn stage(&self) -> LifecycleStage {
        self.stage
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    #[must_use]
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    #[must_use]
    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    #[must_use]
    pub fn coordinate(&self) -> CoordinateSpec {
        self.coordinate
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&GeometryBinding> {
        self.geometry.as_ref()
    }

    #[must_use]
    pub fn scene(&self) -> Option<&RenderedScene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn conversion_tag(&self) -> Option<&ConversionTag> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub fn events(&self) -> &EventBindings {
        &self.events
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Serializes the compiled plan (options, scales, geometry, overlay).
    /// Callbacks serialize as `null`.
    pub fn plan_json_pretty(&self) -> PlotResult<String> {
        let export = PlanExport {
            plot_type: self.plot_type.name(),
            stage: self.stage,
            viewport: self.viewport,
            options: &self.options,
            scales: &self.scales,
            coordinate: self.coordinate,
            geometry: self.geometry.as_ref(),
            conversion_tag: self.overlay.as_ref(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

impl<R: SceneRenderer + std::fmt::Debug> std::fmt::Debug for PlotLayer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotLayer")
            .field("plot_type", &self.plot_type.name())
            .field("renderer", &self.renderer)
            .field("viewport", &self.viewport)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
