//! Event parser bridge.
//!
//! Engines emit `target:action` events (`interval:click`, `plot:mousemove`).
//! Each plot type publishes a table from caller-facing handler keys
//! (`onColumnClick`) to those engine events; the bridge registers the
//! handlers configured under `events` and translates raw events into the plot
//! type's vocabulary (`column:click`).

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{Callback, Datum, GeometryNameMap, OptionValue};

/// Raw interaction event as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineEvent {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub datum: Option<Datum>,
}

impl EngineEvent {
    #[must_use]
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            datum: None,
        }
    }

    #[must_use]
    pub fn with_datum(mut self, datum: Datum) -> Self {
        self.datum = Some(datum);
        self
    }

    /// Element kind before the `:` (`interval`, `plot`, `label`).
    #[must_use]
    pub fn target(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(target, _)| target)
    }
}

/// Event in the plot type's vocabulary, handed to caller handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticEvent {
    pub name: String,
    pub handler_key: &'static str,
    pub plot_type: String,
    pub x: f64,
    pub y: f64,
    pub datum: Option<Datum>,
}

impl SemanticEvent {
    #[must_use]
    pub fn to_option_value(&self) -> OptionValue {
        serde_json::to_value(self)
            .map(OptionValue::from)
            .unwrap_or_default()
    }
}

/// Shapes the payload of a semantic event from its raw engine event.
pub type PayloadShaper = fn(&EngineEvent, EventContext<'_>) -> SemanticEvent;

/// Naming context passed to payload shapers.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub semantic_name: &'a str,
    pub handler_key: &'static str,
    pub plot_type: &'a str,
}

/// Default payload: coordinates and the element's datum, unchanged.
#[must_use]
pub fn element_payload(event: &EngineEvent, context: EventContext<'_>) -> SemanticEvent {
    SemanticEvent {
        name: context.semantic_name.to_owned(),
        handler_key: context.handler_key,
        plot_type: context.plot_type.to_owned(),
        x: event.x,
        y: event.y,
        datum: event.datum.clone(),
    }
}

/// One row of a plot type's event table.
#[derive(Clone, Copy)]
pub struct EventMapping {
    pub handler_key: &'static str,
    pub engine_event: &'static str,
    pub shape: PayloadShaper,
}

impl EventMapping {
    #[must_use]
    pub const fn new(handler_key: &'static str, engine_event: &'static str) -> Self {
        Self {
            handler_key,
            engine_event,
            shape: element_payload,
        }
    }

    #[must_use]
    pub const fn with_shape(mut self, shape: PayloadShaper) -> Self {
        self.shape = shape;
        self
    }
}

impl fmt::Debug for EventMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMapping")
            .field("handler_key", &self.handler_key)
            .field("engine_event", &self.engine_event)
            .finish_non_exhaustive()
    }
}

/// Engine event name translated through the geometry name map; targets that
/// are not geometries keep their name.
#[must_use]
pub fn semantic_event_name(names: &GeometryNameMap, engine_event: &str) -> String {
    match engine_event.split_once(':') {
        Some((target, action)) => match names.to_semantic_name(target) {
            Some(semantic) => format!("{semantic}:{action}"),
            None => engine_event.to_owned(),
        },
        None => engine_event.to_owned(),
    }
}

#[derive(Debug, Clone)]
struct BoundHandler {
    mapping: EventMapping,
    semantic_name: String,
    handler: Callback,
}

/// Handlers registered by `EventBridge::parse`.
#[derive(Debug, Clone, Default)]
pub struct EventBindings {
    plot_type: String,
    handlers: Vec<BoundHandler>,
}

impl EventBindings {
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn handler_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|bound| bound.mapping.handler_key)
    }

    /// Translates `event` and invokes every handler bound to it, in table
    /// order. Returns the semantic events that were delivered.
    pub fn dispatch(&self, event: &EngineEvent) -> Vec<SemanticEvent> {
        let mut delivered = Vec::new();
        for bound in self
            .handlers
            .iter()
            .filter(|bound| bound.mapping.engine_event == event.name)
        {
            let payload = (bound.mapping.shape)(
                event,
                EventContext {
                    semantic_name: &bound.semantic_name,
                    handler_key: bound.mapping.handler_key,
                    plot_type: &self.plot_type,
                },
            );
            trace!(
                event = %event.name,
                semantic = %payload.name,
                "dispatching plot event"
            );
            bound.handler.call(&[payload.to_option_value()]);
            delivered.push(payload);
        }
        delivered
    }
}

/// Stateless bridge between a plot type's event table and caller handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBridge;

impl EventBridge {
    /// Registers every callback under `events` whose key appears in `table`.
    /// Unknown keys and non-callback values are ignored.
    #[must_use]
    pub fn parse(
        plot_type: &str,
        table: &[EventMapping],
        names: &GeometryNameMap,
        events: Option<&OptionValue>,
    ) -> EventBindings {
        let mut bindings = EventBindings {
            plot_type: plot_type.to_owned(),
            handlers: Vec::new(),
        };
        let Some(events) = events.and_then(OptionValue::as_object) else {
            return bindings;
        };

        for mapping in table {
            let Some(handler) = events
                .get(mapping.handler_key)
                .and_then(OptionValue::as_callback)
            else {
                continue;
            };
            bindings.handlers.push(BoundHandler {
                mapping: *mapping,
                semantic_name: semantic_event_name(names, mapping.engine_event),
                handler: handler.clone(),
            });
        }
        debug!(
            plot_type,
            handlers = bindings.handlers.len(),
            "parsed plot event handlers"
        );
        bindings
    }
}
