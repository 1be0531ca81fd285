/// Bidirectional lookup between a plot type's semantic geometry names and
/// engine primitive names.
///
/// Both directions are written out as literal tables so they can be read
/// side by side; `validate` (and the geometry map tests) check they are exact
/// inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryNameMap {
    to_engine: &'static [(&'static str, &'static str)],
    to_semantic: &'static [(&'static str, &'static str)],
}

impl GeometryNameMap {
    #[must_use]
    pub const fn new(
        to_engine: &'static [(&'static str, &'static str)],
        to_semantic: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            to_engine,
            to_semantic,
        }
    }

    #[must_use]
    pub fn to_engine_name(&self, semantic: &str) -> Option<&'static str> {
        lookup(self.to_engine, semantic)
    }

    #[must_use]
    pub fn to_semantic_name(&self, engine: &str) -> Option<&'static str> {
        lookup(self.to_semantic, engine)
    }

    pub fn semantic_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.to_engine.iter().map(|(semantic, _)| *semantic)
    }

    pub fn engine_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.to_semantic.iter().map(|(engine, _)| *engine)
    }

    /// Returns the first name that does not round-trip, if any.
    #[must_use]
    pub fn validate(&self) -> Result<(), &'static str> {
        for semantic in self.semantic_names() {
            let round_trip = self
                .to_engine_name(semantic)
                .and_then(|engine| self.to_semantic_name(engine));
            if round_trip != Some(semantic) {
                return Err(semantic);
            }
        }
        for engine in self.engine_names() {
            let round_trip = self
                .to_semantic_name(engine)
                .and_then(|semantic| self.to_engine_name(semantic));
            if round_trip != Some(engine) {
                return Err(engine);
            }
        }
        Ok(())
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}
