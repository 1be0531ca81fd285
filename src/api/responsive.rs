use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{trace, warn};

use crate::core::{Datum, ResolvedOptions, Viewport};
use crate::error::PlotResult;
use crate::render::RenderedScene;

/// Pipeline checkpoint at which responsive rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponsiveStage {
    PreRender,
    AfterRender,
}

impl ResponsiveStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreRender => "preRender",
            Self::AfterRender => "afterRender",
        }
    }
}

/// State a responsive rule may read and adjust.
///
/// Rules must write absolute values derived from `viewport` (and the scene,
/// after render) so re-running them on the same size changes nothing.
pub struct ResponsiveContext<'a> {
    pub options: &'a mut ResolvedOptions,
    pub viewport: Viewport,
    pub data: &'a [Datum],
    pub scene: Option<&'a RenderedScene>,
}

pub type ResponsiveMethod = fn(&mut ResponsiveContext<'_>) -> PlotResult<()>;

#[derive(Clone, Copy)]
pub struct ResponsiveRule {
    pub name: &'static str,
    pub stage: ResponsiveStage,
    pub method: ResponsiveMethod,
}

impl ResponsiveRule {
    #[must_use]
    pub const fn new(name: &'static str, stage: ResponsiveStage, method: ResponsiveMethod) -> Self {
        Self {
            name,
            stage,
            method,
        }
    }
}

impl std::fmt::Debug for ResponsiveRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponsiveRule")
            .field("name", &self.name)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

/// Rules grouped by stage, in registration order. Built once per plot type
/// and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResponsiveRuleSet {
    rules: IndexMap<ResponsiveStage, Vec<ResponsiveRule>>,
}

impl ResponsiveRuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn empty() -> &'static Self {
        static EMPTY: OnceLock<ResponsiveRuleSet> = OnceLock::new();
        EMPTY.get_or_init(Self::new)
    }

    #[must_use]
    pub fn with_rule(mut self, rule: ResponsiveRule) -> Self {
        self.rules.entry(rule.stage).or_default().push(rule);
        self
    }

    #[must_use]
    pub fn rules(&self, stage: ResponsiveStage) -> &[ResponsiveRule] {
        self.rules.get(&stage).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stateless executor for responsive rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsiveEngine;

impl ResponsiveEngine {
    /// Responsive rules run only when `responsive` is on and padding is not
    /// `auto`; auto padding already owns sizing.
    #[must_use]
    pub fn is_enabled(options: &ResolvedOptions) -> bool {
        options.bool_at("responsive") == Some(true) && options.str_at("padding") != Some("auto")
    }

    /// Runs every rule of `stage` in order and returns how many completed.
    ///
    /// Options are snapshotted before each rule; a failing rule is rolled
    /// back to its snapshot, logged, and the remaining rules still run.
    pub fn apply(
        stage: ResponsiveStage,
        rules: &ResponsiveRuleSet,
        context: &mut ResponsiveContext<'_>,
    ) -> usize {
        let mut completed = 0;
        for rule in rules.rules(stage) {
            let snapshot = context.options.clone();
            match (rule.method)(context) {
                Ok(()) => {
                    completed += 1;
                    trace!(stage = stage.as_str(), rule = rule.name, "applied responsive rule");
                }
                Err(err) => {
                    *context.options = snapshot;
                    warn!(
                        stage = stage.as_str(),
                        rule = rule.name,
                        error = %err,
                        "responsive rule failed; options restored"
                    );
                }
            }
        }
        completed
    }
}
