//! Rewrite passes over a [`TokenBuffer`].
//!
//! Each transformer runs a fixed sequence of [`Stage`]s. A stage may
//! assume the token shape left behind by the stages before it, so
//! the order in [`Stage::ALL`] is part of the contract.

use std::fmt;

use crate::buffer::TokenBuffer;
use crate::config::Config;

pub mod parameters;
pub mod properties;

pub use parameters::{ColonRole, FunctionParametersTransformer, classify_colon};
pub use properties::PropertyTransformer;

/// One named sub-pass of a transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Named-argument colons at call sites become ` = `.
    ///
    /// Pre: raw tokens. Post: every colon left is a type annotation,
    /// closure signature colon or dictionary separator.
    NamedArgumentCalls,
    /// External labels in `func` parameter lists are dropped.
    ///
    /// Pre: declaration colons untouched by the previous stage.
    /// Post: each parameter starts with its internal name.
    ExternalParameterNames,
    /// `->` after a `func` parameter list becomes `: `.
    ///
    /// Pre: parameter lists already stripped of external labels.
    /// Post: return types follow the closing `)` as `): T`.
    ReturnArrows,
    /// `var x: T { ... }` bodies become accessor suffixes.
    ///
    /// Pre: declaration colons intact. Post: read-only properties
    /// use `val`; explicit accessors lose the wrapping braces.
    ComputedProperties,
    /// `modifier(set)` moves to a trailing `modifier set` line.
    ///
    /// Pre: property bodies rewritten. Post: no `(set)` remains
    /// behind a modifier keyword.
    RestrictedSetters,
    /// `var x: T!` becomes `lateinit var x: T`.
    ///
    /// Pre: restricted setters relocated, so the declaration keyword
    /// directly starts the line's declaration.
    LateInitProperties,
}

impl Stage {
    /// Every stage in execution order.
    pub const ALL: [Self; 6] = [
        Self::NamedArgumentCalls,
        Self::ExternalParameterNames,
        Self::ReturnArrows,
        Self::ComputedProperties,
        Self::RestrictedSetters,
        Self::LateInitProperties,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NamedArgumentCalls => "named-argument-calls",
            Self::ExternalParameterNames => "external-parameter-names",
            Self::ReturnArrows => "return-arrows",
            Self::ComputedProperties => "computed-properties",
            Self::RestrictedSetters => "restricted-setters",
            Self::LateInitProperties => "late-init-properties",
        }
    }

    /// Run this stage once over `buffer`, returning the number of
    /// rewrites it applied.
    pub fn apply(self, buffer: &mut TokenBuffer, config: &Config) -> usize {
        match self {
            Self::NamedArgumentCalls => parameters::rewrite_named_argument_calls(buffer, config),
            Self::ExternalParameterNames => parameters::remove_external_parameter_names(buffer),
            Self::ReturnArrows => parameters::rewrite_return_arrows(buffer, config),
            Self::ComputedProperties => properties::rewrite_computed_properties(buffer, config),
            Self::RestrictedSetters => properties::relocate_restricted_setters(buffer, config),
            Self::LateInitProperties => properties::rewrite_late_init_properties(buffer),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub rewrites: usize,
}

impl StageReport {
    /// The stage ran but found nothing to rewrite.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.rewrites == 0
    }
}

/// Outcome of a whole run, one entry per stage executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub stages: Vec<StageReport>,
}

impl TransformReport {
    #[must_use]
    pub fn total_rewrites(&self) -> usize {
        self.stages.iter().map(|s| s.rewrites).sum()
    }

    /// Report for `stage`, or `None` if it never ran.
    #[must_use]
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.stages.iter().all(StageReport::is_noop)
    }
}

impl Extend<StageReport> for TransformReport {
    fn extend<I: IntoIterator<Item = StageReport>>(&mut self, iter: I) {
        self.stages.extend(iter);
    }
}

/// Error raised when a stage leaves the buffer inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// A stage added or dropped an unpaired scope token.
    #[error("{stage} changed the scope balance from {before} to {after}")]
    ScopeBalance {
        stage: Stage,
        before: isize,
        after: isize,
    },
}

/// A rewrite component made of ordered stages.
pub trait Transformer {
    fn name(&self) -> &'static str;

    fn config(&self) -> &Config;

    /// Stages this transformer runs, in order.
    fn stages(&self) -> &'static [Stage];

    /// Run every stage over `buffer` in place.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::ScopeBalance` if a stage changes the
    /// difference between opening and closing scope tokens.
    fn transform(&self, buffer: &mut TokenBuffer) -> Result<Vec<StageReport>, TransformError> {
        self.stages()
            .iter()
            .map(|&stage| run_stage(stage, buffer, self.config()))
            .collect()
    }
}

fn run_stage(
    stage: Stage,
    buffer: &mut TokenBuffer,
    config: &Config,
) -> Result<StageReport, TransformError> {
    let before = buffer.scope_balance();
    let rewrites = stage.apply(buffer, config);
    let after = buffer.scope_balance();
    if before != after {
        return Err(TransformError::ScopeBalance {
            stage,
            before,
            after,
        });
    }
    Ok(StageReport { stage, rewrites })
}

/// Run the parameter transformer, then the property transformer.
///
/// # Errors
///
/// Propagates the first `TransformError` raised by a stage; stages
/// after it do not run.
pub fn transform_all(
    buffer: &mut TokenBuffer,
    config: &Config,
) -> Result<TransformReport, TransformError> {
    let transformers: [Box<dyn Transformer>; 2] = [
        Box::new(FunctionParametersTransformer::new(config.clone())),
        Box::new(PropertyTransformer::new(config.clone())),
    ];

    let mut report = TransformReport::default();
    for transformer in &transformers {
        report.extend(transformer.transform(buffer)?);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_order_matches_transformers() {
        let params = FunctionParametersTransformer::default();
        let props = PropertyTransformer::default();
        let chained: Vec<_> = params
            .stages()
            .iter()
            .chain(props.stages())
            .copied()
            .collect();
        assert_eq!(chained, Stage::ALL);
    }

    #[test]
    fn empty_buffer_is_noop() {
        let mut buffer = TokenBuffer::default();
        let report = transform_all(&mut buffer, &Config::default()).expect("transform");
        assert_eq!(report.stages.len(), Stage::ALL.len());
        assert!(report.is_noop());
        assert_eq!(report.total_rewrites(), 0);
    }

    #[test]
    fn report_lookup_by_stage() {
        let mut buffer = TokenBuffer::parse("var name: String!\n").expect("tokenize");
        let report = transform_all(&mut buffer, &Config::default()).expect("transform");
        let late = report.stage(Stage::LateInitProperties).expect("ran");
        assert_eq!(late.rewrites, 1);
        assert!(report.stage(Stage::ReturnArrows).is_some_and(StageReport::is_noop));
    }

    #[test]
    fn scope_balance_error_display() {
        let err = TransformError::ScopeBalance {
            stage: Stage::ComputedProperties,
            before: 0,
            after: -1,
        };
        assert_eq!(
            err.to_string(),
            "computed-properties changed the scope balance from 0 to -1"
        );
    }
}
