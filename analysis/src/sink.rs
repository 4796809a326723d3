//! Diagnostic sinks
//!
//! Typo warnings and reconciliation violations are handed to a sink instead
//! of being written to a global logger. Tests collect them in a `Vec`; the
//! binary prints them.

use crate::annotations::ProbableTypo;
use crate::reconcile::Violation;
use serde::{Deserialize, Serialize};

/// A user-facing finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Comment that looks like a misspelled annotation
    ProbableTypo(ProbableTypo),
    /// Annotation contradicted by the compiler
    Violation(Violation),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProbableTypo(typo) => typo.fmt(f),
            Self::Violation(violation) => violation.fmt(f),
        }
    }
}

impl From<ProbableTypo> for Diagnostic {
    fn from(typo: ProbableTypo) -> Self {
        Self::ProbableTypo(typo)
    }
}

impl From<Violation> for Diagnostic {
    fn from(violation: Violation) -> Self {
        Self::Violation(violation)
    }
}

/// Receiver for diagnostics, in emission order.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::ProbableTypo(typo) => {
                tracing::warn!(position = %typo.position, comment = %typo.comment, "{diagnostic}")
            }
            Diagnostic::Violation(violation) => {
                tracing::warn!(
                    position = %violation.position,
                    annotation = %violation.annotation,
                    "{diagnostic}"
                )
            }
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}
