//! Reconciliation Report: violations found by the reconciler
//!
//! One [`Violation`] per annotation the compiler contradicted, in position
//! order.

use crate::annotations::Annotation;
use crate::position::Position;
use serde::{Deserialize, Serialize};

/// An annotation contradicted by the compiler's hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub position: Position,
    pub annotation: Annotation,
}

impl Violation {
    /// What the annotation applies to, for messages.
    pub fn subject(&self) -> &'static str {
        match self.annotation {
            Annotation::NoEscape | Annotation::NoBoundsCheck => "variable",
            Annotation::MustInline => "function",
        }
    }

    /// What the compiler did instead.
    pub fn failure(&self) -> &'static str {
        match self.annotation {
            Annotation::NoEscape => "escapes to heap",
            Annotation::NoBoundsCheck => "bounds check is not eliminated",
            Annotation::MustInline => "is not inlined",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {} is marked as {} but {}",
            self.subject(),
            self.position,
            self.annotation,
            self.failure()
        )
    }
}

/// Outcome of reconciling one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Violations ordered by position, then annotation order at that position
    pub violations: Vec<Violation>,
    /// Annotations that were checked
    pub checked: usize,
}

impl ReconcileReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Short one-line summary
    pub fn summary(&self) -> String {
        if self.is_valid() {
            format!("{} annotation(s) checked, all hold", self.checked)
        } else {
            format!(
                "{} annotation(s) checked, {} violated",
                self.checked,
                self.violations.len()
            )
        }
    }
}
