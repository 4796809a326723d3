//! Source Annotation Module
//!
//! Finds performance annotations written as trailing line comments:
//!
//! ```text
//! buf := make([]byte, 64) //no-escape
//! x := a[i]               //no-bounds-check
//! sum := add(a, b)        //must-inline
//! ```
//!
//! The marker must follow real code on the same line and have no space after
//! `//`. Short comments that are almost an annotation are reported as probable
//! typos so a misspelling never silently disables a check.

pub mod scanner;
pub mod walker;

pub use scanner::{AnnotationScanner, ScanOutcome};
pub use walker::{FsWalker, SourceWalker};

use crate::position::{Position, PositionIndex};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A developer's assertion about how the compiler treats one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Annotation {
    /// Values on this line must not be heap allocated
    NoEscape,
    /// Index expressions on this line must have their bounds check removed
    NoBoundsCheck,
    /// The call on this line must be inlined
    MustInline,
}

impl Annotation {
    /// All annotations in match priority order.
    pub const ALL: [Annotation; 3] = [Self::NoEscape, Self::NoBoundsCheck, Self::MustInline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoEscape => "no-escape",
            Self::NoBoundsCheck => "no-bounds-check",
            Self::MustInline => "must-inline",
        }
    }

    /// The comment token as written in source, e.g. `//no-escape`.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::NoEscape => "//no-escape",
            Self::NoBoundsCheck => "//no-bounds-check",
            Self::MustInline => "//must-inline",
        }
    }
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Annotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ann| ann.as_str() == s)
            .ok_or_else(|| format!("unknown annotation: {s}"))
    }
}

/// Annotations per position, in scan order.
pub type AnnotationIndex = PositionIndex<Annotation>;

/// A comment that is probably a misspelled annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbableTypo {
    pub position: Position,
    /// Trimmed comment text, marker included
    pub comment: String,
}

impl std::fmt::Display for ProbableTypo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "probably a typo '{}' at {}", self.comment, self.position)
    }
}
