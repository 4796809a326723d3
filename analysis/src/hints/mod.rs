//! Compiler Hint Module
//!
//! Turns the compiler's optimization diagnostics (escape analysis, inlining
//! and bounds-check reports) into position-keyed facts.
//!
//! # Recognized phrases
//!
//! ```text
//! main.go:10:6: moved to heap: buf          → MovedToHeap
//! main.go:12:9: &x escapes to heap          → EscapesToHeap
//! main.go:14:2: y stays on stack            → StaysOnStack
//! main.go:20:11: inlining call to add       → Inlined
//! main.go:31:10: Found IsInBounds           → FoundIsInBounds
//! ```
//!
//! Every other line is ignored.

pub mod parser;

pub use parser::CompilerOutputParser;

use crate::position::PositionIndex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An optimization decision reported by the compiler for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerHint {
    /// Value is heap allocated because a reference outlives the frame
    EscapesToHeap,
    /// Variable was moved to the heap
    MovedToHeap,
    /// Value was proven not to escape
    StaysOnStack,
    /// A runtime bounds check survived (`-d=ssa/check_bce`)
    FoundIsInBounds,
    /// Call was inlined at this site
    Inlined,
}

impl CompilerHint {
    pub const ALL: [CompilerHint; 5] = [
        Self::EscapesToHeap,
        Self::MovedToHeap,
        Self::StaysOnStack,
        Self::FoundIsInBounds,
        Self::Inlined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EscapesToHeap => "escapes-to-heap",
            Self::MovedToHeap => "moved-to-heap",
            Self::StaysOnStack => "stays-on-stack",
            Self::FoundIsInBounds => "found-is-in-bounds",
            Self::Inlined => "inlined",
        }
    }

    /// Whether this hint means the value lives on the heap.
    pub fn is_heap_allocation(&self) -> bool {
        matches!(self, Self::EscapesToHeap | Self::MovedToHeap)
    }
}

impl std::fmt::Display for CompilerHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|hint| hint.as_str() == s)
            .ok_or_else(|| format!("unknown compiler hint: {s}"))
    }
}

/// Hints observed per position, in document order.
pub type HintIndex = PositionIndex<CompilerHint>;
