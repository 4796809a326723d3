//! Optimization annotation checker
//!
//! Cross-checks performance intent written in source comments against the
//! optimization decisions a compiler reports:
//!
//! - `//no-escape`: the value must stay on the stack
//! - `//no-bounds-check`: the bounds check must be eliminated
//! - `//must-inline`: the call must be inlined
//!
//! # Architecture
//!
//! ```text
//! compiler output ─→ CompilerOutputParser ─→ HintIndex ───────┐
//!                                                             ├─→ reconcile ─→ violations
//! source tree ─→ SourceWalker ─→ AnnotationScanner ─→ AnnotationIndex
//!                                        │
//!                                        └─→ probable typos
//! ```
//!
//! Both indices are keyed by [`Position`], a canonical `(file, line)` pair.
//! Findings are delivered through a [`DiagnosticSink`] rather than printed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use analysis::{check, CheckOptions, TracingSink};
//!
//! let options = CheckOptions::new("build/escape.txt", ".");
//! let outcome = check(&options, &mut TracingSink)?;
//! if !outcome.is_valid() {
//!     std::process::exit(1);
//! }
//! ```

pub mod annotations;
pub mod check;
pub mod config;
pub mod edit_distance;
pub mod error;
pub mod hints;
pub mod position;
pub mod reconcile;
pub mod sink;

pub use annotations::{
    Annotation, AnnotationIndex, AnnotationScanner, FsWalker, ProbableTypo, ScanOutcome,
    SourceWalker,
};
pub use check::{check, check_with_walker, CheckOptions, CheckOutcome, RunSummary};
pub use config::LintConfig;
pub use error::{AnalysisError, AnalysisResult};
pub use hints::{CompilerHint, CompilerOutputParser, HintIndex};
pub use position::{Position, PositionIndex};
pub use reconcile::{compare_results, reconcile, ReconcileReport, Violation};
pub use sink::{Diagnostic, DiagnosticSink, NullSink, TracingSink};
