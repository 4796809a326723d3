//! Full run: parse compiler output, scan sources, reconcile.

use crate::annotations::{AnnotationScanner, FsWalker, SourceWalker};
use crate::config::LintConfig;
use crate::error::AnalysisResult;
use crate::hints::CompilerOutputParser;
use crate::reconcile;
use crate::sink::DiagnosticSink;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Inputs for one run.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Compiler diagnostic document
    pub compiler_output: PathBuf,
    /// Root of the source tree to scan
    pub source_root: PathBuf,
    pub config: LintConfig,
}

impl CheckOptions {
    pub fn new(compiler_output: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            compiler_output: compiler_output.into(),
            source_root: source_root.into(),
            config: LintConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LintConfig) -> Self {
        self.config = config;
        self
    }
}

/// Counts describing what a run looked at and found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Distinct positions carrying at least one annotation
    pub annotated_positions: usize,
    /// Distinct positions carrying at least one compiler hint
    pub hinted_positions: usize,
    pub violations: usize,
    pub typos: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub summary: RunSummary,
    /// No probable typos were found
    pub annotations_valid: bool,
    /// Every annotation held
    pub results_valid: bool,
}

impl CheckOutcome {
    pub fn is_valid(&self) -> bool {
        self.annotations_valid && self.results_valid
    }
}

/// Run with the filesystem walker built from `options.config`.
pub fn check(
    options: &CheckOptions,
    sink: &mut dyn DiagnosticSink,
) -> AnalysisResult<CheckOutcome> {
    let walker = FsWalker::new(&options.config);
    check_with_walker(options, &walker, sink)
}

/// Run with a caller-supplied walker.
///
/// The compiler output is parsed first, so a bad diagnostic document fails
/// the run before any source is read.
pub fn check_with_walker(
    options: &CheckOptions,
    walker: &dyn SourceWalker,
    sink: &mut dyn DiagnosticSink,
) -> AnalysisResult<CheckOutcome> {
    let hints = CompilerOutputParser::parse_file(&options.compiler_output)?;

    let scanner = AnnotationScanner::new(&options.config);
    let scan = scanner.scan_tree(walker, &options.source_root, &mut *sink)?;

    let report = reconcile::reconcile(&hints, &scan.annotations);
    let summary = RunSummary {
        annotated_positions: scan.annotations.len(),
        hinted_positions: hints.len(),
        violations: report.violations.len(),
        typos: scan.typos.len(),
    };
    let results_valid = report.is_valid();

    for violation in report.violations {
        sink.emit(violation.into());
    }

    info!(
        annotated = summary.annotated_positions,
        hinted = summary.hinted_positions,
        violations = summary.violations,
        typos = summary.typos,
        "Check complete"
    );

    Ok(CheckOutcome {
        summary,
        annotations_valid: scan.is_valid(),
        results_valid,
    })
}
