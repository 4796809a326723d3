//! Annotation scan over a source tree.
//!
//! Each line is split at the first `//`. Only lines with both code and a
//! trailing comment are considered; the comment is matched against the
//! annotation markers in priority order and only the first hit is recorded.

use crate::annotations::walker::SourceWalker;
use crate::annotations::{Annotation, AnnotationIndex, ProbableTypo};
use crate::config::LintConfig;
use crate::edit_distance;
use crate::error::{AnalysisError, AnalysisResult};
use crate::position::Position;
use crate::sink::DiagnosticSink;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const COMMENT_MARKER: &str = "//";

/// Result of scanning a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub annotations: AnnotationIndex,
    /// Probable misspellings, in scan order
    pub typos: Vec<ProbableTypo>,
}

impl ScanOutcome {
    /// True when no comment looked like a misspelled annotation.
    pub fn is_valid(&self) -> bool {
        self.typos.is_empty()
    }
}

/// Scanner for annotation comments.
#[derive(Debug, Clone)]
pub struct AnnotationScanner {
    max_typo_comment_len: usize,
    typo_distance_threshold: usize,
}

impl Default for AnnotationScanner {
    fn default() -> Self {
        Self::new(&LintConfig::default())
    }
}

impl AnnotationScanner {
    pub fn new(config: &LintConfig) -> Self {
        Self {
            max_typo_comment_len: config.max_typo_comment_len,
            typo_distance_threshold: config.typo_distance_threshold,
        }
    }

    /// Scan every file the walker yields under `root`.
    ///
    /// Typos are reported to `sink` as they are found and do not stop the
    /// scan. Any I/O or traversal error aborts it.
    pub fn scan_tree(
        &self,
        walker: &dyn SourceWalker,
        root: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> AnalysisResult<ScanOutcome> {
        let mut outcome = ScanOutcome::default();
        let mut files = 0usize;

        walker.walk(root, &mut |path| {
            files += 1;
            self.scan_file(path, &mut outcome, &mut *sink)
        })?;

        debug!(
            root = %root.display(),
            files,
            positions = outcome.annotations.len(),
            typos = outcome.typos.len(),
            "Scanned source tree"
        );

        Ok(outcome)
    }

    /// Scan one file. The file is closed before this returns.
    pub fn scan_file(
        &self,
        path: &Path,
        outcome: &mut ScanOutcome,
        sink: &mut dyn DiagnosticSink,
    ) -> AnalysisResult<()> {
        let file = File::open(path).map_err(|source| AnalysisError::OpenSource {
            path: path.to_path_buf(),
            source,
        })?;

        self.scan_reader(BufReader::new(file), path, outcome, sink)
    }

    /// Scan lines from any reader, keying positions by `path`.
    pub fn scan_reader<R: BufRead>(
        &self,
        reader: R,
        path: &Path,
        outcome: &mut ScanOutcome,
        sink: &mut dyn DiagnosticSink,
    ) -> AnalysisResult<()> {
        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;
            let line = line.map_err(|source| AnalysisError::ReadSource {
                path: path.to_path_buf(),
                line: line_number,
                source,
            })?;

            let Some((_code, comment)) = split_line(&line) else {
                continue;
            };

            if let Some(annotation) = classify_comment(comment) {
                outcome
                    .annotations
                    .push(Position::from_path(path, line_number), annotation);
                continue;
            }

            if self.looks_like_typo(comment) {
                let typo = ProbableTypo {
                    position: Position::from_path(path, line_number),
                    comment: comment.to_string(),
                };
                sink.emit(typo.clone().into());
                outcome.typos.push(typo);
            }
        }

        Ok(())
    }

    /// Short comment within the edit threshold of some annotation name.
    fn looks_like_typo(&self, comment: &str) -> bool {
        if comment.chars().count() > self.max_typo_comment_len {
            return false;
        }

        edit_distance::closest_within(
            comment,
            Annotation::ALL.iter().map(Annotation::as_str),
            self.typo_distance_threshold,
        )
        .is_some()
    }
}

/// Split a line into trimmed code and comment parts at the first `//`.
///
/// The comment keeps its marker. Returns `None` unless both parts are
/// non-empty.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(COMMENT_MARKER)?;
    let code = line[..idx].trim();
    let comment = line[idx..].trim();

    if code.is_empty() || comment.is_empty() {
        return None;
    }

    Some((code, comment))
}

/// First annotation marker contained in `comment`, in priority order.
pub fn classify_comment(comment: &str) -> Option<Annotation> {
    Annotation::ALL
        .into_iter()
        .find(|ann| comment.contains(ann.marker()))
}
