//! Compiler diagnostic parsing
//!
//! Single streaming pass over the diagnostic text. Each line is classified by
//! substring against an ordered pattern table and only the first hit counts,
//! so a line carries at most one hint.

use crate::error::{AnalysisError, AnalysisResult};
use crate::hints::{CompilerHint, HintIndex};
use crate::position::Position;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Pattern definition for classification.
struct Pattern {
    hint: CompilerHint,
    /// Substring to look for anywhere in the line
    needle: &'static str,
}

/// Recognized phrases, highest priority first.
const PATTERNS: &[Pattern] = &[
    Pattern {
        hint: CompilerHint::EscapesToHeap,
        needle: "escapes to heap",
    },
    Pattern {
        hint: CompilerHint::MovedToHeap,
        needle: "moved to heap",
    },
    Pattern {
        hint: CompilerHint::StaysOnStack,
        needle: "stays on stack",
    },
    Pattern {
        hint: CompilerHint::Inlined,
        needle: "inlining call",
    },
    Pattern {
        hint: CompilerHint::FoundIsInBounds,
        needle: "Found IsInBounds",
    },
];

/// Parser for compiler optimization diagnostics
pub struct CompilerOutputParser;

impl CompilerOutputParser {
    /// Parse the diagnostic document at `path`.
    ///
    /// Relative file references inside the document are resolved against the
    /// document's own directory.
    pub fn parse_file(path: &Path) -> AnalysisResult<HintIndex> {
        let file = File::open(path).map_err(|source| AnalysisError::OpenDiagnostics {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let hints = Self::parse_reader(BufReader::new(file), base_dir, path)?;

        debug!(
            path = %path.display(),
            positions = hints.len(),
            hints = hints.total(),
            "Parsed compiler output"
        );

        Ok(hints)
    }

    /// Parse diagnostic text from any reader. `origin` only labels read errors.
    pub fn parse_reader<R: BufRead>(
        reader: R,
        base_dir: &Path,
        origin: &Path,
    ) -> AnalysisResult<HintIndex> {
        let mut hints = HintIndex::new();

        for (idx, line) in reader.lines().enumerate() {
            let ordinal = idx + 1;
            let line = line.map_err(|source| AnalysisError::ReadDiagnostics {
                path: origin.to_path_buf(),
                line: ordinal,
                source,
            })?;

            let Some(hint) = Self::classify(&line) else {
                continue;
            };

            if let Some(position) = Self::position_of(&line, base_dir, ordinal)? {
                hints.push(position, hint);
            }
        }

        Ok(hints)
    }

    /// Classify a line by the first matching phrase in priority order.
    pub fn classify(line: &str) -> Option<CompilerHint> {
        PATTERNS
            .iter()
            .find(|pattern| line.contains(pattern.needle))
            .map(|pattern| pattern.hint)
    }

    /// Extract the `file:line` position from the leading token of a line.
    ///
    /// Returns `Ok(None)` when the token has no line field at all; a line
    /// field that is not a number is an error naming `ordinal`.
    fn position_of(
        line: &str,
        base_dir: &Path,
        ordinal: usize,
    ) -> AnalysisResult<Option<Position>> {
        let Some(token) = line.split_whitespace().next() else {
            return Ok(None);
        };

        let mut fields = token.split(':');
        let (Some(file), Some(line_field)) = (fields.next(), fields.next()) else {
            return Ok(None);
        };

        let line_number = line_field
            .parse::<usize>()
            .map_err(|source| AnalysisError::InvalidLineNumber {
                line: ordinal,
                token: line_field.to_string(),
                source,
            })?;

        Ok(Some(Position::resolve(base_dir, file, line_number)))
    }
}
