//! Analysis error types
//!
//! Every failure here is fatal for the run: the caller reports it once and
//! exits. Advisory findings (probable typos, violations) are not errors and
//! travel through [`crate::sink::DiagnosticSink`] instead.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that abort an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Compiler diagnostic document could not be opened
    #[error("failed to open file {path}: {source}")]
    OpenDiagnostics {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compiler diagnostic document could not be read to the end
    #[error("failed to read {path} at line {line}: {source}")]
    ReadDiagnostics {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A recognized diagnostic line carried a non-numeric line field
    #[error("failed to parse line number at {line}: {token:?}: {source}")]
    InvalidLineNumber {
        /// 1-based ordinal of the offending line in the diagnostic document
        line: usize,
        /// The raw line-number field
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// Source file under the scanned tree could not be opened
    #[error("failed to open source file {path}: {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file could not be read to the end
    #[error("failed to read source file {path} at line {line}: {source}")]
    ReadSource {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration file missing or malformed
    #[error("configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl AnalysisError {
    /// 1-based line ordinal the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ReadDiagnostics { line, .. }
            | Self::InvalidLineNumber { line, .. }
            | Self::ReadSource { line, .. } => Some(*line),
            _ => None,
        }
    }
}
