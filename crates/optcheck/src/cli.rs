//! Command-line surface: arguments, legacy flag spellings, report output and
//! exit status.

use analysis::{AnalysisError, CheckOutcome, Diagnostic, DiagnosticSink};
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Fixed tag in front of every report line.
pub const LOG_PREFIX: &str = "optcheck: ";

/// Flags that older wrappers pass with a single dash.
const LEGACY_LONG_FLAGS: &[&str] = &["pkg", "no-fail", "config"];

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "optcheck",
    version,
    about = "Verify //no-escape, //no-bounds-check and //must-inline annotations against compiler output"
)]
pub struct Args {
    /// Path to the compiler output file (e.g. `go build -gcflags='-m -d=ssa/check_bce' 2> out.txt`)
    #[arg(short = 'f', value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Path to the package directory
    #[arg(long = "pkg", value_name = "PATH", default_value = ".")]
    pub pkg: PathBuf,

    /// Exit with status code 0 even if errors are found
    #[arg(long = "no-fail", default_value_t = false)]
    pub no_fail: bool,

    /// TOML file overriding suffixes, skipped directories and typo thresholds
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Rewrite `-pkg`, `-no-fail` and `-config` (with or without `=value`) to
/// their double-dash forms. Arguments after `--` are left alone.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }

            let Some(rest) = text.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split('=').next().unwrap_or(rest);

            if LEGACY_LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Process exit status for a completed run.
pub fn exit_status(outcome: &CheckOutcome, no_fail: bool) -> u8 {
    if outcome.is_valid() || no_fail {
        0
    } else {
        1
    }
}

/// Which phase a fatal error belongs to, for the report line.
pub fn fatal_context(err: &AnalysisError) -> &'static str {
    match err {
        AnalysisError::OpenDiagnostics { .. }
        | AnalysisError::ReadDiagnostics { .. }
        | AnalysisError::InvalidLineNumber { .. } => "error parsing compiler output",
        AnalysisError::Config { .. } => "error loading configuration",
        AnalysisError::OpenSource { .. }
        | AnalysisError::ReadSource { .. }
        | AnalysisError::Walk(_) => "error parsing source code",
    }
}

/// Writes one tagged line per diagnostic.
pub struct ReportSink<W: Write> {
    out: W,
}

impl<W: Write> ReportSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for ReportSink<W> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if let Err(e) = writeln!(self.out, "{LOG_PREFIX}{diagnostic}") {
            tracing::error!(error = %e, "Failed to write report line");
        }
    }
}
