mod cli;

use analysis::{CheckOptions, LintConfig};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Args, ReportSink, LOG_PREFIX};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "optcheck=warn,analysis=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse_from(cli::normalize_legacy_flags(std::env::args_os()));

    let Some(input_file) = args.input_file.clone() else {
        println!("{LOG_PREFIX}error: compiler output file is required");
        if let Err(e) = Args::command().print_help() {
            tracing::error!(error = %e, "Failed to print usage");
        }
        return ExitCode::from(1);
    };

    match run(&args, input_file) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            println!("{LOG_PREFIX}{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args, input_file: PathBuf) -> Result<u8> {
    let config = match &args.config {
        Some(path) => LintConfig::load(path).context("error loading configuration")?,
        None => LintConfig::from_env(),
    };
    debug!(?config, pkg = %args.pkg.display(), input = %input_file.display(), "Starting check");

    let options = CheckOptions::new(input_file, &args.pkg).with_config(config);
    let mut sink = ReportSink::new(std::io::stdout().lock());

    let outcome = match analysis::check(&options, &mut sink) {
        Ok(outcome) => outcome,
        Err(e) => {
            let context = cli::fatal_context(&e);
            return Err(anyhow::Error::from(e).context(context));
        }
    };

    Ok(cli::exit_status(&outcome, args.no_fail))
}
