//! codeclimate-tslint CLI
//!
//! Code Climate engine for the tslint static analysis tool.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use codeclimate_tslint_core::{
    TsLinter, TsLinterOptions, TslintProcess, engine_config, get_rules,
};

mod output;

/// codeclimate-tslint - Code Climate engine for tslint
#[derive(Parser)]
#[command(name = "codeclimate-tslint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine configuration file mounted by the platform
    #[arg(long, default_value = "/config.json")]
    config_file: PathBuf,

    /// Directory holding the code under analysis
    #[arg(long, default_value = "/code")]
    code_dir: PathBuf,

    /// Directory the engine is installed into
    #[arg(long, default_value = "/usr/src/app")]
    linter_dir: PathBuf,

    /// tslint executable, defaulting to the one installed under the linter
    /// directory
    #[arg(long)]
    tslint_bin: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging. Stdout carries the issue stream, so logs go to
    // stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let engine_config = engine_config::load(&cli.config_file);
    let tslint_bin = cli
        .tslint_bin
        .unwrap_or_else(|| cli.linter_dir.join("node_modules/.bin/tslint"));

    let registry = get_rules(&cli.linter_dir);
    let options = TsLinterOptions {
        target_path: cli.code_dir,
        linter_path: cli.linter_dir,
        engine_config,
    };
    let linter = TsLinter::new(options, registry, Box::new(TslintProcess::new(tslint_bin)))
        .into_diagnostic()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut reported = 0usize;
    for issue in linter.lint().into_diagnostic()? {
        output::write_issue(&mut out, &issue).into_diagnostic()?;
        reported += 1;
    }
    info!("Analysis complete, {} issues reported", reported);

    Ok(())
}
