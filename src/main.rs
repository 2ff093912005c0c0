// src/main.rs

use anyhow::Result;
use clap::Parser;
use pipdoctor::cli::Cli;
use pipdoctor::output::{self, Category};
use pipdoctor::stages::printer;
use pipdoctor::{Config, Context, Ledger, Pip, Pipeline};
use std::process::ExitCode;
use tracing::{info, warn};

/// Exit code for failures that are not a `pipdoctor::Error`
const EXIT_UNEXPECTED: u8 = 5;

fn main() -> ExitCode {
    // Logs go to stderr; the report itself is on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::report(Category::Error, &format!("{}", e));
            let code = e
                .downcast_ref::<pipdoctor::Error>()
                .map_or(EXIT_UNEXPECTED, pipdoctor::Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(program) = cli.pip {
        config.tool.program = program;
    }
    if let Some(path) = cli.ledger {
        config.ledger.path = path;
    }
    if cli.no_skip_deprecated {
        config.upgrade.skip_deprecated = false;
    }
    config.validate()?;

    let ledger = Ledger::new(&config.ledger.path);

    if cli.deprecated {
        printer::run(&ledger)?;
        return Ok(ExitCode::SUCCESS);
    }

    let pip = Pip::from_config(&config.tool);
    if !pip.is_available() {
        warn!("'{}' was not found on PATH", pip.program());
    }

    let ctx = Context {
        tool: &pip,
        ledger: &ledger,
        verbose: cli.verbose,
        skip_deprecated: config.upgrade.skip_deprecated,
        scratch_dir: &config.repair.scratch_dir,
    };

    let state = Pipeline::standard().run(&ctx)?;
    info!(
        "{} installed, {} deprecated, {:?}",
        state.installed.len(),
        state.deprecated.len(),
        state.summary
    );

    Ok(ExitCode::from(state.summary.exit_code()))
}
