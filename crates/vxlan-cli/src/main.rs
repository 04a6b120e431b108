//! `vxlan`: expands VXLAN service intents into per-device configuration.
//!
//! Exit status: 0 on success, 1 for internal faults, 2 for bad input or a
//! rejected service, 3 when a device or template does not exist, 4 for
//! configuration and document problems.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help / --version are "errors" that go to stdout
            let code = if e.use_stderr() { 2 } else { 0 };
            return ExitCode::from(code);
        }
    };
    let verbose = cli.global.verbose > 0;

    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report(CliError::from(e), verbose),
    };

    // flushes the file writer on drop
    let _log_guard = match init_logging(&cli.global, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("vxlan: cannot set up logging: {e:#}");
            return ExitCode::from(1);
        }
    };
    debug!(command = ?cli.command, ?config, "starting");

    let output = OutputManager::new(&cli.global, &config);
    match run(cli.command, config, output) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => report(e, verbose),
    }
}

#[instrument(skip_all)]
fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Render(args) => commands::render::execute(args, config, output),
        Commands::Templates(args) => commands::templates::execute(args, config, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Logs the failure, prints the report to stderr and picks the exit status.
fn report(err: CliError, verbose: bool) -> ExitCode {
    err.log();
    let text = if io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{text}");
    ExitCode::from(err.exit_code())
}
