//! Entry point for the `rundata` binary.

use std::process::ExitCode;

use clap::Parser;
use rundata_cli::cli::Cli;
use rundata_cli::CliError;
use rundata_common_log::{LogConfig, LogLevel};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Findings were already printed; don't repeat them as a log line.
            if !matches!(e, CliError::Validation { .. }) {
                error!(code = e.code(), "{e}");
            }
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config)
}

fn init_logging(cli: &Cli) {
    let mut config = LogConfig::from_env();
    if cli.verbose > 0 || cli.quiet {
        config.level = LogLevel::from_verbosity(cli.verbose, cli.quiet);
    }
    if let Err(e) = rundata_common_log::init(config) {
        eprintln!("warning: {e}");
    }
}
