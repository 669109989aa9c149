use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::command::{CliCommand, Commands, DevCommands};

mod build;
mod command;
mod dev;
mod print_error;
mod project;
mod stylesheet;
mod watch;

fn main() -> ExitCode {
    let cli = CliCommand::parse();
    init_tracing(cli.verbose);

    let succeeded = match cli.command {
        Commands::Build {
            project,
            compile,
            output,
        } => match build::build(&project, compile.config(), output.as_deref()) {
            Ok(succeeded) => succeeded,
            Err(error) => {
                tracing::error!(%error, "couldn't write output");
                false
            }
        },
        Commands::Watch {
            project,
            compile,
            output,
        } => match watch::watch(&project, compile.config(), output.as_deref()) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(%error, "watching stopped");
                false
            }
        },
        Commands::Dev { command } => match command {
            DevCommands::PrintBundle { project } => dev::print_bundle(&project),
            DevCommands::PrintMacros { project } => dev::print_macros(&project),
            DevCommands::PrintExpanded {
                project,
                max_passes,
            } => dev::print_expanded(&project, max_passes),
        },
    };

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Installs the log subscriber. Logs go to stderr so that compiled output on
/// stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
