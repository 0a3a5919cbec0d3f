//! Main entry point for the portband CLI.
//!
//! This is the command-line interface for the portband port configuration
//! tool. It provides commands for working with a `key: value` port file:
//! - `load`: Check the ports and export every entry
//! - `validate`: Check the ports and fail on findings
//! - `report`: Summarize band compliance
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = portband::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        settings: cli.settings,
        strict: cli.strict,
        ignore_env: cli.ignore_env,
        scope: cli.scope,
        band: cli.band,
        no_live_check: cli.no_live_check,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Load(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Report(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
