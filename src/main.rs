//! conference-booking - In-memory conference ticket booking
//!
//! This is the main entry point for the conference-booking CLI application.
//! It handles command-line argument parsing and dispatches to the appropriate
//! command handlers.

use clap::Parser;
use conference_booking::cli::handlers::{
    SimulationOptions, handle_catalog_command, handle_config_command, handle_simulate_command,
};
use conference_booking::cli::{Cli, Commands, OutputFormatter};
use conference_booking::config::Config;
use conference_booking::core::ConferenceId;
use conference_booking::error::{BookingError, Result};
use std::process;
use tracing_subscriber::EnvFilter;

/// Main entry point for the conference-booking CLI
///
/// Parses command-line arguments and executes the requested command.
/// Handles errors gracefully and provides helpful error messages to users.
fn main() {
    let cli = Cli::parse();

    // Configure output formatter based on flags
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Load configuration, set up logging, then dispatch
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.logging.level);

    dispatch_command(cli.command, &config, formatter)
}

/// `RUST_LOG` wins, then `--verbose`, then the configured level
fn init_tracing(verbose: bool, configured: &str) {
    let fallback = if verbose { "debug" } else { configured };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so `--json` output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch_command(command: Commands, config: &Config, formatter: &OutputFormatter) -> Result<()> {
    match command {
        #[cfg(feature = "api")]
        Commands::Serve { host, port } => {
            use conference_booking::cli::handlers::handle_serve_command;
            handle_serve_command(host, port, config, formatter)
        },
        Commands::Catalog => handle_catalog_command(config, formatter),
        Commands::Simulate {
            conference,
            requesters,
            tickets,
            confirm_every,
        } => handle_simulate_command(
            &SimulationOptions {
                conference: ConferenceId::from(conference),
                requesters,
                tickets,
                confirm_every,
            },
            config,
            formatter,
        ),
        Commands::Config { command } => handle_config_command(command, config, formatter),
    }
}

/// Handle errors and display them to the user
///
/// In text mode this prints the message and any suggestions; with `--json`
/// it prints a single JSON object instead.
fn handle_error(error: &BookingError, formatter: &OutputFormatter) {
    if formatter.is_json() {
        let _ = formatter.json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "kind": error.kind(),
            "recoverable": error.is_recoverable(),
        }));
        return;
    }

    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    // In verbose mode, show the full error
    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
