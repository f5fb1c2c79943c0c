//! Command-line interface
//!
//! Argument definitions live here; the work for each command is in
//! [`handlers`], and all terminal output goes through [`OutputFormatter`].

pub mod handlers;
mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conference ticket booking engine
#[derive(Debug, Parser)]
#[command(name = "conference-booking", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./booking.toml when present)
    #[arg(short, long, global = true, env = "BOOKING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    #[cfg(feature = "api")]
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the conference catalog with live counters
    Catalog,

    /// Run a concurrent booking simulation against one conference
    Simulate {
        /// Conference to contend for
        #[arg(long, default_value = "conf-1")]
        conference: String,

        /// Number of concurrent requesters
        #[arg(short, long, default_value_t = 50)]
        requesters: u32,

        /// Tickets each requester asks for
        #[arg(short, long, default_value_t = 2)]
        tickets: u32,

        /// Every Nth requester books directly instead of reserving
        #[arg(long, default_value_t = 3)]
        confirm_every: u32,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
}
