//! Command handlers
//!
//! Each handler builds what it needs from the loaded [`Config`] and reports
//! through the shared [`OutputFormatter`](crate::cli::OutputFormatter).
//!
//! [`Config`]: crate::config::Config

mod catalog;
mod config;
#[cfg(feature = "api")]
mod serve;
mod simulate;

pub use catalog::handle_catalog_command;
pub use config::handle_config_command;
#[cfg(feature = "api")]
pub use serve::handle_serve_command;
pub use simulate::{SimulationOptions, SimulationReport, handle_simulate_command, run_simulation};
