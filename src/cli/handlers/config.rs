//! Handler for the `config` command

use crate::cli::{ConfigCommands, OutputFormatter};
use crate::config::Config;
use crate::error::Result;

pub fn handle_config_command(
    command: ConfigCommands,
    config: &Config,
    output: &OutputFormatter,
) -> Result<()> {
    match command {
        ConfigCommands::Show => show(config, output),
    }
}

fn show(config: &Config, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        return output.print_json(config);
    }

    output.info("[engine]");
    output.info(&format!(
        "  hold_duration_secs  = {}",
        config.engine.hold_duration_secs
    ));
    output.info(&format!(
        "  sweep_interval_secs = {}",
        config.engine.sweep_interval_secs
    ));
    output.info(&format!("  event_capacity      = {}", config.engine.event_capacity));
    output.info("[server]");
    output.info(&format!("  host = {}", config.server.host));
    output.info(&format!("  port = {}", config.server.port));
    output.info("[logging]");
    output.info(&format!("  level = {}", config.logging.level));
    Ok(())
}
