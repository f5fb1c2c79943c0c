//! Handler for the `catalog` command

use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::core::format_cents;
use crate::error::Result;
use crate::storage::MemoryStorage;

/// Print every conference with its capacity, price and live counters
pub fn handle_catalog_command(config: &Config, output: &OutputFormatter) -> Result<()> {
    let storage = MemoryStorage::new(&config.engine);
    let listings = storage.list_conferences();

    if output.is_json() {
        return output.print_json(&serde_json::json!({
            "conferences": listings,
            "count": listings.len(),
        }));
    }

    output.success(&format!("{} conferences", listings.len()));
    for listing in &listings {
        let conf = &listing.conference;
        output.info("");
        output.info(&format!("{}  {}", conf.id, conf.name));
        output.info(&format!("  Location:  {}", conf.location));
        output.info(&format!("  Date:      {}", conf.date.format("%Y-%m-%d")));
        output.info(&format!("  Price:     {}", format_cents(conf.price_cents)));
        output.info(&format!(
            "  Tickets:   {}/{} available",
            conf.available_tickets, conf.total_tickets
        ));
        output.info(&format!(
            "  Held:      {}  Queue: {}",
            listing.stats.reserved_count, listing.stats.queue_length
        ));
    }

    Ok(())
}
