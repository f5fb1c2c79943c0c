//! Handler for the `simulate` command
//!
//! Races many requesters against one conference on real OS threads, then
//! drains the wait queue in order and checks that no ticket was sold twice.

use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::core::{ConferenceId, UserId};
use crate::error::{BookingError, Result};
use crate::storage::MemoryStorage;
use indicatif::ProgressBar;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

/// Requester threads alive at once; larger runs go in waves of this size
pub const MAX_CONCURRENT_REQUESTERS: u32 = 64;

/// Parameters of one simulation run
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub conference: ConferenceId,
    pub requesters: u32,
    pub tickets: u32,
    /// Every Nth successful holder confirms, the rest cancel; 0 never confirms
    pub confirm_every: u32,
}

/// What happened during a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    pub conference_id: String,
    pub requesters: u32,
    pub held: u32,
    pub confirmed: u32,
    pub cancelled: u32,
    pub queued: u32,
    pub claimed: u32,
    pub left_in_queue: u32,
    pub tickets_sold: u32,
    pub available_tickets: u32,
    pub total_tickets: u32,
    pub invariant_holds: bool,
}

enum Outcome {
    Confirmed,
    Cancelled,
    Queued(UserId),
}

/// Run the contention scenario against `storage`
pub fn run_simulation(
    storage: &MemoryStorage,
    options: &SimulationOptions,
    progress: &ProgressBar,
) -> Result<SimulationReport> {
    let conference = storage.get_conference(&options.conference)?;
    let holders = AtomicU32::new(0);

    let mut outcomes: Vec<Result<Outcome>> = Vec::new();
    let mut start = 0;
    while start < options.requesters {
        let end = start.saturating_add(MAX_CONCURRENT_REQUESTERS).min(options.requesters);
        thread::scope(|scope| {
            let handles: Vec<_> = (start..end)
                .map(|i| {
                    let holders = &holders;
                    scope.spawn(move || {
                        let outcome = contend(storage, options, holders, i);
                        progress.inc(1);
                        outcome
                    })
                })
                .collect();

            outcomes.extend(handles.into_iter().map(|h| {
                h.join()
                    .unwrap_or_else(|_| Err(BookingError::custom("requester thread panicked")))
            }));
        });
        start = end;
    }
    progress.finish_and_clear();

    let mut report = SimulationReport {
        conference_id: conference.id.to_string(),
        requesters: options.requesters,
        total_tickets: conference.total_tickets,
        ..SimulationReport::default()
    };
    let mut waiting = Vec::new();
    for outcome in outcomes {
        match outcome? {
            Outcome::Confirmed => {
                report.held += 1;
                report.confirmed += 1;
            },
            Outcome::Cancelled => {
                report.held += 1;
                report.cancelled += 1;
            },
            Outcome::Queued(user_id) => {
                report.queued += 1;
                waiting.push(user_id);
            },
        }
    }

    drain_queue(storage, &options.conference, &mut waiting, &mut report)?;

    let after = storage.get_conference(&options.conference)?;
    report.left_in_queue = u32::try_from(waiting.len()).unwrap_or(u32::MAX);
    report.tickets_sold = storage.booked_tickets(&options.conference);
    report.available_tickets = after.available_tickets;
    report.invariant_holds = report.tickets_sold + after.available_tickets == after.total_tickets;
    Ok(report)
}

fn contend(
    storage: &MemoryStorage,
    options: &SimulationOptions,
    holders: &AtomicU32,
    index: u32,
) -> Result<Outcome> {
    let user = storage.create_user(
        &format!("Requester {index}"),
        &format!("requester-{index}@simulation.local"),
    )?;

    match storage.create_reservation(&user.id, &options.conference, options.tickets) {
        Ok(receipt) => {
            let ordinal = holders.fetch_add(1, Ordering::SeqCst) + 1;
            if options.confirm_every > 0 && ordinal % options.confirm_every == 0 {
                storage.confirm_reservation(&receipt.reservation.id)?;
                Ok(Outcome::Confirmed)
            } else {
                storage.cancel_reservation(&receipt.reservation.id)?;
                Ok(Outcome::Cancelled)
            }
        },
        Err(BookingError::InsufficientInventory { .. }) => {
            storage.enqueue(&user.id, &options.conference, options.tickets)?;
            Ok(Outcome::Queued(user.id))
        },
        Err(e) => Err(e),
    }
}

/// Let queue heads claim and confirm until one no longer fits
fn drain_queue(
    storage: &MemoryStorage,
    conference_id: &ConferenceId,
    waiting: &mut Vec<UserId>,
    report: &mut SimulationReport,
) -> Result<()> {
    while let Some(index) = waiting
        .iter()
        .position(|user| storage.queue_position(user, conference_id) == Some(1))
    {
        match storage.claim(&waiting[index], conference_id) {
            Ok(receipt) => {
                storage.confirm_reservation(&receipt.reservation.id)?;
                report.claimed += 1;
                waiting.swap_remove(index);
            },
            Err(BookingError::InsufficientInventory { .. }) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Handler for the `simulate` command
pub fn handle_simulate_command(
    options: &SimulationOptions,
    config: &Config,
    output: &OutputFormatter,
) -> Result<()> {
    if options.requesters == 0 || options.tickets == 0 {
        return Err(BookingError::InvalidRequest(
            "requesters and tickets must be at least 1".to_string(),
        ));
    }

    let storage = MemoryStorage::new(&config.engine);
    let progress = output.progress_bar(u64::from(options.requesters), "Requesters");
    let report = run_simulation(&storage, options, &progress)?;

    if output.is_json() {
        output.print_json(&report)?;
    } else {
        output.success(&format!(
            "Simulated {} requesters on {}",
            report.requesters, report.conference_id
        ));
        output.info(&format!("  Holds granted:    {}", report.held));
        output.info(&format!("    confirmed:      {}", report.confirmed));
        output.info(&format!("    cancelled:      {}", report.cancelled));
        output.info(&format!("  Queued:           {}", report.queued));
        output.info(&format!("    claimed:        {}", report.claimed));
        output.info(&format!("    still waiting:  {}", report.left_in_queue));
        output.info(&format!(
            "  Tickets sold:     {} of {} ({} left)",
            report.tickets_sold, report.total_tickets, report.available_tickets
        ));
    }

    if !report.invariant_holds {
        return Err(BookingError::custom(format!(
            "capacity invariant violated: {} sold + {} available != {} total",
            report.tickets_sold, report.available_tickets, report.total_tickets
        )));
    }
    output.success("Capacity invariant holds");
    Ok(())
}
