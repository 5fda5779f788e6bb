//! Single-event inspection.

use clap::Subcommand;
use pitchpost_core::{classify, Config, Database, DeadlineCountdown, EventId, InterestStore};
use serde_json::json;
use std::path::PathBuf;

use super::common::{load_catalog, resolve_today, CliResult};

#[derive(Subcommand)]
pub enum EventAction {
    /// Show one competition with its status and deadline countdown
    Show {
        /// Event ID
        id: EventId,
        /// Catalog JSON file (defaults to catalog.path from config)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Evaluate as of this date instead of today
        #[arg(long)]
        today: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: EventAction, config: &Config) -> CliResult {
    match action {
        EventAction::Show {
            id,
            catalog,
            today,
            json,
        } => {
            let catalog = load_catalog(catalog, config)?;
            let today = resolve_today(today.as_deref())?;
            let event = catalog
                .get(id)
                .ok_or_else(|| format!("no event with id {id}"))?;
            let state = classify(event, today);
            let countdown = DeadlineCountdown::for_event(event, today);
            let labels = InterestStore::open(Database::open()?).labels_for(id);

            if json {
                let out = json!({
                    "event": event,
                    "state": state,
                    "countdown": countdown,
                    "labels": labels,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("{}", event.name);
            println!("  {} | {}", event.location, event.mode);
            println!("  Category: {}", event.category);
            if let Some(focus) = &event.focus {
                println!("  Focus: {focus}");
            }
            println!("  Prize: {}", event.prize);
            for detail in &event.prize_details {
                println!("    - {detail}");
            }
            println!("  Event date: {}", event.event_date);
            println!("  Deadline: {}", event.deadline_date());
            println!("  {}", countdown.text);
            println!("  Status: {state}");
            if let Some(criteria) = &event.criteria {
                println!("  Criteria: {criteria}");
            }
            if let Some(timings) = &event.timings {
                println!("  Schedule: {timings}");
            }
            println!("  Organizer: {}", event.organizer.name);
            for line in [
                &event.organizer.institution,
                &event.organizer.email,
                &event.organizer.phone,
            ]
            .into_iter()
            .flatten()
            {
                println!("    {line}");
            }
            if !labels.is_empty() {
                let names: Vec<_> = labels.iter().map(|l| l.key()).collect();
                println!("  Labels: {}", names.join(", "));
            }
            println!("  Apply: {}", event.link);
        }
    }
    Ok(())
}
