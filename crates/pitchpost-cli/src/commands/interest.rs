use clap::Subcommand;
use pitchpost_core::{Database, EventId, InterestLabel, InterestStore};

use super::common::CliResult;

#[derive(Subcommand)]
pub enum InterestAction {
    /// Flip a label on an event
    Toggle {
        /// Event ID
        id: EventId,
        /// Label: applied or to-apply
        label: InterestLabel,
    },
    /// Show which labels an event carries
    Status {
        /// Event ID
        id: EventId,
    },
    /// List labeled event IDs
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: InterestAction) -> CliResult {
    let store = InterestStore::open(Database::open()?);

    match action {
        InterestAction::Toggle { id, label } => {
            let now_present = store.toggle(id, label)?;
            if now_present {
                println!("{id}: added {label}");
            } else {
                println!("{id}: removed {label}");
            }
        }
        InterestAction::Status { id } => {
            for label in InterestLabel::ALL {
                println!("{}: {}", label, store.contains(id, label));
            }
        }
        InterestAction::List { json } => {
            if json {
                let out = serde_json::json!({
                    "applied": store.ids(InterestLabel::Applied),
                    "toApply": store.ids(InterestLabel::ToApply),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for label in InterestLabel::ALL {
                    let ids: Vec<String> =
                        store.ids(label).iter().map(|id| id.to_string()).collect();
                    println!("{}: {}", label, ids.join(", "));
                }
            }
        }
    }
    Ok(())
}
