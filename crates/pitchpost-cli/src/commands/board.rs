use clap::Args;
use pitchpost_core::{
    build_board, BoardEntry, BoardQuery, Config, Coordinate, Database, DateWindow, InterestScope,
    InterestStore, LifecycleState,
};
use std::path::PathBuf;

use super::common::{
    format_distance, load_catalog, parse_coordinate, resolve_position, resolve_today, CliResult,
};

#[derive(Args)]
pub struct BoardArgs {
    /// Catalog JSON file (defaults to catalog.path from config)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Category, mode or region to match, in any catalog spelling ("all" matches everything)
    #[arg(long)]
    tag: Option<String>,
    /// Date window: all, thisMonth, nextMonth, thisYear
    #[arg(long)]
    window: Option<DateWindow>,
    /// Narrow to labeled events: all, applied, to-apply, any
    #[arg(long, default_value = "all")]
    interest: InterestScope,
    /// Evaluate as of this date instead of today
    #[arg(long)]
    today: Option<String>,
    /// Viewer position as LAT,LON for distance annotations
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    near: Option<Coordinate>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: BoardArgs, config: &Config) -> CliResult {
    let catalog = load_catalog(args.catalog, config)?;
    let today = resolve_today(args.today.as_deref())?;

    let mut criteria = config.criteria();
    if let Some(tag) = args.tag {
        criteria = criteria.with_tag(tag);
    }
    if let Some(window) = args.window {
        criteria = criteria.with_window(window);
    }

    let reference = resolve_position(args.near, config);
    let store = match args.interest {
        InterestScope::Everything => None,
        _ => Some(InterestStore::open(Database::open()?)),
    };

    let mut query = BoardQuery::new(today, &criteria).with_reference(reference);
    if let Some(store) = &store {
        query = query.with_labels(store, args.interest);
    }
    let board = build_board(catalog.events(), &query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    for state in LifecycleState::ALL {
        print_bucket(state, board.bucket(state));
    }
    Ok(())
}

fn heading(state: LifecycleState) -> &'static str {
    match state {
        LifecycleState::OpenForApplication => "Open for application",
        LifecycleState::UpcomingClosed => "Upcoming (applications closed)",
        LifecycleState::Past => "Past",
    }
}

fn print_bucket(state: LifecycleState, entries: &[BoardEntry<'_>]) {
    println!("{} ({})", heading(state), entries.len());
    for entry in entries {
        let event = entry.event;
        println!(
            "  [{}] {} | {} | {}{}",
            event.id,
            event.name,
            event.event_date,
            event.location,
            format_distance(entry.distance_miles)
        );
    }
}
