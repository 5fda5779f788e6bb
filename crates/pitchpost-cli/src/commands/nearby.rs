use clap::Args;
use pitchpost_core::proximity::rank_by_distance;
use pitchpost_core::{Config, Coordinate};
use std::path::PathBuf;

use super::common::{load_catalog, parse_coordinate, resolve_position, CliResult};

#[derive(Args)]
pub struct NearbyArgs {
    /// Viewer position as LAT,LON
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    near: Coordinate,
    /// Maximum number of results
    #[arg(long)]
    limit: Option<usize>,
    /// Catalog JSON file (defaults to catalog.path from config)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: NearbyArgs, config: &Config) -> CliResult {
    let catalog = load_catalog(args.catalog, config)?;
    let reference = resolve_position(Some(args.near), config);

    let mut ranked = rank_by_distance(catalog.events(), reference);
    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("no competitions with a known location");
    }
    for annotation in &ranked {
        let name = catalog
            .get(annotation.event_id)
            .map_or("", |event| event.name.as_str());
        println!(
            "{:>8.1} mi  [{}] {}",
            annotation.distance_miles, annotation.event_id, name
        );
    }
    Ok(())
}
