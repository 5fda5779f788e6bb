use clap::Args;
use pitchpost_core::proximity::{map_markers, DEFAULT_MAP_CENTER};
use pitchpost_core::Config;
use serde_json::json;
use std::path::PathBuf;

use super::common::{load_catalog, CliResult};

#[derive(Args)]
pub struct MapArgs {
    /// Catalog JSON file (defaults to catalog.path from config)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: MapArgs, config: &Config) -> CliResult {
    let catalog = load_catalog(args.catalog, config)?;
    let markers = map_markers(catalog.events());

    if args.json {
        let out = json!({ "center": DEFAULT_MAP_CENTER, "markers": markers });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for marker in &markers {
        println!(
            "[{}] {} @ {:.4},{:.4} | {}",
            marker.event_id,
            marker.name,
            marker.coordinate.latitude,
            marker.coordinate.longitude,
            marker.location
        );
    }
    Ok(())
}
