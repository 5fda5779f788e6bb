//! Helpers shared by the subcommands.

use chrono::{Local, NaiveDate};
use pitchpost_core::proximity::{FixedPosition, PositionRequest};
use pitchpost_core::{try_parse_date, Catalog, Config, Coordinate};
use std::path::PathBuf;
use std::sync::Arc;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the catalog from `--catalog` or the configured path.
pub fn load_catalog(path: Option<PathBuf>, config: &Config) -> pitchpost_core::error::Result<Catalog> {
    let path = path.unwrap_or_else(|| PathBuf::from(&config.catalog.path));
    Ok(Catalog::load(&path)?)
}

/// `--today` override, or the local calendar date.
pub fn resolve_today(today: Option<&str>) -> pitchpost_core::error::Result<NaiveDate> {
    match today {
        Some(text) => Ok(try_parse_date(text)?),
        None => Ok(Local::now().date_naive()),
    }
}

/// clap value parser for `LAT,LON`.
pub fn parse_coordinate(text: &str) -> Result<Coordinate, String> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{text}'"))?;
    let latitude: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude '{lat}'"))?;
    let longitude: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude '{lon}'"))?;
    let coordinate = Coordinate::new(latitude, longitude);
    if !coordinate.is_valid() {
        return Err(format!("coordinate out of range: {text}"));
    }
    Ok(coordinate)
}

/// Resolve the viewer position through the same one-shot request a
/// richer front end would use. Absence is the normal case.
pub fn resolve_position(near: Option<Coordinate>, config: &Config) -> Option<Coordinate> {
    if near.is_none() {
        return None;
    }
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::warn!(error = %e, "could not start runtime for position lookup");
            return None;
        }
    };
    runtime.block_on(async {
        PositionRequest::spawn(Arc::new(FixedPosition(near)), config.position_timeout())
            .outcome()
            .await
            .coordinate()
    })
}

pub fn format_distance(distance: Option<f64>) -> String {
    distance.map_or_else(String::new, |d| format!(" ({d:.0} mi)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_pairs() {
        let c = parse_coordinate("40.7128, -74.0060").unwrap();
        assert_eq!(c, Coordinate::new(40.7128, -74.0060));
        assert!(parse_coordinate("40.7").is_err());
        assert!(parse_coordinate("95,0").is_err());
        assert!(parse_coordinate("north,east").is_err());
    }

    #[test]
    fn today_override_accepts_both_orders() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(resolve_today(Some("2025-06-15")).unwrap(), expected);
        assert_eq!(resolve_today(Some("06/15/2025")).unwrap(), expected);
        assert!(resolve_today(Some("whenever")).is_err());
    }

    #[test]
    fn position_passes_through() {
        let config = Config::default();
        assert_eq!(resolve_position(None, &config), None);
        let c = Coordinate::new(1.0, 2.0);
        assert_eq!(resolve_position(Some(c), &config), Some(c));
    }
}
