//! Great-circle proximity between the viewer and events.
//!
//! This module provides:
//! - Haversine distance in miles between two coordinates
//! - Per-event distance annotations and a nearest-first ranking
//! - Map markers for every event that has a coordinate
//! - One-shot, cancellable acquisition of the viewer's position
//!
//! Annotations exist only when both sides have a coordinate. A missing
//! viewer position (denied, timed out, never requested) yields no
//! annotations at all rather than distances from a default point.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::PositionError;
use crate::event::{Event, EventId};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Geographic center of the contiguous United States, the initial map view.
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate {
    latitude: 39.8283,
    longitude: -98.5795,
};

/// A latitude/longitude pair in decimal degrees.
///
/// Serialized as a `[latitude, longitude]` array, matching the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components finite and within their geographic ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(c: Coordinate) -> Self {
        (c.latitude, c.longitude)
    }
}

/// Haversine distance between two coordinates, in miles.
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).abs().to_radians();
    let dlon = (b.longitude - a.longitude).abs().to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Distance when both sides are known; `None` otherwise.
pub fn distance_between(a: Option<Coordinate>, b: Option<Coordinate>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) if a.is_valid() && b.is_valid() => Some(distance_miles(a, b)),
        _ => None,
    }
}

/// Distance from the viewer to one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityAnnotation {
    pub event_id: EventId,
    pub distance_miles: f64,
}

/// Annotate every event that has a coordinate, in catalog order.
pub fn annotate(events: &[Event], reference: Option<Coordinate>) -> Vec<ProximityAnnotation> {
    if reference.is_none() {
        return Vec::new();
    }
    events
        .iter()
        .filter_map(|event| {
            distance_between(reference, event.coordinate()).map(|distance_miles| {
                ProximityAnnotation {
                    event_id: event.id,
                    distance_miles,
                }
            })
        })
        .collect()
}

/// Annotations sorted nearest first; equal distances keep catalog order.
pub fn rank_by_distance(events: &[Event], reference: Option<Coordinate>) -> Vec<ProximityAnnotation> {
    let mut ranked = annotate(events, reference);
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    ranked
}

/// A pin on the event map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub event_id: EventId,
    pub name: String,
    pub location: String,
    pub link: String,
    pub coordinate: Coordinate,
}

/// Markers for every event with a usable coordinate, in catalog order.
pub fn map_markers(events: &[Event]) -> Vec<MapMarker> {
    events
        .iter()
        .filter_map(|event| {
            let coordinate = event.coordinate().filter(Coordinate::is_valid)?;
            Some(MapMarker {
                event_id: event.id,
                name: event.name.clone(),
                location: event.location.clone(),
                link: event.link.clone(),
                coordinate,
            })
        })
        .collect()
}

/// Something that can report the viewer's current position.
///
/// Implementations resolve once: with a coordinate, or with a
/// [`PositionError`] when the viewer declined or no fix is available.
pub trait PositionSource: Send + Sync + 'static {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, PositionError>> + Send;
}

/// A position known up front (for example, entered by the viewer).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinate>);

impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        self.0
            .ok_or_else(|| PositionError::Unavailable("no position provided".into()))
    }
}

/// How a position request ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionOutcome {
    Resolved(Coordinate),
    Denied,
    Unavailable,
    TimedOut,
    Cancelled,
}

impl PositionOutcome {
    /// The resolved coordinate, if any. Every other outcome means
    /// "show no distances".
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Resolved(c) => Some(*c),
            _ => None,
        }
    }
}

/// Ask `source` for a position, giving up after `timeout`.
///
/// Never fails: denial, unavailability and timeout all map to an outcome
/// without a coordinate.
pub async fn locate<S: PositionSource>(source: &S, timeout: Duration) -> PositionOutcome {
    match tokio::time::timeout(timeout, source.current_position()).await {
        Ok(Ok(coordinate)) if coordinate.is_valid() => PositionOutcome::Resolved(coordinate),
        Ok(Ok(coordinate)) => {
            tracing::warn!(?coordinate, "position source returned an out-of-range coordinate");
            PositionOutcome::Unavailable
        }
        Ok(Err(PositionError::Denied)) => {
            tracing::warn!("position request denied");
            PositionOutcome::Denied
        }
        Ok(Err(PositionError::Unavailable(reason))) => {
            tracing::warn!(%reason, "position unavailable");
            PositionOutcome::Unavailable
        }
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "position request timed out");
            PositionOutcome::TimedOut
        }
    }
}

/// A position request running in the background.
///
/// Dropping or cancelling the request aborts it, so a position that
/// arrives after the viewer moved on is discarded.
pub struct PositionRequest {
    handle: Option<JoinHandle<PositionOutcome>>,
}

impl PositionRequest {
    /// Start a request on the current tokio runtime.
    pub fn spawn<S: PositionSource>(source: Arc<S>, timeout: Duration) -> Self {
        let handle = tokio::spawn(async move { locate(source.as_ref(), timeout).await });
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the request to settle.
    pub async fn outcome(mut self) -> PositionOutcome {
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or(PositionOutcome::Cancelled),
            None => PositionOutcome::Cancelled,
        }
    }

    /// Abandon the request; any late result is dropped.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PositionRequest {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);
    const LOS_ANGELES: Coordinate = Coordinate::new(34.0522, -118.2437);

    #[test]
    fn new_york_to_los_angeles() {
        let d = distance_miles(NEW_YORK, LOS_ANGELES);
        assert!((d - 2445.0).abs() <= 15.0, "got {d}");
    }

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(distance_miles(NEW_YORK, NEW_YORK), 0.0);
    }

    #[test]
    fn missing_side_has_no_distance() {
        assert_eq!(distance_between(None, Some(NEW_YORK)), None);
        assert_eq!(distance_between(Some(NEW_YORK), None), None);
        assert!(distance_between(Some(NEW_YORK), Some(LOS_ANGELES)).is_some());
    }

    #[test]
    fn invalid_coordinate_has_no_distance() {
        let bogus = Coordinate::new(f64::NAN, 10.0);
        assert_eq!(distance_between(Some(bogus), Some(NEW_YORK)), None);
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn coordinate_serializes_as_pair() {
        let json = serde_json::to_string(&NEW_YORK).unwrap();
        assert_eq!(json, "[40.7128,-74.006]");
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NEW_YORK);
    }

    #[test]
    fn annotations_and_markers_use_camel_case_keys() {
        let annotation = ProximityAnnotation {
            event_id: 7,
            distance_miles: 1.5,
        };
        let json = serde_json::to_value(annotation).unwrap();
        assert_eq!(json["eventId"], 7);
        assert_eq!(json["distanceMiles"], 1.5);

        let marker = MapMarker {
            event_id: 7,
            name: "Demo Day".into(),
            location: "New York".into(),
            link: String::new(),
            coordinate: NEW_YORK,
        };
        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["eventId"], 7);
        assert!(json.get("event_id").is_none());
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let a = Coordinate::new(lat1, lon1);
            let b = Coordinate::new(lat2, lon2);
            prop_assert_eq!(distance_miles(a, b), distance_miles(b, a));
        }

        #[test]
        fn distance_is_bounded_by_half_circumference(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let d = distance_miles(Coordinate::new(lat1, lon1), Coordinate::new(lat2, lon2));
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_MILES + 1e-6);
        }
    }

    struct Denying;

    impl PositionSource for Denying {
        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            Err(PositionError::Denied)
        }
    }

    struct Never;

    impl PositionSource for Never {
        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn fixed_position_resolves() {
        let outcome = locate(&FixedPosition(Some(NEW_YORK)), Duration::from_secs(1)).await;
        assert_eq!(outcome, PositionOutcome::Resolved(NEW_YORK));
        assert_eq!(outcome.coordinate(), Some(NEW_YORK));
    }

    #[tokio::test]
    async fn empty_fixed_position_is_unavailable() {
        let outcome = locate(&FixedPosition(None), Duration::from_secs(1)).await;
        assert_eq!(outcome, PositionOutcome::Unavailable);
    }

    #[tokio::test]
    async fn denial_yields_no_coordinate() {
        let outcome = locate(&Denying, Duration::from_secs(1)).await;
        assert_eq!(outcome, PositionOutcome::Denied);
        assert_eq!(outcome.coordinate(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_source_times_out() {
        let outcome = locate(&Never, Duration::from_millis(50)).await;
        assert_eq!(outcome, PositionOutcome::TimedOut);
    }

    #[tokio::test]
    async fn spawned_request_reports_outcome() {
        let request = PositionRequest::spawn(
            Arc::new(FixedPosition(Some(LOS_ANGELES))),
            Duration::from_secs(1),
        );
        assert_eq!(request.outcome().await, PositionOutcome::Resolved(LOS_ANGELES));
    }

    struct Late {
        arrived: Arc<AtomicBool>,
    }

    impl PositionSource for Late {
        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.arrived.store(true, Ordering::SeqCst);
            Ok(NEW_YORK)
        }
    }

    fn late_source() -> (Arc<Late>, Arc<AtomicBool>) {
        let arrived = Arc::new(AtomicBool::new(false));
        let source = Arc::new(Late {
            arrived: Arc::clone(&arrived),
        });
        (source, arrived)
    }

    #[tokio::test(start_paused = true)]
    async fn late_position_arrives_when_not_cancelled() {
        let (source, arrived) = late_source();
        let request = PositionRequest::spawn(source, Duration::from_secs(60));
        assert_eq!(request.outcome().await, PositionOutcome::Resolved(NEW_YORK));
        assert!(arrived.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_request_discards_late_position() {
        let (source, arrived) = late_source();
        let request = PositionRequest::spawn(source, Duration::from_secs(60));
        tokio::task::yield_now().await;
        assert!(!request.is_finished());
        request.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!arrived.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_request_discards_late_position() {
        let (source, arrived) = late_source();
        let request = PositionRequest::spawn(source, Duration::from_secs(60));
        tokio::task::yield_now().await;
        drop(request);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!arrived.load(Ordering::SeqCst));
    }
}
