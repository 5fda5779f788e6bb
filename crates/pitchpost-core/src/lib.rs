//! # PitchPost Core Library
//!
//! This library provides the core logic behind PitchPost, a listing of
//! pitch and startup competitions. It follows a CLI-first philosophy: every
//! operation is available through the standalone `pitchpost` binary, with
//! any richer front end being a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Dates**: normalizes mixed US/ISO date strings into calendar dates,
//!   degrading to an epoch sentinel instead of failing
//! - **Lifecycle**: buckets events into open, upcoming-closed and past
//!   against "today"
//! - **Filter**: tag and date-window admission
//! - **Interest**: persisted "applied" / "to apply" label sets
//! - **Proximity**: haversine distances from the viewer's position
//! - **Board**: assembles the three buckets for display
//!
//! ## Key Components
//!
//! - [`Catalog`]: validated batch of [`Event`] records
//! - [`build_board`]: the display surface consumed by front ends
//! - [`InterestStore`]: viewer-local labels over an [`InterestBackend`]
//! - [`Config`]: application configuration management

pub mod board;
pub mod catalog;
pub mod date;
pub mod error;
pub mod event;
pub mod filter;
pub mod interest;
pub mod lifecycle;
pub mod logging;
pub mod proximity;
pub mod storage;

pub use board::{build_board, Board, BoardEntry, BoardQuery, InterestScope};
pub use catalog::Catalog;
pub use date::{parse_date, try_parse_date, CalendarDate, EPOCH_SENTINEL};
pub use error::{CatalogError, ConfigError, CoreError, DateParseError, PositionError, StoreError};
pub use event::{Category, DeliveryMode, Event, EventId, Organizer};
pub use filter::{admit, DateWindow, FilterCriteria};
pub use interest::{InterestBackend, InterestLabel, InterestLookup, InterestStore, MemoryBackend};
pub use lifecycle::{classify, DeadlineCountdown, DeadlineUrgency, LifecycleState};
pub use proximity::{distance_miles, Coordinate, PositionOutcome, PositionRequest, PositionSource};
pub use storage::{Config, Database};
