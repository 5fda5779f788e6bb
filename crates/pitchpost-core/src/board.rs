//! Three-bucket event board.
//!
//! Classifies each event, applies the filter, optionally narrows to events
//! the viewer labeled, and attaches distances when a viewer position is
//! known. Every bucket keeps catalog order. Events are evaluated one at a
//! time, so a bad record only affects its own placement.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::date::CalendarDate;
use crate::event::Event;
use crate::filter::{admit, FilterCriteria};
use crate::interest::{InterestLabel, InterestLookup};
use crate::lifecycle::{classify, LifecycleState};
use crate::proximity::{distance_between, Coordinate};

/// Interest-based narrowing of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterestScope {
    /// No narrowing.
    #[default]
    Everything,
    /// Only events carrying this label.
    Only(InterestLabel),
    /// Events carrying either label.
    AnyLabel,
}

impl InterestScope {
    fn admits(&self, event: &Event, labels: Option<&dyn InterestLookup>) -> bool {
        let Some(labels) = labels else {
            return matches!(self, Self::Everything);
        };
        match self {
            Self::Everything => true,
            Self::Only(label) => labels.has_label(event.id, *label),
            Self::AnyLabel => InterestLabel::ALL
                .iter()
                .any(|label| labels.has_label(event.id, *label)),
        }
    }
}

impl FromStr for InterestScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "everything" => Ok(Self::Everything),
            "any" | "labeled" => Ok(Self::AnyLabel),
            other => other.parse::<InterestLabel>().map(Self::Only).map_err(|_| {
                format!("unknown interest scope '{other}' (expected all, applied, to-apply, any)")
            }),
        }
    }
}

/// Everything the board needs besides the events themselves.
#[derive(Clone, Copy)]
pub struct BoardQuery<'a> {
    pub today: CalendarDate,
    pub criteria: &'a FilterCriteria,
    pub scope: InterestScope,
    pub labels: Option<&'a dyn InterestLookup>,
    pub reference: Option<Coordinate>,
}

impl<'a> BoardQuery<'a> {
    pub fn new(today: CalendarDate, criteria: &'a FilterCriteria) -> Self {
        Self {
            today,
            criteria,
            scope: InterestScope::Everything,
            labels: None,
            reference: None,
        }
    }

    pub fn with_labels(mut self, labels: &'a dyn InterestLookup, scope: InterestScope) -> Self {
        self.labels = Some(labels);
        self.scope = scope;
        self
    }

    pub fn with_reference(mut self, reference: Option<Coordinate>) -> Self {
        self.reference = reference;
        self
    }
}

/// One event placed on the board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry<'a> {
    pub event: &'a Event,
    pub state: LifecycleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// The three lifecycle buckets, each in catalog order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board<'a> {
    pub open_for_application: Vec<BoardEntry<'a>>,
    pub upcoming_closed: Vec<BoardEntry<'a>>,
    pub past: Vec<BoardEntry<'a>>,
}

impl<'a> Board<'a> {
    pub fn bucket(&self, state: LifecycleState) -> &[BoardEntry<'a>] {
        match state {
            LifecycleState::OpenForApplication => &self.open_for_application,
            LifecycleState::UpcomingClosed => &self.upcoming_closed,
            LifecycleState::Past => &self.past,
        }
    }

    pub fn len(&self) -> usize {
        self.open_for_application.len() + self.upcoming_closed.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the board for `events` under `query`.
pub fn build_board<'a>(events: &'a [Event], query: &BoardQuery<'_>) -> Board<'a> {
    let mut board = Board::default();
    for event in events {
        if !admit(event, query.criteria, query.today) {
            continue;
        }
        if !query.scope.admits(event, query.labels) {
            continue;
        }
        let state = classify(event, query.today);
        let entry = BoardEntry {
            event,
            state,
            distance_miles: distance_between(query.reference, event.coordinate()),
        };
        match state {
            LifecycleState::OpenForApplication => board.open_for_application.push(entry),
            LifecycleState::UpcomingClosed => board.upcoming_closed.push(entry),
            LifecycleState::Past => board.past.push(entry),
        }
    }
    board
}
