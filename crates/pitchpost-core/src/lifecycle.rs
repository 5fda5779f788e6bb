//! Lifecycle classification of events against "today".
//!
//! Two independent comparisons decide the state: the event date against
//! today, then the application deadline against today. Both comparisons
//! are inclusive on the boundary day. Nothing is stored; callers reclassify
//! whenever today changes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::CalendarDate;
use crate::event::Event;

/// Where an event sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleState {
    /// Deadline and event date are both today or later.
    OpenForApplication,
    /// Deadline has passed; the event itself is today or later.
    UpcomingClosed,
    /// The event date is before today.
    Past,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 3] = [
        LifecycleState::OpenForApplication,
        LifecycleState::UpcomingClosed,
        LifecycleState::Past,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenForApplication => "openForApplication",
            Self::UpcomingClosed => "upcomingClosed",
            Self::Past => "past",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify from already-normalized dates.
pub fn classify_dates(
    event_date: CalendarDate,
    deadline: CalendarDate,
    today: CalendarDate,
) -> LifecycleState {
    if event_date < today {
        LifecycleState::Past
    } else if deadline >= today {
        LifecycleState::OpenForApplication
    } else {
        LifecycleState::UpcomingClosed
    }
}

/// Classify an event as of `today`.
pub fn classify(event: &Event, today: CalendarDate) -> LifecycleState {
    classify_dates(event.event_date(), event.deadline_date(), today)
}

/// How close the application deadline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeadlineUrgency {
    Passed,
    /// Three days or fewer remain, including the deadline day itself.
    Urgent,
    Comfortable,
}

const URGENT_WITHIN_DAYS: i64 = 3;

/// Countdown to an event's application deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineCountdown {
    /// Whole days until the deadline; negative once it has passed.
    pub days_remaining: i64,
    pub urgency: DeadlineUrgency,
    pub text: String,
}

impl DeadlineCountdown {
    pub fn for_event(event: &Event, today: CalendarDate) -> Self {
        Self::from_days(days_until_deadline(event, today))
    }

    pub fn from_days(days_remaining: i64) -> Self {
        let urgency = if days_remaining < 0 {
            DeadlineUrgency::Passed
        } else if days_remaining <= URGENT_WITHIN_DAYS {
            DeadlineUrgency::Urgent
        } else {
            DeadlineUrgency::Comfortable
        };
        Self {
            days_remaining,
            urgency,
            text: countdown_text(days_remaining),
        }
    }
}

pub fn days_until_deadline(event: &Event, today: CalendarDate) -> i64 {
    (event.deadline_date() - today).num_days()
}

pub fn countdown_text(days_remaining: i64) -> String {
    match days_remaining {
        n if n > 1 => format!("Deadline to apply in {n} days"),
        1 => "Deadline to apply in 1 day".to_string(),
        0 => "Deadline is today!".to_string(),
        _ => "Deadline passed".to_string(),
    }
}
