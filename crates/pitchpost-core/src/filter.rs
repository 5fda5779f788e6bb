//! Event admission by tag and date window.
//!
//! A single tag value is matched against category, delivery mode and
//! region at once, so `"Virtual"` admits virtual events and also any event
//! whose region happens to be named `"Virtual"`. The date window looks at
//! the event date only, never the deadline.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::date::CalendarDate;
use crate::event::{Category, DeliveryMode, Event};

/// Tag value that matches every event.
pub const ALL_TAG: &str = "all";

/// Calendar window the event date must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateWindow {
    #[default]
    All,
    ThisMonth,
    /// Month number is today's plus one. In December nothing matches;
    /// January of the next year is not treated as "next month".
    NextMonth,
    ThisYear,
}

impl DateWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ThisMonth => "thisMonth",
            Self::NextMonth => "nextMonth",
            Self::ThisYear => "thisYear",
        }
    }

    pub fn contains(&self, date: CalendarDate, today: CalendarDate) -> bool {
        match self {
            Self::All => true,
            Self::ThisMonth => date.year() == today.year() && date.month() == today.month(),
            Self::NextMonth => date.month() == today.month() + 1,
            Self::ThisYear => date.year() == today.year(),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "" => Ok(Self::All),
            "thisMonth" | "this-month" => Ok(Self::ThisMonth),
            "nextMonth" | "next-month" => Ok(Self::NextMonth),
            "thisYear" | "this-year" => Ok(Self::ThisYear),
            other => Err(format!(
                "unknown date window '{other}' (expected all, thisMonth, nextMonth, thisYear)"
            )),
        }
    }
}

/// The viewer's current filter selection. Both parts are optional and an
/// unset part admits everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<DateWindow>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// Tag predicate: `"all"`, or naming the category, mode or region.
///
/// Category and mode tags accept every spelling the catalog does, so
/// "In-Person" and "InPerson" select the same events.
pub fn matches_tag(event: &Event, tag: &str) -> bool {
    tag == ALL_TAG
        || Category::from_tag(tag) == Some(event.category)
        || DeliveryMode::from_tag(tag) == Some(event.mode)
        || event.region.as_deref() == Some(tag)
}

/// Whether `event` passes both predicates of `criteria` as of `today`.
pub fn admit(event: &Event, criteria: &FilterCriteria, today: CalendarDate) -> bool {
    let tag_ok = criteria
        .tag
        .as_deref()
        .map_or(true, |tag| matches_tag(event, tag));
    let window_ok = criteria
        .window
        .map_or(true, |window| window.contains(event.event_date(), today));
    tag_ok && window_ok
}
