//! Competition event records.
//!
//! An [`Event`] is immutable once the catalog is loaded. Dates are kept as
//! the raw strings the catalog supplied and normalized on demand through
//! [`crate::date::parse_date`], so a malformed date degrades the one record
//! instead of rejecting the whole catalog.

use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::{parse_date, CalendarDate};
use crate::proximity::Coordinate;

/// Stable catalog identifier.
pub type EventId = u64;

/// Audience an event is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "High School", alias = "high_school")]
    HighSchool,
    #[serde(alias = "college")]
    College,
    #[serde(alias = "corporate")]
    Corporate,
    #[serde(alias = "open")]
    Open,
}

/// Resolve a free-form tag through the same spellings the catalog accepts.
fn from_spelling<'a, T: Deserialize<'a>>(tag: &'a str) -> Option<T> {
    let de: StrDeserializer<'a, ValueError> = tag.into_deserializer();
    T::deserialize(de).ok()
}

impl Category {
    /// Any catalog spelling of a category, e.g. "High School" or "HighSchool".
    pub fn from_tag(tag: &str) -> Option<Self> {
        from_spelling(tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighSchool => "HighSchool",
            Self::College => "College",
            Self::Corporate => "Corporate",
            Self::Open => "Open",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the event is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryMode {
    #[serde(alias = "In-Person", alias = "In Person", alias = "in_person")]
    InPerson,
    #[serde(alias = "virtual", alias = "Online")]
    Virtual,
    #[serde(alias = "hybrid")]
    Hybrid,
}

impl DeliveryMode {
    /// Any catalog spelling of a mode, e.g. "In-Person" or "InPerson".
    pub fn from_tag(tag: &str) -> Option<Self> {
        from_spelling(tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InPerson => "InPerson",
            Self::Virtual => "Virtual",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who runs the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

/// A single competition in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Raw event date as supplied by the catalog.
    #[serde(rename = "date", default)]
    pub event_date: String,
    /// Raw application deadline as supplied by the catalog.
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub prize: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prize_details: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,
    pub mode: DeliveryMode,
    pub organizer: Organizer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<String>,
}

impl Event {
    /// Normalized event date, or the epoch sentinel when unparseable.
    pub fn event_date(&self) -> CalendarDate {
        parse_date(&self.event_date)
    }

    /// Normalized application deadline, or the epoch sentinel when unparseable.
    pub fn deadline_date(&self) -> CalendarDate {
        parse_date(&self.deadline)
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinates
    }
}
