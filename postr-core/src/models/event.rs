use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An event extracted from a poster.
///
/// The same type carries both the canonical event written by the server and
/// the user overlay stored on a poster. Every field is optional so that an
/// overlay can hold only the fields the user changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<TimeRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(
        rename = "ticketURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_url: Option<String>,
}

/// Postal address of the venue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Geo coordinates of the venue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// A time range the event takes place in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<DateTime<FixedOffset>>,
    #[serde(rename = "allDay", default)]
    pub all_day: bool,
}

/// A ticket category offered for the event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Which end of a [`TimeRange`] to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEdge {
    Start,
    Stop,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.address.get_or_insert_with(Address::default).city = Some(city.into());
        self
    }

    /// Street and city as one line: "street, postal city".
    pub fn address_line(&self) -> String {
        let Some(address) = &self.address else {
            return String::new();
        };
        let mut line = String::new();

        if let Some(street) = non_empty(&address.street) {
            line.push_str(street);
        }

        if let Some(city) = non_empty(&address.city) {
            if !line.is_empty() {
                line.push_str(", ");
            }
            if let Some(postal_code) = non_empty(&address.postal_code) {
                line.push_str(postal_code);
                line.push(' ');
            }
            line.push_str(city);
        }

        line
    }

    /// Formats one end of a time range, without the clock time for all-day events.
    pub fn date_label(time: &TimeRange, edge: TimeEdge) -> Option<String> {
        let date = match edge {
            TimeEdge::Start => time.start,
            TimeEdge::Stop => time.stop,
        }?;
        let format = if time.all_day {
            "%d.%m.%Y"
        } else {
            "%d.%m.%Y, %H:%M Uhr"
        };
        Some(date.format(format).to_string())
    }

    /// Best available label for the venue: venue name, then address, then title.
    pub fn venue_label(&self) -> Option<String> {
        if let Some(name) = non_empty(&self.venue_name) {
            return Some(name.to_string());
        }
        let address = self.address_line();
        if !address.is_empty() {
            return Some(address);
        }
        non_empty(&self.title).map(str::to_string)
    }

    /// Plain-text summary used when sharing or exporting an event.
    pub fn beautify(&self) -> String {
        let mut text = self.title.clone().unwrap_or_default();

        let first_start = self
            .times
            .as_ref()
            .and_then(|times| times.first())
            .and_then(|time| Self::date_label(time, TimeEdge::Start));
        if let Some(date) = first_start {
            text.push('\n');
            text.push_str(&date);
            text.push('\n');
        }
        if let Some(venue) = non_empty(&self.venue_name) {
            text.push('\n');
            text.push_str(venue);
        }
        let has_city = self
            .address
            .as_ref()
            .is_some_and(|a| non_empty(&a.city).is_some());
        if has_city {
            text.push('\n');
            text.push_str(&self.address_line());
        }
        if let Some(description) = non_empty(&self.description) {
            text.push_str("\n\n");
            text.push_str(description);
        }

        text
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.beautify())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
