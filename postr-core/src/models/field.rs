use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::event::{Address, Event, Geo, Ticket, TimeEdge, TimeRange};
use crate::error::ModelError;

/// Leaf fields of an [`Event`] addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    Title,
    Description,
    Artists,
    Organizers,
    Times,
    Tickets,
    VenueName,
    VenueType,
    Street,
    City,
    Region,
    PostalCode,
    Country,
    Latitude,
    Longitude,
    Enabled,
    Urls,
    TicketUrl,
}

impl EventField {
    pub const ALL: [EventField; 18] = [
        EventField::Title,
        EventField::Description,
        EventField::Artists,
        EventField::Organizers,
        EventField::Times,
        EventField::Tickets,
        EventField::VenueName,
        EventField::VenueType,
        EventField::Street,
        EventField::City,
        EventField::Region,
        EventField::PostalCode,
        EventField::Country,
        EventField::Latitude,
        EventField::Longitude,
        EventField::Enabled,
        EventField::Urls,
        EventField::TicketUrl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventField::Title => "title",
            EventField::Description => "description",
            EventField::Artists => "artists",
            EventField::Organizers => "organizers",
            EventField::Times => "times",
            EventField::Tickets => "tickets",
            EventField::VenueName => "venue_name",
            EventField::VenueType => "venue_type",
            EventField::Street => "street",
            EventField::City => "city",
            EventField::Region => "region",
            EventField::PostalCode => "postal_code",
            EventField::Country => "country",
            EventField::Latitude => "latitude",
            EventField::Longitude => "longitude",
            EventField::Enabled => "enabled",
            EventField::Urls => "urls",
            EventField::TicketUrl => "ticket_url",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EventField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            // "address" was the street line in older documents
            "address" => Ok(EventField::Street),
            "ticketurl" => Ok(EventField::TicketUrl),
            other => EventField::ALL
                .into_iter()
                .find(|field| field.name() == other)
                .ok_or_else(|| ModelError::UnknownField(s.to_string())),
        }
    }
}

/// The value of a single event field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    List(Vec<String>),
    Times(Vec<TimeRange>),
    Tickets(Vec<Ticket>),
}

impl FieldValue {
    /// Empty text and empty lists count as "not set" when resolving fields.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(v) => v.is_empty(),
            FieldValue::Times(v) => v.is_empty(),
            FieldValue::Tickets(v) => v.is_empty(),
            FieldValue::Number(_) | FieldValue::Flag(_) => false,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::Flag(_) => "flag",
            FieldValue::List(_) => "list",
            FieldValue::Times(_) => "times",
            FieldValue::Tickets(_) => "tickets",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
            FieldValue::Times(times) => {
                let labels: Vec<String> = times
                    .iter()
                    .filter_map(|t| Event::date_label(t, TimeEdge::Start))
                    .collect();
                write!(f, "{}", labels.join(", "))
            }
            FieldValue::Tickets(tickets) => {
                let labels: Vec<String> = tickets
                    .iter()
                    .map(|t| {
                        let price = t.price.map(|p| format!("{:.2}", p)).unwrap_or_default();
                        let currency = t.currency.clone().unwrap_or_default();
                        let description = t.description.clone().unwrap_or_default();
                        format!("{} {} {}", price, currency, description)
                            .trim()
                            .to_string()
                    })
                    .collect();
                write!(f, "{}", labels.join(", "))
            }
        }
    }
}

impl Event {
    /// Reads a single field, `None` when it is not set.
    pub fn field(&self, field: EventField) -> Option<FieldValue> {
        let address = self.address.as_ref();
        let geo = self.geo.as_ref();
        match field {
            EventField::Title => self.title.clone().map(FieldValue::Text),
            EventField::Description => self.description.clone().map(FieldValue::Text),
            EventField::Artists => self.artists.clone().map(FieldValue::List),
            EventField::Organizers => self.organizers.clone().map(FieldValue::List),
            EventField::Times => self.times.clone().map(FieldValue::Times),
            EventField::Tickets => self.tickets.clone().map(FieldValue::Tickets),
            EventField::VenueName => self.venue_name.clone().map(FieldValue::Text),
            EventField::VenueType => self.venue_type.clone().map(FieldValue::Text),
            EventField::Street => address.and_then(|a| a.street.clone()).map(FieldValue::Text),
            EventField::City => address.and_then(|a| a.city.clone()).map(FieldValue::Text),
            EventField::Region => address.and_then(|a| a.region.clone()).map(FieldValue::Text),
            EventField::PostalCode => address
                .and_then(|a| a.postal_code.clone())
                .map(FieldValue::Text),
            EventField::Country => address
                .and_then(|a| a.country.clone())
                .map(FieldValue::Text),
            EventField::Latitude => geo.and_then(|g| g.latitude).map(FieldValue::Number),
            EventField::Longitude => geo.and_then(|g| g.longitude).map(FieldValue::Number),
            EventField::Enabled => self.enabled.map(FieldValue::Flag),
            EventField::Urls => self.urls.clone().map(FieldValue::List),
            EventField::TicketUrl => self.ticket_url.clone().map(FieldValue::Text),
        }
    }

    /// Writes a single field; `None` clears it.
    pub fn set_field(
        &mut self,
        field: EventField,
        value: Option<FieldValue>,
    ) -> Result<(), ModelError> {
        let mismatch = |value: &FieldValue, expected: &'static str| ModelError::FieldType {
            field: field.name(),
            expected,
            found: value.kind(),
        };

        macro_rules! assign {
            ($slot:expr, $variant:ident, $expected:literal) => {
                match value {
                    None => $slot = None,
                    Some(FieldValue::$variant(v)) => $slot = Some(v),
                    Some(other) => return Err(mismatch(&other, $expected)),
                }
            };
        }

        match field {
            EventField::Title => assign!(self.title, Text, "text"),
            EventField::Description => assign!(self.description, Text, "text"),
            EventField::Artists => assign!(self.artists, List, "list"),
            EventField::Organizers => assign!(self.organizers, List, "list"),
            EventField::Times => assign!(self.times, Times, "times"),
            EventField::Tickets => assign!(self.tickets, Tickets, "tickets"),
            EventField::VenueName => assign!(self.venue_name, Text, "text"),
            EventField::VenueType => assign!(self.venue_type, Text, "text"),
            EventField::Street => assign!(self.address_mut().street, Text, "text"),
            EventField::City => assign!(self.address_mut().city, Text, "text"),
            EventField::Region => assign!(self.address_mut().region, Text, "text"),
            EventField::PostalCode => assign!(self.address_mut().postal_code, Text, "text"),
            EventField::Country => assign!(self.address_mut().country, Text, "text"),
            EventField::Latitude => assign!(self.geo_mut().latitude, Number, "number"),
            EventField::Longitude => assign!(self.geo_mut().longitude, Number, "number"),
            EventField::Enabled => assign!(self.enabled, Flag, "flag"),
            EventField::Urls => assign!(self.urls, List, "list"),
            EventField::TicketUrl => assign!(self.ticket_url, Text, "text"),
        }
        Ok(())
    }

    fn address_mut(&mut self) -> &mut Address {
        self.address.get_or_insert_with(Address::default)
    }

    fn geo_mut(&mut self) -> &mut Geo {
        self.geo.get_or_insert_with(Geo::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in EventField::ALL {
            assert_eq!(field.name().parse::<EventField>().unwrap(), field);
        }
    }

    #[test]
    fn test_legacy_field_names() {
        assert_eq!(
            "address".parse::<EventField>().unwrap(),
            EventField::Street
        );
        assert_eq!(
            "ticketURL".parse::<EventField>().unwrap(),
            EventField::TicketUrl
        );
        assert_eq!(
            "Postal-Code".parse::<EventField>().unwrap(),
            EventField::PostalCode
        );
        assert!("price".parse::<EventField>().is_err());
    }

    #[test]
    fn test_set_and_read_nested_field() {
        let mut event = Event::new();
        event
            .set_field(EventField::City, Some(FieldValue::Text("Erfurt".into())))
            .unwrap();
        event
            .set_field(EventField::Latitude, Some(FieldValue::Number(50.98)))
            .unwrap();

        assert_eq!(
            event.field(EventField::City),
            Some(FieldValue::Text("Erfurt".into()))
        );
        assert_eq!(
            event.field(EventField::Latitude),
            Some(FieldValue::Number(50.98))
        );
        assert_eq!(event.field(EventField::Street), None);

        event.set_field(EventField::City, None).unwrap();
        assert_eq!(event.field(EventField::City), None);
    }

    #[test]
    fn test_set_field_type_mismatch() {
        let mut event = Event::new();
        let err = event
            .set_field(EventField::Enabled, Some(FieldValue::Text("yes".into())))
            .unwrap_err();
        assert!(err.to_string().contains("enabled"));
        assert!(event.enabled.is_none());
    }

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::List(Vec::new()).is_empty());
        assert!(!FieldValue::Flag(false).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }
}
