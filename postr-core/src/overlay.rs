//! Field-by-field overlay of user edits on top of canonical event data.
//!
//! Every overlayable type lists its fields in three classes:
//! - scalars: replaced when present in the overlay, diffed by value equality
//! - nested objects: merged recursively, diffed recursively
//! - arrays: replaced wholesale, diffed by structural equality of the whole array
//!
//! Arrays are never merged element-wise. Once an array shows up in an
//! overlay it shadows the canonical array completely.

use crate::models::{Address, Event, Geo};

/// A record that can be layered on top of another record of the same type.
pub trait Overlay: Default + Clone {
    /// Writes every field present in `top` onto `self`.
    fn apply(&mut self, top: &Self);

    /// Returns the fields of `edited` that differ from `canonical`.
    fn diff(edited: &Self, canonical: &Self) -> Self;
}

macro_rules! impl_overlay {
    (
        $ty:ty {
            scalar: [$($scalar:ident),* $(,)?],
            nested: [$($nested:ident),* $(,)?],
            array: [$($array:ident),* $(,)?] $(,)?
        }
    ) => {
        impl Overlay for $ty {
            fn apply(&mut self, top: &Self) {
                $(
                    if let Some(value) = &top.$scalar {
                        self.$scalar = Some(value.clone());
                    }
                )*
                $(
                    if let Some(value) = &top.$nested {
                        match &mut self.$nested {
                            Some(base) => base.apply(value),
                            None => self.$nested = Some(value.clone()),
                        }
                    }
                )*
                $(
                    if let Some(value) = &top.$array {
                        self.$array = Some(value.clone());
                    }
                )*
            }

            fn diff(edited: &Self, canonical: &Self) -> Self {
                let mut overlay = Self::default();
                $(
                    if edited.$scalar.is_some() && edited.$scalar != canonical.$scalar {
                        overlay.$scalar = edited.$scalar.clone();
                    }
                )*
                $(
                    if let Some(value) = &edited.$nested {
                        let base = canonical.$nested.clone().unwrap_or_default();
                        overlay.$nested = Some(Overlay::diff(value, &base));
                    }
                )*
                $(
                    if edited.$array.is_some() && edited.$array != canonical.$array {
                        overlay.$array = edited.$array.clone();
                    }
                )*
                overlay
            }
        }
    };
}

impl_overlay!(Event {
    scalar: [title, description, venue_name, venue_type, enabled, ticket_url],
    nested: [address, geo],
    array: [artists, organizers, times, tickets, urls],
});

impl_overlay!(Address {
    scalar: [street, city, region, postal_code, country],
    nested: [],
    array: [],
});

impl_overlay!(Geo {
    scalar: [latitude, longitude],
    nested: [],
    array: [],
});

/// Computes the user overlay for an edited event.
///
/// With a canonical event the overlay holds only what differs from it. A
/// field the user set back to its canonical value is dropped. Without a
/// canonical event the whole edited event becomes the overlay. Overlays
/// never carry the canonical identity.
pub fn compute_overlay(edited: &Event, canonical: Option<&Event>) -> Event {
    let mut overlay = match canonical {
        Some(canonical) => Event::diff(edited, canonical),
        None => edited.clone(),
    };
    overlay.id = None;
    overlay.rev = None;
    overlay
}

/// Materializes the merged view of a canonical event and a user overlay.
pub fn merge_overlay(canonical: Option<&Event>, overlay: &Event) -> Event {
    match canonical {
        Some(canonical) => {
            let mut merged = canonical.clone();
            merged.apply(overlay);
            merged
        }
        None => overlay.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ticket, TimeRange};

    fn canonical() -> Event {
        let mut event = Event::new().with_title("A").with_city("X");
        event.id = Some("ev-1".to_string());
        event.rev = Some("2-ff".to_string());
        event.description = Some("canonical description".to_string());
        event.artists = Some(vec!["Band 1".to_string(), "Band 2".to_string()]);
        event.tickets = Some(vec![Ticket {
            price: Some(10.0),
            currency: Some("EUR".to_string()),
            description: None,
        }]);
        event.geo = Some(Geo {
            latitude: Some(51.0),
            longitude: Some(13.7),
        });
        event
    }

    #[test]
    fn test_only_changed_scalar_in_overlay() {
        let canonical = canonical();
        let mut edited = merge_overlay(Some(&canonical), &Event::default());
        edited.address.as_mut().unwrap().city = Some("Y".to_string());

        let overlay = compute_overlay(&edited, Some(&canonical));

        assert_eq!(
            overlay.address,
            Some(Address {
                city: Some("Y".to_string()),
                ..Default::default()
            })
        );
        assert!(overlay.title.is_none());
        assert!(overlay.description.is_none());
        assert!(overlay.artists.is_none());
        assert!(overlay.tickets.is_none());
        assert_eq!(overlay.geo, Some(Geo::default()));
        assert!(overlay.id.is_none());
        assert!(overlay.rev.is_none());
    }

    #[test]
    fn test_array_replaced_wholesale() {
        let canonical = canonical();
        let mut edited = canonical.clone();
        edited
            .artists
            .as_mut()
            .unwrap()
            .push("Band 3".to_string());

        let overlay = compute_overlay(&edited, Some(&canonical));
        assert_eq!(
            overlay.artists.as_deref().unwrap(),
            ["Band 1", "Band 2", "Band 3"]
        );

        // Shrinking the canonical array later does not leak through the overlay
        let mut newer = canonical.clone();
        newer.artists = Some(vec!["Band 1".to_string()]);
        let merged = merge_overlay(Some(&newer), &overlay);
        assert_eq!(merged.artists.unwrap().len(), 3);
    }

    #[test]
    fn test_unchanged_array_absent() {
        let canonical = canonical();
        let overlay = compute_overlay(&canonical.clone(), Some(&canonical));
        assert!(overlay.artists.is_none());
        assert!(overlay.tickets.is_none());
        assert!(overlay.times.is_none());
    }

    #[test]
    fn test_field_equal_to_canonical_is_dropped() {
        let canonical = canonical();
        let previous_overlay = Event::new().with_title("B");
        let mut edited = merge_overlay(Some(&canonical), &previous_overlay);
        edited.title = Some("A".to_string());

        let overlay = compute_overlay(&edited, Some(&canonical));
        assert!(overlay.title.is_none());
    }

    #[test]
    fn test_no_canonical_overlay_is_full_edit() {
        let mut edited = Event::new().with_title("Local only");
        edited.times = Some(vec![TimeRange::default()]);
        edited.id = Some("should-not-leak".to_string());

        let overlay = compute_overlay(&edited, None);
        assert_eq!(overlay.title.as_deref(), Some("Local only"));
        assert_eq!(overlay.times.as_ref().unwrap().len(), 1);
        assert!(overlay.id.is_none());
    }

    #[test]
    fn test_nested_merge_is_field_by_field() {
        let canonical = canonical();
        let overlay = Event {
            address: Some(Address {
                street: Some("Neue Str. 5".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = merge_overlay(Some(&canonical), &overlay);
        let address = merged.address.unwrap();
        assert_eq!(address.street.as_deref(), Some("Neue Str. 5"));
        assert_eq!(address.city.as_deref(), Some("X"));
        assert_eq!(merged.id.as_deref(), Some("ev-1"));
    }

    #[test]
    fn test_overlay_idempotent_under_reapplication() {
        let canonical = canonical();
        let mut edited = canonical.clone();
        edited.title = Some("B".to_string());
        edited.enabled = Some(false);
        edited.tickets = Some(Vec::new());
        edited.geo.as_mut().unwrap().latitude = Some(50.9);

        let overlay = compute_overlay(&edited, Some(&canonical));
        let reapplied = merge_overlay(Some(&canonical), &overlay);
        assert_eq!(compute_overlay(&reapplied, Some(&canonical)), overlay);
    }

    #[test]
    fn test_round_trip_reproduces_edit() {
        let canonical = canonical();
        let mut edited = canonical.clone();
        edited.title = Some("Renamed".to_string());
        edited.address.as_mut().unwrap().postal_code = Some("01067".to_string());
        edited.urls = Some(vec!["https://example.com".to_string()]);
        edited.artists = None;

        let overlay = compute_overlay(&edited, Some(&canonical));
        let merged = merge_overlay(Some(&canonical), &overlay);

        assert_eq!(merged.title, edited.title);
        assert_eq!(merged.address, edited.address);
        assert_eq!(merged.urls, edited.urls);
        assert_eq!(merged.tickets, edited.tickets);
        assert_eq!(merged.geo, edited.geo);
    }
}
