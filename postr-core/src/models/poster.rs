use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::attachment::{Attachment, AttachmentKind, Attachments};
use super::event::Event;
use super::field::{EventField, FieldValue};
use crate::error::ModelError;
use crate::overlay::{compute_overlay, merge_overlay};

/// Document format version written into every poster.
pub const DOCUMENT_VERSION: &str = "0.2";

/// A captured poster together with its extracted event.
///
/// `server_event` is the canonical event resolved from the event collection
/// through `event`; it is never written back into the poster document.
/// `user_event` holds the user's overlay and always exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poster {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(rename = "userEvent", default, deserialize_with = "null_as_default")]
    pub user_event: Event,
    #[serde(skip)]
    pub server_event: Option<Event>,
    #[serde(rename = "_attachments", default)]
    pub attachments: Attachments,
    #[serde(
        rename = "_deleted",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub deleted: bool,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Poster {
    /// Creates an empty poster with a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rev: None,
            version: default_version(),
            created: Utc::now(),
            event: None,
            user_event: Event::default(),
            server_event: None,
            attachments: Attachments::default(),
            deleted: false,
        }
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// The referenced canonical event id, if the server assigned one.
    pub fn event_id(&self) -> Option<&str> {
        self.event.as_deref().filter(|id| !id.is_empty())
    }

    /// Resolves one field: a non-empty user value wins over the server value.
    pub fn resolve_field(&self, field: EventField) -> Option<FieldValue> {
        let user = self
            .user_event
            .field(field)
            .filter(|value| !value.is_empty());
        user.or_else(|| self.server_event.as_ref().and_then(|e| e.field(field)))
    }

    /// Resolves a field by name.
    pub fn resolve_named(&self, name: &str) -> Result<Option<FieldValue>, ModelError> {
        Ok(self.resolve_field(name.parse()?))
    }

    /// The merged view of canonical event and user overlay.
    pub fn effective_event(&self) -> Event {
        merge_overlay(self.server_event.as_ref(), &self.user_event)
    }

    /// Replaces the user overlay with the difference between `edited` and
    /// the canonical event.
    pub fn apply_edit(&mut self, edited: &Event) {
        self.user_event = compute_overlay(edited, self.server_event.as_ref());
    }

    pub fn set_attachment(
        &mut self,
        kind: AttachmentKind,
        payload: &[u8],
        content_type: impl Into<String>,
    ) {
        self.attachments
            .set(kind, Attachment::new(payload, content_type));
    }

    pub fn has_attachment(&self, kind: AttachmentKind) -> bool {
        !self.attachments.get(kind).is_empty()
    }

    /// Thumbnail as a data URL, falling back to the full picture.
    pub fn picture(&self) -> Option<String> {
        self.attachments
            .get(AttachmentKind::Thumb)
            .data_url()
            .or_else(|| self.full_size_picture())
    }

    pub fn full_size_picture(&self) -> Option<String> {
        self.attachments.get(AttachmentKind::Full).data_url()
    }

    /// Takes over everything a stored revision carries, keeping the
    /// creation time and the resolved canonical event.
    pub fn absorb(&mut self, stored: Poster) {
        self.rev = stored.rev;
        self.version = stored.version;
        self.event = stored.event;
        self.user_event = stored.user_event;
        self.attachments = stored.attachments;
        self.deleted = stored.deleted;
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, ModelError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Default for Poster {
    fn default() -> Self {
        Self::new()
    }
}
