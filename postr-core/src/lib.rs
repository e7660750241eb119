//! Postr Core Library
//!
//! Poster and event documents, and the overlay engine that layers a user's
//! edits on top of the canonical event extracted by the server.

pub mod error;
pub mod models;
pub mod overlay;

pub use error::ModelError;
pub use models::{
    Address, Attachment, AttachmentKind, Attachments, Event, EventField, FieldValue, Geo, Poster,
    Ticket, TimeEdge, TimeRange, DOCUMENT_VERSION, JPEG,
};
pub use overlay::{compute_overlay, merge_overlay, Overlay};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
