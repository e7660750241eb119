mod attachment;
mod event;
mod field;
mod poster;

pub use attachment::{Attachment, AttachmentKind, Attachments, JPEG};
pub use event::{Address, Event, Geo, Ticket, TimeEdge, TimeRange};
pub use field::{EventField, FieldValue};
pub use poster::{Poster, DOCUMENT_VERSION};
