use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Content type of captured poster images.
pub const JPEG: &str = "image/jpeg";

/// The two image slots of a poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    /// Full resolution capture
    Full,
    /// Scaled down preview
    Thumb,
}

impl AttachmentKind {
    /// Attachment name inside the stored document.
    pub fn name(&self) -> &'static str {
        match self {
            AttachmentKind::Full => "userimage",
            AttachmentKind::Thumb => "userimage_thumb",
        }
    }
}

/// One binary attachment, stored base64 encoded.
///
/// An empty `data` string means the slot holds no image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub data: String,
}

fn default_content_type() -> String {
    "text/plain".to_string()
}

impl Default for Attachment {
    fn default() -> Self {
        Self {
            content_type: default_content_type(),
            data: String::new(),
        }
    }
}

impl Attachment {
    pub fn new(payload: &[u8], content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            data: STANDARD.encode(payload),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decodes the payload, `None` for an empty slot.
    pub fn bytes(&self) -> Result<Option<Vec<u8>>, ModelError> {
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(STANDARD.decode(&self.data)?))
    }

    /// The payload as a `data:` URL.
    pub fn data_url(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!("data:{};base64,{}", self.content_type, self.data))
    }
}

/// Both attachment slots of a poster. Slots are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachments {
    #[serde(default)]
    pub userimage: Attachment,
    #[serde(default)]
    pub userimage_thumb: Attachment,
}

impl Attachments {
    pub fn get(&self, kind: AttachmentKind) -> &Attachment {
        match kind {
            AttachmentKind::Full => &self.userimage,
            AttachmentKind::Thumb => &self.userimage_thumb,
        }
    }

    pub fn set(&mut self, kind: AttachmentKind, attachment: Attachment) {
        match kind {
            AttachmentKind::Full => self.userimage = attachment,
            AttachmentKind::Thumb => self.userimage_thumb = attachment,
        }
    }
}
