//! File Attachments

/// A file picked in a form, sent as a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name, used for MIME detection.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// An empty file input counts as no file.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Keep only attachments that actually carry bytes.
#[must_use]
pub fn non_empty(attachment: Option<&Attachment>) -> Option<&Attachment> {
    attachment.filter(|a| !a.is_empty())
}
