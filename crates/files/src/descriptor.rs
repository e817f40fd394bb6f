//! The read-only view of one file under validation.

use crate::{FileSource, ReadOutcome};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use guard_types::FileName;

/// One file under validation.
///
/// Descriptors are constructed once, either from structured fields or from a
/// [`FileSource`], and are immutable thereafter. The validation engine only reads them.
///
/// # Absent Content
///
/// `raw_bytes` is `None` when content was never loaded, typically because the file
/// already failed a cheap structural check (size, claimed type) before reading. Content
/// verification is skipped for such descriptors rather than treated as a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDescriptor {
    name: Option<FileName>,
    declared_size: u64,
    mime_type: Option<String>,
    raw_bytes: Option<Vec<u8>>,
    skip_validation: bool,
}

impl FileDescriptor {
    /// Builds a descriptor from structured fields.
    ///
    /// An empty `name` is treated the same as an absent one.
    ///
    /// # Arguments
    ///
    /// * `name` - Original filename, if known
    /// * `declared_size` - Size in bytes as reported by the uploader
    /// * `mime_type` - MIME type, as reported by the uploader or already resolved
    /// * `raw_bytes` - File content, if it has been loaded
    pub fn from_fields(
        name: Option<&str>,
        declared_size: u64,
        mime_type: Option<&str>,
        raw_bytes: Option<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.and_then(|n| FileName::new(n).ok()),
            declared_size,
            mime_type: mime_type.map(str::to_owned),
            raw_bytes,
            skip_validation: false,
        }
    }

    /// Builds a descriptor from a source and the outcome of reading it.
    ///
    /// Pass `None` as the outcome when the source was deliberately not read; the
    /// descriptor then carries the source's metadata but no bytes. When an outcome is
    /// present, its resolved MIME type takes precedence over the declared one.
    pub fn from_source<S: FileSource + ?Sized>(source: &S, outcome: Option<ReadOutcome>) -> Self {
        let declared_mime_type = source.mime_type().map(str::to_owned);
        let (raw_bytes, mime_type) = match outcome {
            Some(ReadOutcome {
                raw_bytes,
                resolved_mime_type,
            }) => (Some(raw_bytes), resolved_mime_type.or(declared_mime_type)),
            None => (None, declared_mime_type),
        };

        Self {
            name: FileName::new(source.name()).ok(),
            declared_size: source.size(),
            mime_type,
            raw_bytes,
            skip_validation: false,
        }
    }

    /// Marks the descriptor as exempt from validation.
    ///
    /// Used for files that were already accepted earlier, such as attachments
    /// re-submitted with an edited form.
    #[must_use]
    pub fn with_skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    pub fn name(&self) -> Option<&FileName> {
        self.name.as_ref()
    }

    /// Returns the lowercased extension of the name, if the name has one.
    pub fn extension(&self) -> Option<String> {
        self.name.as_ref().and_then(FileName::extension)
    }

    pub fn declared_size(&self) -> u64 {
        self.declared_size
    }

    /// Returns the MIME type: the sniffed one when content was read and recognised,
    /// otherwise the one the uploader declared.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn raw_bytes(&self) -> Option<&[u8]> {
        self.raw_bytes.as_deref()
    }

    pub fn skip_validation(&self) -> bool {
        self.skip_validation
    }

    /// Returns the content as standard base64, if it has been loaded.
    pub fn base64(&self) -> Option<String> {
        self.raw_bytes.as_ref().map(|bytes| STANDARD.encode(bytes))
    }

    /// Returns a `data:` URL for the content.
    ///
    /// Requires both loaded content and a MIME type.
    pub fn data_url(&self) -> Option<String> {
        let mime_type = self.mime_type.as_deref()?;
        let payload = self.base64()?;
        Some(format!("data:{mime_type};base64,{payload}"))
    }
}
