//! Byte-reading collaborators.
//!
//! A [`FileSource`] knows a file's declared metadata up front and can load its bytes on
//! demand. Loading is asynchronous because it is the only I/O-bound step in the pipeline;
//! the engine never calls it directly.

use crate::ReadError;
use guard_signatures::{lookup_extension, mime_type_of};
use std::path::{Path, PathBuf};

/// The result of reading a source: its bytes and the best available MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Full file content
    pub raw_bytes: Vec<u8>,

    /// MIME type sniffed from the content, falling back to the declared one
    pub resolved_mime_type: Option<String>,
}

/// A file whose metadata is known and whose bytes can be read.
#[async_trait::async_trait]
pub trait FileSource: Send + Sync {
    /// Original filename as supplied (may be empty)
    fn name(&self) -> &str;

    /// Declared size in bytes
    fn size(&self) -> u64;

    /// Declared MIME type, if any
    fn mime_type(&self) -> Option<&str>;

    /// Loads the file's bytes.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` if the underlying content cannot be read. Failures are
    /// surfaced to the caller unchanged; they are not validation errors.
    async fn read(&self) -> Result<ReadOutcome, ReadError>;
}

/// Resolves a MIME type by sniffing content, falling back to the declared value.
///
/// Sniffing is best-effort (via `infer`) and is not used for spoofing detection; that
/// is the job of the signature registry.
pub fn resolve_mime_type(bytes: &[u8], declared: Option<&str>) -> Option<String> {
    infer::get(bytes)
        .map(|kind| kind.mime_type().to_owned())
        .or_else(|| declared.map(str::to_owned))
}

/// An upload already held in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
    declared_size: u64,
    mime_type: Option<String>,
}

impl MemorySource {
    /// Creates a source whose declared size is the length of `bytes`.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mime_type: Option<&str>) -> Self {
        let declared_size = bytes.len() as u64;
        Self {
            name: name.into(),
            bytes,
            declared_size,
            mime_type: mime_type.map(str::to_owned),
        }
    }

    /// Overrides the declared size, for uploads whose reported size is not the
    /// length of the received body.
    #[must_use]
    pub fn with_declared_size(mut self, declared_size: u64) -> Self {
        self.declared_size = declared_size;
        self
    }
}

#[async_trait::async_trait]
impl FileSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.declared_size
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    async fn read(&self) -> Result<ReadOutcome, ReadError> {
        Ok(ReadOutcome {
            resolved_mime_type: resolve_mime_type(&self.bytes, self.mime_type.as_deref()),
            raw_bytes: self.bytes.clone(),
        })
    }
}

/// A file on the local filesystem.
///
/// Size and name are captured when the source is opened; the declared MIME type comes
/// from the signature registry by extension.
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
    name: String,
    size: u64,
    mime_type: Option<&'static str>,
}

impl PathSource {
    /// Opens a source for the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` if:
    /// - The path's metadata cannot be read (I/O)
    /// - The path is not a regular file
    /// - The path has no UTF-8 filename component
    pub async fn open(path: &Path) -> Result<Self, ReadError> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            ReadError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to stat source file {}: {}", path.display(), e),
            ))
        })?;

        if !metadata.is_file() {
            return Err(ReadError::NotAFile(path.display().to_string()));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReadError::InvalidFileName(path.display().to_string()))?
            .to_owned();

        let mime_type = name
            .rsplit_once('.')
            .and_then(|(_, extension)| lookup_extension(extension))
            .map(mime_type_of);

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime_type,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl FileSource for PathSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type
    }

    async fn read(&self) -> Result<ReadOutcome, ReadError> {
        let raw_bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            ReadError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read source file {}: {}", self.path.display(), e),
            ))
        })?;

        tracing::debug!(file = %self.name, bytes = raw_bytes.len(), "read source file");

        Ok(ReadOutcome {
            resolved_mime_type: resolve_mime_type(&raw_bytes, self.mime_type),
            raw_bytes,
        })
    }
}
