//! Upload Guard Files
//!
//! This crate models the files handed to the validation engine and the collaborator that
//! reads their bytes.
//!
//! ## Design Principles
//!
//! - A [`FileDescriptor`] is built once and never mutated afterwards
//! - Descriptors are built through one of two explicit factories:
//!   [`FileDescriptor::from_fields`] for structured input and
//!   [`FileDescriptor::from_source`] for a [`FileSource`] that has (or has not) been read
//! - Reading bytes is the only operation that may suspend; validation itself is synchronous
//! - A descriptor without bytes is legitimate: content was simply not loaded
//!
//! ## Sources
//!
//! - [`MemorySource`]: an upload already held in memory (e.g. a multipart body)
//! - [`PathSource`]: a file on the local filesystem, read with `tokio::fs`
//!
//! ## Example Usage
//!
//! ```no_run
//! use guard_files::{FileDescriptor, FileSource, PathSource};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), guard_files::ReadError> {
//! let source = PathSource::open(Path::new("uploads/photo.png")).await?;
//! let outcome = source.read().await?;
//! let descriptor = FileDescriptor::from_source(&source, Some(outcome));
//! assert!(descriptor.raw_bytes().is_some());
//! # Ok(())
//! # }
//! ```

mod descriptor;
mod source;

pub use descriptor::FileDescriptor;
pub use guard_types::FileName;
pub use source::{resolve_mime_type, FileSource, MemorySource, PathSource, ReadOutcome};

/// Errors that can occur while reading a file's bytes
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Path does not point at a regular file
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// Path has no usable filename component
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
