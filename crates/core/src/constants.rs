//! Constants used throughout the core crate.
//!
//! Default rule values live here so the default configuration and the pre-read gate
//! agree on them.

use guard_signatures::FileType;

/// Default maximum file size: 1 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 1024 * 1024;

/// Default maximum filename length, in characters.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 200;

/// Number of files read from a batch when the rule does not say otherwise.
pub const DEFAULT_CHUNK: usize = 1;

/// File types accepted by the default rule: images and PDF.
pub const DEFAULT_ALLOWED_TYPES: [FileType; 3] = [FileType::Jpeg, FileType::Png, FileType::Pdf];
