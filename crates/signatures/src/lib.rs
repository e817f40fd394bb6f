//! Upload Guard Signature Registry
//!
//! A static mapping from each supported [`FileType`] to the magic-byte signatures that
//! identify it, the byte range to inspect, and its extension and MIME metadata.
//!
//! ## Matching Model
//!
//! Signatures are stored as spaced uppercase hex strings (`"89 50 4E 47"`) so they stay
//! readable and easy to edit. To check a buffer against a type:
//!
//! 1. The type's inspect range is sliced from the buffer (clamped to its length)
//! 2. The slice is hex-encoded, uppercase, two digits per byte
//! 3. The buffer matches if the encoding **contains** any signature with its spaces removed
//!
//! Containment rather than prefix comparison tolerates a variable preamble in front of
//! the real magic number, at the cost of occasional false positives for very short
//! signatures. This is a defence-in-depth check, not a format parser.
//!
//! ## Example Usage
//!
//! ```
//! use guard_signatures::{lookup_extension, matches, FileType};
//!
//! let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
//! assert_eq!(lookup_extension(".PNG"), Some(FileType::Png));
//! assert!(matches(FileType::Png, &png));
//! assert!(!matches(FileType::Jpeg, &png));
//! ```

mod file_type;
mod registry;

pub use file_type::{FileCategory, FileType};
pub use registry::{
    detect, encode_hex, entries, entry, extensions_of, inspect, inspect_range_of, lookup_extension,
    matches, mime_type_of, signatures_of, SignatureEntry,
};

/// Errors that can occur when resolving registry keys
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The string is neither a canonical file type key nor a known extension
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
}
