//! # Upload Guard
//!
//! Rule-based validation of uploaded files, with magic-byte verification that the content
//! really is the type its filename claims.
//!
//! The workspace is split leaves-first:
//! - [`guard_types`]: the [`FileName`] newtype
//! - [`guard_signatures`]: the static signature registry
//! - [`guard_files`]: file descriptors and byte-reading sources
//! - [`guard_core`]: rule configuration, the validation engine and batch reading
//!
//! This crate re-exports the public surface of all four.
//!
//! ```
//! use upload_guard::{validate, FileCategory, FileDescriptor, RuleConfiguration};
//!
//! let rule = RuleConfiguration::for_categories(&[FileCategory::Document]);
//! let pdf = FileDescriptor::from_fields(Some("scan.pdf"), 9, None, Some(b"%PDF-1.7\n".to_vec()));
//! let exe = FileDescriptor::from_fields(Some("scan.exe"), 2, None, Some(b"MZ".to_vec()));
//!
//! let errors = validate(&[pdf, exe], &rule).unwrap();
//! assert!(errors[0].is_none());
//! assert_eq!(errors[1].as_ref().map(|e| e.message()).as_deref(),
//!            Some("The file should be one of txt or doc or pdf"));
//! ```

pub use guard_core::{
    constants, eval_size, read_batch, read_file, validate, validate_default, ConfigError,
    ConfigResult, ErrorRecord, RuleConfiguration, ValidationError, ValidationOutcome, Validator,
};
pub use guard_files::{
    resolve_mime_type, FileDescriptor, FileSource, MemorySource, PathSource, ReadError,
    ReadOutcome,
};
pub use guard_signatures::{
    detect, encode_hex, entries, entry, extensions_of, inspect, inspect_range_of,
    lookup_extension, matches, mime_type_of, signatures_of, FileCategory, FileType,
    SignatureEntry, SignatureError,
};
pub use guard_types::{FileName, FileNameError};

/// Validates a batch and returns the errors as serialisable records.
///
/// Convenience for API layers that hand the result straight to a client: the outer
/// `None` and the per-file `None` slots mean the same as in [`validate`].
pub fn validate_to_records(
    files: &[FileDescriptor],
    rule: &RuleConfiguration,
) -> Option<Vec<Option<ErrorRecord>>> {
    let outcome = validate(files, rule)?;
    let rejected = outcome.iter().filter(|slot| slot.is_some()).count();
    tracing::info!(files = files.len(), rejected, "upload batch rejected");

    Some(
        outcome
            .iter()
            .map(|slot| slot.as_ref().map(ValidationError::to_record))
            .collect(),
    )
}
