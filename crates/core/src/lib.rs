//! # Upload Guard Core
//!
//! Validation of uploaded files against a declarative rule: size limits, allowed types,
//! filename length, and verification that the content's magic bytes match the type the
//! filename claims.
//!
//! This crate contains:
//! - [`RuleConfiguration`]: the rule, with defaults and YAML/JSON loading
//! - [`validate`] and [`Validator`]: the synchronous validation engine
//! - [`read_file`] and [`read_batch`]: gated, asynchronous loading of sources into
//!   descriptors
//! - [`eval_size`]: byte counts formatted for error messages
//!
//! **No transport concerns**: multipart parsing, HTTP error bodies and UI integration
//! belong to the caller. Validation failures are returned as data, never as `Err`.
//!
//! ```
//! use guard_core::{validate, RuleConfiguration, ValidationError};
//! use guard_files::FileDescriptor;
//!
//! let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
//! let spoofed = FileDescriptor::from_fields(Some("photo.jpg"), 8, None, Some(png));
//!
//! let errors = validate(&[spoofed], &RuleConfiguration::default()).unwrap();
//! assert!(matches!(errors[0], Some(ValidationError::ContentMismatch { .. })));
//! ```

pub mod constants;

mod config;
mod error;
mod reader;
mod size;
mod validation;

pub use config::RuleConfiguration;
pub use error::{ConfigError, ConfigResult, ErrorRecord, ValidationError};
pub use reader::{read_batch, read_file};
pub use size::eval_size;
pub use validation::{validate, validate_default, ValidationOutcome, Validator};
