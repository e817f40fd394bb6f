//! The validation engine.
//!
//! Walks a batch of [`FileDescriptor`]s and checks each one against a
//! [`RuleConfiguration`]. The engine is synchronous and side-effect free apart from
//! logging: it reads descriptors and the static signature registry, and its only
//! output is the returned [`ValidationOutcome`].
//!
//! # Check Order
//!
//! Before iterating, two whole-batch short circuits apply:
//!
//! 1. A zero size limit returns a single [`ValidationError::MissingSizeLimit`]
//! 2. An empty batch returns a single `Required` error at index 0 when the rule is
//!    required, and `None` otherwise
//!
//! Each file then runs these checks; the first failure wins and later checks are skipped
//! for that file only:
//!
//! 1. Skip flag
//! 2. Name present (a nameless file is valid when the rule is not required)
//! 3. Extension allow-list
//! 4. Declared size
//! 5. Name length
//! 6. Content signature, when content was loaded

use crate::{RuleConfiguration, ValidationError};
use guard_files::FileDescriptor;
use guard_signatures::{lookup_extension, matches};

/// Per-file results, aligned with the input batch.
///
/// `None` when every file passed. Otherwise one slot per file, except for the
/// whole-batch short circuits which produce a single slot.
pub type ValidationOutcome = Option<Vec<Option<ValidationError>>>;

/// Validates a batch of files against a rule.
///
/// # Arguments
///
/// * `files` - The batch, in submission order
/// * `rule` - Rule to apply to every file
///
/// # Returns
///
/// `None` if the batch is valid, otherwise the per-file error list.
pub fn validate(files: &[FileDescriptor], rule: &RuleConfiguration) -> ValidationOutcome {
    if rule.max_size_bytes == 0 {
        tracing::warn!("validation rule has no size limit; batch not examined");
        return Some(vec![Some(ValidationError::MissingSizeLimit)]);
    }

    if files.is_empty() {
        return rule
            .required
            .then(|| vec![Some(ValidationError::Required { index: 0 })]);
    }

    let errors: Vec<Option<ValidationError>> = files
        .iter()
        .enumerate()
        .map(|(index, file)| check_file(index, file, rule))
        .collect();

    if errors.iter().all(Option::is_none) {
        None
    } else {
        Some(errors)
    }
}

/// Validates a batch against [`RuleConfiguration::default`].
pub fn validate_default(files: &[FileDescriptor]) -> ValidationOutcome {
    validate(files, &RuleConfiguration::default())
}

fn check_file(
    index: usize,
    file: &FileDescriptor,
    rule: &RuleConfiguration,
) -> Option<ValidationError> {
    if file.skip_validation() {
        return None;
    }

    // Without a name there is nothing left to check against.
    let Some(name) = file.name() else {
        return rule.required.then_some(ValidationError::Required { index });
    };

    let extension = name.extension();
    let type_check = rule.restricts_types();

    if type_check
        && !extension
            .as_deref()
            .is_some_and(|extension| rule.allows_extension(extension))
    {
        tracing::debug!(index, file = %name, "extension not allowed");
        return Some(ValidationError::TypeNotAllowed {
            index,
            allowed: rule.allowed_types.clone(),
            value: extension,
        });
    }

    if file.declared_size() > rule.max_size_bytes {
        tracing::debug!(index, file = %name, size = file.declared_size(), "file too large");
        return Some(ValidationError::SizeExceeded {
            index,
            max_size: rule.max_size_bytes,
            value: file.declared_size(),
        });
    }

    if let Some(max_length) = rule.name_length_limit() {
        let length = name.char_len();
        if length > max_length {
            tracing::debug!(index, file = %name, length, "filename too long");
            return Some(ValidationError::NameTooLong {
                index,
                max_length,
                value: length,
            });
        }
    }

    if rule.verify_content && type_check {
        let extension = extension?;
        let claimed = lookup_extension(&extension)?;
        let bytes = file.raw_bytes().filter(|bytes| !bytes.is_empty())?;

        if !matches(claimed, bytes) {
            tracing::debug!(index, file = %name, claimed = %claimed, "content signature mismatch");
            return Some(ValidationError::ContentMismatch {
                index,
                value: extension,
            });
        }
    }

    None
}

/// Validates batches against a rule resolved once at startup.
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Validator {
    rule: RuleConfiguration,
}

impl Validator {
    pub fn new(rule: RuleConfiguration) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &RuleConfiguration {
        &self.rule
    }

    /// Validates a batch against this validator's rule. See [`validate`].
    pub fn validate(&self, files: &[FileDescriptor]) -> ValidationOutcome {
        validate(files, &self.rule)
    }
}
