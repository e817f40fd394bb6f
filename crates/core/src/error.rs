//! Errors: rule loading failures, and validation findings returned as data.

use crate::size::eval_size;
use guard_signatures::FileType;

/// Errors raised while loading a rule configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rule file: {0}")]
    Read(std::io::Error),
    #[error("failed to parse YAML rule: {0}")]
    Yaml(serde_yaml::Error),
    #[error("failed to parse JSON rule: {0}")]
    Json(serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Why a batch, or one file in it, failed validation.
///
/// These are data, not failures of the engine: [`crate::validate`] returns them in its
/// result list and never as an `Err`. The `Display` text is the user-facing message;
/// the fields are context for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The rule has no size limit; the batch was not examined
    #[error("size configuration missing")]
    MissingSizeLimit,

    /// A file (or the whole batch, at index 0) is missing where one is required
    #[error("required")]
    Required { index: usize },

    /// The extension is absent or not in the allow-list
    #[error("The file should be one of {}", join_types(.allowed))]
    TypeNotAllowed {
        index: usize,
        allowed: Vec<FileType>,
        value: Option<String>,
    },

    /// The declared size is over the limit
    #[error("The size should be less than {}!", format_limit(.max_size))]
    SizeExceeded {
        index: usize,
        max_size: u64,
        value: u64,
    },

    /// The filename has more characters than allowed
    #[error("The filename should be less than {max_length} characters!")]
    NameTooLong {
        index: usize,
        max_length: usize,
        value: usize,
    },

    /// The content's magic bytes do not belong to the claimed type
    #[error("content does not match claimed type")]
    ContentMismatch { index: usize, value: String },
}

fn join_types(types: &[FileType]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

fn format_limit(max_size: &u64) -> String {
    eval_size(*max_size, 2)
}

impl ValidationError {
    /// The user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Position of the offending file in the batch; `None` for configuration errors.
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::MissingSizeLimit => None,
            ValidationError::Required { index }
            | ValidationError::TypeNotAllowed { index, .. }
            | ValidationError::SizeExceeded { index, .. }
            | ValidationError::NameTooLong { index, .. }
            | ValidationError::ContentMismatch { index, .. } => Some(*index),
        }
    }

    /// Flattens the error into the record shape exposed to API clients.
    pub fn to_record(&self) -> ErrorRecord {
        let mut record = ErrorRecord {
            message: self.message(),
            index: self.index(),
            required: None,
            value: None,
            max_size: None,
            allowed: None,
        };

        match self {
            ValidationError::MissingSizeLimit => {}
            ValidationError::Required { .. } => record.required = Some(true),
            ValidationError::TypeNotAllowed { allowed, value, .. } => {
                record.allowed = Some(allowed.clone());
                record.value = value.clone().map(serde_json::Value::from);
            }
            ValidationError::SizeExceeded {
                max_size, value, ..
            } => {
                record.max_size = Some(*max_size);
                record.value = Some(serde_json::Value::from(*value));
            }
            ValidationError::NameTooLong { value, .. } => {
                record.value = Some(serde_json::Value::from(*value));
            }
            ValidationError::ContentMismatch { value, .. } => {
                record.value = Some(serde_json::Value::from(value.as_str()));
            }
        }

        record
    }
}

/// Serialisable view of a [`ValidationError`]: a message plus whichever context fields
/// apply. Absent fields are omitted from the output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<FileType>>,
}
