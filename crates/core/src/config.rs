//! Validation rule configuration.
//!
//! A [`RuleConfiguration`] is plain data supplied per call, or resolved once at startup
//! and handed to a [`crate::Validator`]. Rules can be written in YAML or JSON; any field
//! left out takes its value from [`RuleConfiguration::default`].
//!
//! ```yaml
//! max_size_bytes: 5242880
//! allowed_types: [pdf, docx, jpg]
//! required: false
//! max_name_length: 120
//! ```

use crate::constants::{
    DEFAULT_ALLOWED_TYPES, DEFAULT_CHUNK, DEFAULT_MAX_NAME_LENGTH, DEFAULT_MAX_SIZE_BYTES,
};
use crate::{ConfigError, ConfigResult};
use guard_signatures::{entry, FileCategory, FileType};
use std::path::Path;

/// The rules a batch of files is validated against.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuleConfiguration {
    /// Maximum declared size in bytes. Zero means the rule is incomplete and every
    /// validation returns a configuration error.
    pub max_size_bytes: u64,

    /// Accepted file types. Empty disables both the extension allow-list and content
    /// verification.
    pub allowed_types: Vec<FileType>,

    /// Whether at least one named file must be present.
    pub required: bool,

    /// Whether file content is checked against the claimed type's signatures.
    pub verify_content: bool,

    /// Maximum filename length in characters; zero is treated as unset.
    pub max_name_length: Option<usize>,

    /// Number of sources [`crate::read_batch`] reads; unset or zero means one.
    pub chunk: Option<usize>,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            allowed_types: DEFAULT_ALLOWED_TYPES.to_vec(),
            required: true,
            verify_content: true,
            max_name_length: Some(DEFAULT_MAX_NAME_LENGTH),
            chunk: None,
        }
    }
}

impl RuleConfiguration {
    /// Creates a rule that accepts the given categories, with every other field at its
    /// default.
    pub fn for_categories(categories: &[FileCategory]) -> Self {
        let mut rule = Self {
            allowed_types: Vec::new(),
            ..Self::default()
        };
        for category in categories {
            rule = rule.allow_category(*category);
        }
        rule
    }

    /// Adds every type of a category to the allow-list, skipping duplicates.
    #[must_use]
    pub fn allow_category(mut self, category: FileCategory) -> Self {
        for file_type in category.types() {
            if !self.allowed_types.contains(file_type) {
                self.allowed_types.push(*file_type);
            }
        }
        self
    }

    /// Whether the extension allow-list (and with it content verification) is active.
    pub fn restricts_types(&self) -> bool {
        !self.allowed_types.is_empty()
    }

    /// Returns true when `extension` is an alias of one of the allowed types.
    ///
    /// The extension is compared case-insensitively and without a leading dot. Only a
    /// whole alias counts: `jp` is not accepted because `.jpg` begins with it.
    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_types.iter().any(|file_type| {
            entry(*file_type)
                .extensions
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(extension))
        })
    }

    /// Filename length limit in force; unset or zero means unlimited.
    pub fn name_length_limit(&self) -> Option<usize> {
        self.max_name_length.filter(|limit| *limit > 0)
    }

    /// Number of sources read per batch.
    pub fn chunk_size(&self) -> usize {
        self.chunk.filter(|chunk| *chunk > 0).unwrap_or(DEFAULT_CHUNK)
    }

    /// Parses a rule from YAML.
    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(input).map_err(ConfigError::Yaml)
    }

    /// Parses a rule from JSON.
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        serde_json::from_str(input).map_err(ConfigError::Json)
    }

    /// Loads a rule from a file.
    ///
    /// Files ending in `.json` are parsed as JSON; anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }
}
