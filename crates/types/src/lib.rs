/// Errors that can occur when creating validated filename types.
#[derive(Debug, thiserror::Error)]
pub enum FileNameError {
    /// The input filename was empty
    #[error("Filename cannot be empty")]
    Empty,
}

/// A filename that guarantees non-empty content.
///
/// An absent filename is modelled as `Option<FileName>::None`, so an empty string is
/// rejected at construction rather than carried around as a second "absent" value.
/// Unlike trimmed text, the input is kept exactly as supplied: leading or trailing
/// whitespace counts towards the name's length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    /// Creates a new `FileName` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(FileName)` if the input is non-empty,
    /// or `Err(FileNameError::Empty)` if it's empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, FileNameError> {
        let input = input.as_ref();
        if input.is_empty() {
            return Err(FileNameError::Empty);
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercased text after the last `.` in the name.
    ///
    /// Returns `None` when the name contains no `.` at all. A trailing dot
    /// (`"archive."`) yields `Some("")`, which no allow-list will accept.
    pub fn extension(&self) -> Option<String> {
        self.0
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_lowercase())
    }

    /// Returns the length of the name in characters (Unicode scalar values).
    ///
    /// This differs from a UTF-16 code-unit count for characters outside the Basic
    /// Multilingual Plane: an emoji counts once here, but twice in UTF-16.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for FileName {
    type Err = FileNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for FileName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FileName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FileName::new(&s).map_err(serde::de::Error::custom)
    }
}
