//! The closed set of file types the registry knows about, and the categories that group them.

use crate::SignatureError;
use std::{fmt, str::FromStr};

/// A supported file format.
///
/// The set is closed: every variant has exactly one [`crate::SignatureEntry`], and the
/// registry is built with an exhaustive `match`, so adding a variant without its
/// signatures does not compile.
///
/// Serialises as its canonical key (`"pdf"`, `"jpeg"`, `"txt"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Png,
    Docx,
    #[serde(alias = "jpg")]
    Jpeg,
    Doc,
    Zip,
    Xls,
    Xlsx,
    Rar,
    #[serde(rename = "txt")]
    Text,
}

impl FileType {
    /// Every file type, in registry order.
    pub const ALL: [FileType; 10] = [
        FileType::Pdf,
        FileType::Png,
        FileType::Docx,
        FileType::Jpeg,
        FileType::Doc,
        FileType::Zip,
        FileType::Xls,
        FileType::Xlsx,
        FileType::Rar,
        FileType::Text,
    ];

    /// Returns the canonical key for this type.
    pub fn key(self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Png => "png",
            FileType::Docx => "docx",
            FileType::Jpeg => "jpeg",
            FileType::Doc => "doc",
            FileType::Zip => "zip",
            FileType::Xls => "xls",
            FileType::Xlsx => "xlsx",
            FileType::Rar => "rar",
            FileType::Text => "txt",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FileType {
    type Err = SignatureError;

    /// Parses a canonical key or any registered extension alias, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::lookup_extension(s).ok_or_else(|| SignatureError::UnknownFileType(s.to_string()))
    }
}

/// A named group of file types, for writing rules without listing every format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Document,
    #[serde(alias = "excel")]
    Spreadsheet,
    Archive,
}

impl FileCategory {
    /// Returns the file types belonging to this category.
    pub fn types(self) -> &'static [FileType] {
        match self {
            FileCategory::Image => &[FileType::Jpeg, FileType::Png],
            FileCategory::Document => &[FileType::Text, FileType::Doc, FileType::Pdf],
            FileCategory::Spreadsheet => &[FileType::Xls, FileType::Xlsx],
            FileCategory::Archive => &[FileType::Rar, FileType::Zip],
        }
    }
}
