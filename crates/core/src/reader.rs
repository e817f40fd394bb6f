//! Turning raw sources into descriptors.
//!
//! Reading is gated: a source's bytes are only loaded when its declared size and claimed
//! extension already pass the rule, so an obviously unacceptable upload is never pulled
//! into memory. Such sources still produce a descriptor, just without content, and the
//! engine will report the structural failure for them.

use crate::constants::DEFAULT_MAX_SIZE_BYTES;
use crate::RuleConfiguration;
use futures_util::future::try_join_all;
use guard_files::{FileDescriptor, FileSource, ReadError};
use guard_types::FileName;

/// Reads one source into a descriptor, loading bytes only if the rule lets it through.
///
/// # Errors
///
/// Returns the source's `ReadError` if loading was attempted and failed.
pub async fn read_file<S: FileSource + ?Sized>(
    source: &S,
    rule: &RuleConfiguration,
) -> Result<FileDescriptor, ReadError> {
    if !should_read(source, rule) {
        tracing::debug!(file = source.name(), size = source.size(), "content not loaded");
        return Ok(FileDescriptor::from_source(source, None));
    }

    let outcome = source.read().await?;
    Ok(FileDescriptor::from_source(source, Some(outcome)))
}

/// Reads the first [`RuleConfiguration::chunk_size`] sources concurrently.
///
/// When `rule` is `None` the default rule applies. Descriptors are returned in source
/// order.
///
/// # Errors
///
/// Returns the first `ReadError` encountered; no partial batch is returned.
pub async fn read_batch<S: FileSource>(
    sources: &[S],
    rule: Option<&RuleConfiguration>,
) -> Result<Vec<FileDescriptor>, ReadError> {
    let default_rule = RuleConfiguration::default();
    let rule = rule.unwrap_or(&default_rule);

    let reads = sources
        .iter()
        .take(rule.chunk_size())
        .map(|source| read_file(source, rule));

    try_join_all(reads).await
}

fn should_read<S: FileSource + ?Sized>(source: &S, rule: &RuleConfiguration) -> bool {
    let max_size = match rule.max_size_bytes {
        0 => DEFAULT_MAX_SIZE_BYTES,
        limit => limit,
    };

    if source.size() > max_size {
        return false;
    }

    if !rule.restricts_types() {
        return true;
    }

    FileName::new(source.name())
        .ok()
        .and_then(|name| name.extension())
        .is_some_and(|extension| rule.allows_extension(&extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{validate, ValidationError};
    use guard_files::{MemorySource, PathSource};
    use guard_signatures::FileType;
    use tempfile::TempDir;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn rule_with_chunk(chunk: usize) -> RuleConfiguration {
        RuleConfiguration {
            chunk: Some(chunk),
            ..RuleConfiguration::default()
        }
    }

    #[tokio::test]
    async fn test_read_file_loads_accepted_source() {
        let source = MemorySource::new("photo.png", PNG_MAGIC.to_vec(), Some("image/png"));
        let descriptor = read_file(&source, &RuleConfiguration::default())
            .await
            .unwrap();

        assert_eq!(descriptor.raw_bytes(), Some(&PNG_MAGIC[..]));
        assert_eq!(descriptor.mime_type(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_read_file_skips_oversized_source() {
        let source = MemorySource::new("photo.png", PNG_MAGIC.to_vec(), None)
            .with_declared_size(2 * 1024 * 1024);
        let descriptor = read_file(&source, &RuleConfiguration::default())
            .await
            .unwrap();

        assert!(descriptor.raw_bytes().is_none());
        assert_eq!(descriptor.declared_size(), 2 * 1024 * 1024);
    }

    #[tokio::test]
    async fn test_read_file_skips_disallowed_extension() {
        let source = MemorySource::new("tool.exe", b"MZ".to_vec(), None);
        let descriptor = read_file(&source, &RuleConfiguration::default())
            .await
            .unwrap();

        assert!(descriptor.raw_bytes().is_none());
    }

    #[tokio::test]
    async fn test_read_file_without_type_restriction_loads_anything() {
        let rule = RuleConfiguration {
            allowed_types: Vec::new(),
            ..RuleConfiguration::default()
        };
        let source = MemorySource::new("README", b"hello".to_vec(), None);
        let descriptor = read_file(&source, &rule).await.unwrap();

        assert_eq!(descriptor.raw_bytes(), Some(&b"hello"[..]));
    }

    #[tokio::test]
    async fn test_read_file_zero_limit_falls_back_to_default_gate() {
        let rule = RuleConfiguration {
            max_size_bytes: 0,
            ..RuleConfiguration::default()
        };
        let small = MemorySource::new("a.png", PNG_MAGIC.to_vec(), None);
        let large = MemorySource::new("b.png", PNG_MAGIC.to_vec(), None)
            .with_declared_size(DEFAULT_MAX_SIZE_BYTES + 1);

        assert!(read_file(&small, &rule).await.unwrap().raw_bytes().is_some());
        assert!(read_file(&large, &rule).await.unwrap().raw_bytes().is_none());
    }

    #[tokio::test]
    async fn test_read_batch_defaults_to_one_file() {
        let sources = vec![
            MemorySource::new("a.png", PNG_MAGIC.to_vec(), None),
            MemorySource::new("b.png", PNG_MAGIC.to_vec(), None),
        ];
        let descriptors = read_batch(&sources, None).await.unwrap();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name().unwrap().as_str(), "a.png");
    }

    #[tokio::test]
    async fn test_read_batch_respects_chunk_and_order() {
        let sources = vec![
            MemorySource::new("a.png", PNG_MAGIC.to_vec(), None),
            MemorySource::new("b.png", PNG_MAGIC.to_vec(), None),
            MemorySource::new("c.png", PNG_MAGIC.to_vec(), None),
        ];
        let rule = rule_with_chunk(2);
        let descriptors = read_batch(&sources, Some(&rule)).await.unwrap();

        let names: Vec<_> = descriptors
            .iter()
            .map(|d| d.name().unwrap().as_str().to_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[tokio::test]
    async fn test_read_batch_then_validate_detects_spoofing() {
        let sources = vec![
            MemorySource::new("photo.png", PNG_MAGIC.to_vec(), None),
            MemorySource::new("invoice.pdf", b"MZ\x90\x00\x03".to_vec(), None),
            MemorySource::new("huge.png", PNG_MAGIC.to_vec(), None).with_declared_size(u64::MAX),
        ];
        let rule = rule_with_chunk(3);
        let descriptors = read_batch(&sources, Some(&rule)).await.unwrap();

        assert_eq!(
            validate(&descriptors, &rule),
            Some(vec![
                None,
                Some(ValidationError::ContentMismatch {
                    index: 1,
                    value: "pdf".into(),
                }),
                Some(ValidationError::SizeExceeded {
                    index: 2,
                    max_size: 1024 * 1024,
                    value: u64::MAX,
                }),
            ])
        );
    }

    #[tokio::test]
    async fn test_read_batch_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scan.pdf");
        std::fs::write(&path, b"%PDF-1.4\n").unwrap();

        let sources = vec![PathSource::open(&path).await.unwrap()];
        let rule = RuleConfiguration {
            allowed_types: vec![FileType::Pdf],
            ..RuleConfiguration::default()
        };
        let descriptors = read_batch(&sources, Some(&rule)).await.unwrap();

        assert_eq!(descriptors[0].mime_type(), Some("application/pdf"));
        assert_eq!(validate(&descriptors, &rule), None);
    }

    #[tokio::test]
    async fn test_read_batch_surfaces_read_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let sources = vec![PathSource::open(&path).await.unwrap()];
        std::fs::remove_file(&path).unwrap();

        let result = read_batch(&sources, None).await;
        assert!(matches!(result, Err(ReadError::Io(_))));
    }

    #[tokio::test]
    async fn test_read_batch_empty() {
        let sources: Vec<MemorySource> = Vec::new();
        let descriptors = read_batch(&sources, None).await.unwrap();
        assert!(descriptors.is_empty());
    }
}
