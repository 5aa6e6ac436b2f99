//! Assembly of chapters and metadata into a package, and writing it out

pub mod xhtml;

use crate::encoder::Encoder;
use crate::error::{ConversionError, TxtpubError, WriteError};
use crate::segmenter::convention;
use crate::types::{BookMetadata, Chapter, ContentUnit, NavEntry, Package, SpineItem};
use chrono::{SubsecRound, Utc};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

/// Build a package from chapters in reading order.
///
/// An empty chapter list is valid and yields a package with metadata and a
/// navigation document only.
pub fn package(chapters: &[Chapter], metadata: BookMetadata) -> Result<Package, ConversionError> {
    let language = metadata.language;
    let nav_label = convention(language).nav_label.to_string();

    let mut seen = HashSet::with_capacity(chapters.len());
    let mut units = Vec::with_capacity(chapters.len());
    let mut toc = Vec::with_capacity(chapters.len());
    let mut spine = Vec::with_capacity(chapters.len() + 1);
    spine.push(SpineItem::Navigation {
        label: nav_label.clone(),
    });

    for (position, chapter) in chapters.iter().enumerate() {
        let file_name = chapter.resource_name();
        if !seen.insert(file_name.clone()) {
            return Err(ConversionError::DuplicateResource(file_name));
        }
        let id = chapter.resource_id();

        units.push(ContentUnit {
            id: id.clone(),
            file_name: file_name.clone(),
            title: chapter.heading.clone(),
            xhtml: xhtml::chapter_document(&chapter.heading, &chapter.body, language),
        });
        toc.push(NavEntry::new(&chapter.heading, file_name, position + 1));
        spine.push(SpineItem::Chapter { id });
    }

    let identifier = metadata
        .identifier
        .clone()
        .unwrap_or_else(|| format!("urn:uuid:{}", uuid::Uuid::new_v4()));

    tracing::debug!(
        title = %metadata.title,
        units = units.len(),
        %identifier,
        "assembled package"
    );

    Ok(Package {
        metadata,
        identifier,
        nav_label,
        units,
        toc,
        spine,
        modified: Utc::now().trunc_subsecs(0),
    })
}

/// Encode `package` and write it to `dest`.
///
/// The file is written to a temporary file next to `dest` and renamed over
/// it once complete, so `dest` either holds the whole package or is left as
/// it was.
pub fn write_package(package: &Package, encoder: &dyn Encoder, dest: &Path) -> Result<(), TxtpubError> {
    let mut bytes = Vec::new();
    encoder.encode(package, &mut bytes)?;

    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".txtpub-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|source| WriteError::Create {
            path: dest.to_path_buf(),
            source,
        })?;

    let io_error = |source| WriteError::Io {
        path: dest.to_path_buf(),
        source,
    };
    tmp.write_all(&bytes).map_err(io_error)?;
    tmp.as_file().sync_all().map_err(io_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(io_error)?;
    }

    tmp.persist(dest).map_err(|err| WriteError::Persist {
        path: dest.to_path_buf(),
        source: err.error,
    })?;

    tracing::debug!(path = %dest.display(), bytes = bytes.len(), "wrote package");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EpubEncoder;
    use crate::types::Language;

    fn chapters() -> Vec<Chapter> {
        vec![
            Chapter::new(1, "Chapter 1", "Hello\n"),
            Chapter::new(2, "Chapter 2", "World"),
        ]
    }

    #[test]
    fn test_package_structure() {
        let metadata = BookMetadata::new("Greetings", Language::English);
        let package = package(&chapters(), metadata).unwrap();

        assert_eq!(package.chapter_count(), 2);
        assert_eq!(package.units[0].file_name, "chapter_1.xhtml");
        assert_eq!(package.units[1].file_name, "chapter_2.xhtml");
        assert_eq!(
            package.toc,
            vec![
                NavEntry::new("Chapter 1", "chapter_1.xhtml", 1),
                NavEntry::new("Chapter 2", "chapter_2.xhtml", 2),
            ]
        );
        assert_eq!(
            package.spine,
            vec![
                SpineItem::Navigation {
                    label: "Table of Contents".to_string()
                },
                SpineItem::Chapter {
                    id: "chapter_1".to_string()
                },
                SpineItem::Chapter {
                    id: "chapter_2".to_string()
                },
            ]
        );
        assert!(package.units[0].xhtml.contains("<p>Hello<br/>\n</p>"));
    }

    #[test]
    fn test_empty_package() {
        let metadata = BookMetadata::new("Empty", Language::Chinese);
        let package = package(&[], metadata).unwrap();

        assert_eq!(package.chapter_count(), 0);
        assert!(package.toc.is_empty());
        assert_eq!(
            package.spine,
            vec![SpineItem::Navigation {
                label: "目录".to_string()
            }]
        );
    }

    #[test]
    fn test_identifier_kept_or_generated() {
        let given = BookMetadata::new("A", Language::English).with_identifier("isbn:123");
        assert_eq!(package(&[], given).unwrap().identifier, "isbn:123");

        let generated = package(&[], BookMetadata::new("B", Language::English)).unwrap();
        assert!(generated.identifier.starts_with("urn:uuid:"));
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let chapters = vec![Chapter::new(1, "A", ""), Chapter::new(1, "B", "")];
        let err = package(&chapters, BookMetadata::new("Dup", Language::English)).unwrap_err();
        assert!(matches!(err, ConversionError::DuplicateResource(ref name) if name == "chapter_1.xhtml"));
    }

    #[test]
    fn test_write_missing_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("book.epub");
        let package = package(&chapters(), BookMetadata::new("X", Language::English)).unwrap();

        let err = write_package(&package, &EpubEncoder::new(), &dest).unwrap_err();
        assert!(matches!(err, TxtpubError::Write(WriteError::Create { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("book.epub");
        std::fs::write(&dest, b"old").unwrap();
        let package = package(&chapters(), BookMetadata::new("X", Language::English)).unwrap();

        write_package(&package, &EpubEncoder::new(), &dest).unwrap();

        let written = std::fs::read(&dest).unwrap();
        assert!(written.starts_with(b"PK"));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
