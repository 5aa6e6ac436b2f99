//! Loading the source text

use crate::error::ReadError;
use std::path::{Path, PathBuf};

const UTF8_BOM: &str = "\u{feff}";

/// Text content of an input file, decoded as UTF-8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Where the text was read from
    pub path: PathBuf,

    /// Decoded content, without a leading byte order mark
    pub text: String,
}

impl SourceText {
    /// Read and decode `path`.
    ///
    /// The file must be valid UTF-8; a leading byte order mark is removed.
    pub fn load(path: &Path) -> Result<Self, ReadError> {
        let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = Self::decode(path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded source text");
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    fn decode(path: &Path, bytes: Vec<u8>) -> Result<String, ReadError> {
        let text = String::from_utf8(bytes).map_err(|err| ReadError::InvalidUtf8 {
            path: path.to_path_buf(),
            offset: err.utf8_error().valid_up_to(),
        })?;
        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}Chapter 1\nHi").unwrap();

        let source = SourceText::load(&path).unwrap();
        assert_eq!(source.text, "Chapter 1\nHi");
    }

    #[test]
    fn test_load_missing_file() {
        let err = SourceText::load(Path::new("/nonexistent/book.txt")).unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gbk.txt");
        // "第一章" in GBK
        fs::write(&path, [b'o', b'k', 0xB5, 0xDA, 0xD2, 0xBB, 0xD5, 0xC2]).unwrap();

        let err = SourceText::load(&path).unwrap_err();
        assert!(matches!(err, ReadError::InvalidUtf8 { offset: 2, .. }));
    }
}
