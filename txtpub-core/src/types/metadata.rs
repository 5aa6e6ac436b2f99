//! Book metadata supplied to the packager

use super::Language;
use serde::{Deserialize, Serialize};

/// Metadata attached to a generated package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookMetadata {
    /// Book title
    pub title: String,

    /// Author, if known
    pub author: Option<String>,

    /// Caller-supplied identifier (ISBN, URN, ...)
    pub identifier: Option<String>,

    /// Chapter convention and `dc:language` of the book
    pub language: Language,
}

impl BookMetadata {
    /// Create metadata with the required fields
    pub fn new(title: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            author: None,
            identifier: None,
            language,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the identifier
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}
