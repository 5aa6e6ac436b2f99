//! The package type - everything needed to serialize an e-book

use super::{BookMetadata, NavEntry, SpineItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One XHTML document inside the package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentUnit {
    /// Manifest id
    pub id: String,

    /// File name relative to the content directory
    pub file_name: String,

    /// Document title (the chapter heading)
    pub title: String,

    /// Complete XHTML document
    pub xhtml: String,
}

/// A fully assembled e-book, ready for an encoder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    /// Book metadata
    pub metadata: BookMetadata,

    /// Unique identifier written to the package (caller's or generated)
    pub identifier: String,

    /// Label of the navigation document ("目录", "Table of Contents")
    pub nav_label: String,

    /// Content units in chapter order
    pub units: Vec<ContentUnit>,

    /// Table of contents, one entry per content unit
    pub toc: Vec<NavEntry>,

    /// Reading order: navigation first, then chapters
    pub spine: Vec<SpineItem>,

    /// Last-modified timestamp recorded in the package metadata
    pub modified: DateTime<Utc>,
}

impl Package {
    /// Get the book title
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Number of chapter documents
    pub fn chapter_count(&self) -> usize {
        self.units.len()
    }
}
