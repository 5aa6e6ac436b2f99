//! Navigation and reading-order types

use serde::{Deserialize, Serialize};

/// A single entry in the table of contents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavEntry {
    /// Display label (the chapter heading)
    pub label: String,

    /// Resource name of the target content unit
    pub href: String,

    /// 1-based position in the table of contents
    pub play_order: usize,
}

impl NavEntry {
    /// Create a new navigation entry
    pub fn new(label: impl Into<String>, href: impl Into<String>, play_order: usize) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            play_order,
        }
    }
}

/// One step of the linear reading order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpineItem {
    /// The navigation document, keyed by its language-specific label
    Navigation { label: String },

    /// A chapter content unit, by manifest id
    Chapter { id: String },
}
