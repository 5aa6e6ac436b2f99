//! Chapter type representing one segment of the source text

use serde::{Deserialize, Serialize};

/// A single chapter cut from the source text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based position in the source text
    pub sequence_index: usize,

    /// Heading line as matched, without trailing whitespace
    pub heading: String,

    /// Raw text between this heading and the next boundary
    pub body: String,

    /// Whitespace consumed in front of the heading (indentation, blank lines)
    pub indent: String,

    /// Whitespace between the heading text and the body, up to the last line break
    pub separator: String,
}

impl Chapter {
    /// Create a chapter with no surrounding whitespace
    pub fn new(sequence_index: usize, heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sequence_index,
            heading: heading.into(),
            body: body.into(),
            indent: String::new(),
            separator: String::new(),
        }
    }

    /// Stable resource name of this chapter inside a package
    pub fn resource_name(&self) -> String {
        format!("chapter_{}.xhtml", self.sequence_index)
    }

    /// Stable manifest id of this chapter inside a package
    pub fn resource_id(&self) -> String {
        format!("chapter_{}", self.sequence_index)
    }

    /// Length in bytes of the source span this chapter covers
    pub fn span_len(&self) -> usize {
        self.indent.len() + self.heading.len() + self.separator.len() + self.body.len()
    }

    /// Append the exact source span of this chapter to `out`
    pub fn write_source(&self, out: &mut String) {
        out.push_str(&self.indent);
        out.push_str(&self.heading);
        out.push_str(&self.separator);
        out.push_str(&self.body);
    }
}

/// Result of splitting a text at its chapter boundaries
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segmentation {
    /// Everything before the first boundary
    pub preamble: String,

    /// Chapters in source order
    pub chapters: Vec<Chapter>,
}

impl Segmentation {
    /// Rebuild the original text from the preamble and chapter spans
    pub fn reassemble(&self) -> String {
        let capacity = self.preamble.len() + self.chapters.iter().map(Chapter::span_len).sum::<usize>();
        let mut text = String::with_capacity(capacity);
        text.push_str(&self.preamble);
        for chapter in &self.chapters {
            chapter.write_source(&mut text);
        }
        text
    }

    /// Whether no boundary was found
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}
