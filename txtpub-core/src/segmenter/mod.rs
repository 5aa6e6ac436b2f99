//! Language-aware chapter segmentation of plain text
//!
//! Text is cut at every line that matches the boundary pattern of the
//! language (see [`patterns`]). Text in front of the first boundary is kept
//! as a preamble, each boundary starts a chapter whose body runs up to the
//! next boundary or the end of the text. No byte of the input is dropped:
//! [`Segmentation::reassemble`] returns the original text.

mod patterns;

pub use patterns::{convention, Convention};

use crate::types::{Chapter, Language, Segmentation};

/// Byte offsets of one boundary match
struct Boundary {
    /// Start of the match, including leading whitespace
    start: usize,
    /// First byte of the heading marker
    heading_start: usize,
    /// End of the heading with trailing whitespace removed
    heading_end: usize,
}

/// Split `text` into a preamble and chapters using the convention of `language`.
///
/// A text without any boundary yields an empty chapter list and the whole
/// text as preamble.
pub fn segment(text: &str, language: Language) -> Segmentation {
    let boundaries = find_boundaries(text, language);

    let Some(first) = boundaries.first() else {
        tracing::debug!(%language, "no chapter boundaries found");
        return Segmentation {
            preamble: text.to_string(),
            chapters: Vec::new(),
        };
    };

    let preamble = text[..first.start].to_string();
    if !preamble.trim().is_empty() {
        tracing::debug!(bytes = preamble.len(), "text has a preamble before the first chapter");
    }

    let chapters = boundaries
        .iter()
        .enumerate()
        .map(|(i, boundary)| {
            let end = boundaries.get(i + 1).map_or(text.len(), |next| next.start);
            let body_start = separator_end(text, boundary.heading_end, end);
            Chapter {
                sequence_index: i + 1,
                heading: text[boundary.heading_start..boundary.heading_end].to_string(),
                body: text[body_start..end].to_string(),
                indent: text[boundary.start..boundary.heading_start].to_string(),
                separator: text[boundary.heading_end..body_start].to_string(),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(%language, chapters = chapters.len(), "segmented text");

    Segmentation { preamble, chapters }
}

fn find_boundaries(text: &str, language: Language) -> Vec<Boundary> {
    convention(language)
        .boundary
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let heading = caps.name("heading")?;
            Some(Boundary {
                start: whole.start(),
                heading_start: heading.start(),
                heading_end: heading.start() + heading.as_str().trim_end().len(),
            })
        })
        .collect()
}

/// End of the whitespace run after a heading, cut after its last line break.
///
/// Indentation of the first body line stays with the body, and the run never
/// reaches past `limit` (the start of the next boundary).
fn separator_end(text: &str, from: usize, limit: usize) -> usize {
    let rest = &text[from..limit];
    let run = rest.len() - rest.trim_start().len();
    match rest[..run].rfind('\n') {
        Some(pos) => from + pos + 1,
        None => from + run,
    }
}
