//! Inspect command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use txtpub_core::{Converter, LanguageTag};

/// Chapter split output
#[derive(Serialize)]
struct InspectInfo {
    language: String,
    preamble_bytes: usize,
    chapters: Vec<ChapterInfo>,
}

#[derive(Serialize)]
struct ChapterInfo {
    index: usize,
    heading: String,
    body_bytes: usize,
}

/// Show the resolved language and chapter split of a text file
pub fn inspect(input: &Path, language: Option<&LanguageTag>, json: bool) -> Result<()> {
    let analysis = Converter::new()
        .analyze(input, language)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let info = InspectInfo {
        language: analysis.language.tag().to_string(),
        preamble_bytes: analysis.segmentation.preamble.len(),
        chapters: analysis
            .segmentation
            .chapters
            .iter()
            .map(|chapter| ChapterInfo {
                index: chapter.sequence_index,
                heading: chapter.heading.clone(),
                body_bytes: chapter.body.len(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Language:    {}", info.language);
        println!("Preamble:    {} bytes", info.preamble_bytes);
        println!("Chapters:    {}", info.chapters.len());
        for chapter in &info.chapters {
            println!("  {:>4}. {} ({} bytes)", chapter.index, chapter.heading, chapter.body_bytes);
        }
    }

    Ok(())
}
