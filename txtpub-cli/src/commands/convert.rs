//! Convert command implementation

use crate::ConvertArgs;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use txtpub_core::collab::{
    DirectoryProvider, DocumentsDirectory, FileSelector, FirstAvailable, PromptSelector,
    SettingsFileDirectory,
};
use txtpub_core::{ConvertOptions, Converter};

/// Convert a text file to EPUB
pub fn convert(args: ConvertArgs) -> Result<()> {
    let Some(input) = args.input.clone().or_else(|| select_input(&args)) else {
        return Ok(());
    };

    let options = ConvertOptions {
        input: Some(input.clone()),
        output: args.output,
        title: args.title,
        author: args.author,
        identifier: args.identifier,
        language: args.lang,
    };

    // Set up progress bar with animation
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {}...", input.display()));

    let result = Converter::new().convert(&options);
    pb.finish_and_clear();

    let report = result.with_context(|| format!("Failed to convert {}", input.display()))?;
    if let Some(report) = report {
        println!(
            "Converted '{}' ({}, {} chapters) -> {}",
            report.title,
            report.language,
            report.chapters,
            report.output.display()
        );
    }

    Ok(())
}

/// Ask for an input file, starting from the configured directory
fn select_input(args: &ConvertArgs) -> Option<PathBuf> {
    let mut directories = FirstAvailable::new();
    if let (Some(path), Some(key)) = (&args.settings, &args.settings_key) {
        directories = directories.with(SettingsFileDirectory::new(path, key));
    }
    let directories = directories.with(DocumentsDirectory);

    let start_dir = directories.default_dir();
    tracing::debug!(start_dir = ?start_dir, "no input given, asking for one");
    PromptSelector::stdio().select(start_dir.as_deref())
}
