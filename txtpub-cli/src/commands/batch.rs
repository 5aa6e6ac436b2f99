//! Batch conversion command implementation

use anyhow::{bail, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use txtpub_core::paths::batch_output_paths;
use txtpub_core::{ConvertOptions, Converter, LanguageTag};

/// Batch convert every text file in a directory
pub fn batch(
    input_dir: &Path,
    output_dir: &Path,
    language: Option<LanguageTag>,
    author: Option<String>,
    jobs: usize,
) -> Result<()> {
    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read {}", input_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_text_file(p))
        .collect();
    files.sort();

    if files.is_empty() {
        println!("No .txt files found in {}", input_dir.display());
        return Ok(());
    }

    println!("Found {} files to convert", files.len());

    // Set up progress tracking
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to start worker threads")?;
    let converter = Converter::new();

    let outputs = batch_output_paths(output_dir, &files);

    pool.install(|| {
        files.par_iter().zip(&outputs).for_each(|(file_path, output_path)| {
            let mut options = ConvertOptions::new(file_path).with_output(output_path);
            options.language = language.clone();
            options.author = author.clone();

            match converter.convert(&options) {
                Ok(_) => {
                    success_count.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Failed to convert {}: {}", file_path.display(), e);
                }
            }

            overall_pb.inc(1);
        });
    });

    overall_pb.finish();

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    println!("\nBatch conversion complete:");
    println!("  Success: {}", success);
    println!("  Errors:  {}", errors);

    if errors > 0 {
        bail!("Batch conversion completed with {} errors", errors);
    }

    Ok(())
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_text_file() {
        assert!(is_text_file(Path::new("book.txt")));
        assert!(is_text_file(Path::new("BOOK.TXT")));
        assert!(!is_text_file(Path::new("book.epub")));
        assert!(!is_text_file(Path::new("txt")));
    }
}
