//! Output path and title defaults derived from the input path

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Extension of generated packages
pub const PACKAGE_EXTENSION: &str = "epub";

/// Same directory and stem as `input`, with the package extension
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(PACKAGE_EXTENSION)
}

/// File name of `input` without its extension
pub fn default_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Distinct output paths inside `dir` for a batch of inputs, in input order.
///
/// Inputs normally map to `<stem>.epub`. Names are compared ignoring case.
/// Inputs whose stems collide keep their whole file name instead, as in
/// `book.TXT.epub`, and a name that is still taken gets a numeric suffix.
pub fn batch_output_paths(dir: &Path, inputs: &[PathBuf]) -> Vec<PathBuf> {
    let stem = |input: &PathBuf| input.file_stem().unwrap_or_default().to_string_lossy().into_owned();

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for input in inputs {
        *stem_counts.entry(stem(input).to_lowercase()).or_default() += 1;
    }

    let mut taken = HashSet::with_capacity(inputs.len());
    inputs
        .iter()
        .map(|input| {
            let stem = stem(input);
            let base = if stem_counts[&stem.to_lowercase()] > 1 {
                input.file_name().unwrap_or_default().to_string_lossy().into_owned()
            } else {
                stem
            };

            let mut name = package_name(&base);
            let mut suffix = 1;
            while !taken.insert(name.to_lowercase()) {
                suffix += 1;
                name = package_name(&format!("{base}-{suffix}"));
            }
            dir.join(name)
        })
        .collect()
}

fn package_name(base: &str) -> String {
    format!("{base}.{PACKAGE_EXTENSION}")
}
