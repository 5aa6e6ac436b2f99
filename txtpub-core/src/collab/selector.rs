//! Input file selection

use std::io::{BufRead, BufReader, Stderr, Stdin, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Asks the user for an input file
pub trait FileSelector: Send + Sync {
    /// Selected file, or `None` if the user cancelled
    fn select(&self, start_dir: Option<&Path>) -> Option<PathBuf>;
}

/// Never selects a file
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSelection;

impl FileSelector for NoSelection {
    fn select(&self, _start_dir: Option<&Path>) -> Option<PathBuf> {
        None
    }
}

/// Reads a path from a line of input.
///
/// Relative answers are resolved against the start directory. An empty line
/// or end of input counts as a cancel.
pub struct PromptSelector<R, W> {
    input: Mutex<R>,
    prompt: Mutex<W>,
}

impl<R: BufRead + Send, W: Write + Send> PromptSelector<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self {
            input: Mutex::new(input),
            prompt: Mutex::new(prompt),
        }
    }
}

impl PromptSelector<BufReader<Stdin>, Stderr> {
    /// Prompt on stderr, read from stdin
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stderr())
    }
}

impl<R: BufRead + Send, W: Write + Send> FileSelector for PromptSelector<R, W> {
    fn select(&self, start_dir: Option<&Path>) -> Option<PathBuf> {
        if let Ok(mut prompt) = self.prompt.lock() {
            let shown = match start_dir {
                Some(dir) => format!("Select a .txt file to convert [{}]: ", dir.display()),
                None => "Select a .txt file to convert: ".to_string(),
            };
            // The prompt is cosmetic; a closed stderr must not stop selection
            let _ = prompt.write_all(shown.as_bytes()).and_then(|_| prompt.flush());
        }

        let mut line = String::new();
        let read = self.input.lock().ok()?.read_line(&mut line).ok()?;
        let answer = line.trim();
        if read == 0 || answer.is_empty() {
            tracing::info!("no text file selected");
            return None;
        }

        let path = PathBuf::from(answer);
        let path = match start_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        };
        tracing::info!(path = %path.display(), "selected text file");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_no_selection() {
        assert_eq!(NoSelection.select(None), None);
    }

    #[test]
    fn test_prompt_reads_path() {
        let selector = PromptSelector::new(Cursor::new("/books/a.txt\n"), Vec::new());
        assert_eq!(selector.select(None), Some(PathBuf::from("/books/a.txt")));
    }

    #[test]
    fn test_prompt_relative_to_start_dir() {
        let selector = PromptSelector::new(Cursor::new("a.txt\n"), Vec::new());
        assert_eq!(
            selector.select(Some(Path::new("/books"))),
            Some(PathBuf::from("/books/a.txt"))
        );
    }

    #[test]
    fn test_prompt_cancel() {
        let empty_line = PromptSelector::new(Cursor::new("\n"), Vec::new());
        assert_eq!(empty_line.select(None), None);

        let eof = PromptSelector::new(Cursor::new(""), Vec::new());
        assert_eq!(eof.select(Some(Path::new("/books"))), None);
    }

    #[test]
    fn test_prompt_shows_start_dir() {
        let selector = PromptSelector::new(Cursor::new(""), Vec::new());
        selector.select(Some(Path::new("/books")));
        let prompt = selector.prompt.lock().unwrap();
        assert!(String::from_utf8_lossy(&prompt).contains("[/books]"));
    }
}
