//! The conversion pipeline: load, resolve language, segment, package, write

use crate::encoder::{EpubEncoder, Encoder};
use crate::error::{Result, WriteError};
use crate::language::LanguageResolver;
use crate::packager;
use crate::paths::{default_output_path, default_title};
use crate::segmenter::segment;
use crate::source::SourceText;
use crate::types::{BookMetadata, Language, LanguageTag, Segmentation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything a caller can set for one conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Text file to convert; `None` means nothing was selected
    pub input: Option<PathBuf>,

    /// Destination; defaults to the input path with the package extension
    pub output: Option<PathBuf>,

    /// Title; defaults to the input file stem
    pub title: Option<String>,

    pub author: Option<String>,

    pub identifier: Option<String>,

    /// Language tag; detected from the text when absent
    pub language: Option<LanguageTag>,
}

impl ConvertOptions {
    /// Options for converting `input` with all defaults
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<LanguageTag>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub language: Language,
    pub chapters: usize,
    /// Bytes of text in front of the first chapter
    pub preamble_bytes: usize,
}

/// Segmentation of a file, without packaging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub language: Language,
    pub segmentation: Segmentation,
}

/// Runs conversions with a given language resolver and encoder
pub struct Converter {
    resolver: LanguageResolver,
    encoder: Box<dyn Encoder>,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            resolver: LanguageResolver::new(),
            encoder: Box::new(EpubEncoder::new()),
        }
    }

    /// Use a different language resolver
    pub fn with_resolver(mut self, resolver: LanguageResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use a different encoder
    pub fn with_encoder(mut self, encoder: Box<dyn Encoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Convert one text file.
    ///
    /// Returns `Ok(None)` without touching the filesystem when no input path
    /// is given. Nothing is written unless every step before the write
    /// succeeded.
    pub fn convert(&self, options: &ConvertOptions) -> Result<Option<ConversionReport>> {
        let Some(input) = options.input.as_deref().filter(|p| !p.as_os_str().is_empty()) else {
            tracing::debug!("no input file given, nothing to convert");
            return Ok(None);
        };

        let output = options
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(input));
        if is_same_file(input, &output) {
            return Err(WriteError::OverwritesInput { path: output }.into());
        }

        let source = SourceText::load(input)?;
        let language = self.resolve(&source.text, options.language.as_ref())?;
        let segmentation = segment(&source.text, language);

        let title = options.title.clone().unwrap_or_else(|| default_title(input));
        let mut metadata = BookMetadata::new(title, language);
        metadata.author = options.author.clone();
        metadata.identifier = options.identifier.clone();

        let package = packager::package(&segmentation.chapters, metadata)?;
        packager::write_package(&package, self.encoder.as_ref(), &output)?;

        let report = ConversionReport {
            input: input.to_path_buf(),
            output,
            title: package.metadata.title.clone(),
            language,
            chapters: package.chapter_count(),
            preamble_bytes: segmentation.preamble.len(),
        };
        tracing::info!(
            input = %report.input.display(),
            output = %report.output.display(),
            language = %report.language,
            chapters = report.chapters,
            "converted '{}' to {}",
            report.title,
            self.encoder.format_name()
        );
        Ok(Some(report))
    }

    /// Load and segment a file without writing anything
    pub fn analyze(&self, input: &Path, language: Option<&LanguageTag>) -> Result<Analysis> {
        let source = SourceText::load(input)?;
        let language = self.resolve(&source.text, language)?;
        Ok(Analysis {
            language,
            segmentation: segment(&source.text, language),
        })
    }

    fn resolve(&self, text: &str, explicit: Option<&LanguageTag>) -> Result<Language> {
        let tag = self.resolver.resolve(text, explicit);
        Language::from_tag(&tag)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `output` names the same file as `input`
fn is_same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (input.canonicalize(), output.canonicalize()) {
        (Ok(input), Ok(output)) => input == output,
        _ => false,
    }
}

/// Convert one text file with the default resolver and EPUB encoder
pub fn convert(options: &ConvertOptions) -> Result<Option<ConversionReport>> {
    Converter::new().convert(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TxtpubError;
    use std::fs;

    #[test]
    fn test_absent_input_is_noop() {
        assert_eq!(convert(&ConvertOptions::default()).unwrap(), None);

        let empty = ConvertOptions {
            input: Some(PathBuf::new()),
            ..ConvertOptions::default()
        };
        assert_eq!(convert(&empty).unwrap(), None);
    }

    #[test]
    fn test_convert_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hello.txt");
        fs::write(&input, "Chapter 1\nHello\nChapter 2\nWorld").unwrap();

        let report = convert(&ConvertOptions::new(&input).with_language("en"))
            .unwrap()
            .unwrap();

        assert_eq!(report.output, dir.path().join("hello.epub"));
        assert_eq!(report.title, "hello");
        assert_eq!(report.language, Language::English);
        assert_eq!(report.chapters, 2);
        assert!(report.output.exists());
    }

    #[test]
    fn test_unsupported_language_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("livre.txt");
        fs::write(&input, "Chapitre 1\nBonjour").unwrap();

        let err = convert(&ConvertOptions::new(&input).with_language("fr")).unwrap_err();
        assert!(matches!(err, TxtpubError::UnsupportedLanguage(ref tag) if tag == "fr"));
        assert!(!dir.path().join("livre.epub").exists());
    }

    #[test]
    fn test_output_may_not_replace_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("already.epub");
        fs::write(&input, "Chapter 1\nHello").unwrap();

        let err = convert(&ConvertOptions::new(&input).with_language("en")).unwrap_err();
        assert!(matches!(err, TxtpubError::Write(WriteError::OverwritesInput { .. })));
        assert_eq!(fs::read_to_string(&input).unwrap(), "Chapter 1\nHello");

        let text = dir.path().join("book.txt");
        fs::write(&text, "Chapter 1\nHello").unwrap();
        let same = dir.path().join(".").join("book.txt");
        let err = convert(
            &ConvertOptions::new(&text)
                .with_output(same)
                .with_language("en"),
        )
        .unwrap_err();
        assert!(matches!(err, TxtpubError::Write(WriteError::OverwritesInput { .. })));
        assert_eq!(fs::read_to_string(&text).unwrap(), "Chapter 1\nHello");
    }

    struct BrokenEncoder;

    impl Encoder for BrokenEncoder {
        fn encode(
            &self,
            _package: &crate::types::Package,
            _writer: &mut dyn std::io::Write,
        ) -> std::result::Result<(), crate::error::ConversionError> {
            Err(crate::error::ConversionError::EncodingFailed("out of space".to_string()))
        }

        fn format_name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_encoder_failure_keeps_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("book.txt");
        let output = dir.path().join("book.epub");
        fs::write(&input, "Chapter 1\nHello").unwrap();
        fs::write(&output, "previous").unwrap();

        let converter = Converter::new().with_encoder(Box::new(BrokenEncoder));
        let err = converter
            .convert(&ConvertOptions::new(&input).with_language("en"))
            .unwrap_err();

        assert!(matches!(err, TxtpubError::Conversion(_)));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_options_deserialize() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"input": "a.txt", "language": "zh-cn"}"#).unwrap();
        assert_eq!(options.input, Some(PathBuf::from("a.txt")));
        assert_eq!(options.language, Some(LanguageTag::new("zh-cn")));
        assert_eq!(options.author, None);
    }
}
