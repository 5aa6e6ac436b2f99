//! Language detectors

use crate::types::{Language, LanguageTag};
use thiserror::Error;

/// Why a detector could not name a language
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("text has no letters to detect a language from")]
    NoFeatures,

    #[error("no language could be identified")]
    Unidentified,
}

/// Trait for guessing the language of a text
pub trait LanguageDetector: Send + Sync {
    /// Detect the language tag of `text`
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectionError>;
}

/// Detector backed by the `whatlang` trigram models
pub struct WhatlangDetector {
    /// Maximum number of bytes inspected from the start of the text
    sample_bytes: usize,
}

impl WhatlangDetector {
    pub fn new() -> Self {
        Self {
            sample_bytes: 64 * 1024,
        }
    }

    /// Set how many leading bytes of the text are inspected
    pub fn with_sample_bytes(mut self, sample_bytes: usize) -> Self {
        self.sample_bytes = sample_bytes.max(1);
        self
    }

    fn sample<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.sample_bytes {
            return text;
        }
        let mut end = self.sample_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectionError> {
        let sample = self.sample(text);
        if !sample.chars().any(char::is_alphabetic) {
            return Err(DetectionError::NoFeatures);
        }

        let info = whatlang::detect(sample).ok_or(DetectionError::Unidentified)?;
        tracing::trace!(
            lang = info.lang().code(),
            confidence = info.confidence(),
            reliable = info.is_reliable(),
            "whatlang result"
        );

        let tag = match info.lang() {
            whatlang::Lang::Cmn => Language::Chinese.into(),
            whatlang::Lang::Eng => Language::English.into(),
            other => LanguageTag::new(other.code()),
        };
        Ok(tag)
    }
}
