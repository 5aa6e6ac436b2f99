//! Language resolution: explicit tag, detection, or fallback

mod detector;

pub use detector::{DetectionError, LanguageDetector, WhatlangDetector};

use crate::types::{Language, LanguageTag};

/// Tag used when detection fails.
///
/// This applies to short English texts too; see DESIGN.md.
pub const FALLBACK_LANGUAGE: Language = Language::Chinese;

/// Picks the language tag of a text
pub struct LanguageResolver {
    detector: Box<dyn LanguageDetector>,
    fallback: LanguageTag,
}

impl LanguageResolver {
    /// Resolver backed by the default detector
    pub fn new() -> Self {
        Self::with_detector(Box::new(WhatlangDetector::new()))
    }

    /// Resolver backed by a custom detector
    pub fn with_detector(detector: Box<dyn LanguageDetector>) -> Self {
        Self {
            detector,
            fallback: FALLBACK_LANGUAGE.into(),
        }
    }

    /// Return `explicit` unchanged if present, otherwise detect from `text`.
    ///
    /// Detection failures never propagate: they are logged and the fallback
    /// tag is returned instead.
    pub fn resolve(&self, text: &str, explicit: Option<&LanguageTag>) -> LanguageTag {
        if let Some(tag) = explicit {
            return tag.clone();
        }

        match self.detector.detect(text) {
            Ok(tag) => {
                tracing::debug!(language = %tag, "detected language");
                tag
            }
            Err(err) => {
                tracing::warn!(
                    reason = %err,
                    fallback = %self.fallback,
                    "language detection failed, using fallback"
                );
                self.fallback.clone()
            }
        }
    }
}

impl Default for LanguageResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingDetector;

    impl LanguageDetector for FailingDetector {
        fn detect(&self, _text: &str) -> Result<LanguageTag, DetectionError> {
            Err(DetectionError::Unidentified)
        }
    }

    struct FixedDetector(&'static str);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Result<LanguageTag, DetectionError> {
            Ok(LanguageTag::new(self.0))
        }
    }

    #[test]
    fn test_explicit_tag_wins() {
        let resolver = LanguageResolver::with_detector(Box::new(FixedDetector("en")));
        let explicit = LanguageTag::new("zh-cn");
        let text = "This is plainly an English sentence about the weather.";
        assert_eq!(resolver.resolve(text, Some(&explicit)), explicit);
    }

    #[test]
    fn test_explicit_tag_not_validated() {
        let resolver = LanguageResolver::with_detector(Box::new(FailingDetector));
        let explicit = LanguageTag::new("fr");
        assert_eq!(resolver.resolve("", Some(&explicit)).as_str(), "fr");
    }

    #[test]
    fn test_detector_result_used() {
        let resolver = LanguageResolver::with_detector(Box::new(FixedDetector("en")));
        assert_eq!(resolver.resolve("anything", None).as_str(), "en");
    }

    #[test]
    fn test_detector_failure_falls_back() {
        let resolver = LanguageResolver::with_detector(Box::new(FailingDetector));
        assert_eq!(resolver.resolve("Hello", None).as_str(), "zh-cn");
    }

    #[test]
    fn test_default_detector_falls_back_on_empty_text() {
        let resolver = LanguageResolver::new();
        assert_eq!(resolver.resolve("   \n", None).as_str(), "zh-cn");
    }
}
