//! Language tags and the supported language conventions

use crate::error::TxtpubError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A language tag as supplied by a caller or a detector (e.g. "en", "zh-cn").
///
/// Tags are free-form; only [`Language::from_tag`] decides whether a tag
/// names a supported convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl From<Language> for LanguageTag {
    fn from(language: Language) -> Self {
        Self::new(language.tag())
    }
}

/// Supported chapter-heading conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Simplified Chinese ("第一章", "卷三" ...)
    #[serde(rename = "zh-cn")]
    Chinese,

    /// English ("Chapter 1" ...)
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Every supported language, in table order
    pub const ALL: [Language; 2] = [Language::Chinese, Language::English];

    /// Canonical tag written into package metadata
    pub fn tag(self) -> &'static str {
        match self {
            Language::Chinese => "zh-cn",
            Language::English => "en",
        }
    }

    /// Map a tag onto a supported language.
    ///
    /// Matching ignores ASCII case and accepts `_` in place of `-`.
    pub fn from_tag(tag: &LanguageTag) -> Result<Self, TxtpubError> {
        let normalized = tag.as_str().trim().replace('_', "-");
        Language::ALL
            .into_iter()
            .find(|language| language.tag().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| TxtpubError::UnsupportedLanguage(tag.as_str().to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
