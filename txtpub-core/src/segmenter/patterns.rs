//! Chapter boundary conventions, one table entry per supported language.
//!
//! Patterns are compiled once on first use.

use crate::types::Language;
use regex::Regex;
use std::sync::LazyLock;

/// Boundary matcher and navigation label for one language
#[derive(Debug)]
pub struct Convention {
    /// Language this entry applies to
    pub language: Language,

    /// Line-anchored heading matcher with `indent` and `heading` groups
    pub boundary: Regex,

    /// Label of the navigation document in this language
    pub nav_label: &'static str,
}

impl Convention {
    fn new(language: Language, pattern: &str, nav_label: &'static str) -> Self {
        Self {
            language,
            boundary: Regex::new(pattern).unwrap(),
            nav_label,
        }
    }
}

/// Matches "第一章 ...", "第12回 ...", "卷二章 ...", "第一百零八卷 ..." lines
static CHINESE: LazyLock<Convention> = LazyLock::new(|| {
    Convention::new(
        Language::Chinese,
        r"(?m)^(?P<indent>\s*)(?P<heading>[第卷][0-9０-９一二三四五六七八九十零〇百千两]+[章回部节集卷][^\n]*)",
        "目录",
    )
});

/// Matches lines starting with "Chapter"
static ENGLISH: LazyLock<Convention> = LazyLock::new(|| {
    Convention::new(
        Language::English,
        r"(?m)^(?P<indent>\s*)(?P<heading>Chapter[^\n]*)",
        "Table of Contents",
    )
});

/// Look up the convention for a language
pub fn convention(language: Language) -> &'static Convention {
    match language {
        Language::Chinese => &CHINESE,
        Language::English => &ENGLISH,
    }
}
