//! Core types shared by the segmenter, packager and encoders

mod chapter;
mod language;
mod metadata;
mod package;
mod toc;

pub use chapter::{Chapter, Segmentation};
pub use language::{Language, LanguageTag};
pub use metadata::BookMetadata;
pub use package::{ContentUnit, Package};
pub use toc::{NavEntry, SpineItem};
