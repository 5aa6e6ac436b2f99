//! txtpub Core Library
//!
//! Converts plain-text books into EPUB packages. A text is split into
//! chapters by language-specific heading patterns, the chapters are assembled
//! into a package with metadata, navigation and reading order, and the
//! package is encoded and written atomically.

pub mod collab;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod language;
pub mod packager;
pub mod paths;
pub mod segmenter;
pub mod source;
pub mod types;

pub use convert::{convert, Analysis, ConversionReport, ConvertOptions, Converter};
pub use error::{ConversionError, ReadError, Result, TxtpubError, WriteError};
pub use types::{
    BookMetadata, Chapter, ContentUnit, Language, LanguageTag, NavEntry, Package, Segmentation,
    SpineItem,
};
