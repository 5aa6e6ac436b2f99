//! Encoders for serializing a package to an output format

mod epub;

pub use epub::EpubEncoder;

use crate::error::ConversionError;
use crate::types::Package;
use std::io::Write;

/// Trait for encoding packages to output formats
pub trait Encoder: Send + Sync {
    /// Encode a package to a writer
    fn encode(&self, package: &Package, writer: &mut dyn Write) -> Result<(), ConversionError>;

    /// Format name (e.g., "EPUB")
    fn format_name(&self) -> &str;
}
