//! Format trait definition
//!
//! Every format converts to and from HTML, which is the interchange form the
//! editor speaks. A conversion between two non-HTML formats always goes
//! through HTML: `source --parse--> HTML --serialize--> target`.

use crate::error::FormatError;

/// Trait for document formats
///
/// Implementors provide conversion between their own text representation and HTML.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, html: &str) -> Result<String, FormatError> {
///         Ok(html.to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "html", "editor")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["md", "markdown"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → HTML)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (HTML → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Convert source text in this format into HTML
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Convert HTML into source text in this format
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _html: &str) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
