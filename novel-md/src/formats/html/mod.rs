//! HTML format implementation
//!
//! HTML is the pivot every conversion passes through, so this format hands its
//! input through unchanged in both directions. It exists so that `html` can be
//! named as a source or target like any other format.

use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for editor HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Editor HTML (pivot format)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }

    fn serialize(&self, html: &str) -> Result<String, FormatError> {
        Ok(html.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_passes_through() {
        let html = "<p>Hello <strong>world</strong></p>";
        assert_eq!(HtmlFormat.parse(html).unwrap(), html);
        assert_eq!(HtmlFormat.serialize(html).unwrap(), html);
    }
}
