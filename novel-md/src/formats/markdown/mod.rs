//! Markdown format implementation
//!
//! Bidirectional conversion between editor HTML and Markdown.
//!
//! # Library Choice
//!
//! Markdown → HTML rendering is done by `comrak` (CommonMark plus the GFM
//! extensions we enable). HTML → Markdown walks an `html5ever` DOM with our own
//! serializer, because the list item rule needs full control over prefixes,
//! indentation and hard breaks.
//!
//! # Element Mapping Table
//!
//! | HTML                                   | Markdown                    | Notes                                  |
//! |----------------------------------------|-----------------------------|----------------------------------------|
//! | `<h1>`..`<h6>`                         | `#`..`######`               | ATX only                               |
//! | `<p>`                                  | paragraph                   | blank line around                      |
//! | `<strong>`, `<b>`                      | `**text**`                  | delimiter configurable                 |
//! | `<em>`, `<i>`                          | `_text_`                    | delimiter configurable                 |
//! | `<s>`, `<del>`, `<strike>`             | `~~text~~`                  |                                        |
//! | `<code>`                               | `` `code` ``                | fence widened around backticks         |
//! | `<pre>`                                | fenced block                | `language-*` class → info string       |
//! | `<a href>`                             | `[text](href "title")`      |                                        |
//! | `<img>`                                | `![alt](src "title")`       |                                        |
//! | `<blockquote>`                         | `> `                        |                                        |
//! | `<br>`                                 | two spaces + newline        | hard line break                        |
//! | `<hr>`                                 | `---`                       |                                        |
//! | `<ul>` / `<ol>` + `<li>`               | `- item` / `1. item`        | three spaces per nesting level         |
//! | task `<li>` (reserved class)           | `- [ ] item` / `- [x] item` | see [`crate::task`]                    |
//!
//! # Lossy Conversions
//!
//! - Task lines become one flat task list on the way back to HTML: nesting and
//!   ordered numbering of task lines are dropped.
//! - Anything outside the table above is reduced to its text.

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;

/// Options for HTML → Markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlToMarkdownOptions {
    /// Marker for unordered list items
    pub bullet_marker: char,
    pub strong_delimiter: String,
    pub em_delimiter: String,
    pub strike_delimiter: String,
    pub code_fence: String,
}

impl Default for HtmlToMarkdownOptions {
    fn default() -> Self {
        Self {
            bullet_marker: '-',
            strong_delimiter: "**".to_string(),
            em_delimiter: "_".to_string(),
            strike_delimiter: "~~".to_string(),
            code_fence: "```".to_string(),
        }
    }
}

/// Options for Markdown → HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownToHtmlOptions {
    pub strikethrough: bool,
    pub table: bool,
    pub autolink: bool,
}

impl Default for MarkdownToHtmlOptions {
    fn default() -> Self {
        Self {
            strikethrough: true,
            table: true,
            autolink: true,
        }
    }
}

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    to_markdown: HtmlToMarkdownOptions,
    to_html: MarkdownToHtmlOptions,
}

impl MarkdownFormat {
    pub fn new(to_markdown: HtmlToMarkdownOptions, to_html: MarkdownToHtmlOptions) -> Self {
        Self {
            to_markdown,
            to_html,
        }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with task lists"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String, FormatError> {
        Ok(parser::markdown_to_html(source, &self.to_html))
    }

    fn serialize(&self, html: &str) -> Result<String, FormatError> {
        Ok(serializer::html_to_markdown(html, &self.to_markdown))
    }
}
