//! Content conversion for the Novel editor
//!
//!     This crate converts between the three representations a Novel document takes: the HTML the
//!     editor renders, Markdown, and the editor's own JSON document tree. The one editor-specific
//!     element all of them must agree on is the task item (a to-do entry with a checkbox), whose
//!     markup contract lives in ./task.rs.
//!
//!     This is a pure lib, that is, it powers novel-md-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it std print, env vars etc.
//!
//! Architecture
//!
//!     HTML is the pivot. Every format converts its source to HTML (parse) and HTML to its source
//!     (serialize), so any pair of formats converts through one intermediate string. HTML input is
//!     parsed with html5ever, which is lenient the way browsers are, which is why none of the core
//!     converters return errors.
//!
//!     The file structure :
//!     .
//!     ├── dom.rs                  # html5ever parsing and attribute access
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── task.rs                 # Task item markup contract
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── parser.rs       # Markdown → HTML (comrak + task expansion)
//!     │   │   ├── serializer.rs   # HTML → Markdown (list item rule)
//!     │   │   └── mod.rs
//!     │   ├── editor
//!     │   │   ├── nodes.rs        # Editor JSON document model
//!     │   │   ├── from_html.rs    # HTML → editor document
//!     │   │   ├── to_html.rs      # editor document → HTML
//!     │   │   └── mod.rs
//!     │   └── html                # Identity format
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── <format>
//!     │   └── <testname>.rs
//!     └── fixtures
//!         └── <docname>.html
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Lossiness
//!
//!     Markdown carries less than editor HTML. Task lines come back as one flat task list, and
//!     anything outside the element tables in the format modules is reduced to its text. The editor
//!     JSON round trip (JSON → HTML → JSON) is exact for documents built from the supported nodes.

pub mod dom;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod task;

pub use error::FormatError;
pub use format::Format;
pub use formats::editor::{Document, Mark, Node};
pub use formats::markdown::{HtmlToMarkdownOptions, MarkdownToHtmlOptions};
pub use registry::FormatRegistry;
pub use task::is_whitespace_only;

/// Convert editor HTML to Markdown with default options
pub fn html_to_markdown(html: &str) -> String {
    formats::markdown::serializer::html_to_markdown(html, &HtmlToMarkdownOptions::default())
}

/// Convert Markdown to editor HTML with default options
pub fn markdown_to_html(markdown: &str) -> String {
    formats::markdown::parser::markdown_to_html(markdown, &MarkdownToHtmlOptions::default())
}

/// Load HTML into an editor document
pub fn html_to_document(html: &str) -> Document {
    formats::editor::html_to_document(html)
}
