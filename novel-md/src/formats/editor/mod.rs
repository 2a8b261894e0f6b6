//! Editor document format implementation
//!
//! The Novel editor stores documents as ProseMirror-style JSON. This format
//! reads that JSON (rendering it to HTML the way the editor does) and writes it
//! (loading HTML the way the editor does).
//!
//! # Node Mapping Table
//!
//! | Editor node      | HTML                                            |
//! |------------------|-------------------------------------------------|
//! | `paragraph`      | `<p>`                                           |
//! | `heading`        | `<h1>`..`<h6>`                                  |
//! | `blockquote`     | `<blockquote>`                                  |
//! | `bulletList`     | `<ul>`                                          |
//! | `orderedList`    | `<ol start>`                                    |
//! | `listItem`       | `<li>`                                          |
//! | `taskList`       | `<ul data-type="taskList">`                     |
//! | `taskItem`       | task `<li>` (see [`crate::task`])               |
//! | `codeBlock`      | `<pre><code class="language-*">`                |
//! | `horizontalRule` | `<hr>`                                          |
//! | `hardBreak`      | `<br>`                                          |
//! | `image`          | `<img src alt title>`                           |
//!
//! Marks: `link` ↔ `<a>`, `bold` ↔ `<strong>`/`<b>`, `code` ↔ `<code>`,
//! `italic` ↔ `<em>`/`<i>`, `strike` ↔ `<s>`/`<del>`/`<strike>`.

pub mod from_html;
pub mod nodes;
pub mod to_html;

pub use from_html::html_to_document;
pub use nodes::{Document, Mark, Node};
pub use to_html::render_html;

use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for editor JSON
#[derive(Debug, Clone)]
pub struct EditorFormat {
    pretty: bool,
}

impl EditorFormat {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for EditorFormat {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Format for EditorFormat {
    fn name(&self) -> &str {
        "editor"
    }

    fn description(&self) -> &str {
        "Novel editor document JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<String, FormatError> {
        let document: Document = serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("Invalid editor JSON: {e}")))?;
        render_html(&document)
    }

    fn serialize(&self, html: &str) -> Result<String, FormatError> {
        let document = html_to_document(html);
        let json = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        json.map_err(|e| FormatError::SerializationError(format!("JSON encoding failed: {e}")))
    }
}
