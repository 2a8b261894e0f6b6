//! Format implementations
//!
//! Each format converts between its own text representation and editor HTML.

pub mod editor;
pub mod html;
pub mod markdown;

pub use editor::EditorFormat;
pub use html::HtmlFormat;
pub use markdown::{HtmlToMarkdownOptions, MarkdownFormat, MarkdownToHtmlOptions};
