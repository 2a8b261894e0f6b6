//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ HTML conversion.

mod export;
mod import;
mod properties;
