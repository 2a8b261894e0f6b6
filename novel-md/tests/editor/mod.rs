//! Editor format tests
//!
//! Tests for bidirectional editor JSON ↔ HTML conversion.

mod export;
mod import;
