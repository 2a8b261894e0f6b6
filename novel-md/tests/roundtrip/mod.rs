//! Cross-format round trips

mod pipeline;
