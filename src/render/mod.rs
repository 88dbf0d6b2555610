//! Rendering module for converting recovered documents to output formats.

mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{emit_markdown, to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{ExtractionStats, RenderResult};
pub use text::to_text;

pub(crate) use markdown::is_escapable_lead;
