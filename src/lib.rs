//! # mdshape
//!
//! Heuristic document-structure recovery for Rust.
//!
//! This library turns loosely structured text (OCR lines, word-processor
//! paragraph streams, exported markdown) into a consistent block model and
//! emits normalized Markdown, plain text or JSON.
//!
//! ## Quick Start
//!
//! ```
//! use mdshape::model::units_from_lines;
//! use mdshape::{emit_markdown, recover_structure};
//!
//! let units = units_from_lines(["# Guide", "", "- one", "- two"]);
//! let doc = recover_structure(&units, None);
//! assert_eq!(emit_markdown(&doc), "# Guide\n\n- one\n- two\n");
//! ```
//!
//! ## Pipeline
//!
//! - **Classification**: each unit becomes a line kind (heading, list item,
//!   table row, fence, paragraph, ...)
//! - **Heading inference**: levels from style hints, `#` runs, document-type
//!   keyword order or text length, never skipping a level
//! - **Aggregation**: list items and table rows grouped into blocks
//! - **Normalization**: terminology casing, duplicate-heading removal,
//!   empty-block removal
//! - **Rendering**: Markdown, plain text, JSON
//! - **Parallel batches**: one Rayon task per document

pub mod convert;
pub mod data;
pub mod detect;
pub mod error;
pub mod model;
pub mod normalize;
pub mod reader;
pub mod recover;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, OutputFormat,
};
pub use data::ReplacementTable;
pub use detect::{detect_format_from_bytes, detect_profile, SourceFormat};
pub use error::{Error, Result};
pub use model::{
    units_from_lines, units_from_text, BlockKind, ContentBlock, DocTypeProfile, DocumentModel,
    EmphasisHint, HeadingKeywords, ListBlock, ProfileSet, RawUnit, TableBlock,
};
pub use normalize::{NormalizeOptions, NormalizePreset, Normalizer};
pub use reader::read_markdown;
pub use recover::{RecoverOptions, Thresholds};
pub use render::{emit_markdown, ExtractionStats, JsonFormat, RenderOptions, RenderResult};

use std::path::Path;

/// Recover a normalized document model from raw units.
///
/// Uses the default recovery options and the standard normalization
/// preset. An empty unit stream yields an empty model.
///
/// # Example
///
/// ```
/// use mdshape::{recover_structure, units_from_lines, ContentBlock};
///
/// let units = units_from_lines(["# Specs", "", "采用ppg传感器。"]);
/// let doc = recover_structure(&units, None);
/// assert_eq!(doc.blocks[1], ContentBlock::paragraph("采用PPG传感器。"));
/// ```
pub fn recover_structure(units: &[RawUnit], title_hint: Option<&str>) -> DocumentModel {
    Pipeline::new().recover(units, title_hint).into_model()
}

/// Convert a text-like file to Markdown with default options.
///
/// The converter is chosen by file extension (`txt`, `md`, `json`).
///
/// # Example
///
/// ```no_run
/// let markdown = mdshape::convert_file("scan.txt").unwrap();
/// std::fs::write("scan.md", markdown).unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert(path.as_ref(), &ConvertOptions::default())?;
    Ok(result.content)
}

/// Builder for running the recovery pipeline.
///
/// # Example
///
/// ```
/// use mdshape::{units_from_text, NormalizePreset, Pipeline};
///
/// let units = units_from_text("Overview\n\nThe device measures\nheart rate all day long.\n");
/// let markdown = Pipeline::ocr()
///     .with_cleanup(NormalizePreset::Minimal)
///     .with_frontmatter()
///     .recover(&units, Some("Watch"))
///     .to_markdown();
/// assert!(markdown.starts_with("---\ntitle: \"Watch\"\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    recover_options: RecoverOptions,
    normalize_options: NormalizeOptions,
    render_options: RenderOptions,
}

impl Pipeline {
    /// Create a pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline for OCR and plain text lines.
    pub fn ocr() -> Self {
        Self::new().with_recover_options(RecoverOptions::ocr())
    }

    /// Pipeline for word-processor markdown.
    pub fn markdown() -> Self {
        Self::new().with_recover_options(RecoverOptions::markdown())
    }

    /// Set recovery options.
    pub fn with_recover_options(mut self, options: RecoverOptions) -> Self {
        self.recover_options = options;
        self
    }

    /// Set normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize_options = options;
        self
    }

    /// Set the normalization preset.
    pub fn with_cleanup(mut self, preset: NormalizePreset) -> Self {
        self.normalize_options = NormalizeOptions::from_preset(preset);
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Recover and normalize one document.
    pub fn recover(&self, units: &[RawUnit], title_hint: Option<&str>) -> PipelineResult {
        let mut document = recover::recover(units, title_hint, &self.recover_options);
        Normalizer::new(self.normalize_options.clone()).normalize_document(&mut document);
        PipelineResult {
            document,
            render_options: self.render_options.clone(),
        }
    }

    /// Recover a document from text, one unit per line.
    pub fn recover_text(&self, text: &str, title_hint: Option<&str>) -> PipelineResult {
        self.recover(&units_from_text(text), title_hint)
    }
}

/// Result of running the pipeline on one document.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The recovered document
    pub document: DocumentModel,
    /// Render options to use
    render_options: RenderOptions,
}

impl PipelineResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to Markdown and collect statistics.
    pub fn to_markdown_with_stats(&self) -> RenderResult {
        render::to_markdown_with_stats(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &DocumentModel {
        &self.document
    }

    /// Take the document.
    pub fn into_model(self) -> DocumentModel {
        self.document
    }
}
