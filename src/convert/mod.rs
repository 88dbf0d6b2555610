//! Source converters: read text-like sources and run the pipeline.
//!
//! Each converter turns source bytes into [`RawUnit`]s and picks the
//! recovery preset that suits its source. Recovery, normalization and
//! rendering are shared and configured through [`ConvertOptions`].
//!
//! # Example
//!
//! ```no_run
//! use mdshape::convert::{ConvertOptions, ConverterRegistry};
//! use std::path::Path;
//!
//! fn main() -> mdshape::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let result = registry.convert(Path::new("scan.txt"), &ConvertOptions::default())?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod markdown;
mod text;
mod units;

pub use markdown::MarkdownConverter;
pub use text::TextConverter;
pub use units::UnitsConverter;

use crate::error::{Error, Result};
use crate::model::{DocumentModel, RawUnit};
use crate::normalize::{NormalizeOptions, NormalizePreset, Normalizer};
use crate::recover::{recover, RecoverOptions};
use crate::render::{self, ExtractionStats, JsonFormat, RenderOptions};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Recovery options; `None` uses the converter's own preset
    pub recover: Option<RecoverOptions>,

    /// Normalization options
    pub normalize: NormalizeOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Whether to collect statistics during conversion
    pub collect_stats: bool,

    /// Output format
    pub output_format: OutputFormat,

    /// Title hint seeding heading dedup; the document title falls back to
    /// the first heading, then to the file stem when converting a path
    pub title: Option<String>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the converter's recovery preset.
    pub fn with_recover_options(mut self, options: RecoverOptions) -> Self {
        self.recover = Some(options);
        self
    }

    /// Set normalization options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }

    /// Set the normalization preset.
    pub fn with_cleanup(mut self, preset: NormalizePreset) -> Self {
        self.normalize = NormalizeOptions::from_preset(preset);
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// Plain text
    Text,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// MIME type of rendered output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }

    /// File extension for rendered output.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Document title of the recovered model
    pub title: String,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, title: impl Into<String>) -> Self {
        Self {
            content,
            title: title.into(),
            stats: None,
            mime_type: "text/markdown",
        }
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Trait for source converters.
///
/// Implement [`read_units`](DocumentConverter::read_units) to add a source
/// format; the provided methods run recovery, normalization and rendering.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["txt"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Turn source bytes into raw units.
    fn read_units(&self, bytes: &[u8]) -> Result<Vec<RawUnit>>;

    /// Recovery preset used when the options carry none.
    fn default_recover_options(&self) -> RecoverOptions {
        RecoverOptions::default()
    }

    /// Recover and normalize a document model from bytes.
    fn recover_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<DocumentModel> {
        let units = self.read_units(bytes)?;
        let recover_options = match &options.recover {
            Some(custom) => custom.clone(),
            None => self.default_recover_options(),
        };

        let mut doc = recover(&units, options.title.as_deref(), &recover_options);
        Normalizer::new(options.normalize.clone()).normalize_document(&mut doc);
        Ok(doc)
    }

    /// Convert a file at the given path.
    ///
    /// A document that yields no title from its headings is titled after
    /// the file stem.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let bytes = std::fs::read(path)?;
        let mut doc = self.recover_bytes(&bytes, options)?;
        if doc.title.is_empty() {
            doc.title = title_from_path(path).unwrap_or_default();
        }
        render_document(&doc, options)
    }

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = self.recover_bytes(bytes, options)?;
        render_document(&doc, options)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Render a recovered model in the requested output format.
pub fn render_document(doc: &DocumentModel, options: &ConvertOptions) -> Result<ConvertResult> {
    let format = options.output_format;
    let content = match format {
        OutputFormat::Markdown => render::to_markdown(doc, &options.render),
        OutputFormat::Text => render::to_text(doc),
        OutputFormat::Json => render::to_json(doc, JsonFormat::Pretty)?,
    };

    let mut result = ConvertResult::new(content, doc.title.clone()).with_mime_type(format.mime_type());
    if options.collect_stats {
        let mut stats = ExtractionStats::from_document(doc);
        stats.count_text(&doc.plain_text());
        result = result.with_stats(stats);
    }
    Ok(result)
}

/// File stem without a trailing `.units` (`report.units.json` → `report`).
fn title_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let stem = stem.strip_suffix(".units").unwrap_or(stem).trim();
    (!stem.is_empty()).then(|| stem.to_string())
}

/// Decode source bytes as UTF-8, dropping a byte-order mark.
pub(crate) fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.trim_start_matches('\u{feff}'))
}

/// Registry for source converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the text, markdown and unit-stream converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextConverter::new()));
        registry.register(Arc::new(MarkdownConverter::new()));
        registry.register(Arc::new(UnitsConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions,
    /// replacing any earlier converter for the same extension.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name.insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get the converter for a path.
    pub fn get_for_path(&self, path: &Path) -> Result<Arc<dyn DocumentConverter>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        self.get_for_path(path)?.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))?;

        converter.convert_bytes(bytes, options)
    }

    /// Convert many files in parallel, one task per document.
    ///
    /// Results come back in input order. Failures are logged and returned
    /// in place; they never abort the other conversions.
    pub fn convert_batch(
        &self,
        paths: &[PathBuf],
        options: &ConvertOptions,
    ) -> Vec<(PathBuf, Result<ConvertResult>)> {
        self.convert_batch_with(paths, options, |_, _| {})
    }

    /// Like [`convert_batch`](Self::convert_batch), calling `on_done` from
    /// the worker thread as each document finishes.
    pub fn convert_batch_with<F>(
        &self,
        paths: &[PathBuf],
        options: &ConvertOptions,
        on_done: F,
    ) -> Vec<(PathBuf, Result<ConvertResult>)>
    where
        F: Fn(&Path, &Result<ConvertResult>) + Send + Sync,
    {
        paths
            .par_iter()
            .map(|path| {
                let result = self.convert(path, options);
                if let Err(e) = &result {
                    log::warn!("skipping {}: {}", path.display(), e);
                }
                on_done(path, &result);
                (path.clone(), result)
            })
            .collect()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
