//! Structure recovery: classification, heading inference and aggregation.
//!
//! One call to [`recover`] processes one document. Every per-document
//! state (classifier context, heading history, aggregation state) lives in
//! the call, so documents can be recovered concurrently without locking.

mod aggregator;
mod classifier;
mod heading;
mod options;

pub use aggregator::Aggregator;
pub use classifier::{classify_units, LineClassifier, LineKind};
pub use heading::{normalize_heading_text, HeadingHistory, HeadingInferencer, HeadingSource};
pub use options::{
    RecoverOptions, Thresholds, EMPHASIS_HEADING_MAX_CHARS, HEADING_MAX_CHARS, KEYWORD_TIER_ONE,
    KEYWORD_TIER_TWO, MAX_INFERRED_LEVEL, MEDIUM_HEADING_CHARS, PARAGRAPH_BREAK_CHARS,
    SHORT_HEADING_CHARS,
};

pub(crate) use classifier::{is_thematic_break, parse_list_marker};

use crate::detect::detect_profile;
use crate::model::{ContentBlock, DocumentModel, RawUnit};

/// Recover the block structure of one document.
///
/// The result is not normalized; see [`crate::normalize`]. An empty unit
/// stream yields an empty model.
pub fn recover(units: &[RawUnit], title_hint: Option<&str>, options: &RecoverOptions) -> DocumentModel {
    let corrected: Vec<RawUnit>;
    let units = if options.corrections.is_empty() {
        units
    } else {
        corrected = units
            .iter()
            .map(|u| RawUnit {
                text: options.corrections.apply(&u.text),
                ..u.clone()
            })
            .collect();
        &corrected
    };

    let profile = detect_profile(units, &options.profiles);
    let mut classifier = LineClassifier::new(options, profile);
    let mut inferencer = HeadingInferencer::new(options, profile, title_hint);
    let mut aggregator = Aggregator::new(options);

    for (i, unit) in units.iter().enumerate() {
        let kind = classifier.classify(unit, units.get(i + 1));
        let (source, text) = match kind {
            LineKind::Heading { level, text } => (HeadingSource::Explicit(level), text),
            LineKind::HeadingCandidate { text } => (HeadingSource::Heuristic, text),
            other => {
                aggregator.accept(other);
                continue;
            }
        };

        aggregator.flush();
        if let Some(block) = inferencer.infer(source, &text, aggregator.last_block()) {
            aggregator.push_block(block);
        }
    }

    let blocks = aggregator.finish();
    let title = document_title(title_hint, &blocks);
    log::debug!(
        "recovered {} blocks from {} units (title '{}')",
        blocks.len(),
        units.len(),
        title
    );

    DocumentModel { title, blocks }
}

/// The title hint, else the first level-1 heading, else the first heading.
pub(crate) fn document_title(title_hint: Option<&str>, blocks: &[ContentBlock]) -> String {
    if let Some(hint) = title_hint.map(str::trim).filter(|h| !h.is_empty()) {
        return hint.to_string();
    }

    let mut headings = blocks.iter().filter_map(|b| match b {
        ContentBlock::Heading { level, text } => Some((*level, text.as_str())),
        _ => None,
    });
    let first = headings.clone().next();
    headings
        .find(|(level, _)| *level == 1)
        .or(first)
        .map(|(_, text)| text.to_string())
        .unwrap_or_default()
}
