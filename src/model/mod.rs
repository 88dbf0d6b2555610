//! Document model types for recovered structure.
//!
//! This module defines the intermediate representation that bridges source
//! adapters and rendering: raw input units on one side, typed content
//! blocks on the other. The model is source-agnostic.

mod block;
mod document;
mod profile;
mod table;
mod unit;

pub use block::{BlockKind, ContentBlock, ListBlock};
pub use document::DocumentModel;
pub use profile::{DocTypeProfile, HeadingKeywords, ProfileSet};
pub use table::TableBlock;
pub use unit::{units_from_lines, units_from_text, EmphasisHint, RawUnit};
