//! Plain text rendering for recovered documents.

use crate::model::{ContentBlock, DocumentModel};

/// Convert a document to plain text.
///
/// Markup is dropped; list items keep a bullet or number so enumerations
/// stay readable, and table cells are tab-separated.
pub fn to_text(doc: &DocumentModel) -> String {
    let output = doc
        .blocks
        .iter()
        .map(block_text)
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let output = output.trim();
    if output.is_empty() {
        String::new()
    } else {
        format!("{}\n", output)
    }
}

fn block_text(block: &ContentBlock) -> String {
    match block {
        ContentBlock::List(list) => list
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if list.ordered {
                    format!("{}. {}", i + 1, item)
                } else {
                    format!("• {}", item)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ContentBlock::Link { text, href } if text.is_empty() => href.clone(),
        ContentBlock::Link { text, href } => format!("{} <{}>", text, href),
        other => other.plain_text(),
    }
}
