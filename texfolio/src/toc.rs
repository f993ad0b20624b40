//! Table-of-contents extraction and navigation
//!
//! Extraction reuses the renderer's recognition phases, so every entry's
//! `id` is the anchor the rendered heading carries.

mod extract;
pub mod navigation;

pub use extract::{extract_annex_toc, extract_toc};

use crate::slug::{HeadingIds, IdMinter};
use serde::Serialize;

/// One entry of a table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Link target; equals the rendered heading's `id`
    pub id: String,

    /// Plain-text title
    pub label: String,

    /// 1 for annex parts, 2 to 4 for section levels
    pub level: u8,

    /// Byte offset of the heading command in its source
    pub offset: usize,

    /// Label of the annex part the entry belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// One source of a multi-part document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub label: String,
    pub text: String,
}

impl Part {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Anchor ids of annex parts, minted in order through one shared minter.
///
/// A part's headings are namespaced under its id (see
/// [`IdMinter::with_prefix`]), so with [`HeadingIds::Numbered`] every anchor
/// on the joined annex page is unique.
pub fn part_ids(parts: &[Part], mode: HeadingIds) -> Vec<String> {
    let mut minter = IdMinter::new(mode);
    parts.iter().map(|part| minter.mint(&part.label)).collect()
}
