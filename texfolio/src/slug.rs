//! Heading identifier generation
//!
//! Both the renderer (when stamping `id` attributes on headings) and the
//! table-of-contents extractors (when computing link targets) go through
//! this module, so the same title always yields the same identifier.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier used when a title contains no alphanumeric characters
const FALLBACK_ID: &str = "section";

/// Generate an HTML-attribute-safe identifier from a title.
///
/// Lowercases the title, keeps alphanumeric characters (including
/// non-ASCII letters), and collapses every other run of characters into a
/// single hyphen. Leading and trailing hyphens are removed.
///
/// # Examples
///
/// ```
/// use texfolio::slugify;
///
/// assert_eq!(slugify("Chapter One"), "chapter-one");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("Théorème de Gauss"), "théorème-de-gauss");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        slug
    }
}

/// How heading identifiers are minted within one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingIds {
    /// Identifier is exactly `slugify(label)`; repeated labels share an id
    #[default]
    Plain,
    /// Repeated labels get a `-2`, `-3`, ... suffix in document order
    Numbered,
}

/// Separator between a part namespace and a heading id.
///
/// [`slugify`] never emits two hyphens in a row, so a namespaced id can not
/// equal an unprefixed one.
const NAMESPACE_SEPARATOR: &str = "--";

/// Mints heading identifiers for a single document.
///
/// The renderer and the table-of-contents extractors each create one minter
/// per document and feed it the headings in the same order, so their ids
/// agree in every [`HeadingIds`] mode.
#[derive(Debug, Clone)]
pub struct IdMinter {
    mode: HeadingIds,
    prefix: Option<String>,
    seen: HashMap<String, usize>,
}

impl IdMinter {
    /// Create a minter with no identifiers issued yet
    pub fn new(mode: HeadingIds) -> Self {
        Self {
            mode,
            prefix: None,
            seen: HashMap::new(),
        }
    }

    /// Create a minter whose ids live under `prefix`, as `prefix--slug`.
    ///
    /// Annex parts are joined into one page, so each part mints its
    /// headings under its own part id.
    pub fn with_prefix(mode: HeadingIds, prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new(mode)
        }
    }

    /// Issue the identifier for the next heading with the given title
    pub fn mint(&mut self, title: &str) -> String {
        let base = slugify(title);
        let id = match self.mode {
            HeadingIds::Plain => base,
            HeadingIds::Numbered => {
                let count = self.seen.entry(base.clone()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    base
                } else {
                    format!("{}-{}", base, count)
                }
            }
        };

        match &self.prefix {
            Some(prefix) => format!("{}{}{}", prefix, NAMESPACE_SEPARATOR, id),
            None => id,
        }
    }
}
