//! Reader-side navigation over a table of contents
//!
//! Pure functions behind the interactive table of contents: search
//! filtering, picking the active entry while scrolling, and the scroll
//! position for a clicked entry. Positions are in CSS pixels.

use super::TocItem;

/// Fraction of the viewport height trimmed from the top and from the bottom
/// to form the reading band
const BAND_MARGIN: f64 = 0.2;

/// Entries whose label or part label contains `query`, ignoring case.
///
/// An empty or blank query keeps every entry.
pub fn filter_items<'a>(items: &'a [TocItem], query: &str) -> Vec<&'a TocItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.label.to_lowercase().contains(&query)
                || item
                    .group
                    .as_ref()
                    .is_some_and(|group| group.to_lowercase().contains(&query))
        })
        .collect()
}

/// The vertical band of the viewport considered "being read"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingBand {
    /// Top edge, relative to the viewport top
    pub top: f64,
    /// Bottom edge, relative to the viewport top
    pub bottom: f64,
}

impl ReadingBand {
    /// The middle 60% of a viewport of the given height
    pub fn for_viewport(height: f64) -> Self {
        Self {
            top: height * BAND_MARGIN,
            bottom: height * (1.0 - BAND_MARGIN),
        }
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom
    }
}

/// A rendered heading's position, relative to the viewport top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingPosition<'a> {
    pub id: &'a str,
    pub top: f64,
}

/// Pick the entry to highlight.
///
/// `headings` are in document order. The first heading inside the band
/// wins; otherwise the last heading already scrolled above the band;
/// otherwise the first heading.
pub fn active_heading<'a>(headings: &[HeadingPosition<'a>], band: ReadingBand) -> Option<&'a str> {
    headings
        .iter()
        .find(|h| band.contains(h.top))
        .or_else(|| headings.iter().rev().find(|h| h.top < band.top))
        .or_else(|| headings.first())
        .map(|h| h.id)
}

/// Scroll offset bringing a heading just below a sticky header.
///
/// `heading_top` is the heading's position from the document top.
pub fn scroll_target(heading_top: f64, header_offset: f64) -> f64 {
    (heading_top - header_offset).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, group: Option<&str>) -> TocItem {
        TocItem {
            id: crate::slug::slugify(label),
            label: label.to_string(),
            level: 2,
            offset: 0,
            group: group.map(str::to_string),
        }
    }

    fn pos(id: &str, top: f64) -> HeadingPosition<'_> {
        HeadingPosition { id, top }
    }

    #[test]
    fn test_filter_matches_label_case_insensitively() {
        let items = vec![item("Eigenvalues", None), item("Determinants", None)];
        let found = filter_items(&items, "EIGEN");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Eigenvalues");
    }

    #[test]
    fn test_filter_matches_group_label() {
        let items = vec![
            item("Events", Some("Probability")),
            item("Matrices", Some("Linear Algebra")),
        ];
        let found = filter_items(&items, "proba");
        assert_eq!(found, vec![&items[0]]);
    }

    #[test]
    fn test_blank_query_keeps_everything() {
        let items = vec![item("A", None), item("B", None)];
        assert_eq!(filter_items(&items, "").len(), 2);
        assert_eq!(filter_items(&items, "   ").len(), 2);
    }

    #[test]
    fn test_band_is_middle_sixty_percent() {
        let band = ReadingBand::for_viewport(1000.0);
        assert_eq!(band.top, 200.0);
        assert_eq!(band.bottom, 800.0);
        assert!(band.contains(500.0));
        assert!(!band.contains(100.0));
    }

    #[test]
    fn test_heading_inside_band_is_active() {
        let band = ReadingBand::for_viewport(1000.0);
        let headings = [pos("a", -400.0), pos("b", 300.0), pos("c", 700.0)];
        assert_eq!(active_heading(&headings, band), Some("b"));
    }

    #[test]
    fn test_last_heading_above_band_is_active() {
        let band = ReadingBand::for_viewport(1000.0);
        let headings = [pos("a", -900.0), pos("b", -100.0), pos("c", 1200.0)];
        assert_eq!(active_heading(&headings, band), Some("b"));
    }

    #[test]
    fn test_falls_back_to_first_heading() {
        let band = ReadingBand::for_viewport(1000.0);
        let headings = [pos("a", 900.0), pos("b", 1500.0)];
        assert_eq!(active_heading(&headings, band), Some("a"));
        assert_eq!(active_heading(&[], band), None);
    }

    #[test]
    fn test_scroll_target_compensates_header() {
        assert_eq!(scroll_target(640.0, 80.0), 560.0);
        assert_eq!(scroll_target(30.0, 80.0), 0.0);
    }
}
