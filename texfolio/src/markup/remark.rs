//! Phase 1: remark block extraction

use super::segment::{RemarkBlock, Segment};

const BEGIN: &str = "\\begin{";

/// Split the raw document into text and remark blocks.
///
/// A remark is `\begin{K}...\end{K}` where `K` is one of `keywords`; the
/// first matching `\end{K}` closes it. A begin marker without its end marker
/// stays in the text unchanged.
pub fn extract_remarks(raw: &str, keywords: &[&str]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(found) = raw[cursor..].find(BEGIN) {
        let begin = cursor + found;
        let after_begin = begin + BEGIN.len();

        let Some(keyword) = match_keyword(&raw[after_begin..], keywords) else {
            cursor = after_begin;
            continue;
        };

        let body_start = after_begin + keyword.len() + 1;
        let end_marker = format!("\\end{{{}}}", keyword);

        let Some(body_len) = raw[body_start..].find(&end_marker) else {
            cursor = body_start;
            continue;
        };

        if begin > text_start {
            segments.push(Segment::text(&raw[text_start..begin], text_start));
        }
        segments.push(Segment::Remark(RemarkBlock {
            keyword: keyword.to_string(),
            body: raw[body_start..body_start + body_len].to_string(),
            offset: begin,
            body_offset: body_start,
        }));

        cursor = body_start + body_len + end_marker.len();
        text_start = cursor;
    }

    if text_start < raw.len() {
        segments.push(Segment::text(&raw[text_start..], text_start));
    }

    log::debug!(
        "extracted {} remark block(s)",
        segments
            .iter()
            .filter(|s| matches!(s, Segment::Remark(_)))
            .count()
    );

    segments
}

/// Find the keyword that `rest` starts with, followed by the closing brace
fn match_keyword<'k>(rest: &str, keywords: &[&'k str]) -> Option<&'k str> {
    keywords.iter().copied().find(|keyword| {
        !keyword.is_empty()
            && rest.starts_with(keyword)
            && rest[keyword.len()..].starts_with('}')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYWORDS: &[&str] = &["remark", "remarque"];

    fn remark_bodies(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Remark(r) => Some(r.body.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_no_remarks_is_single_text_segment() {
        let segments = extract_remarks("plain text", KEYWORDS);
        assert_eq!(segments, vec![Segment::text("plain text", 0)]);
    }

    #[test]
    fn test_remark_between_text() {
        // Arrange
        let raw = "Before \\begin{remark}Inside $x$\\end{remark} after";

        // Act
        let segments = extract_remarks(raw, KEYWORDS);

        // Assert
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::text("Before ", 0));
        match &segments[1] {
            Segment::Remark(remark) => {
                assert_eq!(remark.keyword, "remark");
                assert_eq!(remark.body, "Inside $x$");
                assert_eq!(remark.offset, 7);
                assert_eq!(&raw[remark.body_offset..remark.body_offset + 6], "Inside");
            }
            other => panic!("expected remark, got {:?}", other),
        }
        assert_eq!(segments[2], Segment::text(" after", 43));
    }

    #[test]
    fn test_localized_keyword_and_mismatched_end() {
        let raw = "\\begin{remarque}A\\end{remark}B\\end{remarque}";
        let segments = extract_remarks(raw, KEYWORDS);
        assert_eq!(remark_bodies(&segments), vec!["A\\end{remark}B"]);
    }

    #[test]
    fn test_unconfigured_keyword_is_text() {
        let raw = "\\begin{note}A\\end{note}";
        let segments = extract_remarks(raw, KEYWORDS);
        assert_eq!(segments, vec![Segment::text(raw, 0)]);
    }

    #[test]
    fn test_unterminated_remark_is_text() {
        let raw = "\\begin{remark}never closed";
        let segments = extract_remarks(raw, KEYWORDS);
        assert_eq!(segments, vec![Segment::text(raw, 0)]);
    }

    #[test]
    fn test_keyword_prefix_does_not_match() {
        let raw = "\\begin{remarks}x\\end{remarks}";
        let segments = extract_remarks(raw, &["remark"]);
        assert_eq!(segments, vec![Segment::text(raw, 0)]);
    }

    #[test]
    fn test_consecutive_remarks() {
        let raw = "\\begin{remark}one\\end{remark}\\begin{remark}two\\end{remark}";
        let segments = extract_remarks(raw, KEYWORDS);
        assert_eq!(segments.len(), 2);
        assert_eq!(remark_bodies(&segments), vec!["one", "two"]);
    }
}
