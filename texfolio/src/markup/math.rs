//! Phase 2: math span extraction

use super::segment::{MathDelimiter, MathSpan, Segment};

/// Split every text segment into text and math spans.
///
/// At each position the delimiter pairs are tried as a single alternation
/// in [`MathDelimiter::PRECEDENCE`] order, so spans never overlap. The
/// payload must be non-empty and the closing delimiter is the nearest one.
/// `\$` is an escaped dollar and never opens or closes a span. Remark
/// segments pass through untouched.
pub fn extract_math(segments: Vec<Segment>) -> Vec<Segment> {
    let mut output = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Text { text, offset } => split_text(&text, offset, &mut output),
            other => output.push(other),
        }
    }

    output
}

/// Scan one text run and push its text and math pieces
fn split_text(text: &str, offset: usize, output: &mut Vec<Segment>) {
    let bytes = text.as_bytes();
    let mut text_start = 0;
    let mut i = 0;

    while i < text.len() {
        // `\\` is a line break, so a `$` after it is a real delimiter
        if bytes[i] == b'\\' && matches!(bytes.get(i + 1), Some(b'$' | b'\\')) {
            i += 2;
            continue;
        }

        if let Some((delimiter, end)) = match_span_at(text, i) {
            if i > text_start {
                output.push(Segment::text(&text[text_start..i], offset + text_start));
            }
            output.push(Segment::Math(MathSpan {
                delimiter,
                source: text[i..end].to_string(),
                offset: offset + i,
            }));
            i = end;
            text_start = end;
            continue;
        }

        i += text[i..].chars().next().map_or(1, char::len_utf8);
    }

    if text_start < text.len() {
        output.push(Segment::text(&text[text_start..], offset + text_start));
    }
}

/// Try each delimiter pair at byte position `start`, returning the first
/// that matches together with the end of the span
fn match_span_at(text: &str, start: usize) -> Option<(MathDelimiter, usize)> {
    MathDelimiter::PRECEDENCE.into_iter().find_map(|delimiter| {
        let rest = &text[start..];
        if !rest.starts_with(delimiter.open()) {
            return None;
        }

        let body_start = start + delimiter.open().len();
        let first_char = text[body_start..].chars().next()?;
        let search_from = body_start + first_char.len_utf8();

        // The payload must hold at least one character, and "$" can not
        // begin with the closing "$" of an empty span.
        if delimiter == MathDelimiter::InlineDollar && first_char == '$' {
            return None;
        }

        let close = find_closing(text, search_from, delimiter)?;
        Some((delimiter, close + delimiter.close().len()))
    })
}

/// Find the nearest closing delimiter at or after `from`
fn find_closing(text: &str, from: usize, delimiter: MathDelimiter) -> Option<usize> {
    let needle = delimiter.close();
    let escapable = matches!(
        delimiter,
        MathDelimiter::DisplayDollar | MathDelimiter::InlineDollar
    );

    let mut from = from;
    loop {
        let found = from + text[from..].find(needle)?;
        if escapable && is_escaped(text, found) {
            from = found + 1;
            continue;
        }
        return Some(found);
    }
}

/// Whether the byte at `at` follows an odd run of backslashes
fn is_escaped(text: &str, at: usize) -> bool {
    let backslashes = text.as_bytes()[..at]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}
