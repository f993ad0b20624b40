//! Tokenizer for the formatting phase
//!
//! Turns the segment stream into a flat token list. Math and remark
//! segments become single opaque tokens, so brace matching in the parser
//! can step over them without ever looking inside.

use super::segment::{Command, MathSpan, RemarkBlock, Segment};
use regex::Regex;
use std::sync::OnceLock;

/// Kind of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// Plain text with no special meaning
    Text,
    /// `\name{` for a recognized command; the opening brace is part of the token
    Command(Command),
    /// A bare `{`
    OpenBrace,
    /// A bare `}`
    CloseBrace,
    /// `\$`, `\{` or `\}`, standing for the escaped character
    Escaped(char),
    /// A run of whitespace containing at least one blank line
    Break,
    /// A protected math span
    Math(&'a MathSpan),
    /// A protected remark block
    Remark(&'a RemarkBlock),
}

/// A token with its source text and raw-document offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub source: &'a str,
    pub offset: usize,
}

/// Blank-line runs: a newline, optional whitespace, another newline, and
/// any whitespace that follows
fn paragraph_break() -> &'static Regex {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    BREAK.get_or_init(|| Regex::new(r"\n[^\S\n]*\n\s*").expect("valid paragraph break pattern"))
}

/// Tokenize a segment stream
pub(crate) fn tokenize(segments: &[Segment]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for segment in segments {
        match segment {
            Segment::Text { text, offset } => tokenize_text(text, *offset, &mut tokens),
            Segment::Math(span) => tokens.push(Token {
                kind: TokenKind::Math(span),
                source: &span.source,
                offset: span.offset,
            }),
            Segment::Remark(remark) => tokens.push(Token {
                kind: TokenKind::Remark(remark),
                source: &remark.body,
                offset: remark.offset,
            }),
        }
    }

    tokens
}

/// Tokenize one text run, splitting it on paragraph breaks first
fn tokenize_text<'a>(text: &'a str, offset: usize, tokens: &mut Vec<Token<'a>>) {
    let mut last = 0;
    for found in paragraph_break().find_iter(text) {
        tokenize_line_run(&text[last..found.start()], offset + last, tokens);
        tokens.push(Token {
            kind: TokenKind::Break,
            source: found.as_str(),
            offset: offset + found.start(),
        });
        last = found.end();
    }
    tokenize_line_run(&text[last..], offset + last, tokens);
}

/// Tokenize text known to contain no paragraph break
fn tokenize_line_run<'a>(text: &'a str, offset: usize, tokens: &mut Vec<Token<'a>>) {
    let bytes = text.as_bytes();
    let mut plain_start = 0;
    let mut i = 0;

    let flush = |end: usize, plain_start: usize, tokens: &mut Vec<Token<'a>>| {
        if end > plain_start {
            tokens.push(Token {
                kind: TokenKind::Text,
                source: &text[plain_start..end],
                offset: offset + plain_start,
            });
        }
    };

    while i < bytes.len() {
        let (kind, len) = match bytes[i] {
            b'{' => (TokenKind::OpenBrace, 1),
            b'}' => (TokenKind::CloseBrace, 1),
            b'\\' if bytes.get(i + 1) == Some(&b'\\') => {
                i += 2;
                continue;
            }
            b'\\' => match lex_backslash(&text[i..]) {
                Some(found) => found,
                None => {
                    i += 1;
                    continue;
                }
            },
            _ => {
                i += 1;
                continue;
            }
        };

        flush(i, plain_start, tokens);
        tokens.push(Token {
            kind,
            source: &text[i..i + len],
            offset: offset + i,
        });
        i += len;
        plain_start = i;
    }

    flush(bytes.len(), plain_start, tokens);
}

/// Recognize an escape or a command at a backslash
fn lex_backslash(rest: &str) -> Option<(TokenKind<'static>, usize)> {
    let mut chars = rest[1..].chars();
    match chars.next()? {
        c @ ('$' | '{' | '}') => return Some((TokenKind::Escaped(c), 2)),
        c if c.is_ascii_alphabetic() => {}
        _ => return None,
    }

    let name_len = rest[1..]
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    let command = Command::from_name(&rest[1..1 + name_len])?;

    if rest[1 + name_len..].starts_with('{') {
        Some((TokenKind::Command(command), name_len + 2))
    } else {
        None
    }
}
