//! Phase 3: text-formatting and structural command substitution

use super::lexer::{tokenize, Token, TokenKind};
use super::node::{HeadingAnchor, InlineStyle, Node};
use super::segment::{Command, Segment};
use crate::slug::IdMinter;

/// Which commands the formatting phase recognizes
pub enum Commands<'m> {
    /// Heading and text commands; headings draw their ids from the minter
    All(&'m mut IdMinter),
    /// Text commands only; heading commands stay literal (remark bodies)
    InlineOnly,
}

/// Replace recognized commands with style and heading nodes.
///
/// A command matches when its closing brace is found before the next
/// paragraph break or remark block; braces nest, math spans are skipped
/// over. An unmatched command is kept as literal text and its argument is
/// processed as ordinary text. Heading commands are only recognized at the
/// top level, never inside another command's argument.
pub fn apply_formatting(segments: &[Segment], commands: Commands<'_>) -> Vec<Node> {
    let tokens = tokenize(segments);
    let mut parser = Parser {
        minter: match commands {
            Commands::All(minter) => Some(minter),
            Commands::InlineOnly => None,
        },
    };
    let headings = parser.minter.is_some();
    parser.parse(&tokens, headings)
}

struct Parser<'m> {
    minter: Option<&'m mut IdMinter>,
}

impl Parser<'_> {
    fn parse(&mut self, tokens: &[Token<'_>], headings: bool) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            match token.kind {
                TokenKind::Command(command) if headings || !command.is_heading() => {
                    if let Some(close) = find_closing(tokens, i) {
                        let node = self.command_node(command, token.offset, &tokens[i + 1..close]);
                        nodes.push(node);
                        i = close + 1;
                        continue;
                    }
                    push_text(&mut nodes, token.source);
                }
                TokenKind::Escaped(c) => {
                    let mut buf = [0u8; 4];
                    push_text(&mut nodes, c.encode_utf8(&mut buf));
                }
                TokenKind::Break => nodes.push(Node::Break(token.source.to_string())),
                TokenKind::Math(span) => nodes.push(Node::Math(span.clone())),
                TokenKind::Remark(remark) => nodes.push(Node::Remark(remark.clone())),
                TokenKind::Text
                | TokenKind::Command(_)
                | TokenKind::OpenBrace
                | TokenKind::CloseBrace => push_text(&mut nodes, token.source),
            }
            i += 1;
        }

        nodes
    }

    fn command_node(&mut self, command: Command, offset: usize, argument: &[Token<'_>]) -> Node {
        let children = self.parse(argument, false);

        if let (Some(level), Some(minter)) = (command.heading_level(), self.minter.as_deref_mut()) {
            let label = children
                .iter()
                .map(Node::plain_text)
                .collect::<String>()
                .trim()
                .to_string();
            let id = minter.mint(&label);
            return Node::Heading {
                anchor: HeadingAnchor { id, label, level },
                offset,
                children,
            };
        }

        Node::Styled {
            style: inline_style(command),
            children,
        }
    }
}

fn inline_style(command: Command) -> InlineStyle {
    match command {
        Command::Textbf => InlineStyle::Bold,
        Command::Textit => InlineStyle::Italic,
        Command::Underline => InlineStyle::Underline,
        // Heading commands never get here: `parse` leaves them literal without a minter
        Command::Emph | Command::Section | Command::Subsection | Command::Subsubsection => {
            InlineStyle::Emphasis
        }
    }
}

/// Index of the brace closing the command token at `open`, if any
fn find_closing(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (j, token) in tokens.iter().enumerate().skip(open + 1) {
        match token.kind {
            TokenKind::Command(_) | TokenKind::OpenBrace => depth += 1,
            TokenKind::CloseBrace => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            TokenKind::Break | TokenKind::Remark(_) => return None,
            TokenKind::Text | TokenKind::Escaped(_) | TokenKind::Math(_) => {}
        }
    }
    None
}

/// Append text, merging with a preceding text node
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_string()));
    }
}
