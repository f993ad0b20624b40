//! Render tree produced by the formatting and paragraph phases

use super::segment::{MathSpan, RemarkBlock};

/// Inline text styles produced by the text commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    /// `\textbf{}`
    Bold,
    /// `\textit{}`
    Italic,
    /// `\emph{}`
    Emphasis,
    /// `\underline{}`
    Underline,
}

impl InlineStyle {
    /// HTML element name for this style
    pub fn tag(self) -> &'static str {
        match self {
            InlineStyle::Bold => "strong",
            InlineStyle::Italic => "i",
            InlineStyle::Emphasis => "em",
            InlineStyle::Underline => "u",
        }
    }
}

/// Anchor minted for a heading command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingAnchor {
    /// Identifier used as the `id` attribute and the TOC link target
    pub id: String,
    /// Plain-text label (commands stripped, math kept as source)
    pub label: String,
    /// Heading level: 2 for sections, 3 for subsections, 4 for subsubsections
    pub level: u8,
}

/// A node of the render tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, not yet escaped
    Text(String),

    /// Whitespace separating two paragraphs (only ever at top level)
    Break(String),

    /// A math span awaiting typesetting
    Math(MathSpan),

    /// A remark block awaiting its own rendering pass
    Remark(RemarkBlock),

    /// A styled inline run
    Styled {
        style: InlineStyle,
        children: Vec<Node>,
    },

    /// A section heading
    Heading {
        anchor: HeadingAnchor,
        /// Byte offset of the command in the raw document
        offset: usize,
        children: Vec<Node>,
    },

    /// Markup produced by the pipeline itself (typeset math, callouts)
    Html(String),
}

impl Node {
    /// Plain text of the node: commands stripped, math as its source
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Break(_) => out.push(' '),
            Node::Math(span) => out.push_str(&span.source),
            Node::Remark(remark) => out.push_str(&remark.body),
            Node::Styled { children, .. } | Node::Heading { children, .. } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
            Node::Html(_) => {}
        }
    }
}

/// How a paragraph chunk is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Wrapped in `<p>...</p>`
    Paragraph,
    /// Emitted as-is: the chunk is led by a heading, a remark or a math span
    Bare,
}

/// A paragraph-level chunk of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub nodes: Vec<Node>,
}
