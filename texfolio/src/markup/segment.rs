//! Segment stream produced by the extraction phases

/// A piece of the working document between extraction phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Unprocessed source text
    Text {
        /// The source text
        text: String,
        /// Byte offset of the text in the raw document
        offset: usize,
    },

    /// A protected math span
    Math(MathSpan),

    /// A protected remark block
    Remark(RemarkBlock),
}

impl Segment {
    /// Create a text segment
    pub fn text(text: impl Into<String>, offset: usize) -> Self {
        Segment::Text {
            text: text.into(),
            offset,
        }
    }
}

/// The recognized math delimiter pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathDelimiter {
    /// `$$...$$`
    DisplayDollar,
    /// `$...$`
    InlineDollar,
    /// `\(...\)`
    InlineParen,
    /// `\[...\]`
    DisplayBracket,
}

impl MathDelimiter {
    /// Delimiters in the order they are tried at each position
    pub const PRECEDENCE: [MathDelimiter; 4] = [
        MathDelimiter::DisplayDollar,
        MathDelimiter::InlineDollar,
        MathDelimiter::InlineParen,
        MathDelimiter::DisplayBracket,
    ];

    /// Opening delimiter text
    pub fn open(self) -> &'static str {
        match self {
            MathDelimiter::DisplayDollar => "$$",
            MathDelimiter::InlineDollar => "$",
            MathDelimiter::InlineParen => "\\(",
            MathDelimiter::DisplayBracket => "\\[",
        }
    }

    /// Closing delimiter text
    pub fn close(self) -> &'static str {
        match self {
            MathDelimiter::DisplayDollar => "$$",
            MathDelimiter::InlineDollar => "$",
            MathDelimiter::InlineParen => "\\)",
            MathDelimiter::DisplayBracket => "\\]",
        }
    }

    /// Whether the span is typeset as a display block
    pub fn is_display(self) -> bool {
        matches!(
            self,
            MathDelimiter::DisplayDollar | MathDelimiter::DisplayBracket
        )
    }
}

/// A delimited math expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    /// Which delimiter pair enclosed the expression
    pub delimiter: MathDelimiter,
    /// The full source, delimiters included
    pub source: String,
    /// Byte offset of the opening delimiter in the raw document
    pub offset: usize,
}

impl MathSpan {
    /// The math payload with the delimiter pair stripped
    pub fn body(&self) -> &str {
        let open = self.delimiter.open().len();
        let close = self.delimiter.close().len();
        &self.source[open..self.source.len() - close]
    }

    /// Whether the span is typeset as a display block
    pub fn is_display(&self) -> bool {
        self.delimiter.is_display()
    }
}

/// A `\begin{keyword}...\end{keyword}` callout block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemarkBlock {
    /// The environment keyword that matched (e.g. "remark")
    pub keyword: String,
    /// Raw inner text between the begin and end markers
    pub body: String,
    /// Byte offset of the `\begin` marker in the raw document
    pub offset: usize,
    /// Byte offset of the first body character in the raw document
    pub body_offset: usize,
}

impl RemarkBlock {
    /// The full source of the block, markers included
    pub fn source(&self) -> String {
        format!(
            "\\begin{{{kw}}}{}\\end{{{kw}}}",
            self.body,
            kw = self.keyword
        )
    }
}

/// Commands of the markup dialect that take a braced argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Section,
    Subsection,
    Subsubsection,
    Textbf,
    Textit,
    Emph,
    Underline,
}

impl Command {
    /// All commands, headings first
    pub const ALL: [Command; 7] = [
        Command::Section,
        Command::Subsection,
        Command::Subsubsection,
        Command::Textbf,
        Command::Textit,
        Command::Emph,
        Command::Underline,
    ];

    /// Look up a command by its name (without the leading backslash)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// The command name as written after the backslash
    pub fn name(self) -> &'static str {
        match self {
            Command::Section => "section",
            Command::Subsection => "subsection",
            Command::Subsubsection => "subsubsection",
            Command::Textbf => "textbf",
            Command::Textit => "textit",
            Command::Emph => "emph",
            Command::Underline => "underline",
        }
    }

    /// Heading level for structural commands, `None` for text commands
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Command::Section => Some(2),
            Command::Subsection => Some(3),
            Command::Subsubsection => Some(4),
            _ => None,
        }
    }

    /// Whether this command produces a heading
    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }
}
