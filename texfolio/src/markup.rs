//! Markup model and the recognition phases of the rendering pipeline
//!
//! The raw markup is never rewritten with placeholder strings. Instead each
//! recognition phase turns its input into a typed stream:
//! 1. **Remarks**: `\begin{remark}...\end{remark}` blocks become [`Segment::Remark`]
//! 2. **Math**: the four math delimiter pairs become [`Segment::Math`]
//! 3. **Formatting**: text and structural commands become a [`Node`] tree
//! 4. **Paragraphs**: top-level nodes are grouped into [`Block`]s
//!
//! Protected spans travel through the later phases as their own variants,
//! so author text can never collide with a protection marker.

// Submodules
mod lexer;
mod math;
mod node;
mod paragraph;
mod parser;
mod remark;
mod segment;

// Re-export public types
pub use math::extract_math;
pub use node::{Block, BlockKind, HeadingAnchor, InlineStyle, Node};
pub use paragraph::split_paragraphs;
pub use parser::{apply_formatting, Commands};
pub use remark::extract_remarks;
pub use segment::{Command, MathDelimiter, MathSpan, RemarkBlock, Segment};
