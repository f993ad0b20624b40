//! Math typesetting backends

use crate::render_config::{MathConfig, MathOutput};
use thiserror::Error;

/// Errors reported by a math engine for a single expression
#[derive(Error, Debug)]
pub enum MathError {
    /// The engine options could not be assembled
    #[error("invalid math engine options: {0}")]
    Options(String),

    /// The engine rejected the expression
    #[error("failed to typeset `{tex}`: {message}")]
    Render {
        /// The expression, delimiters stripped
        tex: String,
        /// Message reported by the engine
        message: String,
    },
}

/// A typesetter turning a math payload into HTML.
///
/// Implementations receive the payload with its delimiters already stripped.
pub trait MathEngine: Send + Sync {
    /// Typeset `tex` in display (block) or inline mode
    fn render(&self, tex: &str, display: bool) -> Result<String, MathError>;
}

/// KaTeX-backed engine
#[derive(Debug, Clone, Default)]
pub struct KatexEngine {
    config: MathConfig,
}

impl KatexEngine {
    pub fn new(config: MathConfig) -> Self {
        Self { config }
    }

    fn opts(&self, display: bool) -> Result<katex::Opts, MathError> {
        let output = match self.config.output {
            MathOutput::Html => katex::OutputType::Html,
            MathOutput::Mathml => katex::OutputType::Mathml,
            MathOutput::HtmlAndMathml => katex::OutputType::HtmlAndMathml,
        };

        katex::Opts::builder()
            .display_mode(display)
            .output_type(output)
            .throw_on_error(self.config.throw_on_error)
            .build()
            .map_err(|e| MathError::Options(e.to_string()))
    }
}

impl MathEngine for KatexEngine {
    fn render(&self, tex: &str, display: bool) -> Result<String, MathError> {
        let opts = self.opts(display)?;
        katex::render_with_opts(tex, &opts).map_err(|e| MathError::Render {
            tex: tex.to_string(),
            message: e.to_string(),
        })
    }
}
