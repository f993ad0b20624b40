//! texfolio - LaTeX-flavored notes to sanitized HTML
//!
//! Renders a small markup dialect (sections, text styles, remark callouts,
//! inline and display math) into HTML that is safe to inject as-is, and
//! extracts tables of contents whose link targets match the rendered
//! heading anchors.
//!
//! ```
//! use texfolio::{extract_toc, RenderConfig, Renderer};
//!
//! let source = "\\section{Results}\nThe bound is $n^2$.";
//! let config = RenderConfig::default();
//!
//! let html = Renderer::new(config.clone()).render(source);
//! let toc = extract_toc(source, &config);
//!
//! assert!(html.contains(&format!("id=\"{}\"", toc[0].id)));
//! ```

#![deny(unsafe_code)]

pub mod html_exporter;
pub mod markup;
pub mod math;
pub mod pipeline;
pub mod render_config;
pub mod sanitize;
pub mod slug;
pub mod toc;
pub mod walker;

pub use math::{KatexEngine, MathEngine, MathError};
pub use pipeline::{RenderedPart, Renderer};
pub use render_config::{ConfigError, RenderConfig};
pub use slug::{slugify, HeadingIds, IdMinter};
pub use toc::{extract_annex_toc, extract_toc, Part, TocItem};
