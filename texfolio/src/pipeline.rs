//! Seven-phase content rendering pipeline
//!
//! [`Renderer::render`] runs the phases in a fixed order:
//! 1. **Remarks**: extract remark blocks ([`extract_remarks`])
//! 2. **Math**: extract math spans ([`extract_math`])
//! 3. **Formatting**: parse commands into a node tree ([`apply_formatting`])
//! 4. **Paragraphs**: group nodes into blocks ([`split_paragraphs`])
//! 5. **Math restore**: typeset every math span ([`restore_math`])
//! 6. **Remark restore**: render remark bodies into callouts ([`restore_remarks`])
//! 7. **Sanitize**: clean the assembled HTML ([`sanitize`])
//!
//! Each phase is a plain function over typed values, so the stages can be
//! exercised on their own.

use crate::html_exporter::{write_blocks, write_callout, write_nodes};
use crate::markup::{
    apply_formatting, extract_math, extract_remarks, split_paragraphs, Block, Commands, MathSpan,
    Node, RemarkBlock, Segment,
};
use crate::math::{KatexEngine, MathEngine};
use crate::render_config::RenderConfig;
use crate::sanitize::sanitize;
use crate::slug::IdMinter;
use crate::toc::{part_ids, Part};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Renders markup documents to sanitized HTML
pub struct Renderer {
    config: RenderConfig,
    engine: Box<dyn MathEngine>,
}

impl Renderer {
    /// Create a renderer typesetting math with KaTeX
    pub fn new(config: RenderConfig) -> Self {
        let engine = KatexEngine::new(config.math.clone());
        Self::with_engine(config, Box::new(engine))
    }

    /// Create a renderer with a custom math engine
    pub fn with_engine(config: RenderConfig, engine: Box<dyn MathEngine>) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one raw document to sanitized HTML.
    ///
    /// Never fails: malformed constructs come out as literal text and math
    /// the engine rejects comes out as its original source.
    pub fn render(&self, raw: &str) -> String {
        self.render_with(raw, IdMinter::new(self.config.heading_ids))
    }

    fn render_with(&self, raw: &str, mut minter: IdMinter) -> String {
        let keywords = self.config.remark_keywords();

        let segments = extract_remarks(raw, &keywords);
        let segments = extract_math(segments);
        let nodes = apply_formatting(&segments, Commands::All(&mut minter));
        let blocks = split_paragraphs(nodes);
        let blocks = restore_math(blocks, self.engine.as_ref());
        let blocks = restore_remarks(blocks, &self.config, self.engine.as_ref());

        sanitize(&write_blocks(&blocks))
    }

    /// Render annex parts in input order.
    ///
    /// Heading ids of each part are namespaced under the part id, the same
    /// way [`extract_annex_toc`](crate::extract_annex_toc) mints them.
    pub fn render_parts(&self, parts: &[Part]) -> Vec<RenderedPart> {
        let ids = part_ids(parts, self.config.heading_ids);

        #[cfg(feature = "parallel")]
        let rendered = parts
            .par_iter()
            .zip(ids)
            .map(|(part, id)| self.render_part(part, id))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rendered = parts
            .iter()
            .zip(ids)
            .map(|(part, id)| self.render_part(part, id))
            .collect();

        rendered
    }

    fn render_part(&self, part: &Part, id: String) -> RenderedPart {
        let minter = IdMinter::with_prefix(self.config.heading_ids, id.as_str());
        RenderedPart {
            html: self.render_with(&part.text, minter),
            label: part.label.clone(),
            id,
        }
    }
}

/// One rendered annex part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPart {
    /// Anchor of the part's level-1 heading
    pub id: String,
    pub label: String,
    /// Sanitized body
    pub html: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

/// Phase 5: replace every math span with typeset HTML
pub fn restore_math(blocks: Vec<Block>, engine: &dyn MathEngine) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| Block {
            kind: block.kind,
            nodes: restore_math_nodes(block.nodes, engine),
        })
        .collect()
}

fn restore_math_nodes(nodes: Vec<Node>, engine: &dyn MathEngine) -> Vec<Node> {
    nodes
        .into_iter()
        .map(|node| match node {
            Node::Math(span) => typeset(&span, engine),
            Node::Styled { style, children } => Node::Styled {
                style,
                children: restore_math_nodes(children, engine),
            },
            Node::Heading {
                anchor,
                offset,
                children,
            } => Node::Heading {
                anchor,
                offset,
                children: restore_math_nodes(children, engine),
            },
            other => other,
        })
        .collect()
}

/// Typeset one span; on failure keep its source as text
fn typeset(span: &MathSpan, engine: &dyn MathEngine) -> Node {
    match engine.render(span.body(), span.is_display()) {
        Ok(html) => Node::Html(html),
        Err(e) => {
            log::warn!("Math at byte {} left as source: {}", span.offset, e);
            Node::Text(span.source.clone())
        }
    }
}

/// Phase 6: render every remark block into its callout.
///
/// A remark body goes through math extraction, inline formatting and math
/// typesetting on its own, and is sanitized before it is wrapped.
pub fn restore_remarks(
    blocks: Vec<Block>,
    config: &RenderConfig,
    engine: &dyn MathEngine,
) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| Block {
            kind: block.kind,
            nodes: block
                .nodes
                .into_iter()
                .map(|node| match node {
                    Node::Remark(remark) => Node::Html(render_remark(&remark, config, engine)),
                    other => other,
                })
                .collect(),
        })
        .collect()
}

fn render_remark(remark: &RemarkBlock, config: &RenderConfig, engine: &dyn MathEngine) -> String {
    let segments = extract_math(vec![Segment::text(&remark.body, remark.body_offset)]);
    let nodes = apply_formatting(&segments, Commands::InlineOnly);
    let nodes = restore_math_nodes(nodes, engine);

    let mut body = String::new();
    write_nodes(&nodes, &mut body);

    write_callout(config.remark_label(&remark.keyword), &sanitize(body.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::MathError;
    use crate::render_config::RemarkStyle;
    use crate::slug::HeadingIds;

    /// Wraps the payload in a marker span instead of typesetting it
    struct StubEngine;

    impl MathEngine for StubEngine {
        fn render(&self, tex: &str, display: bool) -> Result<String, MathError> {
            if tex.contains("fail") {
                return Err(MathError::Render {
                    tex: tex.to_string(),
                    message: "stub failure".to_string(),
                });
            }
            let class = if display { "math-display" } else { "math-inline" };
            Ok(format!("<span class=\"{}\">{}</span>", class, tex))
        }
    }

    fn renderer() -> Renderer {
        Renderer::with_engine(RenderConfig::default(), Box::new(StubEngine))
    }

    #[test]
    fn test_plain_text_is_one_paragraph() {
        assert_eq!(renderer().render("Hello world"), "<p>Hello world</p>");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(renderer().render(""), "");
        assert_eq!(renderer().render("\n\n  \n"), "");
    }

    #[test]
    fn test_paragraphs_and_heading() {
        // Arrange
        let raw = "\\section{Intro}\n\nFirst \\textbf{bold}.\n\nSecond \\emph{line}.";

        // Act
        let html = renderer().render(raw);

        // Assert
        assert_eq!(
            html,
            "<h2 id=\"intro\">Intro</h2>\n<p>First <strong>bold</strong>.</p>\n<p>Second <em>line</em>.</p>"
        );
    }

    #[test]
    fn test_display_and_inline_math() {
        let html = renderer().render("Inline $x+1$ here.\n\n$$x+1$$");
        assert_eq!(
            html,
            "<p>Inline <span class=\"math-inline\">x+1</span> here.</p>\n<span class=\"math-display\">x+1</span>"
        );
    }

    #[test]
    fn test_math_after_line_break_is_typeset() {
        let html = renderer().render("a \\\\$x$ b");
        assert_eq!(html, "<p>a \\\\<span class=\"math-inline\">x</span> b</p>");
    }

    #[test]
    fn test_math_with_blank_lines_stays_whole() {
        let html = renderer().render("$$a\n\nb$$");
        assert_eq!(html, "<span class=\"math-display\">a\n\nb</span>");
    }

    #[test]
    fn test_commands_inside_math_are_not_formatted() {
        let html = renderer().render("$\\textbf{x}$");
        assert!(html.contains("\\textbf{x}"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_failed_math_falls_back_to_escaped_source() {
        let html = renderer().render("See $fail<x>$ now");
        assert_eq!(html, "<p>See $fail&lt;x&gt;$ now</p>");
    }

    #[test]
    fn test_remark_callout() {
        // Arrange
        let raw = "Intro\n\\begin{remark}Value: $x^2$ and \\textbf{bold}\\end{remark}\nOutro";

        // Act
        let html = renderer().render(raw);

        // Assert
        assert_eq!(
            html,
            "<p>Intro</p>\n<div class=\"remark\"><div class=\"remark-title\">Remark</div><div class=\"remark-body\">Value: <span class=\"math-inline\">x^2</span> and <strong>bold</strong></div></div>\n<p>Outro</p>"
        );
    }

    #[test]
    fn test_remark_uses_configured_label() {
        let config = RenderConfig {
            remarks: vec![RemarkStyle::new("note", "Nota bene")],
            ..RenderConfig::default()
        };
        let renderer = Renderer::with_engine(config, Box::new(StubEngine));

        let html = renderer.render("\\begin{note}x\\end{note}");

        assert!(html.contains("<div class=\"remark-title\">Nota bene</div>"));
    }

    #[test]
    fn test_headings_in_remark_stay_literal() {
        let html = renderer().render("\\begin{remark}\\section{Inner}\\end{remark}");
        assert!(html.contains("\\section{Inner}"));
        assert!(!html.contains("<h2"));
    }

    #[test]
    fn test_unterminated_bold_is_literal() {
        let html = renderer().render("oops \\textbf{never closed");
        assert_eq!(html, "<p>oops \\textbf{never closed</p>");
    }

    #[test]
    fn test_author_html_is_neutralized() {
        let html = renderer().render("<script>alert(1)</script> \\textbf{<img src=x onerror=y>}");
        assert!(!html.contains("<script"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_numbered_heading_ids() {
        let config = RenderConfig {
            heading_ids: HeadingIds::Numbered,
            ..RenderConfig::default()
        };
        let renderer = Renderer::with_engine(config, Box::new(StubEngine));

        let html = renderer.render("\\section{Notes}\n\n\\section{Notes}");

        assert_eq!(
            html,
            "<h2 id=\"notes\">Notes</h2>\n<h2 id=\"notes-2\">Notes</h2>"
        );
    }

    #[test]
    fn test_render_parts_keeps_order() {
        let parts = vec![Part::new("One", "first"), Part::new("Two", "second")];

        let rendered = renderer().render_parts(&parts);

        let summary: Vec<(&str, &str, &str)> = rendered
            .iter()
            .map(|p| (p.id.as_str(), p.label.as_str(), p.html.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("one", "One", "<p>first</p>"), ("two", "Two", "<p>second</p>")]
        );
    }

    #[test]
    fn test_render_parts_namespaces_heading_ids() {
        let config = RenderConfig {
            heading_ids: HeadingIds::Numbered,
            ..RenderConfig::default()
        };
        let parts = vec![
            Part::new("Notes", "\\section{Notes}"),
            Part::new("Notes", "\\section{Notes}"),
        ];

        let rendered = Renderer::with_engine(config, Box::new(StubEngine)).render_parts(&parts);

        assert_eq!(rendered[0].id, "notes");
        assert_eq!(rendered[0].html, "<h2 id=\"notes--notes\">Notes</h2>");
        assert_eq!(rendered[1].id, "notes-2");
        assert_eq!(rendered[1].html, "<h2 id=\"notes-2--notes\">Notes</h2>");
    }

    #[test]
    fn test_renderer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Renderer>();
    }
}
