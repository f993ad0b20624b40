//! HTML serialization of rendered documents
//!
//! Two layers live here:
//! - the fragment writer used by the pipeline to turn [`Block`]s into markup
//! - the standalone page writer used by the CLI (stylesheet, KaTeX CSS,
//!   table of contents) around already-sanitized fragments

use crate::markup::{Block, BlockKind, Node};
use crate::pipeline::RenderedPart;
use crate::toc::TocItem;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Stylesheet for the KaTeX output, matching the version the `katex` crate bundles
pub const KATEX_CSS_URL: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.22/dist/katex.min.css";

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error writing {path}: {source}", path = .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Serialize blocks, one per line
pub fn write_blocks(blocks: &[Block]) -> String {
    let mut output = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        match block.kind {
            BlockKind::Paragraph => {
                output.push_str("<p>");
                write_nodes(&block.nodes, &mut output);
                output.push_str("</p>");
            }
            BlockKind::Bare => write_nodes(&block.nodes, &mut output),
        }
    }
    output
}

/// Serialize inline nodes, escaping text
pub fn write_nodes(nodes: &[Node], output: &mut String) {
    for node in nodes {
        write_node(node, output);
    }
}

fn write_node(node: &Node, output: &mut String) {
    match node {
        Node::Text(text) | Node::Break(text) => output.push_str(&escape_html(text)),
        Node::Math(span) => output.push_str(&escape_html(&span.source)),
        Node::Remark(remark) => output.push_str(&escape_html(&remark.source())),
        Node::Styled { style, children } => {
            let tag = style.tag();
            output.push_str(&format!("<{}>", tag));
            write_nodes(children, output);
            output.push_str(&format!("</{}>", tag));
        }
        Node::Heading {
            anchor, children, ..
        } => {
            output.push_str(&format!(
                "<h{} id=\"{}\">",
                anchor.level,
                escape_html(&anchor.id)
            ));
            write_nodes(children, output);
            output.push_str(&format!("</h{}>", anchor.level));
        }
        Node::Html(html) => output.push_str(html),
    }
}

/// Wrap a rendered remark body in the callout container
pub fn write_callout(label: &str, body_html: &str) -> String {
    format!(
        "<div class=\"remark\"><div class=\"remark-title\">{}</div><div class=\"remark-body\">{}</div></div>",
        escape_html(label),
        body_html
    )
}

/// Join rendered annex parts, each under a level-1 heading whose id matches
/// the part's table-of-contents entry
pub fn write_annex(parts: &[RenderedPart]) -> String {
    let mut output = String::new();
    for part in parts {
        output.push_str("<section class=\"annex-part\">\n");
        output.push_str(&format!(
            "<h1 id=\"{}\">{}</h1>\n",
            escape_html(&part.id),
            escape_html(&part.label)
        ));
        output.push_str(&part.html);
        output.push_str("\n</section>\n");
    }
    output
}

/// Build a standalone page around a sanitized body
///
/// # Parameters
/// * `title` - Page title
/// * `toc` - Entries for the side navigation; empty to omit it
/// * `body` - Sanitized HTML produced by the renderer
pub fn to_html_page(title: &str, toc: &[TocItem], body: &str) -> String {
    let mut output = String::new();

    write_html_header(&mut output, title);

    output.push_str("<body>\n");
    output.push_str("<div class=\"layout\">\n");

    if !toc.is_empty() {
        write_toc(&mut output, toc);
    }

    output.push_str("<article class=\"container\">\n");
    if !title.is_empty() {
        output.push_str(&format!(
            "<h1 class=\"document-title\">{}</h1>\n",
            escape_html(title)
        ));
    }
    output.push_str(body);
    output.push_str("\n</article>\n");

    output.push_str("</div>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Write HTML output to a file, creating parent directories
pub fn write_html_file(output_path: &Path, html: &str) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let mut file = fs::File::create(output_path).map_err(io_error)?;
    file.write_all(html.as_bytes()).map_err(io_error)?;

    log::info!("Wrote HTML to: {}", output_path.display());
    Ok(())
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\" crossorigin=\"anonymous\">\n",
        KATEX_CSS_URL
    ));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write the side navigation
fn write_toc(output: &mut String, toc: &[TocItem]) {
    output.push_str("<nav class=\"toc\">\n<ul>\n");
    for item in toc {
        output.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            item.level,
            escape_html(&item.id),
            escape_html(&item.label)
        ));
    }
    output.push_str("</ul>\n</nav>\n");
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Page styles: reading column, sticky table of contents, remark callouts
const CSS_STYLES: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

html {
    scroll-padding-top: 80px;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', 'Oxygen',
                 'Ubuntu', 'Cantarell', 'Fira Sans', 'Helvetica Neue', sans-serif;
    line-height: 1.6;
    color: #333;
    background-color: #f5f5f5;
    padding: 20px;
}

.layout {
    display: flex;
    gap: 32px;
    max-width: 1200px;
    margin: 0 auto;
    align-items: flex-start;
}

.toc {
    position: sticky;
    top: 20px;
    flex: 0 0 260px;
    max-height: calc(100vh - 40px);
    overflow-y: auto;
    font-size: 0.9em;
}

.toc ul {
    list-style: none;
}

.toc a {
    color: #555;
    text-decoration: none;
}

.toc a:hover {
    color: #0066cc;
}

.toc-level-1 {
    font-weight: 700;
    margin-top: 12px;
}

.toc-level-3 {
    padding-left: 14px;
}

.toc-level-4 {
    padding-left: 28px;
}

.container {
    flex: 1;
    max-width: 900px;
    background: white;
    padding: 60px;
    box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
    border-radius: 4px;
}

.document-title {
    font-size: 2.5em;
    font-weight: 700;
    margin-bottom: 20px;
    color: #1a1a1a;
    border-bottom: 3px solid #0066cc;
    padding-bottom: 10px;
}

.annex-part h1 {
    font-size: 2.2em;
    margin-top: 48px;
    color: #1a1a1a;
}

h2, h3, h4 {
    margin-top: 32px;
    margin-bottom: 16px;
    color: #1a1a1a;
    font-weight: 600;
}

h2 {
    font-size: 1.8em;
    border-bottom: 2px solid #e0e0e0;
    padding-bottom: 8px;
}

h3 {
    font-size: 1.4em;
}

h4 {
    font-size: 1.15em;
}

p {
    margin-bottom: 16px;
    text-align: justify;
}

strong {
    font-weight: 600;
    color: #1a1a1a;
}

.katex-display {
    overflow-x: auto;
    overflow-y: hidden;
    margin: 16px 0;
}

.remark {
    margin: 24px 0;
    border-left: 4px solid #0066cc;
    background-color: #f4f8fc;
    border-radius: 4px;
}

.remark-title {
    font-weight: 700;
    color: #0066cc;
    padding: 8px 16px 0 16px;
}

.remark-body {
    padding: 8px 16px 12px 16px;
}

@media (max-width: 900px) {
    .layout {
        flex-direction: column;
    }

    .toc {
        position: static;
        max-height: none;
    }

    .container {
        padding: 24px;
    }
}
"#;
