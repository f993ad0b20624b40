//! Phase 7: allow-list HTML sanitization
//!
//! Everything the pipeline emits goes through [`sanitize`] before it leaves
//! the renderer. The allow-list covers the structural tags the pipeline
//! writes plus the HTML, MathML and SVG vocabulary of KaTeX output.

use ammonia::Builder;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Tags written by the pipeline and by KaTeX's HTML output
const HTML_TAGS: &[&str] = &[
    "p", "h2", "h3", "h4", "strong", "em", "i", "u", "div", "span", "br",
];

/// Presentation MathML emitted by KaTeX
const MATHML_TAGS: &[&str] = &[
    "math",
    "semantics",
    "annotation",
    "mrow",
    "mi",
    "mn",
    "mo",
    "ms",
    "mtext",
    "mspace",
    "msup",
    "msub",
    "msubsup",
    "mfrac",
    "msqrt",
    "mroot",
    "mover",
    "munder",
    "munderover",
    "mtable",
    "mtr",
    "mtd",
    "mstyle",
    "mpadded",
    "mphantom",
    "menclose",
];

const MATHML_ATTRIBUTES: &[&str] = &[
    "xmlns",
    "display",
    "encoding",
    "mathvariant",
    "stretchy",
    "fence",
    "separator",
    "lspace",
    "rspace",
    "accent",
    "accentunder",
    "columnalign",
    "columnspacing",
    "rowspacing",
    "rowlines",
    "columnlines",
    "width",
    "height",
    "depth",
    "voffset",
    "minsize",
    "maxsize",
    "movablelimits",
    "scriptlevel",
    "displaystyle",
    "linethickness",
    "notation",
    "symmetric",
    "largeop",
    "mathcolor",
    "mathbackground",
];

/// Stretchy delimiters and accents are drawn as inline SVG
const SVG_TAGS: &[&str] = &["svg", "path", "line"];

const SVG_ATTRIBUTES: &[&str] = &[
    "xmlns",
    "width",
    "height",
    "viewBox",
    "preserveAspectRatio",
    "d",
    "x1",
    "x2",
    "y1",
    "y2",
    "stroke-width",
];

/// CSS properties KaTeX uses for box layout
const STYLE_PROPERTIES: &[&str] = &[
    "height",
    "width",
    "min-width",
    "max-width",
    "vertical-align",
    "top",
    "bottom",
    "left",
    "right",
    "position",
    "margin-left",
    "margin-right",
    "margin-top",
    "margin-bottom",
    "padding-left",
    "padding-right",
    "border-top-width",
    "border-bottom-width",
    "border-right-width",
    "border-left-width",
    "border-style",
    "border-color",
    "color",
    "background-color",
];

fn sanitizer() -> &'static Builder<'static> {
    static SANITIZER: OnceLock<Builder<'static>> = OnceLock::new();
    SANITIZER.get_or_init(build_sanitizer)
}

fn build_sanitizer() -> Builder<'static> {
    let tags: HashSet<&'static str> = HTML_TAGS
        .iter()
        .chain(MATHML_TAGS)
        .chain(SVG_TAGS)
        .copied()
        .collect();

    let generic_attributes: HashSet<&'static str> =
        ["class", "style", "aria-hidden"].into_iter().collect();

    let mut tag_attributes: HashMap<&'static str, HashSet<&'static str>> = HashMap::new();
    for heading in ["h2", "h3", "h4"] {
        tag_attributes.insert(heading, ["id"].into_iter().collect());
    }
    for &tag in MATHML_TAGS {
        tag_attributes.insert(tag, MATHML_ATTRIBUTES.iter().copied().collect());
    }
    for &tag in SVG_TAGS {
        tag_attributes.insert(tag, SVG_ATTRIBUTES.iter().copied().collect());
    }

    let mut builder = Builder::default();
    builder
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        .filter_style_properties(STYLE_PROPERTIES.iter().copied().collect());
    builder
}

/// Clean an HTML string against the renderer's allow-list.
///
/// Disallowed tags are removed (their text content is kept, except for
/// `script` and `style` whose content is dropped), disallowed attributes
/// and style properties are stripped, and stray markup characters in text
/// come out entity-escaped.
pub fn sanitize(html: &str) -> String {
    sanitizer().clean(html).to_string()
}
