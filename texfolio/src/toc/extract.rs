use super::{part_ids, Part, TocItem};
use crate::markup::{apply_formatting, extract_math, extract_remarks, Commands, Node};
use crate::render_config::RenderConfig;
use crate::slug::IdMinter;
use itertools::Itertools;

/// Headings of one document, in document order.
///
/// Runs the renderer's remark, math and formatting phases over the raw
/// text, so headings inside math or remark blocks are skipped and each id
/// matches the anchor the renderer mints.
pub fn extract_toc(text: &str, config: &RenderConfig) -> Vec<TocItem> {
    let minter = IdMinter::new(config.heading_ids);
    collect_headings(text, config, minter, None)
}

/// Headings of a multi-part document.
///
/// Each part contributes a level-1 entry for itself followed by its own
/// headings; every entry carries the part label as its group. Heading ids
/// are namespaced under the part id, matching [`Renderer::render_parts`].
///
/// [`Renderer::render_parts`]: crate::Renderer::render_parts
pub fn extract_annex_toc(parts: &[Part], config: &RenderConfig) -> Vec<TocItem> {
    parts
        .iter()
        .zip(part_ids(parts, config.heading_ids))
        .flat_map(|(part, id)| {
            let minter = IdMinter::with_prefix(config.heading_ids, id.as_str());
            let headings = collect_headings(&part.text, config, minter, Some(&part.label));
            let header = TocItem {
                id,
                label: part.label.clone(),
                level: 1,
                offset: 0,
                group: Some(part.label.clone()),
            };
            std::iter::once(header).chain(headings)
        })
        .collect()
}

fn collect_headings(
    text: &str,
    config: &RenderConfig,
    mut minter: IdMinter,
    group: Option<&str>,
) -> Vec<TocItem> {
    let keywords = config.remark_keywords();

    let segments = extract_math(extract_remarks(text, &keywords));
    let nodes = apply_formatting(&segments, Commands::All(&mut minter));

    let items: Vec<TocItem> = nodes
        .into_iter()
        .filter_map(|node| match node {
            Node::Heading { anchor, offset, .. } => Some(TocItem {
                id: anchor.id,
                label: anchor.label,
                level: anchor.level,
                offset,
                group: group.map(str::to_string),
            }),
            _ => None,
        })
        .sorted_by_key(|item| item.offset)
        .collect();

    log::debug!("found {} heading(s)", items.len());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::HeadingIds;

    fn labels(items: &[TocItem]) -> Vec<(&str, u8)> {
        items.iter().map(|i| (i.label.as_str(), i.level)).collect()
    }

    #[test]
    fn test_document_order_across_levels() {
        // Arrange: \subsection at offset 10, \section at offset 50
        let text = format!(
            "{}\\subsection{{B}}{}\\section{{A}}",
            "x".repeat(10),
            "y".repeat(50 - 10 - "\\subsection{B}".len())
        );

        // Act
        let items = extract_toc(&text, &RenderConfig::default());

        // Assert
        assert_eq!(labels(&items), vec![("B", 3), ("A", 2)]);
        assert_eq!(items[0].offset, 10);
        assert_eq!(items[1].offset, 50);
    }

    #[test]
    fn test_skips_math_and_remarks() {
        let text = "$\\section{no}$\n\\begin{remark}\\section{nope}\\end{remark}\n\\section{Yes}";
        let items = extract_toc(text, &RenderConfig::default());
        assert_eq!(labels(&items), vec![("Yes", 2)]);
    }

    #[test]
    fn test_ids_match_slugs_of_labels() {
        let items = extract_toc(
            "\\section{Hello, World}\\subsubsection{\\textbf{Deep} dive}",
            &RenderConfig::default(),
        );
        assert_eq!(items[0].id, "hello-world");
        assert_eq!(items[1].id, "deep-dive");
        assert_eq!(items[1].label, "Deep dive");
    }

    #[test]
    fn test_numbered_ids() {
        let config = RenderConfig {
            heading_ids: HeadingIds::Numbered,
            ..RenderConfig::default()
        };
        let items = extract_toc("\\section{A}\\section{A}\\subsection{A}", &config);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a-2", "a-3"]);
    }

    #[test]
    fn test_unterminated_heading_is_skipped() {
        let items = extract_toc("\\section{Open\n\nText", &RenderConfig::default());
        assert!(items.is_empty());
    }

    #[test]
    fn test_annex_parts_lead_their_headings() {
        // Arrange
        let parts = vec![
            Part::new("Probability", "\\section{Events}\\subsection{Independence}"),
            Part::new("Linear Algebra", "\\section{Matrices}"),
        ];

        // Act
        let items = extract_annex_toc(&parts, &RenderConfig::default());

        // Assert
        assert_eq!(
            labels(&items),
            vec![
                ("Probability", 1),
                ("Events", 2),
                ("Independence", 3),
                ("Linear Algebra", 1),
                ("Matrices", 2),
            ]
        );
        assert_eq!(items[3].id, "linear-algebra");
        assert_eq!(items[4].id, "linear-algebra--matrices");
        assert!(items[..3]
            .iter()
            .all(|i| i.group.as_deref() == Some("Probability")));
        assert_eq!(items[4].group.as_deref(), Some("Linear Algebra"));
    }

    #[test]
    fn test_numbered_annex_ids_are_unique() {
        // Arrange: a heading sharing its part's label, and a label repeated across parts
        let config = RenderConfig {
            heading_ids: HeadingIds::Numbered,
            ..RenderConfig::default()
        };
        let parts = vec![
            Part::new(
                "Probability",
                "\\section{Introduction}\n\n\\section{Probability}",
            ),
            Part::new("Linear Algebra", "\\section{Introduction}"),
            Part::new("Probability", "\\section{Introduction}"),
        ];

        // Act
        let items = extract_annex_toc(&parts, &config);

        // Assert
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "probability",
                "probability--introduction",
                "probability--probability",
                "linear-algebra",
                "linear-algebra--introduction",
                "probability-2",
                "probability-2--introduction",
            ]
        );
    }
}
