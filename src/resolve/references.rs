//! Cross-reference resolution.

use crate::ast::{Block, Citation, Inline};
use crate::render::{render_reference, OutputFormat};
use crate::resolve::walk::map_citations;
use crate::resolve::IdentifierTable;

/// Resolve all equation references in the document.
pub fn resolve_references(
    blocks: Vec<Block>,
    identifiers: &IdentifierTable,
    format: &OutputFormat,
) -> Vec<Block> {
    map_citations(blocks, &mut |citation: &Citation| {
        resolve_citation(citation, identifiers, format)
    })
}

/// Resolve one citation against the declared identifiers.
///
/// Only citations naming a single declared identifier are replaced; groups
/// and unknown identifiers are left for other tools (or the reader) to see.
pub fn resolve_citation(
    citation: &Citation,
    identifiers: &IdentifierTable,
    format: &OutputFormat,
) -> Option<Inline> {
    let Some(label) = citation.single_key() else {
        log::trace!("skipping citation group {:?}", citation.keys);
        return None;
    };

    let Some(number) = identifiers.get(label) else {
        log::debug!("reference to undeclared label {} left as is", label);
        return None;
    };

    log::debug!("resolved reference {} to {}", label, number);
    Some(render_reference(label, number, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(labels: &[&str]) -> IdentifierTable {
        let mut identifiers = IdentifierTable::new();
        for label in labels {
            identifiers.declare(label);
        }
        identifiers
    }

    #[test]
    fn test_resolve_single_known() {
        let identifiers = table(&["eq:a", "eq:b"]);
        assert_eq!(
            resolve_citation(&Citation::single("eq:b"), &identifiers, &OutputFormat::Html),
            Some(Inline::text("2"))
        );
        assert_eq!(
            resolve_citation(&Citation::single("eq:b"), &identifiers, &OutputFormat::Latex),
            Some(Inline::RawInline {
                format: "latex".into(),
                content: "\\ref{eq:b}".into(),
            })
        );
    }

    #[test]
    fn test_unknown_label_passes_through() {
        let identifiers = table(&["eq:a"]);
        assert_eq!(
            resolve_citation(&Citation::single("knuth1984"), &identifiers, &OutputFormat::Docx),
            None
        );
    }

    #[test]
    fn test_group_never_resolved() {
        let identifiers = table(&["eq:a", "eq:b"]);
        let group = Citation {
            keys: vec!["eq:a".into(), "eq:b".into()],
            locator: None,
            bracketed: true,
        };
        assert_eq!(resolve_citation(&group, &identifiers, &OutputFormat::Html), None);
    }

    #[test]
    fn test_lookup_is_exact() {
        let identifiers = table(&["eq:a"]);
        assert_eq!(
            resolve_citation(&Citation::single("eq:A"), &identifiers, &OutputFormat::Html),
            None
        );
    }

    #[test]
    fn test_resolve_references_keeps_surrounding_text() {
        let identifiers = table(&["eq:a"]);
        let blocks = vec![Block::Paragraph(vec![
            Inline::text("See "),
            Inline::Citation(Citation::single("eq:a")),
            Inline::text(" and "),
            Inline::Citation(Citation::single("eq:zzz")),
            Inline::text("."),
        ])];

        assert_eq!(
            resolve_references(blocks, &identifiers, &OutputFormat::Docx),
            vec![Block::Paragraph(vec![
                Inline::text("See "),
                Inline::text("1"),
                Inline::text(" and "),
                Inline::Citation(Citation::single("eq:zzz")),
                Inline::text("."),
            ])]
        );
    }
}
