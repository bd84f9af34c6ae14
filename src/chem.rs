//! Chemical-formula markup.
//!
//! A formula is written either as a class-marked span, `[2H2 + O2 -> 2H2O]{.ce}`,
//! or in the legacy notation `\ce{2H2 + O2 -> 2H2O}` inside plain text. Both
//! are recognized here and re-emitted in the spelling they arrived in, so a
//! later chemistry renderer still finds them.

use crate::ast::{inlines_to_text, Inline};

/// Class marking a span as chemical notation.
pub const CHEM_CLASS: &str = "ce";

/// Opening delimiter of the legacy notation.
pub const LEGACY_OPEN: &str = "\\ce{";

/// How a formula was spelled in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChemNotation {
    /// `[formula]{.ce}`
    Span,
    /// `\ce{formula}`
    Legacy,
}

/// A chemical formula with its original spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChemicalFormula {
    pub formula: String,
    pub notation: ChemNotation,
}

impl ChemicalFormula {
    pub fn new(formula: impl Into<String>, notation: ChemNotation) -> Self {
        Self {
            formula: formula.into(),
            notation,
        }
    }

    /// The formula as an inline node, in its original spelling.
    pub fn to_inline(&self) -> Inline {
        match self.notation {
            ChemNotation::Span => Inline::Span {
                classes: vec![CHEM_CLASS.to_string()],
                content: vec![Inline::Text(self.formula.clone())],
            },
            ChemNotation::Legacy => Inline::Text(self.to_latex()),
        }
    }

    /// The formula wrapped in the mhchem macro.
    pub fn to_latex(&self) -> String {
        format!("{}{}}}", LEGACY_OPEN, self.formula)
    }
}

/// Whether an inline is a span marked as chemical notation.
pub fn is_chem_span(inline: &Inline) -> bool {
    matches!(inline, Inline::Span { classes, .. } if classes.iter().any(|c| c == CHEM_CLASS))
}

/// Read the formula out of a chemical span.
pub fn span_formula(inline: &Inline) -> Option<ChemicalFormula> {
    match inline {
        Inline::Span { content, .. } if is_chem_span(inline) => Some(ChemicalFormula::new(
            inlines_to_text(content),
            ChemNotation::Span,
        )),
        _ => None,
    }
}

/// Find the brace that closes an already-opened group.
///
/// `input` starts just after the opening `{`. Returns the byte offset of the
/// matching `}`, or `None` if the group is never closed.
pub fn closing_brace(input: &str) -> Option<usize> {
    let mut depth = 1usize;

    for (i, c) in input.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Split a leading `\ce{...}` off `input`, returning `(formula, rest)`.
pub fn split_legacy(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix(LEGACY_OPEN)?;
    let end = closing_brace(body)?;
    Some((&body[..end], &body[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_brace_nested() {
        assert_eq!(closing_brace("H2O}"), Some(3));
        assert_eq!(closing_brace("A{B}C} tail"), Some(5));
        assert_eq!(closing_brace("{{}}"), None);
        assert_eq!(closing_brace(""), None);
    }

    #[test]
    fn test_split_legacy() {
        assert_eq!(
            split_legacy("\\ce{2H2 + O2 -> 2H2O} {#eq:b}"),
            Some(("2H2 + O2 -> 2H2O", " {#eq:b}"))
        );
        assert_eq!(
            split_legacy("\\ce{SO4^{2-}}"),
            Some(("SO4^{2-}", ""))
        );
        assert_eq!(split_legacy("\\ce{unclosed"), None);
        assert_eq!(split_legacy("ce{H2O}"), None);
    }

    #[test]
    fn test_span_formula() {
        let span = Inline::Span {
            classes: vec!["ce".into()],
            content: vec![Inline::text("H2O")],
        };
        assert_eq!(
            span_formula(&span),
            Some(ChemicalFormula::new("H2O", ChemNotation::Span))
        );

        let other = Inline::Span {
            classes: vec!["smallcaps".into()],
            content: vec![Inline::text("H2O")],
        };
        assert_eq!(span_formula(&other), None);
    }

    #[test]
    fn test_original_spelling_is_kept() {
        let legacy = ChemicalFormula::new("CO2", ChemNotation::Legacy);
        assert_eq!(legacy.to_inline(), Inline::text("\\ce{CO2}"));
        assert_eq!(legacy.to_latex(), "\\ce{CO2}");

        let span = ChemicalFormula::new("CO2", ChemNotation::Span);
        assert!(is_chem_span(&span.to_inline()));
    }
}
