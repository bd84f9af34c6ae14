//! Automatic numbering for labeled equations.
//!
//! Two paragraph shapes are numbered. Display math followed by a label:
//!
//! ```text
//! $$E = mc^2$$ {#eq:energy}
//! ```
//!
//! and a chemical equation standing alone on its paragraph, in either spelling:
//!
//! ```text
//! [2H2 + O2 -> 2H2O]{.ce} {#eq:water}
//! \ce{2H2 + O2 -> 2H2O} {#eq:water}
//! ```
//!
//! Both shapes share one counter. Anything else is left as it was.

use crate::ast::{Block, Inline, MathKind};
use crate::chem::{self, ChemNotation, ChemicalFormula};
use crate::label::{label_token, standalone_label};
use crate::render::{render_equation, OutputFormat};
use crate::resolve::walk::map_paragraphs;
use crate::resolve::IdentifierTable;

/// A labeled equation recognized in one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabeledEquation {
    Math { source: String, label: String },
    Chemical { formula: ChemicalFormula, label: String },
}

impl LabeledEquation {
    pub fn label(&self) -> &str {
        match self {
            Self::Math { label, .. } | Self::Chemical { label, .. } => label,
        }
    }
}

/// Number every labeled equation in `blocks` and rewrite it for `format`.
pub fn number_equations(
    blocks: Vec<Block>,
    identifiers: &mut IdentifierTable,
    format: &OutputFormat,
) -> Vec<Block> {
    map_paragraphs(blocks, &mut |inlines: &[Inline]| {
        rewrite_paragraph(inlines, identifiers, format)
    })
}

/// Rewrite one paragraph if it is a labeled equation.
///
/// On a match the label is declared in `identifiers` and the replacement block
/// is returned; otherwise nothing is declared and `None` is returned.
pub fn rewrite_paragraph(
    inlines: &[Inline],
    identifiers: &mut IdentifierTable,
    format: &OutputFormat,
) -> Option<Block> {
    let equation = recognize(inlines)?;
    let number = identifiers.declare(equation.label());
    log::debug!("numbered equation {} as ({})", equation.label(), number);
    Some(render_equation(&equation, number, format))
}

/// Recognize a labeled equation, trying display math before chemistry.
pub fn recognize(inlines: &[Inline]) -> Option<LabeledEquation> {
    recognize_display_math(inlines).or_else(|| recognize_chemical(inlines))
}

/// First display math, then the first exact `{#label}` text token after it.
fn recognize_display_math(inlines: &[Inline]) -> Option<LabeledEquation> {
    let mut source = None;

    for inline in inlines {
        match (source, inline) {
            (
                None,
                Inline::Math {
                    kind: MathKind::Display,
                    content,
                },
            ) => source = Some(content),
            (Some(math), Inline::Text(token)) => {
                if let Some(label) = label_token(token) {
                    return Some(LabeledEquation::Math {
                        source: math.clone(),
                        label: label.to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    None
}

/// A chemical formula alone on its paragraph, followed only by a label.
fn recognize_chemical(inlines: &[Inline]) -> Option<LabeledEquation> {
    if !inlines.iter().all(|i| i.is_textual() || chem::is_chem_span(i)) {
        return None;
    }

    let start = inlines.iter().position(|i| !i.is_whitespace())?;
    let (formula, trailing) = match chem::span_formula(&inlines[start]) {
        Some(formula) => (formula, plain_text(&inlines[start + 1..])?),
        None => {
            let text = plain_text(&inlines[start..])?;
            let (formula, rest) = chem::split_legacy(text.trim_start())?;
            (
                ChemicalFormula::new(formula, ChemNotation::Legacy),
                rest.to_string(),
            )
        }
    };

    let label = standalone_label(&trailing)?;
    Some(LabeledEquation::Chemical {
        formula,
        label: label.to_string(),
    })
}

/// Concatenated text of textual inlines; `None` if any inline is not textual.
fn plain_text(inlines: &[Inline]) -> Option<String> {
    inlines.iter().map(Inline::plain_text).collect()
}
