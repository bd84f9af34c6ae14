//! Replacement content for numbered equations and references to them.

use crate::ast::{Alignment, Block, Column, Inline, MathKind};
use crate::render::OutputFormat;
use crate::resolve::numbering::LabeledEquation;

/// Separator between equation and number in word-processor output.
const DOCX_SEPARATOR: &str = "\u{a0}\u{a0}\u{a0}\u{a0}";

/// Separator between equation and number when the format has no layout of its own.
const FALLBACK_SEPARATOR: &str = "\u{a0}\u{a0}";

/// Build the block that replaces a labeled equation paragraph.
pub fn render_equation(equation: &LabeledEquation, number: usize, format: &OutputFormat) -> Block {
    match format {
        OutputFormat::Latex => Block::RawBlock {
            format: "latex".to_string(),
            content: latex_equation(equation),
        },
        OutputFormat::Html => Block::Columns(vec![
            Column {
                alignment: Alignment::Left,
                content: Vec::new(),
            },
            Column {
                alignment: Alignment::Center,
                content: vec![Block::Paragraph(vec![equation_inline(equation)])],
            },
            Column {
                alignment: Alignment::Right,
                content: vec![Block::Paragraph(vec![Inline::Text(format!("({})", number))])],
            },
        ]),
        OutputFormat::Docx => numbered_paragraph(equation, number, DOCX_SEPARATOR),
        OutputFormat::Other(_) => numbered_paragraph(equation, number, FALLBACK_SEPARATOR),
    }
}

/// Build the inline that replaces a resolved reference.
pub fn render_reference(label: &str, number: usize, format: &OutputFormat) -> Inline {
    if format.is_typeset() {
        Inline::RawInline {
            format: "latex".to_string(),
            content: format!("\\ref{{{}}}", label),
        }
    } else {
        Inline::Text(number.to_string())
    }
}

fn latex_equation(equation: &LabeledEquation) -> String {
    let body = match equation {
        LabeledEquation::Math { source, .. } => source.clone(),
        LabeledEquation::Chemical { formula, .. } => formula.to_latex(),
    };
    format!(
        "\\begin{{equation}}{}\\label{{{}}}\\end{{equation}}",
        body,
        equation.label()
    )
}

/// The equation body as a single inline, for formats without raw output.
fn equation_inline(equation: &LabeledEquation) -> Inline {
    match equation {
        LabeledEquation::Math { source, .. } => Inline::Math {
            kind: MathKind::Inline,
            content: source.clone(),
        },
        LabeledEquation::Chemical { formula, .. } => formula.to_inline(),
    }
}

fn numbered_paragraph(equation: &LabeledEquation, number: usize, separator: &str) -> Block {
    Block::Paragraph(vec![
        equation_inline(equation),
        Inline::Text(format!("{}({})", separator, number)),
    ])
}
