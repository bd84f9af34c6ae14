//! Resolution layer: equation numbering followed by reference resolution.
//!
//! The passes run strictly in order over the whole document. Every label is
//! declared before any reference is looked up, so a reference may appear
//! ahead of the equation it names.

mod identifiers;
pub mod numbering;
pub mod references;
pub mod walk;

pub use identifiers::IdentifierTable;
pub use numbering::{number_equations, recognize, rewrite_paragraph, LabeledEquation};
pub use references::{resolve_citation, resolve_references};

use crate::ast::{Document, ResolvedDocument};
use crate::render::OutputFormat;

/// Configuration for resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveConfig {
    /// Format the host will write; selects the shape of numbered equations
    /// and references.
    pub format: OutputFormat,
}

impl ResolveConfig {
    pub fn new(format: impl Into<OutputFormat>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

/// Number equations and resolve references to them.
pub fn resolve(document: Document, config: &ResolveConfig) -> ResolvedDocument {
    let mut doc = document;
    let mut identifiers = IdentifierTable::new();

    // Step 1: Number labeled equations, building the identifier table
    doc.blocks = number_equations(doc.blocks, &mut identifiers, &config.format);

    // Step 2: Resolve references against the complete table
    doc.blocks = resolve_references(doc.blocks, &identifiers, &config.format);

    log::debug!(
        "numbered {} equation(s) for {} output",
        identifiers.len(),
        config.format
    );

    ResolvedDocument {
        document: doc,
        identifiers,
    }
}
