//! # mda-eqnum
//!
//! Equation numbering and cross-references for academic Markdown.
//!
//! Labeled display equations and labeled chemical equations share one
//! counter. Each one is replaced by a numbered form suited to the output
//! format, and every single-identifier reference to it becomes its number.
//!
//! ## Features
//!
//! - **Display math**: `$$E = mc^2$$ {#eq:energy}`
//! - **Chemical equations**: `[2H2 + O2 -> 2H2O]{.ce} {#eq:water}`, or the older `\ce{...} {#eq:water}`
//! - **References**: `@eq:energy` resolves to the equation's number, or `\ref{eq:energy}` for LaTeX
//! - **Output formats**: `latex`, `html`, `docx`, and a plain fallback for everything else
//! - **JSON trees**: documents read by another tool can be numbered as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use mda_eqnum::{parse, resolve, Block, Inline, ResolveConfig};
//!
//! let input = r#"
//! $$E = mc^2$$ {#eq:energy}
//!
//! See @eq:energy.
//! "#;
//!
//! let doc = parse(input).unwrap();
//! let resolved = resolve(doc, &ResolveConfig::new("docx"));
//!
//! assert_eq!(resolved.identifiers.get("eq:energy"), Some(1));
//! assert_eq!(
//!     resolved.document.blocks[1],
//!     Block::Paragraph(vec![Inline::text("See "), Inline::text("1"), Inline::text(".")])
//! );
//! ```
//!
//! ## Syntax Reference
//!
//! ### Front Matter (TOML)
//!
//! ```text
//! +++
//! title = "Reaction Kinetics"
//! author = "Jane Doe"
//! date = "2024-03-01"
//! +++
//! ```
//!
//! ### Labels
//!
//! A label `{#id}` follows the equation in the same paragraph. The paragraph
//! must hold nothing else besides whitespace.
//!
//! - Display: `$$\int_0^1 x dx$$ {#eq:integral}`
//! - Chemical: `[CH4 + 2O2 -> CO2 + 2H2O]{.ce} {#eq:combustion}`
//! - Legacy chemical: `\ce{CH4 + 2O2 -> CO2 + 2H2O} {#eq:combustion}`
//!
//! ### References
//!
//! - Numbered: `@eq:integral`
//! - Grouped citations such as `[@eq:a; @eq:b]` are left alone
//!
//! ## FFI
//!
//! A C-compatible entry point numbers JSON trees for hosts written in other
//! languages. See the `ffi` module documentation for details.

pub mod ast;
pub mod chem;
pub mod error;
pub mod label;
pub mod parser;
pub mod render;
pub mod resolve;

// FFI module (always compiled for cdylib)
pub mod ffi;

// Convenience re-exports
pub use ast::{Block, Document, Inline, ResolvedDocument};
pub use error::{Error, ParseError, Result};
pub use parser::parse;
pub use render::OutputFormat;
pub use resolve::{resolve, IdentifierTable, ResolveConfig};

/// Parse and number a Markdown document in one step.
///
/// # Example
///
/// ```rust
/// use mda_eqnum::{process, ResolveConfig};
///
/// let resolved = process("$$a=b$$ {#eq:a}", &ResolveConfig::new("latex")).unwrap();
/// assert_eq!(resolved.identifiers.len(), 1);
/// ```
pub fn process(input: &str, config: &ResolveConfig) -> Result<ResolvedDocument> {
    let doc = parse(input)?;
    Ok(resolve(doc, config))
}

/// Number a document given as a JSON tree and return the rewritten tree.
pub fn process_json(json: &str, config: &ResolveConfig) -> Result<String> {
    let doc: Document = serde_json::from_str(json)?;
    let resolved = resolve(doc, config);
    Ok(serde_json::to_string(&resolved.document)?)
}
