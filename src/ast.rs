//! Abstract Syntax Tree definitions for documents with numbered equations.

use serde::{Deserialize, Serialize};

/// A complete parsed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Front matter metadata
    #[serde(default)]
    pub metadata: Metadata,
    /// Document content as a sequence of blocks
    pub blocks: Vec<Block>,
}

/// Document metadata from TOML front matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document author(s)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Document date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Block-level elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Block {
    /// A paragraph of inline content
    Paragraph(Vec<Inline>),

    /// A heading with level (1-6) and content
    Heading { level: u8, content: Vec<Inline> },

    /// A fenced code block
    CodeBlock {
        language: Option<String>,
        content: String,
    },

    /// A block quote
    BlockQuote(Vec<Block>),

    /// An ordered or unordered list
    List {
        ordered: bool,
        start: Option<u32>,
        items: Vec<ListItem>,
    },

    /// Side-by-side columns
    Columns(Vec<Column>),

    /// Raw output passed through verbatim for one format
    RawBlock { format: String, content: String },
}

/// List item containing blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub content: Vec<Block>,
}

/// One cell of a [`Block::Columns`] layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub alignment: Alignment,
    pub content: Vec<Block>,
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Whether math is set inline with the text or as its own display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MathKind {
    Inline,
    Display,
}

/// Inline-level elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Inline {
    /// Plain text
    Text(String),

    /// Emphasized text (italic)
    Emphasis(Vec<Inline>),

    /// Strong text (bold)
    Strong(Vec<Inline>),

    /// Inline code
    Code(String),

    /// A link
    Link {
        url: String,
        title: Option<String>,
        content: Vec<Inline>,
    },

    /// Math source, verbatim
    Math { kind: MathKind, content: String },

    /// Generic span carrying class markers, e.g. `[H2O]{.ce}`
    Span {
        classes: Vec<String>,
        content: Vec<Inline>,
    },

    /// A citation (`@key` or `[@a; @b]`)
    Citation(Citation),

    /// A soft line break
    SoftBreak,

    /// A hard line break
    HardBreak,

    /// Raw output passed through verbatim for one format
    RawInline { format: String, content: String },
}

impl Inline {
    /// Shorthand for a text node.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// True for text and line breaks whose content is only whitespace.
    pub fn is_whitespace(&self) -> bool {
        match self {
            Self::Text(t) => t.trim().is_empty(),
            Self::SoftBreak | Self::HardBreak => true,
            _ => false,
        }
    }

    /// True for nodes that contribute plain text: text runs and line breaks.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text(_) | Self::SoftBreak | Self::HardBreak)
    }

    /// Plain text of a textual node (line breaks flatten to a space).
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::SoftBreak | Self::HardBreak => Some(" "),
            _ => None,
        }
    }
}

/// A citation group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Cited identifiers, in source order
    pub keys: Vec<String>,
    /// Optional locator (e.g., "p. 42")
    #[serde(default)]
    pub locator: Option<String>,
    /// Written in brackets (`[@key]`) rather than bare (`@key`)
    #[serde(default)]
    pub bracketed: bool,
}

impl Citation {
    /// A bare single-key citation, as written `@key`.
    pub fn single(key: impl Into<String>) -> Self {
        Self {
            keys: vec![key.into()],
            locator: None,
            bracketed: false,
        }
    }

    /// The only cited key, if the citation names exactly one.
    pub fn single_key(&self) -> Option<&str> {
        match self.keys.as_slice() {
            [key] => Some(key),
            _ => None,
        }
    }
}

/// A document after equation numbering and reference resolution.
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub document: Document,
    /// Declared identifiers with their sequence numbers
    pub identifiers: crate::resolve::IdentifierTable,
}

/// Convert inline elements to plain text.
pub fn inlines_to_text(inlines: &[Inline]) -> String {
    let mut result = String::new();

    for inline in inlines {
        match inline {
            Inline::Text(t) | Inline::Code(t) => result.push_str(t),
            Inline::Emphasis(inner) | Inline::Strong(inner) => {
                result.push_str(&inlines_to_text(inner));
            }
            Inline::Link { content, .. } | Inline::Span { content, .. } => {
                result.push_str(&inlines_to_text(content));
            }
            Inline::Math { content, .. } => result.push_str(content),
            Inline::SoftBreak | Inline::HardBreak => result.push(' '),
            _ => {}
        }
    }

    result
}
