//! Reader for Markdown with math, chemistry, labels and references.
//!
//! This is the reading side a host needs before numbering can run; the
//! numbering passes themselves work on the tree and never see source text.

mod block;
mod inline;

pub use block::parse_blocks;
pub use inline::parse_inlines;

use crate::ast::{Document, Metadata};
use crate::error::{ParseError, Result};
use serde::Deserialize;

/// Line that opens and closes TOML front matter.
const FRONT_MATTER_DELIMITER: &str = "+++";

/// Parse a complete document from source text.
pub fn parse(input: &str) -> Result<Document> {
    let (metadata, body, body_line) = match split_front_matter(input)? {
        Some((toml, body, body_line)) => (read_metadata(toml)?, body, body_line),
        None => (Metadata::default(), input, 1),
    };

    Ok(Document {
        metadata,
        blocks: block::parse_blocks_at(body, body_line)?,
    })
}

/// Split `+++`-delimited front matter off the input.
///
/// Returns the TOML text, the body, and the line number the body starts on.
fn split_front_matter(input: &str) -> Result<Option<(&str, &str, usize)>> {
    let mut lines = input.split_inclusive('\n');
    let first_len = match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_DELIMITER => first.len(),
        _ => return Ok(None),
    };

    let toml_start = first_len;
    let mut offset = toml_start;

    for (i, line) in lines.enumerate() {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let toml = &input[toml_start..offset];
            let body = &input[offset + line.len()..];
            // Opening line, `i` TOML lines, closing line
            return Ok(Some((toml, body, i + 3)));
        }
        offset += line.len();
    }

    Err(ParseError::FrontMatter(format!("missing closing {}", FRONT_MATTER_DELIMITER)).into())
}

/// Front matter keys the reader understands; others are ignored.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    #[serde(default, alias = "author")]
    authors: Authors,
    date: Option<toml::Value>,
}

/// `author = "A"` or `authors = ["A", "B"]`.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum Authors {
    #[default]
    Missing,
    One(String),
    Many(Vec<String>),
}

fn read_metadata(toml: &str) -> Result<Metadata> {
    let front: FrontMatter =
        toml::from_str(toml).map_err(|e| ParseError::FrontMatter(e.to_string()))?;

    let authors = match front.authors {
        Authors::Missing => Vec::new(),
        Authors::One(author) => vec![author],
        Authors::Many(authors) => authors,
    };

    // A bare TOML date is as good as a quoted one
    let date = front.date.map(|value| match value {
        toml::Value::String(s) => s,
        other => other.to_string(),
    });

    Ok(Metadata {
        title: front.title,
        authors,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Block;
    use crate::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_front_matter() {
        let doc = parse("Some text.").unwrap();
        assert_eq!(doc.metadata, Metadata::default());
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_front_matter_fields() {
        let input = r#"+++
title = "Reaction Kinetics"
author = "Jane Doe"
date = 2024-03-01
+++

$$k = A e^{-E_a/RT}$$ {#eq:arrhenius}"#;

        let doc = parse(input).unwrap();
        assert_eq!(
            doc.metadata,
            Metadata {
                title: Some("Reaction Kinetics".into()),
                authors: vec!["Jane Doe".into()],
                date: Some("2024-03-01".into()),
            }
        );
        assert!(matches!(&doc.blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_author_list() {
        let doc = parse("+++\nauthors = [\"A\", \"B\"]\nextra = 1\n+++\nbody").unwrap();
        assert_eq!(doc.metadata.authors, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_unclosed_front_matter() {
        let err = parse("+++\ntitle = \"x\"\n").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::FrontMatter(ref m)) if m.contains("missing closing")));
    }

    #[test]
    fn test_invalid_front_matter() {
        let err = parse("+++\ntitle = \n+++\nbody").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::FrontMatter(_))));
    }

    #[test]
    fn test_body_line_numbers_count_front_matter() {
        let err = parse("+++\ntitle = \"x\"\n+++\n\n$$ open").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Syntax { line: 5, .. })));
    }
}
