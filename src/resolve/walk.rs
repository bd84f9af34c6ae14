//! Depth-first tree mapping.
//!
//! Both passes are written as functions over a single node; these helpers
//! carry them through the document in order. A node the callback replaces is
//! not walked again.

use crate::ast::{Block, Citation, Column, Inline, ListItem};

/// Apply `f` to every paragraph, in document order.
///
/// `f` returns the replacement block, or `None` to keep the paragraph.
pub fn map_paragraphs<F>(blocks: Vec<Block>, f: &mut F) -> Vec<Block>
where
    F: FnMut(&[Inline]) -> Option<Block>,
{
    blocks
        .into_iter()
        .map(|block| map_block_paragraphs(block, f))
        .collect()
}

fn map_block_paragraphs<F>(block: Block, f: &mut F) -> Block
where
    F: FnMut(&[Inline]) -> Option<Block>,
{
    match block {
        Block::Paragraph(inlines) => match f(&inlines) {
            Some(replacement) => replacement,
            None => Block::Paragraph(inlines),
        },
        Block::BlockQuote(blocks) => Block::BlockQuote(map_paragraphs(blocks, f)),
        Block::List {
            ordered,
            start,
            items,
        } => Block::List {
            ordered,
            start,
            items: items
                .into_iter()
                .map(|item| ListItem {
                    content: map_paragraphs(item.content, f),
                })
                .collect(),
        },
        Block::Columns(columns) => Block::Columns(
            columns
                .into_iter()
                .map(|column| Column {
                    alignment: column.alignment,
                    content: map_paragraphs(column.content, f),
                })
                .collect(),
        ),
        other => other,
    }
}

/// Apply `f` to every citation, in document order.
///
/// `f` returns the replacement inline, or `None` to keep the citation.
pub fn map_citations<F>(blocks: Vec<Block>, f: &mut F) -> Vec<Block>
where
    F: FnMut(&Citation) -> Option<Inline>,
{
    blocks
        .into_iter()
        .map(|block| map_block_citations(block, f))
        .collect()
}

fn map_block_citations<F>(block: Block, f: &mut F) -> Block
where
    F: FnMut(&Citation) -> Option<Inline>,
{
    match block {
        Block::Paragraph(inlines) => Block::Paragraph(map_inline_citations(inlines, f)),
        Block::Heading { level, content } => Block::Heading {
            level,
            content: map_inline_citations(content, f),
        },
        Block::BlockQuote(blocks) => Block::BlockQuote(map_citations(blocks, f)),
        Block::List {
            ordered,
            start,
            items,
        } => Block::List {
            ordered,
            start,
            items: items
                .into_iter()
                .map(|item| ListItem {
                    content: map_citations(item.content, f),
                })
                .collect(),
        },
        Block::Columns(columns) => Block::Columns(
            columns
                .into_iter()
                .map(|column| Column {
                    alignment: column.alignment,
                    content: map_citations(column.content, f),
                })
                .collect(),
        ),
        other => other,
    }
}

fn map_inline_citations<F>(inlines: Vec<Inline>, f: &mut F) -> Vec<Inline>
where
    F: FnMut(&Citation) -> Option<Inline>,
{
    inlines
        .into_iter()
        .map(|inline| match inline {
            Inline::Citation(citation) => match f(&citation) {
                Some(replacement) => replacement,
                None => Inline::Citation(citation),
            },
            Inline::Emphasis(inner) => Inline::Emphasis(map_inline_citations(inner, f)),
            Inline::Strong(inner) => Inline::Strong(map_inline_citations(inner, f)),
            Inline::Link {
                url,
                title,
                content,
            } => Inline::Link {
                url,
                title,
                content: map_inline_citations(content, f),
            },
            Inline::Span { classes, content } => Inline::Span {
                classes,
                content: map_inline_citations(content, f),
            },
            other => other,
        })
        .collect()
}
