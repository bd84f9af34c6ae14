//! Block structure: paragraphs, block quotes, lists, headings and code fences.
//!
//! Display math is not a block of its own. `$$...$$` stays inside its
//! paragraph, where the numbering pass looks for it together with its label,
//! and a paragraph with an open `$$` runs on across blank lines until the
//! math closes.

use crate::ast::{Block, ListItem};
use crate::error::{ParseError, Result};
use crate::parser::inline::parse_inlines;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1, take_while_m_n},
    character::complete::{one_of, space0, space1},
    combinator::{map, map_res, rest},
    sequence::{preceded, terminated, tuple},
    IResult,
};

/// A source line with its 1-based line number.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn indent(&self) -> usize {
        self.text.len() - self.text.trim_start().len()
    }

    fn with_text(&self, text: &'a str) -> Self {
        Self {
            number: self.number,
            text,
        }
    }
}

/// Parse all blocks from content.
pub fn parse_blocks(input: &str) -> Result<Vec<Block>> {
    parse_blocks_at(input, 1)
}

/// Parse blocks from content that starts on line `first_line` of its source.
pub(crate) fn parse_blocks_at(input: &str, first_line: usize) -> Result<Vec<Block>> {
    let lines: Vec<Line> = input
        .lines()
        .enumerate()
        .map(|(i, text)| Line {
            number: first_line + i,
            text,
        })
        .collect();

    read_blocks(&lines)
}

fn read_blocks(lines: &[Line]) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.is_blank() {
            i += 1;
            continue;
        }

        let rest = &lines[i..];
        let (block, used) = if let Some(fence) = code_fence(line.text) {
            code_block(rest, fence)
        } else if let Ok((_, (level, content))) = heading(line.text.trim_start()) {
            let content = parse_inlines(content.trim_end().trim_end_matches('#').trim_end());
            (Block::Heading { level, content }, 1)
        } else if quote_line(line.text).is_some() {
            block_quote(rest)?
        } else if let Some(marker) = list_marker(line.text) {
            list(rest, marker)?
        } else {
            paragraph(rest)?
        };

        blocks.push(block);
        i += used;
    }

    Ok(blocks)
}

/// ATX heading: one to six `#`, then at least one space.
fn heading(input: &str) -> IResult<&str, (u8, &str)> {
    tuple((
        map(take_while_m_n(1, 6, |c| c == '#'), |hashes: &str| hashes.len() as u8),
        preceded(space1, rest),
    ))(input)
}

/// The fence string that opens a code block, with its info string.
struct Fence<'a> {
    marker: &'a str,
    language: Option<String>,
}

fn code_fence(text: &str) -> Option<Fence<'_>> {
    let parsed: IResult<&str, &str> = preceded(space0, alt((tag("```"), tag("~~~"))))(text);
    let (info, marker) = parsed.ok()?;
    Some(Fence {
        marker,
        language: info.split_whitespace().next().map(String::from),
    })
}

/// Code runs to the closing fence, or to the end of input if there is none.
fn code_block(lines: &[Line], fence: Fence) -> (Block, usize) {
    let body = &lines[1..];
    let close = body
        .iter()
        .position(|line| line.text.trim_start().starts_with(fence.marker));

    let (content_lines, used) = match close {
        Some(end) => (&body[..end], end + 2),
        None => (body, lines.len()),
    };
    let content = content_lines
        .iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n");

    (
        Block::CodeBlock {
            language: fence.language,
            content,
        },
        used,
    )
}

/// The text of a `>` line after its marker and one optional space.
fn quote_line(text: &str) -> Option<&str> {
    let after = text.trim_start().strip_prefix('>')?;
    Some(after.strip_prefix(' ').unwrap_or(after))
}

fn block_quote(lines: &[Line]) -> Result<(Block, usize)> {
    let inner: Vec<Line> = lines
        .iter()
        .map_while(|line| quote_line(line.text).map(|text| line.with_text(text)))
        .collect();

    let used = inner.len();
    Ok((Block::BlockQuote(read_blocks(&inner)?), used))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Bullet,
    Number(u32),
}

/// A list marker: its kind, its indent and the column its content starts at.
#[derive(Debug, Clone, Copy)]
struct Marker {
    kind: MarkerKind,
    indent: usize,
    content: usize,
}

impl Marker {
    fn continues(&self, other: &Marker) -> bool {
        self.indent == other.indent
            && matches!(
                (self.kind, other.kind),
                (MarkerKind::Bullet, MarkerKind::Bullet) | (MarkerKind::Number(_), MarkerKind::Number(_))
            )
    }
}

fn marker_kind(input: &str) -> IResult<&str, MarkerKind> {
    terminated(
        alt((
            map(one_of("-*+"), |_| MarkerKind::Bullet),
            map(
                terminated(
                    map_res(take_while1(|c: char| c.is_ascii_digit()), |digits: &str| {
                        digits.parse::<u32>()
                    }),
                    one_of(".)"),
                ),
                MarkerKind::Number,
            ),
        )),
        space1,
    )(input)
}

fn list_marker(text: &str) -> Option<Marker> {
    let trimmed = text.trim_start();
    let (after, kind) = marker_kind(trimmed).ok()?;
    Some(Marker {
        kind,
        indent: text.len() - trimmed.len(),
        content: text.len() - after.len(),
    })
}

fn list(lines: &[Line], first: Marker) -> Result<(Block, usize)> {
    let mut items = Vec::new();
    let mut i = 0;

    loop {
        let Some(marker) = lines.get(i).and_then(|line| list_marker(line.text)) else {
            break;
        };
        if !first.continues(&marker) {
            break;
        }

        let used = list_item_len(&lines[i..], marker);
        let item_lines: Vec<Line> = lines[i..i + used]
            .iter()
            .enumerate()
            .map(|(j, line)| {
                if j == 0 {
                    line.with_text(&line.text[marker.content..])
                } else {
                    line.with_text(dedent(line.text, marker.content))
                }
            })
            .collect();

        items.push(ListItem {
            content: read_blocks(&item_lines)?,
        });
        i += used;

        // Blank lines between items do not end the list
        let next = i + lines[i..].iter().take_while(|line| line.is_blank()).count();
        match lines.get(next).and_then(|line| list_marker(line.text)) {
            Some(sibling) if first.continues(&sibling) => i = next,
            _ => break,
        }
    }

    let start = match first.kind {
        MarkerKind::Number(n) => Some(n),
        MarkerKind::Bullet => None,
    };

    Ok((
        Block::List {
            ordered: start.is_some(),
            start,
            items,
        },
        i,
    ))
}

/// Lines belonging to the item whose marker is on `lines[0]`.
fn list_item_len(lines: &[Line], marker: Marker) -> usize {
    let mut used = 1;
    let mut after_blank = false;

    while let Some(line) = lines.get(used) {
        if line.is_blank() {
            after_blank = true;
            used += 1;
            continue;
        }

        let nested = line.indent() >= marker.content;
        let lazy = !after_blank && list_marker(line.text).is_none();
        if !(nested || lazy) {
            break;
        }

        after_blank = false;
        used += 1;
    }

    // Trailing blank lines belong to whatever follows
    while used > 1 && lines[used - 1].is_blank() {
        used -= 1;
    }
    used
}

/// Remove up to `width` columns of leading whitespace.
fn dedent(text: &str, width: usize) -> &str {
    let strip = text
        .char_indices()
        .take(width)
        .take_while(|(_, c)| c.is_whitespace())
        .map(|(_, c)| c.len_utf8())
        .sum::<usize>();
    &text[strip..]
}

/// Whether a line interrupts a running paragraph.
fn starts_block(text: &str) -> bool {
    code_fence(text).is_some()
        || heading(text.trim_start()).is_ok()
        || quote_line(text).is_some()
        || list_marker(text).is_some()
}

fn paragraph(lines: &[Line]) -> Result<(Block, usize)> {
    let mut text = String::new();
    let mut math_open = false;
    let mut used = 0;

    for line in lines {
        if !math_open && used > 0 && (line.is_blank() || starts_block(line.text)) {
            break;
        }
        if used > 0 {
            text.push('\n');
        }
        text.push_str(line.text);
        math_open ^= line.text.matches("$$").count() % 2 == 1;
        used += 1;
    }

    if math_open {
        return Err(ParseError::Syntax {
            line: lines[0].number,
            message: "display math opened with $$ is never closed".to_string(),
        }
        .into());
    }

    Ok((Block::Paragraph(parse_inlines(text.trim_end())), used))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Inline, MathKind};
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn paragraph_of(text: &str) -> Block {
        Block::Paragraph(parse_inlines(text))
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let blocks = parse_blocks("one\ntwo\n\n\nthree").unwrap();
        assert_eq!(blocks, vec![paragraph_of("one\ntwo"), paragraph_of("three")]);
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            parse_blocks("## Results @eq:a ##").unwrap(),
            vec![Block::Heading {
                level: 2,
                content: parse_inlines("Results @eq:a"),
            }]
        );
        assert_eq!(parse_blocks("#hashtag").unwrap(), vec![paragraph_of("#hashtag")]);
    }

    #[test]
    fn test_code_fence_hides_math() {
        let blocks = parse_blocks("```tex\n$$a$$ {#eq:a}\n```\nafter").unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::CodeBlock {
                    language: Some("tex".into()),
                    content: "$$a$$ {#eq:a}".into(),
                },
                paragraph_of("after"),
            ]
        );
    }

    #[test]
    fn test_display_math_runs_across_blank_lines() {
        let blocks = parse_blocks("$$\na = b\n\nc = d\n$$ {#eq:ab}\n\nAfter.").unwrap();
        assert_eq!(blocks.len(), 2);
        let Block::Paragraph(inlines) = &blocks[0] else {
            panic!("Expected paragraph");
        };
        assert_eq!(
            inlines[0],
            Inline::Math {
                kind: MathKind::Display,
                content: "a = b\n\nc = d".into(),
            }
        );
        assert_eq!(inlines.last(), Some(&Inline::text("{#eq:ab}")));
    }

    #[test]
    fn test_unclosed_display_math_reports_its_line() {
        let err = parse_blocks("Intro.\n\n$$ x = 1 {#eq:x}\n\nmore").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Syntax { line: 3, .. })));
    }

    #[test]
    fn test_block_quote() {
        let blocks = parse_blocks("> $$a$$ {#eq:q}\n>\n> text").unwrap();
        assert_eq!(
            blocks,
            vec![Block::BlockQuote(vec![
                paragraph_of("$$a$$ {#eq:q}"),
                paragraph_of("text"),
            ])]
        );
    }

    #[test]
    fn test_bullet_list_with_continuation() {
        let input = "- first\n  still first\n\n- $$b$$ {#eq:l}\n\n  second para\nlazy line";
        let blocks = parse_blocks(input).unwrap();
        assert_eq!(
            blocks[0],
            Block::List {
                ordered: false,
                start: None,
                items: vec![
                    ListItem {
                        content: vec![paragraph_of("first\nstill first")],
                    },
                    ListItem {
                        content: vec![paragraph_of("$$b$$ {#eq:l}"), paragraph_of("second para\nlazy line")],
                    },
                ],
            }
        );
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_ordered_list_start_and_end() {
        let blocks = parse_blocks("3. three\n4) four\n\nafter").unwrap();
        assert!(matches!(
            &blocks[0],
            Block::List { ordered: true, start: Some(3), items } if items.len() == 2
        ));
        assert_eq!(blocks[1], paragraph_of("after"));
    }

    #[test]
    fn test_list_interrupts_paragraph() {
        let blocks = parse_blocks("intro\n- item").unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[1], Block::List { .. }));
    }
}
