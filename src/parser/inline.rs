//! Inline grammar: math, chemistry, citations and labels inside running text.
//!
//! Anything that is not one of those nodes (or a code span) stays text, and
//! adjacent text is kept in a single run. A `{#label}` becomes a token of its
//! own only when it stands alone as a word.

use crate::ast::{Citation, Inline, MathKind};
use crate::chem::{self, CHEM_CLASS};
use crate::label;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while1},
    character::complete::{char, one_of, satisfy, space0, space1},
    combinator::{map, opt, peek, recognize},
    error::{Error, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

/// Characters where a node or a line break may begin.
const SPECIAL: &[char] = &['$', '`', '\\', '[', '@', '{', '\n'];

/// Punctuation allowed inside a citation key when a key character follows.
const KEY_PUNCTUATION: &str = ":.#%&-+?<>~/";

/// Parse inline content from a string.
pub fn parse_inlines(input: &str) -> Vec<Inline> {
    let mut runs = Runs::default();
    let mut rest = input;

    while !rest.is_empty() {
        let plain = rest.find(SPECIAL).unwrap_or(rest.len());
        if plain > 0 {
            runs.text.push_str(&rest[..plain]);
            rest = &rest[plain..];
        } else {
            rest = runs.step(rest);
        }
    }

    runs.finish()
}

/// Inlines read so far plus the text run still being gathered.
#[derive(Default)]
struct Runs {
    inlines: Vec<Inline>,
    text: String,
}

impl Runs {
    /// Consume one node (or one character) at a special character.
    fn step<'a>(&mut self, input: &'a str) -> &'a str {
        if let Some(rest) = input.strip_prefix('\n') {
            self.line_break();
            return rest;
        }

        // Formula text is not Markdown
        if let Some((_, rest)) = chem::split_legacy(input) {
            self.text.push_str(&input[..input.len() - rest.len()]);
            return rest;
        }

        if let Some(escaped) = escape(input) {
            self.text.push_str(escaped);
            return &input[escaped.len()..];
        }

        if let Ok((rest, _)) = label::label(input) {
            if self.at_word_start() && ends_word(rest) {
                self.push(Inline::Text(input[..input.len() - rest.len()].to_string()));
                return rest;
            }
        }

        if !(input.starts_with('@') && self.in_word()) {
            if let Ok((rest, inline)) =
                alt((display_math, inline_math, code_span, bracketed_citation, span, reference))(input)
            {
                self.push(inline);
                return rest;
            }
        }

        // Not the start of anything: keep the character as text
        let len = input.chars().next().map_or(input.len(), char::len_utf8);
        self.text.push_str(&input[..len]);
        &input[len..]
    }

    fn push(&mut self, inline: Inline) {
        self.flush();
        self.inlines.push(inline);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.inlines.push(Inline::Text(std::mem::take(&mut self.text)));
        }
    }

    /// Two trailing spaces or a backslash make the break hard.
    fn line_break(&mut self) {
        let hard = self.text.ends_with("  ") || self.text.ends_with('\\');
        self.push(if hard { Inline::HardBreak } else { Inline::SoftBreak });
    }

    /// Whitespace, the start of the input, or display math comes right before.
    fn at_word_start(&self) -> bool {
        match self.text.chars().next_back() {
            Some(c) => c.is_whitespace(),
            None => matches!(
                self.inlines.last(),
                None | Some(Inline::SoftBreak | Inline::HardBreak)
                    | Some(Inline::Math {
                        kind: MathKind::Display,
                        ..
                    })
            ),
        }
    }

    /// An `@` here would sit inside a word, as in an e-mail address.
    fn in_word(&self) -> bool {
        self.text.chars().next_back().map_or(false, char::is_alphanumeric)
    }

    fn finish(mut self) -> Vec<Inline> {
        self.flush();
        self.inlines
    }
}

fn ends_word(rest: &str) -> bool {
    rest.chars().next().map_or(true, char::is_whitespace)
}

/// A backslash before ASCII punctuation, kept verbatim.
fn escape(input: &str) -> Option<&str> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some(c)) if c.is_ascii_punctuation() => Some(&input[..1 + c.len_utf8()]),
        _ => None,
    }
}

fn display_math(input: &str) -> IResult<&str, Inline> {
    map(delimited(tag("$$"), take_until("$$"), tag("$$")), |content: &str| Inline::Math {
        kind: MathKind::Display,
        content: content.trim().to_string(),
    })(input)
}

fn inline_math(input: &str) -> IResult<&str, Inline> {
    map(delimited(char('$'), is_not("$\n"), char('$')), |content: &str| Inline::Math {
        kind: MathKind::Inline,
        content: content.to_string(),
    })(input)
}

fn code_span(input: &str) -> IResult<&str, Inline> {
    map(delimited(char('`'), is_not("`"), char('`')), |code: &str| {
        Inline::Code(code.to_string())
    })(input)
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A citation key: key characters, with single punctuation marks allowed
/// between them (`eq:1.2`, `fig/a-b`). Trailing punctuation is left over.
fn citation_key(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(is_key_char),
        many0(alt((
            take_while1(is_key_char),
            terminated(recognize(one_of(KEY_PUNCTUATION)), peek(satisfy(is_key_char))),
        ))),
    ))(input)
}

/// A bare reference, `@key`.
fn reference(input: &str) -> IResult<&str, Inline> {
    map(preceded(char('@'), citation_key), |key| {
        Inline::Citation(Citation::single(key))
    })(input)
}

/// A bracketed citation: `[@key]`, `[@key, p. 4]` or `[@a; @b]`.
fn bracketed_citation(input: &str) -> IResult<&str, Inline> {
    let item = pair(
        preceded(char('@'), citation_key),
        opt(preceded(pair(char(','), space0), is_not(";]"))),
    );
    let separator = tuple((space0, char(';'), space0));

    map(
        delimited(pair(char('['), space0), separated_list1(separator, item), pair(space0, char(']'))),
        |items: Vec<(&str, Option<&str>)>| {
            Inline::Citation(Citation {
                locator: items
                    .first()
                    .and_then(|(_, locator)| locator.map(|l| l.trim_end().to_string())),
                keys: items.into_iter().map(|(key, _)| key.to_string()).collect(),
                bracketed: true,
            })
        },
    )(input)
}

/// Class markers after a span: `{.ce}` or `{ .ce .large }`.
fn classes(input: &str) -> IResult<&str, Vec<&str>> {
    delimited(
        pair(char('{'), space0),
        separated_list1(
            space1,
            preceded(char('.'), take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')),
        ),
        pair(space0, char('}')),
    )(input)
}

/// A span, `[content]{.class}`. Chemical spans keep their content verbatim.
fn span(input: &str) -> IResult<&str, Inline> {
    let fail = || nom::Err::Error(Error::new(input, ErrorKind::Char));

    let body = input.strip_prefix('[').ok_or_else(fail)?;
    let end = closing_bracket(body).ok_or_else(fail)?;
    let (rest, classes) = classes(&body[end + 1..])?;

    let text = &body[..end];
    let content = if classes.contains(&CHEM_CLASS) {
        vec![Inline::Text(text.to_string())]
    } else {
        parse_inlines(text)
    };

    Ok((
        rest,
        Inline::Span {
            classes: classes.into_iter().map(String::from).collect(),
            content,
        },
    ))
}

/// Byte offset of the `]` matching an already-opened `[`.
fn closing_bracket(input: &str) -> Option<usize> {
    let mut depth = 1usize;

    for (i, c) in input.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn math(kind: MathKind, content: &str) -> Inline {
        Inline::Math {
            kind,
            content: content.into(),
        }
    }

    #[test]
    fn test_plain_text_is_one_run() {
        assert_eq!(
            parse_inlines("Hello, *world* and {braces}!"),
            vec![Inline::text("Hello, *world* and {braces}!")]
        );
    }

    #[test]
    fn test_inline_and_display_math() {
        assert_eq!(
            parse_inlines("Take $x$ and $$y = x^2$$ {#eq:y}"),
            vec![
                Inline::text("Take "),
                math(MathKind::Inline, "x"),
                Inline::text(" and "),
                math(MathKind::Display, "y = x^2"),
                Inline::text(" "),
                Inline::text("{#eq:y}"),
            ]
        );
    }

    #[test]
    fn test_multiline_display_math() {
        let inlines = parse_inlines("$$\na + b\n$$ {#eq:sum}");
        assert_eq!(inlines[0], math(MathKind::Display, "a + b"));
        assert_eq!(inlines.last(), Some(&Inline::text("{#eq:sum}")));
    }

    #[test]
    fn test_label_directly_after_display_math() {
        assert_eq!(
            parse_inlines("$$a$${#eq:a}"),
            vec![math(MathKind::Display, "a"), Inline::text("{#eq:a}")]
        );
    }

    #[test]
    fn test_label_glued_to_other_characters_stays_text() {
        assert_eq!(
            parse_inlines("$$a$$ {#eq:a}."),
            vec![math(MathKind::Display, "a"), Inline::text(" {#eq:a}.")]
        );
        assert_eq!(
            parse_inlines("x{#eq:a} y"),
            vec![Inline::text("x{#eq:a} y")]
        );
    }

    #[test]
    fn test_reference_keys_with_internal_punctuation() {
        assert_eq!(
            parse_inlines("See @eq:1.2 here."),
            vec![
                Inline::text("See "),
                Inline::Citation(Citation::single("eq:1.2")),
                Inline::text(" here."),
            ]
        );
        assert_eq!(
            parse_inlines("(@fig/a-b), @eq:c: and @eq:d."),
            vec![
                Inline::text("("),
                Inline::Citation(Citation::single("fig/a-b")),
                Inline::text("), "),
                Inline::Citation(Citation::single("eq:c")),
                Inline::text(": and "),
                Inline::Citation(Citation::single("eq:d")),
                Inline::text("."),
            ]
        );
    }

    #[test]
    fn test_email_is_not_a_reference() {
        assert_eq!(
            parse_inlines("mail jane@example.org or @ alone"),
            vec![Inline::text("mail jane@example.org or @ alone")]
        );
    }

    #[test]
    fn test_bracketed_citations() {
        assert_eq!(
            parse_inlines("[@eq:a; @eq:b]"),
            vec![Inline::Citation(Citation {
                keys: vec!["eq:a".into(), "eq:b".into()],
                locator: None,
                bracketed: true,
            })]
        );
        assert_eq!(
            parse_inlines("[@knuth1984, p. 42]"),
            vec![Inline::Citation(Citation {
                keys: vec!["knuth1984".into()],
                locator: Some("p. 42".into()),
                bracketed: true,
            })]
        );
    }

    #[test]
    fn test_chemical_span_is_verbatim() {
        assert_eq!(
            parse_inlines("[2H2 + O2 -> 2H2O]{.ce} {#eq:b}"),
            vec![
                Inline::Span {
                    classes: vec!["ce".into()],
                    content: vec![Inline::text("2H2 + O2 -> 2H2O")],
                },
                Inline::text(" "),
                Inline::text("{#eq:b}"),
            ]
        );
    }

    #[test]
    fn test_other_span_content_is_parsed() {
        assert_eq!(
            parse_inlines("[see $x$]{.note}"),
            vec![Inline::Span {
                classes: vec!["note".into()],
                content: vec![Inline::text("see "), math(MathKind::Inline, "x")],
            }]
        );
        assert_eq!(parse_inlines("[not a span]"), vec![Inline::text("[not a span]")]);
    }

    #[test]
    fn test_legacy_chemistry_is_verbatim_text() {
        assert_eq!(
            parse_inlines("\\ce{A^{+} @x} {#eq:a}"),
            vec![Inline::text("\\ce{A^{+} @x} "), Inline::text("{#eq:a}")]
        );
    }

    #[test]
    fn test_code_and_escapes_hide_nodes() {
        assert_eq!(
            parse_inlines("`@eq:a` and \\@eq:b"),
            vec![Inline::Code("@eq:a".into()), Inline::text(" and \\@eq:b")]
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(
            parse_inlines("one\ntwo  \nthree"),
            vec![
                Inline::text("one"),
                Inline::SoftBreak,
                Inline::text("two  "),
                Inline::HardBreak,
                Inline::text("three"),
            ]
        );
    }
}
