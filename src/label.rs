//! The `{#identifier}` label grammar.
//!
//! Labels are a plain-text convention, not a node type: the reader leaves them
//! as text tokens and only the numbering pass consumes them.

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::all_consuming,
    sequence::delimited,
    IResult,
};

/// Parse a label (`{#label}`) and return the identifier.
pub fn label(input: &str) -> IResult<&str, &str> {
    delimited(tag("{#"), take_while1(|c: char| c != '}'), char('}'))(input)
}

/// Match a token that is exactly one label, with no other characters.
pub fn label_token(token: &str) -> Option<&str> {
    all_consuming(label)(token).ok().map(|(_, id)| id)
}

/// Match text that holds one label and otherwise only whitespace.
pub fn standalone_label(text: &str) -> Option<&str> {
    all_consuming(delimited(multispace0, label, multispace0))(text)
        .ok()
        .map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(label("{#eq:energy} rest"), Ok((" rest", "eq:energy")));
        assert!(label("{#}").is_err());
        assert!(label("{eq:energy}").is_err());
    }

    #[test]
    fn test_label_token_is_exact() {
        assert_eq!(label_token("{#eq:a}"), Some("eq:a"));
        assert_eq!(label_token(" {#eq:a}"), None);
        assert_eq!(label_token("{#eq:a}."), None);
        assert_eq!(label_token("{#eq:a}{#eq:b}"), None);
    }

    #[test]
    fn test_standalone_label() {
        assert_eq!(standalone_label("  {#eq:b}\n"), Some("eq:b"));
        assert_eq!(standalone_label("{#eq:b}"), Some("eq:b"));
        assert_eq!(standalone_label("see {#eq:b}"), None);
        assert_eq!(standalone_label("{#eq:b} here"), None);
        assert_eq!(standalone_label("   "), None);
    }
}
