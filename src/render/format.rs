//! Output format selection.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Target the host will serialize the document to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Typeset/print output (`latex`).
    Latex,
    /// Web output (`html`).
    Html,
    /// Word-processor output (`docx`).
    Docx,
    /// Any other format; carries the name the host gave.
    Other(String),
}

impl OutputFormat {
    /// Name of the format as the host spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Latex => "latex",
            Self::Html => "html",
            Self::Docx => "docx",
            Self::Other(name) => name,
        }
    }

    /// Whether references are left to the typesetter to number.
    pub fn is_typeset(&self) -> bool {
        matches!(self, Self::Latex)
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl FromStr for OutputFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "latex" => Self::Latex,
            "html" => Self::Html,
            "docx" => Self::Docx,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
