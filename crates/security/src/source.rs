//! Allow-list source tokens.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading `scheme:` of a source expression.
static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]+):").expect("valid scheme pattern"));

/// Allow-list source token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// 'self' - the document's own origin
    SelfOrigin,
    /// 'none' - nothing allowed
    None,
    /// * - any origin
    Any,
    /// Scheme or host source (e.g. "https:", "https://example.com:8443/path")
    Expression(String),
}

impl Source {
    /// Parse a single source token.
    pub fn parse(token: &str) -> Self {
        match token {
            "'self'" => Source::SelfOrigin,
            "'none'" => Source::None,
            "*" => Source::Any,
            other => Source::Expression(other.to_string()),
        }
    }

    /// Check if this is one of the reserved keywords.
    pub fn is_keyword(&self) -> bool {
        !matches!(self, Source::Expression(_))
    }

    /// Check if this is a quoted expression such as `'hash-abc'`.
    pub fn is_quoted(&self) -> bool {
        matches!(self, Source::Expression(e) if e.starts_with('\''))
    }

    /// Get the leading lowercase scheme of an expression, without the colon.
    pub fn scheme(&self) -> Option<&str> {
        match self {
            Source::Expression(expr) => SCHEME
                .captures(expr)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str()),
            _ => None,
        }
    }

    /// Check if the expression's scheme is `http` or `https`.
    pub fn has_network_scheme(&self) -> bool {
        matches!(self.scheme(), Some("http" | "https"))
    }

    /// Get the scheme if this is a bare `http:` or `https:` source.
    pub fn bare_network_scheme(&self) -> Option<&str> {
        match self {
            Source::Expression(expr) => match expr.as_str() {
                "http:" => Some("http"),
                "https:" => Some("https"),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get the expression text, if any.
    pub fn as_expression(&self) -> Option<&str> {
        match self {
            Source::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

impl From<&str> for Source {
    fn from(token: &str) -> Self {
        Source::parse(token)
    }
}

impl From<String> for Source {
    fn from(token: String) -> Self {
        match token.as_str() {
            "'self'" | "'none'" | "*" => Source::parse(&token),
            _ => Source::Expression(token),
        }
    }
}

/// Formats the token in its source-list spelling.
impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::SelfOrigin => f.write_str("'self'"),
            Source::None => f.write_str("'none'"),
            Source::Any => f.write_str("*"),
            Source::Expression(expr) => f.write_str(expr),
        }
    }
}
