//! Header serialization.
//!
//! Two grammars exist for the same reduced policy:
//! - the legacy `Feature-Policy` ASCII list (`name 'self' a.com; name2 *`)
//! - the `Permissions-Policy` structured field dictionary (`name=(self "a.com")`)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::policy::Policy;
use crate::source::Source;

/// Renders a policy into a header value.
pub trait HeaderSerializer {
    /// Get the header name.
    fn header_name(&self) -> &'static str;

    /// Render the header value.
    fn render(&self, policy: &Policy) -> String;
}

/// Legacy `Feature-Policy` serializer.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacySerializer;

impl HeaderSerializer for LegacySerializer {
    fn header_name(&self) -> &'static str {
        "Feature-Policy"
    }

    fn render(&self, policy: &Policy) -> String {
        let output: Vec<String> = policy
            .reduced_directives()
            .into_iter()
            .filter(|(_, sources)| !sources.is_empty())
            .map(|(name, sources)| {
                let mut entry = name.to_string();
                for source in &sources {
                    entry.push(' ');
                    entry.push_str(&source.to_string());
                }
                entry
            })
            .collect();

        let value = output.join("; ");
        tracing::debug!(header = self.header_name(), %value, "rendered policy");
        value
    }
}

/// Structured field `Permissions-Policy` serializer.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuredSerializer;

impl StructuredSerializer {
    fn write_item(out: &mut String, source: &Source) {
        match source {
            Source::SelfOrigin => out.push_str("self"),
            Source::Any => out.push('*'),
            Source::None => {}
            Source::Expression(expr) => {
                out.push('"');
                for c in expr.chars() {
                    if matches!(c, '"' | '\\') {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push('"');
            }
        }
    }
}

impl HeaderSerializer for StructuredSerializer {
    fn header_name(&self) -> &'static str {
        "Permissions-Policy"
    }

    fn render(&self, policy: &Policy) -> String {
        let mut directives = policy.reduced_directives();
        directives.sort_by(|a, b| a.0.cmp(b.0));

        let output: Vec<String> = directives
            .into_iter()
            .map(|(name, sources)| {
                // 'none' is expressed as an empty inner list.
                let items: Vec<&Source> = sources.iter().filter(|s| **s != Source::None).collect();

                let mut entry = format!("{name}=");
                if let [single] = items.as_slice() {
                    Self::write_item(&mut entry, single);
                } else {
                    entry.push('(');
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            entry.push(' ');
                        }
                        Self::write_item(&mut entry, item);
                    }
                    entry.push(')');
                }
                entry
            })
            .collect();

        let value = output.join(", ");
        tracing::debug!(header = self.header_name(), %value, "rendered policy");
        value
    }
}

/// Header wire format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFormat {
    /// `Feature-Policy` ASCII list.
    Legacy,
    /// `Permissions-Policy` structured dictionary.
    #[default]
    Structured,
}

impl HeaderFormat {
    /// Get the serializer for this format.
    pub fn serializer(&self) -> &'static dyn HeaderSerializer {
        match self {
            HeaderFormat::Legacy => &LegacySerializer,
            HeaderFormat::Structured => &StructuredSerializer,
        }
    }

    /// Get the header name.
    pub fn header_name(&self) -> &'static str {
        self.serializer().header_name()
    }

    /// Render the header value.
    pub fn render(&self, policy: &Policy) -> String {
        self.serializer().render(policy)
    }

    /// Render the header name and value.
    pub fn header(&self, policy: &Policy) -> PolicyHeader {
        PolicyHeader {
            name: self.header_name(),
            value: self.render(policy),
        }
    }
}

/// A rendered header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyHeader {
    /// Header name.
    pub name: &'static str,
    /// Header value.
    pub value: String,
}

impl fmt::Display for PolicyHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
