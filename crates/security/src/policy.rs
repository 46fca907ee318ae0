//! Permissions Policy (Feature Policy) value model.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{PolicyError, PolicyResult};
use crate::reduce::reduce_source_list;
use crate::registry;
use crate::source::Source;

/// A value passed to [`Policy::set_directive`] or [`Policy::append_directive`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveValue(Vec<Source>);

impl DirectiveValue {
    /// An empty value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Split a space-delimited token string.
    pub fn from_text(text: &str) -> Self {
        Self(text.split_whitespace().map(Source::parse).collect())
    }

    /// Convert a configuration value.
    ///
    /// Accepts null, a string, or an array of strings; anything else fails
    /// with [`PolicyError::InvalidValue`].
    pub fn try_from_json(value: &Value) -> PolicyResult<Self> {
        match value {
            Value::Null => Ok(Self::empty()),
            Value::String(text) => Ok(Self::from_text(text)),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(token) => Ok(Source::parse(token)),
                    other => Err(PolicyError::invalid_value(other.to_string())),
                })
                .collect::<PolicyResult<Vec<_>>>()
                .map(Self),
            other => Err(PolicyError::invalid_value(other.to_string())),
        }
    }

    /// Check if the value holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the tokens.
    pub fn sources(&self) -> &[Source] {
        &self.0
    }

    fn into_sources(self) -> Vec<Source> {
        self.0
    }
}

impl From<&str> for DirectiveValue {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for DirectiveValue {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl From<Source> for DirectiveValue {
    fn from(source: Source) -> Self {
        Self(vec![source])
    }
}

impl From<Vec<Source>> for DirectiveValue {
    fn from(sources: Vec<Source>) -> Self {
        Self(sources)
    }
}

impl From<&[Source]> for DirectiveValue {
    fn from(sources: &[Source]) -> Self {
        Self(sources.to_vec())
    }
}

impl<const N: usize> From<[Source; N]> for DirectiveValue {
    fn from(sources: [Source; N]) -> Self {
        Self(sources.into())
    }
}

impl From<Vec<String>> for DirectiveValue {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens.into_iter().map(Source::from).collect())
    }
}

impl From<Vec<&str>> for DirectiveValue {
    fn from(tokens: Vec<&str>) -> Self {
        Self(tokens.into_iter().map(Source::parse).collect())
    }
}

impl From<&[&str]> for DirectiveValue {
    fn from(tokens: &[&str]) -> Self {
        Self(tokens.iter().map(|t| Source::parse(t)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DirectiveValue {
    fn from(tokens: [&str; N]) -> Self {
        Self(tokens.iter().map(|t| Source::parse(t)).collect())
    }
}

/// A policy header under construction.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    /// Directive values, in insertion order.
    directives: IndexMap<&'static str, Vec<Source>>,
}

impl Policy {
    /// Create a new empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the policy currently has the specified directive.
    pub fn has_directive(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// Get the raw (unreduced) value of a directive.
    ///
    /// A registered directive which has not been set yields an empty list.
    pub fn directive(&self, name: &str) -> PolicyResult<&[Source]> {
        let name = registry::validate(name)?;

        Ok(self.directives.get(name).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Add a new directive to the policy, or replace an existing directive.
    ///
    /// An empty value leaves the directive declared with no sources.
    pub fn set_directive(&mut self, name: &str, value: impl Into<DirectiveValue>) -> PolicyResult<()> {
        let name = registry::validate(name)?;
        let value = value.into();

        tracing::trace!(directive = name, sources = value.sources().len(), "set directive");
        self.directives.insert(name, value.into_sources());
        Ok(())
    }

    /// Append values to a directive, creating it if absent.
    ///
    /// Appending an empty value does not create the directive.
    pub fn append_directive(&mut self, name: &str, value: impl Into<DirectiveValue>) -> PolicyResult<()> {
        let name = registry::validate(name)?;
        let value = value.into();

        if value.is_empty() {
            return Ok(());
        }

        tracing::trace!(directive = name, sources = value.sources().len(), "append directive");
        self.directives
            .entry(name)
            .or_default()
            .extend(value.into_sources());
        Ok(())
    }

    /// Append a configuration value to a directive.
    pub fn append_directive_json(&mut self, name: &str, value: &Value) -> PolicyResult<()> {
        let name = registry::validate(name)?;
        let value = DirectiveValue::try_from_json(value)?;

        self.append_directive(name, value)
    }

    /// Remove a directive from the policy.
    pub fn remove_directive(&mut self, name: &str) -> PolicyResult<()> {
        let name = registry::validate(name)?;

        self.directives.shift_remove(name);
        Ok(())
    }

    /// Get the names of the directives set on this policy, in insertion order.
    pub fn directive_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.directives.keys().copied()
    }

    /// Check if no directives are set.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Get every directive with its reduced source list, in insertion order.
    pub fn reduced_directives(&self) -> Vec<(&'static str, Vec<Source>)> {
        self.directives
            .iter()
            .map(|(name, sources)| (*name, reduce_source_list(sources)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_invalid_directive() {
        let mut policy = Policy::new();

        assert_eq!(
            policy.set_directive("foo", Source::SelfOrigin),
            Err(PolicyError::InvalidDirective("foo".to_string()))
        );
        assert!(policy.is_empty());
    }

    #[test]
    fn test_invalid_directive_for_every_operation() {
        let mut policy = Policy::new();
        policy.set_directive("camera", "'self'").unwrap();

        assert!(matches!(policy.append_directive("foo", "'self'"), Err(PolicyError::InvalidDirective(_))));
        assert!(matches!(policy.directive("foo"), Err(PolicyError::InvalidDirective(_))));
        assert!(matches!(policy.remove_directive("foo"), Err(PolicyError::InvalidDirective(_))));
        assert!(matches!(
            policy.append_directive_json("foo", &json!(["a.com"])),
            Err(PolicyError::InvalidDirective(_))
        ));
        assert!(!policy.has_directive("foo"));
        assert_eq!(policy.directive_names().collect::<Vec<_>>(), vec!["camera"]);
    }

    #[test]
    fn test_set_single() {
        let mut policy = Policy::new();
        policy.set_directive("geolocation", Source::SelfOrigin).unwrap();

        assert!(policy.has_directive("geolocation"));
        assert_eq!(policy.directive("geolocation").unwrap(), &[Source::SelfOrigin]);
    }

    #[test]
    fn test_append_single_creates_directive() {
        let mut policy = Policy::new();
        policy.append_directive("geolocation", "'self'").unwrap();

        assert!(policy.has_directive("geolocation"));
        assert_eq!(policy.directive("geolocation").unwrap(), &[Source::SelfOrigin]);
    }

    #[test]
    fn test_set_replaces() {
        let mut policy = Policy::new();
        policy.set_directive("geolocation", Source::Any).unwrap();
        policy.set_directive("geolocation", ["'self'", "one.example.com"]).unwrap();

        assert_eq!(
            policy.directive("geolocation").unwrap(),
            &[
                Source::SelfOrigin,
                Source::Expression("one.example.com".to_string())
            ]
        );
    }

    #[test]
    fn test_set_empty_is_declared() {
        let mut policy = Policy::new();
        policy.set_directive("camera", ["'self'"]).unwrap();
        policy.set_directive("camera", DirectiveValue::empty()).unwrap();

        assert!(policy.has_directive("camera"));
        assert!(policy.directive("camera").unwrap().is_empty());

        policy.set_directive("microphone", "").unwrap();
        assert!(policy.has_directive("microphone"));
    }

    #[test]
    fn test_append_empty_is_noop() {
        let mut policy = Policy::new();
        policy.append_directive("geolocation", "'self'").unwrap();
        policy.append_directive("geolocation", "").unwrap();
        policy.append_directive("camera", Vec::<Source>::new()).unwrap();

        assert_eq!(policy.directive("geolocation").unwrap(), &[Source::SelfOrigin]);
        assert!(!policy.has_directive("camera"));
        assert!(policy.directive("camera").unwrap().is_empty());
    }

    #[test]
    fn test_text_values_are_split() {
        let mut policy = Policy::new();
        policy.set_directive("camera", "one.example.com  'self'").unwrap();

        assert_eq!(
            policy.directive("camera").unwrap(),
            &[
                Source::Expression("one.example.com".to_string()),
                Source::SelfOrigin
            ]
        );
    }

    #[test]
    fn test_invalid_json_value() {
        let mut policy = Policy::new();

        assert!(matches!(
            policy.append_directive_json("geolocation", &json!(12)),
            Err(PolicyError::InvalidValue(_))
        ));
        assert!(matches!(
            policy.append_directive_json("geolocation", &json!(["a.com", 3])),
            Err(PolicyError::InvalidValue(_))
        ));
        assert!(!policy.has_directive("geolocation"));

        policy.append_directive_json("geolocation", &json!("'self' a.com")).unwrap();
        policy.append_directive_json("geolocation", &json!(["b.com"])).unwrap();
        policy.append_directive_json("geolocation", &Value::Null).unwrap();
        assert_eq!(policy.directive("geolocation").unwrap().len(), 3);
    }

    #[test]
    fn test_remove() {
        let mut policy = Policy::new();
        policy.set_directive("geolocation", "'self'").unwrap();
        policy.set_directive("camera", "example.com").unwrap();

        policy.remove_directive("camera").unwrap();
        policy.remove_directive("usb").unwrap();

        assert!(!policy.has_directive("camera"));
        assert_eq!(policy.directive_names().collect::<Vec<_>>(), vec!["geolocation"]);
    }

    #[test]
    fn test_insertion_order_kept_on_replace() {
        let mut policy = Policy::new();
        policy.set_directive("geolocation", "'self'").unwrap();
        policy.set_directive("camera", "'self'").unwrap();
        policy.set_directive("geolocation", "*").unwrap();

        assert_eq!(
            policy.directive_names().collect::<Vec<_>>(),
            vec!["geolocation", "camera"]
        );
    }

    #[test]
    fn test_reduced_directives() {
        let mut policy = Policy::new();
        policy.set_directive("camera", ["'self'", "'self'", "a.com"]).unwrap();
        policy.set_directive("usb", "").unwrap();

        assert_eq!(
            policy.reduced_directives(),
            vec![
                (
                    "camera",
                    vec![Source::SelfOrigin, Source::Expression("a.com".to_string())]
                ),
                ("usb", vec![]),
            ]
        );
    }
}
