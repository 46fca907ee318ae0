//! Policy settings.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PolicyResult, SettingsResult};
use crate::policy::Policy;
use crate::serialize::HeaderFormat;
use crate::source::Source;

/// Top-level policy settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Header wire format.
    pub format: HeaderFormat,
    /// Enforced policy.
    pub enforce: PolicyTypeSettings,
}

impl PolicySettings {
    /// Parse settings from JSON text.
    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading policy settings from {}", path.display());

        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Settings for one policy type.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTypeSettings {
    /// Whether the header is emitted.
    pub enable: bool,
    /// Directive settings, in configured order.
    pub directives: IndexMap<String, DirectiveSettings>,
}

impl PolicyTypeSettings {
    /// Build a policy from the configured directives.
    pub fn build_policy(&self) -> PolicyResult<Policy> {
        let mut policy = Policy::new();

        for (name, options) in &self.directives {
            // An unrecognized base still declares the directive, so an
            // empty directive remains distinguishable from an unset one.
            policy.set_directive(name, options.base_sources())?;
            policy.append_directive_json(name, &options.sources)?;
        }

        Ok(policy)
    }
}

/// Settings for a single directive.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectiveSettings {
    /// Base allow-list: "self", "none", "any", or empty.
    pub base: String,
    /// Additional sources, a string or list of strings.
    pub sources: Value,
}

impl DirectiveSettings {
    /// Get the sources implied by the base setting.
    pub fn base_sources(&self) -> Vec<Source> {
        match self.base.as_str() {
            "self" => vec![Source::SelfOrigin],
            "none" => vec![Source::None],
            "any" => vec![Source::Any],
            _ => Vec::new(),
        }
    }
}
