//! Registry of known policy directives.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::{PolicyError, PolicyResult};

/// Value schema of a directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveSchema {
    /// Serialized allow-list of origins.
    AllowList,
}

impl DirectiveSchema {
    /// Get the schema name.
    pub fn name(&self) -> &'static str {
        match self {
            DirectiveSchema::AllowList => "serialized-allow-list",
        }
    }
}

/// Registered directives, in registration order.
const DIRECTIVES: &[(&str, DirectiveSchema)] = &[
    ("accelerometer", DirectiveSchema::AllowList),
    ("ambient-light-sensor", DirectiveSchema::AllowList),
    ("autoplay", DirectiveSchema::AllowList),
    ("battery", DirectiveSchema::AllowList),
    ("camera", DirectiveSchema::AllowList),
    ("display-capture", DirectiveSchema::AllowList),
    ("document-domain", DirectiveSchema::AllowList),
    ("encrypted-media", DirectiveSchema::AllowList),
    ("fullscreen", DirectiveSchema::AllowList),
    ("execution-while-not-rendered", DirectiveSchema::AllowList),
    ("execution-while-out-of-viewport", DirectiveSchema::AllowList),
    ("geolocation", DirectiveSchema::AllowList),
    ("gyroscope", DirectiveSchema::AllowList),
    ("magnetometer", DirectiveSchema::AllowList),
    ("microphone", DirectiveSchema::AllowList),
    ("midi", DirectiveSchema::AllowList),
    ("navigation-override", DirectiveSchema::AllowList),
    ("payment", DirectiveSchema::AllowList),
    ("picture-in-picture", DirectiveSchema::AllowList),
    ("publickey-credentials", DirectiveSchema::AllowList),
    ("sync-xhr", DirectiveSchema::AllowList),
    ("usb", DirectiveSchema::AllowList),
    // Deprecated in favour of xr-spatial-tracking.
    ("vr", DirectiveSchema::AllowList),
    ("wake-lock", DirectiveSchema::AllowList),
    ("xr-spatial-tracking", DirectiveSchema::AllowList),
];

static REGISTRY: Lazy<IndexMap<&'static str, DirectiveSchema>> =
    Lazy::new(|| DIRECTIVES.iter().copied().collect());

/// Check if a directive name is registered.
pub fn is_valid_name(name: &str) -> bool {
    REGISTRY.contains_key(name)
}

/// Get all registered directive names in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// Get the schema of a directive.
pub fn directive_schema(name: &str) -> PolicyResult<DirectiveSchema> {
    REGISTRY
        .get(name)
        .copied()
        .ok_or_else(|| PolicyError::invalid_directive(name))
}

/// Resolve a directive name to its registered form.
///
/// Fails with [`PolicyError::InvalidDirective`] when the name is unknown.
pub fn validate(name: &str) -> PolicyResult<&'static str> {
    match REGISTRY.get_key_value(name) {
        Some((registered, _)) => Ok(*registered),
        None => {
            tracing::warn!("Rejected unknown policy directive: {}", name);
            Err(PolicyError::invalid_directive(name))
        }
    }
}
