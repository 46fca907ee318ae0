//! Browser permissions policy headers.
//!
//! This crate builds the `Feature-Policy` / `Permissions-Policy` response
//! header:
//! - Directive registry and validation
//! - Policy construction (set, append, remove)
//! - Source list reduction
//! - Legacy and structured field serialization
//! - Settings loading and header emission

pub mod error;
pub mod registry;
pub mod source;
pub mod policy;
pub mod reduce;
pub mod serialize;
pub mod settings;
pub mod emit;

pub use error::{PolicyError, PolicyResult, SettingsError, SettingsResult};
pub use registry::DirectiveSchema;
pub use source::Source;
pub use policy::{DirectiveValue, Policy};
pub use reduce::reduce_source_list;
pub use serialize::{HeaderFormat, HeaderSerializer, LegacySerializer, PolicyHeader, StructuredSerializer};
pub use settings::{DirectiveSettings, PolicySettings, PolicyTypeSettings};
pub use emit::HeaderAction;
