//! Response header emission.

use crate::error::SettingsResult;
use crate::policy::Policy;
use crate::serialize::{HeaderFormat, PolicyHeader};
use crate::settings::PolicySettings;

/// What a response should do with the policy header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderAction {
    /// Set the header, replacing any existing value.
    Set(PolicyHeader),
    /// Remove any existing header of this name.
    Remove {
        /// Header name.
        name: &'static str,
    },
    /// Leave the response untouched.
    Skip,
}

impl HeaderAction {
    /// Decide the action for a rendered policy.
    ///
    /// An empty legacy value leaves any existing header in place, while an
    /// empty structured value removes it.
    pub fn for_policy(policy: &Policy, format: HeaderFormat) -> Self {
        let header = format.header(policy);

        if !header.value.is_empty() {
            return HeaderAction::Set(header);
        }

        match format {
            HeaderFormat::Legacy => HeaderAction::Skip,
            HeaderFormat::Structured => HeaderAction::Remove { name: header.name },
        }
    }

    /// Decide the action for configured settings.
    pub fn from_settings(settings: &PolicySettings) -> SettingsResult<Self> {
        if !settings.enforce.enable {
            tracing::debug!("Policy header disabled");
            return Ok(HeaderAction::Skip);
        }

        let policy = settings.enforce.build_policy()?;
        Ok(Self::for_policy(&policy, settings.format))
    }

    /// Get the header to set, if any.
    pub fn header(&self) -> Option<&PolicyHeader> {
        match self {
            HeaderAction::Set(header) => Some(header),
            _ => None,
        }
    }
}
