//! Name matching policies

use serde::{Deserialize, Serialize};

/// How a requested name is compared with a registered name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatchPolicy {
    /// Names must be byte-for-byte equal
    CaseSensitive,
    /// ASCII case is ignored
    #[default]
    CaseInsensitive,
}

impl NameMatchPolicy {
    /// Check whether `requested` names the operator registered as `declared`
    pub fn matches(&self, declared: &str, requested: &str) -> bool {
        match self {
            Self::CaseSensitive => declared == requested,
            Self::CaseInsensitive => declared.eq_ignore_ascii_case(requested),
        }
    }
}
