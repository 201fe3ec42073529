use crate::constants::ACTIVATED;
use crate::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque single-use token proving the right to activate one pending account.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationKey(String);

impl ActivationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The sentinel stored once the key has been used.
    #[must_use]
    pub fn activated() -> Self {
        Self(ACTIVATED.to_owned())
    }

    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.0 == ACTIVATED
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys are bearer credentials; keep them out of logs.
impl fmt::Debug for ActivationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_activated() {
            f.write_str("ActivationKey(ALREADY_ACTIVATED)")
        } else {
            f.write_str("ActivationKey(..)")
        }
    }
}

impl From<&str> for ActivationKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Links a user to its activation key and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationProfile {
    pub user_id: UserId,
    pub activation_key: ActivationKey,
}

impl RegistrationProfile {
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.activation_key.is_activated()
    }
}
