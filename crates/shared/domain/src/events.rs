//! Registration lifecycle events published on the event bus.

use crate::constants::{USER_ACTIVATED, USER_REGISTERED};
use crate::request::RequestContext;
use crate::user::User;
use serde::Serialize;
use std::fmt;

/// Identifies which registration backend emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BackendTag(&'static str);

impl BackendTag {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for BackendTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A new, inactive account was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRegistered {
    pub user: User,
    pub request: RequestContext,
    pub sender: BackendTag,
}

impl UserRegistered {
    pub const NAME: &'static str = USER_REGISTERED;
}

/// A pending account was activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserActivated {
    pub user: User,
    pub request: RequestContext,
    pub sender: BackendTag,
}

impl UserActivated {
    pub const NAME: &'static str = USER_ACTIVATED;
}
