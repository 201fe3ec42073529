//! The account directory owns users and their registration profiles.
//!
//! The registration backend never touches account storage itself; every
//! mutation goes through [`AccountDirectory`].

mod error;
mod memory;

pub use error::{DirectoryError, DirectoryErrorExt};
pub use memory::InMemoryAccountDirectory;

use signup_domain::site::Site;
use signup_domain::user::User;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Everything needed to create a pending account.
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    /// Plaintext at this boundary; the directory stores a hash.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub site: Site,
    /// Whether the directory should mail the activation link to the user.
    pub send_email: bool,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"..")
            .field("site", &self.site.domain)
            .field("send_email", &self.send_email)
            .finish_non_exhaustive()
    }
}

/// Storage contract for users and registration profiles.
pub trait AccountDirectory: Send + Sync {
    /// Creates an inactive user and its registration profile.
    ///
    /// Must reject an already taken username or email with
    /// [`DirectoryError::DuplicateUsername`] / [`DirectoryError::DuplicateEmail`].
    fn create_inactive_user(
        &self,
        account: NewAccount,
    ) -> impl Future<Output = Result<User, DirectoryError>> + Send;

    /// Activates the account owning `activation_key`.
    ///
    /// Returns `Ok(None)` for unknown, malformed, expired or already used keys.
    /// At most one caller may succeed per key, even when racing.
    fn activate_user(
        &self,
        activation_key: &str,
    ) -> impl Future<Output = Result<Option<User>, DirectoryError>> + Send;
}

impl<D: AccountDirectory> AccountDirectory for Arc<D> {
    fn create_inactive_user(
        &self,
        account: NewAccount,
    ) -> impl Future<Output = Result<User, DirectoryError>> + Send {
        (**self).create_inactive_user(account)
    }

    fn activate_user(
        &self,
        activation_key: &str,
    ) -> impl Future<Output = Result<Option<User>, DirectoryError>> + Send {
        (**self).activate_user(activation_key)
    }
}
