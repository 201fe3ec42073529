use crate::directory::DirectoryError;
use crate::notify::NotifyError;
use signup_event_bus::EventBusError;
use std::borrow::Cow;

/// A specialized [`RegistrationError`] enum of this crate.
///
/// Collaborator failures are wrapped as-is so callers can still match on the
/// underlying kind (for example a duplicate username).
#[signup_derive::signup_error]
pub enum RegistrationError {
    /// The account directory refused or failed the operation.
    #[error("Account directory error{}: {source}", format_context(.context))]
    Directory { source: DirectoryError, context: Option<Cow<'static, str>> },
    /// The administrator could not be notified.
    #[error("Admin notification error{}: {source}", format_context(.context))]
    Notification { source: NotifyError, context: Option<Cow<'static, str>> },
    /// A lifecycle event could not be published.
    #[error("Event publish error{}: {source}", format_context(.context))]
    Events { source: EventBusError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal registration error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl RegistrationError {
    /// `true` when the directory rejected the account as a duplicate.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Directory { source, .. } if source.is_duplicate())
    }
}
