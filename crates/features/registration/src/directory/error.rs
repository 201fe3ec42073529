use std::borrow::Cow;

/// Errors raised by an [`AccountDirectory`](super::AccountDirectory).
#[signup_derive::signup_error]
pub enum DirectoryError {
    #[error("Username already taken{}: {username}", format_context(.context))]
    DuplicateUsername { username: String, context: Option<Cow<'static, str>> },
    #[error("Email already registered{}: {email}", format_context(.context))]
    DuplicateEmail { email: String, context: Option<Cow<'static, str>> },
    /// The backing store failed.
    #[error("Account storage error{}: {message}", format_context(.context))]
    Storage { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal account directory error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DirectoryError {
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateUsername { .. } | Self::DuplicateEmail { .. })
    }
}
