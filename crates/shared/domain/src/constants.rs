//! Well-known names shared between the registration slice and its callers.

/// Route shown after a successful registration.
pub const REGISTRATION_COMPLETE: &str = "registration_complete";
/// Route shown after a successful activation.
pub const ACTIVATION_COMPLETE: &str = "registration_activation_complete";

/// Event name of [`crate::events::UserRegistered`].
pub const USER_REGISTERED: &str = "user_registered";
/// Event name of [`crate::events::UserActivated`].
pub const USER_ACTIVATED: &str = "user_activated";

/// Stored in place of the activation key once an account has been activated.
pub const ACTIVATED: &str = "ALREADY_ACTIVATED";

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password1";
pub const FIELD_PASSWORD_CONFIRM: &str = "password2";
pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_LAST_NAME: &str = "last_name";
