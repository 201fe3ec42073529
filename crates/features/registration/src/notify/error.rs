use std::borrow::Cow;

/// Errors raised while notifying administrators.
#[signup_derive::signup_error]
pub enum NotifyError {
    /// The transport refused or lost the message.
    #[error("Notification delivery failed{}: {message}", format_context(.context))]
    Delivery { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal notification error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
