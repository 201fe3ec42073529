use signup_derive::signup_error;
use std::borrow::Cow;

#[signup_error]
pub enum MailerError {
    #[error("SMTP transport error{}: {source}", format_context(.context))]
    Transport {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Recipient rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal mailer error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
