//! The registration form: its field schema and the checks run before
//! [`RegistrationBackend::register`](crate::RegistrationBackend::register).

use email_address::EmailAddress;
use serde::Deserialize;
use signup_domain::constants::{
    FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_PASSWORD, FIELD_PASSWORD_CONFIRM,
    FIELD_USERNAME,
};
use signup_domain::forms::{FieldFlags, FieldKind, FieldSpec, FormDescriptor};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub const USERNAME_MAX_LENGTH: usize = 30;
pub const NAME_MAX_LENGTH: usize = 30;

/// Account fields plus the optional profile fields.
pub static REGISTRATION_FORM: FormDescriptor = FormDescriptor {
    name: "registration_and_profile",
    fields: &[
        FieldSpec {
            name: FIELD_USERNAME,
            label: "Username",
            kind: FieldKind::Text,
            max_length: Some(USERNAME_MAX_LENGTH),
            flags: FieldFlags::REQUIRED,
        },
        FieldSpec {
            name: FIELD_EMAIL,
            label: "Email address",
            kind: FieldKind::Email,
            max_length: None,
            flags: FieldFlags::REQUIRED,
        },
        FieldSpec {
            name: FIELD_PASSWORD,
            label: "Password",
            kind: FieldKind::Password,
            max_length: None,
            flags: FieldFlags::REQUIRED.union(FieldFlags::SECRET),
        },
        FieldSpec {
            name: FIELD_PASSWORD_CONFIRM,
            label: "Password (again)",
            kind: FieldKind::Password,
            max_length: None,
            flags: FieldFlags::REQUIRED.union(FieldFlags::SECRET).union(FieldFlags::CONFIRMATION),
        },
        FieldSpec {
            name: FIELD_FIRST_NAME,
            label: "First name",
            kind: FieldKind::Text,
            max_length: Some(NAME_MAX_LENGTH),
            flags: FieldFlags::empty(),
        },
        FieldSpec {
            name: FIELD_LAST_NAME,
            label: "Last name",
            kind: FieldKind::Text,
            max_length: Some(NAME_MAX_LENGTH),
            flags: FieldFlags::empty(),
        },
    ],
};

/// One failed check on one field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field}: {message}")]
    Invalid { field: &'static str, message: Cow<'static, str> },
}

impl FormError {
    fn invalid(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Invalid { field, message: message.into() }
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Invalid { field, .. } => *field,
        }
    }
}

/// Every problem found in one submission.
#[derive(Debug, thiserror::Error)]
#[error("registration form has {} invalid field(s)", .0.len())]
pub struct FormErrors(Vec<FormError>);

impl FormErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FormError> {
        self.0.iter()
    }

    /// Errors for one field, in the order they were found.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FormError> {
        self.0.iter().filter(move |e| e.field() == field)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Raw submission as posted by the client.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Validates the submission and yields the input for `register`.
    ///
    /// Usernames are 1-30 characters of letters, digits and `@ . + - _`.
    /// Uniqueness is left to the account directory.
    ///
    /// # Errors
    /// Returns every failed check at once as [`FormErrors`].
    pub fn validate(self) -> Result<RegistrationRequest, FormErrors> {
        let mut errors = Vec::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.push(FormError::invalid(FIELD_USERNAME, "This field is required."));
        } else if username.chars().count() > USERNAME_MAX_LENGTH {
            errors.push(FormError::invalid(FIELD_USERNAME, "Ensure this value has at most 30 characters."));
        } else if !username.chars().all(is_username_char) {
            errors.push(FormError::invalid(
                FIELD_USERNAME,
                "This value may contain only letters, numbers and @/./+/-/_ characters.",
            ));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FormError::invalid(FIELD_EMAIL, "This field is required."));
        } else if EmailAddress::from_str(email).is_err() {
            errors.push(FormError::invalid(FIELD_EMAIL, "Enter a valid email address."));
        }

        if self.password1.is_empty() {
            errors.push(FormError::invalid(FIELD_PASSWORD, "This field is required."));
        }
        if self.password2.is_empty() {
            errors.push(FormError::invalid(FIELD_PASSWORD_CONFIRM, "This field is required."));
        } else if self.password1 != self.password2 {
            errors.push(FormError::invalid(FIELD_PASSWORD_CONFIRM, "The two password fields didn't match."));
        }

        for (field, value) in [(FIELD_FIRST_NAME, &self.first_name), (FIELD_LAST_NAME, &self.last_name)] {
            if value.chars().count() > NAME_MAX_LENGTH {
                errors.push(FormError::invalid(field, "Ensure this value has at most 30 characters."));
            }
        }

        if !errors.is_empty() {
            return Err(FormErrors(errors));
        }

        Ok(RegistrationRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            password: self.password1,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
        })
    }
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-')
}

/// Validated input for a registration. Not persisted by the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    /// Plaintext; hashed by the account directory.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationRequest {
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"..")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "jdoe".into(),
            email: "jdoe@example.org".into(),
            password1: "s3cret".into(),
            password2: "s3cret".into(),
            ..RegistrationForm::default()
        }
    }

    #[test]
    fn valid_form_yields_request() {
        let request = RegistrationForm { first_name: " Jane ".into(), ..form() }.validate().unwrap();
        assert_eq!(request.username, "jdoe");
        assert_eq!(request.password, "s3cret");
        assert_eq!(request.first_name, "Jane");
    }

    #[test]
    fn mismatched_passwords_are_reported_on_confirmation() {
        let errors = RegistrationForm { password2: "other".into(), ..form() }.validate().unwrap_err();
        assert!(errors.has(FIELD_PASSWORD_CONFIRM));
        assert!(!errors.has(FIELD_PASSWORD));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn collects_all_errors() {
        let errors = RegistrationForm::default().validate().unwrap_err();
        for field in [FIELD_USERNAME, FIELD_EMAIL, FIELD_PASSWORD, FIELD_PASSWORD_CONFIRM] {
            assert!(errors.has(field), "missing error for {field}");
        }
    }

    #[test]
    fn username_charset_and_length() {
        assert!(RegistrationForm { username: "j.doe+test@lab_1-x".into(), ..form() }.validate().is_ok());
        assert!(RegistrationForm { username: "j doe".into(), ..form() }.validate().is_err());
        assert!(RegistrationForm { username: "x".repeat(31), ..form() }.validate().is_err());
    }

    #[test]
    fn email_syntax_is_checked() {
        let errors = RegistrationForm { email: "not-an-email".into(), ..form() }.validate().unwrap_err();
        assert!(errors.has(FIELD_EMAIL));
    }

    #[test]
    fn descriptor_marks_password_fields_secret() {
        let secret: Vec<_> = REGISTRATION_FORM
            .fields
            .iter()
            .filter(|f| f.flags.contains(FieldFlags::SECRET))
            .map(|f| f.name)
            .collect();
        assert_eq!(secret, [FIELD_PASSWORD, FIELD_PASSWORD_CONFIRM]);
        assert_eq!(REGISTRATION_FORM.required_fields().count(), 4);
        assert!(!REGISTRATION_FORM.field(FIELD_FIRST_NAME).unwrap().is_required());
    }
}
