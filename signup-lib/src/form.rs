//! Sign-up form model.
//!
//! Each field is a [`Validatable`]. Typing resets a field to unchecked,
//! leaving a field or submitting runs its rules, and the backend's username
//! check is folded in afterwards with [`Validatable::add_errors`].
//!
//! # Example
//!
//! ```
//! use signup_lib::form::{Field, FormEvent, SignupForm};
//!
//! let form = SignupForm::new()
//!     .update(FormEvent::Input(Field::Username, "ada".into()))
//!     .update(FormEvent::Input(Field::Email, "ada@example.com".into()))
//!     .update(FormEvent::Input(Field::Password, "difference engine".into()))
//!     .update(FormEvent::Input(Field::PasswordConfirmation, "difference engine".into()))
//!     .update(FormEvent::Submit);
//!
//! assert!(form.submission().is_some());
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use validatable::Errors;
use validatable::Rules;
use validatable::Validatable;

use crate::wire::SignupRequest;

pub const USERNAME_REQUIRED: &str = "username is required";
pub const USERNAME_LETTERS: &str = "username may only contain letters";
pub const USERNAME_TOO_SHORT: &str = "username must be at least 3 characters";
pub const NICKNAME_LETTERS: &str = "nickname may only contain letters";
pub const NICKNAME_TOO_SHORT: &str = "nickname must be at least 2 characters";
pub const EMAIL_REQUIRED: &str = "email is required";
pub const EMAIL_INVALID: &str = "email address is not valid";
pub const PASSWORD_TOO_SHORT: &str = "password must be at least 8 characters";
pub const PASSWORD_MISMATCH: &str = "passwords do not match";

struct FormRules {
    username: Rules<String>,
    nickname: Rules<String>,
    email: Rules<String>,
    password: Rules<String>,
}

static RULES: LazyLock<FormRules> = LazyLock::new(|| FormRules {
    username: Rules::new()
        .required(USERNAME_REQUIRED)
        .letters(USERNAME_LETTERS)
        .min_length(3, USERNAME_TOO_SHORT),
    nickname: Rules::new()
        .letters(NICKNAME_LETTERS)
        .min_length(2, NICKNAME_TOO_SHORT),
    email: Rules::new().required(EMAIL_REQUIRED).email(EMAIL_INVALID),
    password: Rules::new().min_length(8, PASSWORD_TOO_SHORT),
});

/// A field of the sign-up form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    Nickname,
    Email,
    Password,
    PasswordConfirmation,
}

impl Field {
    /// Every field, in display order.
    pub const ALL: [Field; 5] = [
        Field::Username,
        Field::Nickname,
        Field::Email,
        Field::Password,
        Field::PasswordConfirmation,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Nickname => "nickname",
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "password confirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something that happened to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user changed a field's text.
    Input(Field, String),
    /// The user left a field.
    Blur(Field),
    /// The user pressed submit.
    Submit,
    /// The backend answered the username availability check.
    UsernameChecked(BTreeSet<String>),
}

/// State of the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupForm {
    pub username: Validatable<String>,
    pub nickname: Validatable<Option<String>>,
    pub email: Validatable<String>,
    pub password: Validatable<String>,
    pub password_confirmation: Validatable<String>,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            username: Validatable::empty(),
            nickname: Validatable::valid(None),
            email: Validatable::empty(),
            password: Validatable::empty(),
            password_confirmation: Validatable::empty(),
        }
    }
}

impl SignupForm {
    /// Creates a blank form. The optional nickname starts out valid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a form holding the values of a submitted request, unchecked.
    ///
    /// The confirmation is taken to be the password itself.
    pub fn from_request(request: &SignupRequest) -> Self {
        Self {
            username: Validatable::unchecked(request.username.clone()),
            nickname: Validatable::unchecked(
                request.nickname.clone().filter(|t| !t.is_empty()),
            ),
            email: Validatable::unchecked(request.email.clone()),
            password: Validatable::unchecked(request.password.clone()),
            password_confirmation: Validatable::unchecked(request.password.clone()),
        }
    }

    /// Applies one event and returns the next form state.
    pub fn update(self, event: FormEvent) -> Self {
        match event {
            FormEvent::Input(field, text) => self.input(field, text),
            FormEvent::Blur(field) => self.validate(field),
            FormEvent::Submit => Field::ALL
                .into_iter()
                .fold(self, |form, field| form.validate(field)),
            FormEvent::UsernameChecked(errors) => Self {
                username: self.username.add_errors(errors),
                ..self
            },
        }
    }

    fn input(self, field: Field, text: String) -> Self {
        match field {
            Field::Username => Self {
                username: Validatable::unchecked(text),
                ..self
            },
            Field::Nickname => Self {
                nickname: Validatable::unchecked(Some(text).filter(|t| !t.is_empty())),
                ..self
            },
            Field::Email => Self {
                email: Validatable::unchecked(text),
                ..self
            },
            Field::Password => Self {
                password: Validatable::unchecked(text),
                password_confirmation: self.password_confirmation.uncheck(),
                ..self
            },
            Field::PasswordConfirmation => Self {
                password_confirmation: Validatable::unchecked(text),
                ..self
            },
        }
    }

    fn validate(self, field: Field) -> Self {
        match field {
            Field::Username => Self {
                username: self.username.check(&RULES.username),
                ..self
            },
            Field::Nickname => Self {
                nickname: self.nickname.maybe(|nickname| nickname.check(&RULES.nickname)),
                ..self
            },
            Field::Email => Self {
                email: self.email.check(&RULES.email),
                ..self
            },
            Field::Password => {
                let password = self.password.check(&RULES.password);
                let password_confirmation = confirm(self.password_confirmation, &password);
                Self {
                    password,
                    password_confirmation,
                    ..self
                }
            }
            Field::PasswordConfirmation => Self {
                password_confirmation: confirm(self.password_confirmation, &self.password),
                ..self
            },
        }
    }

    /// Uniform view of one field's state, without its value.
    pub fn status(&self, field: Field) -> Validatable<(), &String> {
        match field {
            Field::Username => self.username.as_ref().map(drop),
            Field::Nickname => self.nickname.as_ref().map(drop),
            Field::Email => self.email.as_ref().map(drop),
            Field::Password => self.password.as_ref().map(drop),
            Field::PasswordConfirmation => self.password_confirmation.as_ref().map(drop),
        }
    }

    /// Error messages of one field, if it is invalid.
    pub fn field_errors(&self, field: Field) -> Option<&Errors> {
        match field {
            Field::Username => self.username.errors(),
            Field::Nickname => self.nickname.errors(),
            Field::Email => self.email.errors(),
            Field::Password => self.password.errors(),
            Field::PasswordConfirmation => self.password_confirmation.errors(),
        }
    }

    /// Every error message on the form, in field order.
    pub fn all_errors(&self) -> Vec<&String> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.field_errors(field))
            .flatten()
            .collect()
    }

    /// Returns `true` when every field is valid.
    pub fn is_submittable(&self) -> bool {
        self.submission().is_some()
    }

    /// The request to send, available once every field is valid.
    pub fn submission(&self) -> Option<SignupRequest> {
        // Only checked for validity: the password is what gets sent.
        self.password_confirmation.valid_value()?;
        Some(SignupRequest {
            username: self.username.valid_value()?.clone(),
            nickname: self.nickname.valid_value()?.clone(),
            email: self.email.valid_value()?.clone(),
            password: self.password.valid_value()?.clone(),
        })
    }
}

/// Judges the confirmation against the password's current state.
fn confirm(confirmation: Validatable<String>, password: &Validatable<String>) -> Validatable<String> {
    confirmation.with(password, |password, field| field.equals(password, PASSWORD_MISMATCH))
}
