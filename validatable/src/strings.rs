//! Text validators built on [`Validatable::satisfies`].

use std::sync::LazyLock;

use regex::Regex;

use crate::Validatable;

/// RFC 5322 style address check, matched case-insensitively.
const EMAIL_PATTERN: &str = r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Returns `true` if `value` looks like an email address.
pub fn is_email_address(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Returns `true` if every character is an ASCII letter, ignoring case.
///
/// Vacuously true for the empty string.
pub fn is_letters(value: &str) -> bool {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .all(|c| c.is_ascii_lowercase())
}

/// Length in characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

impl<T: AsRef<str>, E: Ord> Validatable<T, E> {
    /// Requires at least one character.
    pub fn is_not_empty(self, error: impl Into<E>) -> Self {
        self.satisfies(|value| !value.as_ref().is_empty(), error)
    }

    /// Requires at least `min` characters.
    pub fn at_least(self, min: usize, error: impl Into<E>) -> Self {
        self.satisfies(|value| char_len(value.as_ref()) >= min, error)
    }

    /// Requires every character to be a letter.
    pub fn consists_of_letters(self, error: impl Into<E>) -> Self {
        self.satisfies(|value| is_letters(value.as_ref()), error)
    }

    /// Requires an email address.
    pub fn is_email(self, error: impl Into<E>) -> Self {
        self.satisfies(|value| is_email_address(value.as_ref()), error)
    }
}
