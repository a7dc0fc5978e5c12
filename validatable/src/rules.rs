//! Rule lists applied to a field in a single pass.
//!
//! Chaining [`Validatable::satisfies`] lets a later passing link recover a
//! value that an earlier link rejected. A [`Rules`] list evaluates every rule
//! against the same value and only reports `Valid` when all of them pass.
//!
//! # Example
//!
//! ```
//! use validatable::{Rules, Validatable};
//!
//! let rules: Rules<String> = Rules::new()
//!     .required("username is required")
//!     .letters("username may only contain letters");
//!
//! let field = Validatable::unchecked(String::new()).check(&rules);
//! assert_eq!(field.errors().map(|e| e.len()), Some(1));
//! ```

use std::fmt;

use regex::Regex;

use crate::Errors;
use crate::Validatable;
use crate::strings::char_len;
use crate::strings::is_email_address;
use crate::strings::is_letters;

/// A single rule: `Err` carries the message to report.
type Rule<T, E> = Box<dyn Fn(&T) -> Result<(), E> + Send + Sync>;

/// Ordered list of validation rules for one field.
pub struct Rules<T, E = String> {
    rules: Vec<Rule<T, E>>,
}

impl<T, E> Rules<T, E> {
    /// Create an empty rule list.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of rules in the list.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T, E: Ord> Rules<T, E> {
    /// Messages of every rule that rejects `value`.
    pub fn failures(&self, value: &T) -> Errors<E> {
        self.rules.iter().filter_map(|rule| rule(value).err()).collect()
    }
}

impl<T, E> Rules<T, E>
where
    T: 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Add a custom rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<E>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Require the value to equal another value.
    pub fn equals(self, other: T, msg: impl Into<E>) -> Self
    where
        T: PartialEq + Send + Sync,
    {
        self.rule(move |v| v == &other, msg)
    }
}

// Built-in rules for text values
impl<T, E> Rules<T, E>
where
    T: AsRef<str> + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Require the value to be non-empty.
    pub fn required(self, msg: impl Into<E>) -> Self {
        self.rule(|v| !v.as_ref().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<E>) -> Self {
        self.rule(move |v| char_len(v.as_ref()) >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<E>) -> Self {
        self.rule(move |v| char_len(v.as_ref()) <= max, msg)
    }

    /// Require letters only.
    pub fn letters(self, msg: impl Into<E>) -> Self {
        self.rule(|v| is_letters(v.as_ref()), msg)
    }

    /// Require a valid email address.
    pub fn email(self, msg: impl Into<E>) -> Self {
        self.rule(|v| is_email_address(v.as_ref()), msg)
    }

    /// Require the value to contain a substring.
    pub fn contains(self, substr: impl Into<String>, msg: impl Into<E>) -> Self {
        let substr = substr.into();
        self.rule(move |v| v.as_ref().contains(&substr), msg)
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: &str, msg: impl Into<E>) -> Result<Self, regex::Error> {
        let re = Regex::new(pattern)?;
        Ok(self.rule(move |v| re.is_match(v.as_ref()), msg))
    }
}

impl<T, E> Default for Rules<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for Rules<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules").field("len", &self.rules.len()).finish()
    }
}

impl<T, E: Ord> Validatable<T, E> {
    /// Applies every rule in `rules` to the carried value at once.
    ///
    /// All rules passing yields `Valid`, dropping earlier errors. Otherwise
    /// the failing messages are added to any earlier errors. `Empty` and a
    /// valueless `Invalid` are returned unchanged.
    pub fn check(self, rules: &Rules<T, E>) -> Self {
        match self {
            Self::Empty => Self::Empty,
            invalid @ Self::Invalid { value: None, .. } => invalid,
            Self::Unchecked(value) | Self::Valid(value) => {
                let errors = rules.failures(&value);
                if errors.is_empty() {
                    Self::Valid(value)
                } else {
                    Self::Invalid {
                        value: Some(value),
                        errors,
                    }
                }
            }
            Self::Invalid {
                value: Some(value),
                mut errors,
            } => {
                let failures = rules.failures(&value);
                if failures.is_empty() {
                    Self::Valid(value)
                } else {
                    errors.extend(failures);
                    Self::Invalid {
                        value: Some(value),
                        errors,
                    }
                }
            }
        }
    }
}
