//! The four-state validation value and its structural operations.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Set of error messages attached to an invalid value.
pub type Errors<E = String> = BTreeSet<E>;

/// A form value paired with the outcome of validating it.
///
/// Every operation consumes the value and returns the next state, so a
/// field is replaced wholesale on each transition.
///
/// # Example
///
/// ```
/// use validatable::Validatable;
///
/// let name: Validatable<String> = Validatable::unchecked("ada".to_string())
///     .is_not_empty("username is required")
///     .consists_of_letters("username may only contain letters");
///
/// assert_eq!(name.valid_value().map(String::as_str), Some("ada"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Validatable<T, E = String> {
    /// No value has been supplied yet.
    Empty,
    /// A value changed since it was last validated.
    Unchecked(T),
    /// The value passed every validation applied so far.
    Valid(T),
    /// The value failed at least one validation.
    ///
    /// `value` is `None` when a cast failed and no typed value exists.
    /// `errors` is never empty.
    Invalid {
        value: Option<T>,
        errors: Errors<E>,
    },
}

/// Wire form read before the error-set invariant is checked.
#[derive(Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
#[serde(bound(deserialize = "T: Deserialize<'de>, E: Deserialize<'de> + Ord"))]
enum Repr<T, E> {
    Empty,
    Unchecked(T),
    Valid(T),
    Invalid { value: Option<T>, errors: Errors<E> },
}

impl<'de, T, E> Deserialize<'de> for Validatable<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Empty => Self::Empty,
            Repr::Unchecked(value) => Self::Unchecked(value),
            Repr::Valid(value) => Self::Valid(value),
            Repr::Invalid { errors, .. } if errors.is_empty() => {
                return Err(serde::de::Error::custom(
                    "invalid state requires at least one error",
                ));
            }
            Repr::Invalid { value, errors } => Self::Invalid { value, errors },
        })
    }
}

impl<T, E> Default for Validatable<T, E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T, E> Validatable<T, E> {
    /// Creates an empty field.
    pub fn empty() -> Self {
        Self::Empty
    }

    /// Creates a field seeded with a known-good value.
    pub fn valid(value: T) -> Self {
        Self::Valid(value)
    }

    /// Creates a field holding fresh, not yet validated input.
    pub fn unchecked(value: T) -> Self {
        Self::Unchecked(value)
    }

    /// Forgets any validation outcome, keeping the value.
    ///
    /// An invalid state without a value has nothing to keep and becomes `Empty`.
    pub fn uncheck(self) -> Self {
        match self {
            Self::Empty | Self::Invalid { value: None, .. } => Self::Empty,
            Self::Unchecked(value)
            | Self::Valid(value)
            | Self::Invalid {
                value: Some(value), ..
            } => Self::Unchecked(value),
        }
    }

    /// Returns the value only when it is valid.
    pub fn valid_value(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// Owned variant of [`valid_value`](Self::valid_value).
    pub fn into_valid_value(self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the error set only when the value is invalid.
    pub fn errors(&self) -> Option<&Errors<E>> {
        match self {
            Self::Invalid { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Owned variant of [`errors`](Self::errors).
    pub fn into_errors(self) -> Option<Errors<E>> {
        match self {
            Self::Invalid { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Returns the underlying value regardless of validation outcome.
    ///
    /// `None` for `Empty` and for an invalid state whose cast failed.
    pub fn raw_value(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Unchecked(value) | Self::Valid(value) => Some(value),
            Self::Invalid { value, .. } => value.as_ref(),
        }
    }

    /// Owned variant of [`raw_value`](Self::raw_value).
    pub fn into_raw_value(self) -> Option<T> {
        match self {
            Self::Empty => None,
            Self::Unchecked(value) | Self::Valid(value) => Some(value),
            Self::Invalid { value, .. } => value,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_unchecked(&self) -> bool {
        matches!(self, Self::Unchecked(_))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    /// Transforms the carried value, keeping the state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validatable<U, E> {
        match self {
            Self::Empty => Validatable::Empty,
            Self::Unchecked(value) => Validatable::Unchecked(f(value)),
            Self::Valid(value) => Validatable::Valid(f(value)),
            Self::Invalid { value, errors } => Validatable::Invalid {
                value: value.map(f),
                errors,
            },
        }
    }

    /// Transforms every error message of an invalid state.
    ///
    /// Messages that collapse onto the same output are merged.
    pub fn map_errors<F: Ord>(self, f: impl FnMut(E) -> F) -> Validatable<T, F> {
        match self {
            Self::Empty => Validatable::Empty,
            Self::Unchecked(value) => Validatable::Unchecked(value),
            Self::Valid(value) => Validatable::Valid(value),
            Self::Invalid { value, errors } => Validatable::Invalid {
                value,
                errors: errors.into_iter().map(f).collect(),
            },
        }
    }

    /// Borrows the value and errors without consuming the field.
    pub fn as_ref(&self) -> Validatable<&T, &E>
    where
        E: Ord,
    {
        match self {
            Self::Empty => Validatable::Empty,
            Self::Unchecked(value) => Validatable::Unchecked(value),
            Self::Valid(value) => Validatable::Valid(value),
            Self::Invalid { value, errors } => Validatable::Invalid {
                value: value.as_ref(),
                errors: errors.iter().collect(),
            },
        }
    }
}
