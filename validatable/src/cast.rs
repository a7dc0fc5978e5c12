//! Validators that change the value's type and may produce no value.

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::Validatable;

impl<T, E: Ord> Validatable<T, E> {
    /// Runs a fallible conversion on raw input.
    ///
    /// Success yields `Valid`. Failure yields an `Invalid` with no value,
    /// because the input never became a `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use validatable::Validatable;
    ///
    /// let port: Validatable<u16> = Validatable::cast("80a", str::parse::<u16>, |e| e.to_string());
    /// assert_eq!(port.raw_value(), None);
    /// ```
    pub fn cast<A, X>(input: A, conversion: impl FnOnce(A) -> Result<T, X>, error_from: impl FnOnce(X) -> E) -> Self {
        match conversion(input) {
            Ok(value) => Self::Valid(value),
            Err(err) => Self::Invalid {
                value: None,
                errors: BTreeSet::from([error_from(err)]),
            },
        }
    }
}

/// Parses `input` with [`FromStr`], reporting `error` on failure.
pub fn parse<T: FromStr, E: Ord>(error: impl Into<E>, input: &str) -> Validatable<T, E> {
    Validatable::cast(input, str::parse::<T>, |_| error.into())
}

/// Parses a whole number.
pub fn is_int<E: Ord>(error: impl Into<E>, input: &str) -> Validatable<i64, E> {
    parse(error, input)
}

/// Parses a floating point number.
pub fn is_float<E: Ord>(error: impl Into<E>, input: &str) -> Validatable<f64, E> {
    parse(error, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Errors;

    fn errs(messages: &[&str]) -> Errors {
        messages.iter().map(|m| (*m).to_string()).collect()
    }

    #[test]
    fn test_is_int_rejects_text() {
        let field: Validatable<i64> = is_int("err", "abc");
        assert_eq!(
            field,
            Validatable::Invalid {
                value: None,
                errors: errs(&["err"]),
            }
        );
    }

    #[test]
    fn test_is_int_accepts_number() {
        let field: Validatable<i64> = is_int("err", "42");
        assert_eq!(field, Validatable::valid(42));
        let negative: Validatable<i64> = is_int("err", "-7");
        assert_eq!(negative, Validatable::valid(-7));
    }

    #[test]
    fn test_is_float() {
        let field: Validatable<f64> = is_float("err", "2.5");
        assert_eq!(field.valid_value(), Some(&2.5));
        let bad: Validatable<f64> = is_float("err", "two");
        assert!(bad.is_invalid());
        assert_eq!(bad.raw_value(), None);
    }

    #[test]
    fn test_cast_error_from_conversion() {
        let field: Validatable<u8> =
            Validatable::cast("300", str::parse::<u8>, |e| format!("age: {e}"));
        let messages = field.errors().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages.iter().next().unwrap().starts_with("age: "));
    }

    #[test]
    fn test_cast_then_satisfies() {
        let adult: Validatable<i64> = is_int("not a number", "12");
        let adult = adult.satisfies(|n| *n >= 13, "too young");
        assert_eq!(
            adult,
            Validatable::Invalid {
                value: Some(12),
                errors: errs(&["too young"]),
            }
        );

        let garbage: Validatable<i64> = is_int("not a number", "x");
        let garbage = garbage.satisfies(|n| *n >= 13, "too young");
        assert_eq!(garbage.errors(), Some(&errs(&["not a number"])));
    }
}
