//! Validator application: single predicates, cross-field checks, optional
//! fields and externally supplied errors.

use std::collections::BTreeSet;

use crate::Validatable;

impl<T, E: Ord> Validatable<T, E> {
    /// Applies one predicate to the carried value.
    ///
    /// - `Empty` and a valueless `Invalid` are returned unchanged.
    /// - A passing predicate yields `Valid`, dropping any earlier errors.
    /// - A failing predicate yields `Invalid`, adding `error` to earlier errors.
    ///
    /// # Example
    ///
    /// ```
    /// use validatable::Validatable;
    ///
    /// let age: Validatable<u32> = Validatable::unchecked(12).satisfies(|n| *n >= 13, "too young");
    /// assert!(age.is_invalid());
    /// ```
    pub fn satisfies(self, predicate: impl FnOnce(&T) -> bool, error: impl Into<E>) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Unchecked(value) | Self::Valid(value) => {
                if predicate(&value) {
                    Self::Valid(value)
                } else {
                    Self::Invalid {
                        value: Some(value),
                        errors: BTreeSet::from([error.into()]),
                    }
                }
            }
            Self::Invalid {
                value: Some(value),
                mut errors,
            } => {
                if predicate(&value) {
                    Self::Valid(value)
                } else {
                    errors.insert(error.into());
                    Self::Invalid {
                        value: Some(value),
                        errors,
                    }
                }
            }
            invalid @ Self::Invalid { value: None, .. } => invalid,
        }
    }

    /// Requires the value to equal `reference`.
    pub fn equals(self, reference: &T, error: impl Into<E>) -> Self
    where
        T: PartialEq,
    {
        self.satisfies(|value| value == reference, error)
    }

    /// Validates this field against another field's value.
    ///
    /// The validator only runs while `reference` is valid. Any other
    /// reference state unchecks this field, since it cannot be judged yet.
    ///
    /// # Example
    ///
    /// ```
    /// use validatable::Validatable;
    ///
    /// let password: Validatable<String> = Validatable::valid("hunter22".into());
    /// let confirmation: Validatable<String> = Validatable::unchecked("hunter23".into())
    ///     .with(&password, |pw, field| field.equals(pw, "passwords do not match"));
    /// assert!(confirmation.is_invalid());
    /// ```
    pub fn with<A, R>(self, reference: &Validatable<A, R>, validator: impl FnOnce(&A, Self) -> Self) -> Self {
        match reference {
            Validatable::Valid(value) => validator(value, self),
            Validatable::Empty | Validatable::Unchecked(_) | Validatable::Invalid { .. } => self.uncheck(),
        }
    }

    /// Merges errors obtained elsewhere, such as from a server-side check.
    ///
    /// An empty set changes nothing, and an `Empty` field stays empty.
    pub fn add_errors(self, errors: impl IntoIterator<Item = E>) -> Self {
        let mut incoming = errors.into_iter().peekable();
        if incoming.peek().is_none() {
            return self;
        }

        match self {
            Self::Empty => Self::Empty,
            Self::Unchecked(value) | Self::Valid(value) => Self::Invalid {
                value: Some(value),
                errors: incoming.collect(),
            },
            Self::Invalid { value, mut errors } => {
                errors.extend(incoming);
                Self::Invalid { value, errors }
            }
        }
    }
}

impl<A, E: Ord> Validatable<Option<A>, E> {
    /// Runs `validator` only when the optional value is present.
    ///
    /// States holding `Some(a)` are unwrapped, validated and rewrapped.
    /// States holding `None`, `Empty` and a valueless `Invalid` pass through.
    pub fn maybe(self, validator: impl FnOnce(Validatable<A, E>) -> Validatable<A, E>) -> Self {
        match self {
            Self::Unchecked(Some(value)) => validator(Validatable::Unchecked(value)).map(Some),
            Self::Valid(Some(value)) => validator(Validatable::Valid(value)).map(Some),
            Self::Invalid {
                value: Some(Some(value)),
                errors,
            } => validator(Validatable::Invalid {
                value: Some(value),
                errors,
            })
            .map(Some),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Errors;

    type Field = Validatable<String>;

    fn errs(messages: &[&str]) -> Errors {
        messages.iter().map(|m| (*m).to_string()).collect()
    }

    fn invalid(value: &str, messages: &[&str]) -> Field {
        Field::Invalid {
            value: Some(value.to_string()),
            errors: errs(messages),
        }
    }

    fn short(value: &String) -> bool {
        value.len() < 5
    }

    #[test]
    fn test_satisfies_ignores_empty() {
        assert_eq!(Field::empty().satisfies(short, "too long"), Field::empty());
    }

    #[test]
    fn test_satisfies_passing_unchecked() {
        let field = Field::unchecked("abc".into()).satisfies(short, "too long");
        assert_eq!(field, Field::valid("abc".into()));
    }

    #[test]
    fn test_satisfies_failing_unchecked() {
        let field = Field::unchecked("abcdef".into()).satisfies(short, "too long");
        assert_eq!(field, invalid("abcdef", &["too long"]));
    }

    #[test]
    fn test_satisfies_passing_valid() {
        let field = Field::valid("abc".into()).satisfies(short, "too long");
        assert_eq!(field, Field::valid("abc".into()));
    }

    #[test]
    fn test_satisfies_failing_valid() {
        let field = Field::valid("abcdef".into()).satisfies(short, "too long");
        assert_eq!(field, invalid("abcdef", &["too long"]));
    }

    #[test]
    fn test_satisfies_accumulates_on_invalid() {
        let field = invalid("abcdef", &["first"]).satisfies(short, "too long");
        assert_eq!(field, invalid("abcdef", &["first", "too long"]));
    }

    #[test]
    fn test_satisfies_recovery_clears_all_errors() {
        let field = invalid("abc", &["first", "second"]).satisfies(short, "too long");
        assert_eq!(field, Field::valid("abc".into()));
    }

    #[test]
    fn test_satisfies_skips_valueless_invalid() {
        let field: Validatable<i64> = Validatable::Invalid {
            value: None,
            errors: errs(&["not a number"]),
        };
        let after = field.clone().satisfies(|n| *n > 0, "must be positive");
        assert_eq!(after, field);
    }

    #[test]
    fn test_equals() {
        let ok = Field::unchecked("same".into()).equals(&"same".to_string(), "mismatch");
        assert_eq!(ok, Field::valid("same".into()));

        let bad = Field::unchecked("other".into()).equals(&"same".to_string(), "mismatch");
        assert_eq!(bad, invalid("other", &["mismatch"]));
    }

    #[test]
    fn test_with_empty_reference_unchecks() {
        let reference = Field::empty();
        let field = invalid("x", &["mismatch"]);
        let expected = field.clone().uncheck();
        let out = field.with(&reference, |pw, f| f.equals(pw, "mismatch"));
        assert_eq!(out, expected);
    }

    #[test]
    fn test_with_unchecked_or_invalid_reference_unchecks() {
        let field = Field::valid("x".into());
        let out = field
            .clone()
            .with(&Field::unchecked("x".into()), |pw, f| f.equals(pw, "mismatch"));
        assert_eq!(out, Field::unchecked("x".into()));

        let out = field.with(&invalid("x", &["short"]), |pw, f| f.equals(pw, "mismatch"));
        assert_eq!(out, Field::unchecked("x".into()));
    }

    #[test]
    fn test_with_valid_reference_runs_validator() {
        let reference = Field::valid("secret".into());
        let field = Field::unchecked("secret".into());
        let direct = field.clone().equals(&"secret".to_string(), "mismatch");
        let out = field.with(&reference, |pw, f| f.equals(pw, "mismatch"));
        assert_eq!(out, direct);
        assert!(out.is_valid());
    }

    #[test]
    fn test_with_accepts_other_reference_types() {
        let minimum: Validatable<usize> = Validatable::valid(3);
        let field = Field::unchecked("ab".into()).with(&minimum, |min, f| {
            f.satisfies(|s| s.len() >= *min, "too short")
        });
        assert_eq!(field, invalid("ab", &["too short"]));
    }

    #[test]
    fn test_add_errors_empty_set_is_noop() {
        let states = [
            Field::empty(),
            Field::unchecked("a".into()),
            Field::valid("a".into()),
            invalid("a", &["bad"]),
        ];
        for state in states {
            assert_eq!(state.clone().add_errors(Vec::new()), state);
        }
    }

    #[test]
    fn test_add_errors_invalidates_valid() {
        let field = Field::valid("bob".into()).add_errors(errs(&["taken"]));
        assert_eq!(field, invalid("bob", &["taken"]));
    }

    #[test]
    fn test_add_errors_on_unchecked() {
        let field = Field::unchecked("bob".into()).add_errors(errs(&["taken"]));
        assert_eq!(field, invalid("bob", &["taken"]));
    }

    #[test]
    fn test_add_errors_keeps_empty() {
        assert_eq!(Field::empty().add_errors(errs(&["taken"])), Field::empty());
    }

    #[test]
    fn test_add_errors_merges_into_invalid() {
        let field = invalid("bob", &["short"]).add_errors(errs(&["taken", "short"]));
        assert_eq!(field, invalid("bob", &["short", "taken"]));
    }

    #[test]
    fn test_maybe_passes_none_through() {
        let field: Validatable<Option<String>> = Validatable::valid(None);
        let out = field.maybe(|f| f.satisfies(short, "too long"));
        assert_eq!(out, Validatable::valid(None));

        let unchecked: Validatable<Option<String>> = Validatable::unchecked(None);
        let out = unchecked.maybe(|f| f.satisfies(short, "too long"));
        assert_eq!(out, Validatable::unchecked(None));
    }

    #[test]
    fn test_maybe_validates_present_value() {
        let field: Validatable<Option<String>> = Validatable::unchecked(Some("abcdef".into()));
        let out = field.maybe(|f| f.satisfies(short, "too long"));
        assert_eq!(
            out,
            Validatable::Invalid {
                value: Some(Some("abcdef".to_string())),
                errors: errs(&["too long"]),
            }
        );

        let field: Validatable<Option<String>> = Validatable::unchecked(Some("abc".into()));
        let out = field.maybe(|f| f.satisfies(short, "too long"));
        assert_eq!(out, Validatable::valid(Some("abc".to_string())));
    }

    #[test]
    fn test_maybe_keeps_prior_errors_on_failure() {
        let field: Validatable<Option<String>> = Validatable::Invalid {
            value: Some(Some("abcdef".into())),
            errors: errs(&["taken"]),
        };
        let out = field.maybe(|f| f.satisfies(short, "too long"));
        assert_eq!(out.errors(), Some(&errs(&["taken", "too long"])));
    }

    #[test]
    fn test_maybe_passes_valueless_invalid_through() {
        let field: Validatable<Option<String>> = Validatable::Invalid {
            value: None,
            errors: errs(&["bad input"]),
        };
        assert_eq!(field.clone().maybe(|f| f.satisfies(short, "too long")), field);

        let field: Validatable<Option<String>> = Validatable::Invalid {
            value: Some(None),
            errors: errs(&["taken"]),
        };
        assert_eq!(field.clone().maybe(|f| f.satisfies(short, "too long")), field);
    }

    #[test]
    fn test_map_keeps_unchecked_state() {
        let field = Field::unchecked("abc".into()).map(|s| s.len());
        assert_eq!(field, Validatable::unchecked(3));
    }

    #[test]
    fn test_maybe_ignores_empty() {
        let field: Validatable<Option<String>> = Validatable::empty();
        assert_eq!(field.maybe(|f| f.satisfies(short, "too long")), Validatable::empty());
    }
}
