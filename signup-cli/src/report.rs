//! Plain-text rendering of the form state.

use signup_lib::form::{Field, SignupForm};
use validatable::Validatable;

/// One line per field, followed by its error messages.
pub fn render(form: &SignupForm) -> String {
    let mut out = String::new();
    for field in Field::ALL {
        let (mark, errors) = match form.status(field) {
            Validatable::Empty => ("-", None),
            Validatable::Unchecked(()) => ("?", None),
            Validatable::Valid(()) => ("ok", None),
            Validatable::Invalid { errors, .. } => ("!!", Some(errors)),
        };
        out.push_str(&format!("{:>2} {}\n", mark, field));
        for error in errors.into_iter().flatten() {
            out.push_str(&format!("     {}\n", error));
        }
    }
    out
}
