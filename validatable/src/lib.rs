//! Validation state for form fields.
//!
//! A [`Validatable`] tracks whether a value has been supplied, whether it has
//! been checked since it last changed, and what the check found. Validators
//! are plain consuming methods, so a field's validation pass reads as a chain:
//!
//! ```
//! use validatable::Validatable;
//!
//! let password: Validatable<String> = Validatable::unchecked("correct horse".into())
//!     .at_least(8, "password must be at least 8 characters");
//!
//! let confirmation: Validatable<String> = Validatable::unchecked("correct horse".into())
//!     .with(&password, |pw, field| field.equals(pw, "passwords do not match"));
//!
//! assert!(confirmation.is_valid());
//! ```
//!
//! Failures are data: nothing here panics or returns `Result`. An invalid
//! field carries a set of messages, and errors found elsewhere (a server-side
//! uniqueness check, say) can be merged in with [`Validatable::add_errors`].

mod cast;
mod combinators;
mod rules;
mod state;
mod strings;

pub use cast::{is_float, is_int, parse};
pub use rules::Rules;
pub use state::{Errors, Validatable};
pub use strings::{is_email_address, is_letters};
