//! JSON bodies exchanged with the sign-up backend.

use serde::Deserialize;
use serde::Serialize;

/// Path of the username availability check.
pub const VALIDATE_PATH: &str = "/validate";

/// Path of the account creation call.
pub const SIGNUP_PATH: &str = "/signup";

/// Body of `POST /validate`.
///
/// The response is a JSON array of error messages, empty when the
/// username is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub username: String,
}

/// Body of `POST /signup`.
///
/// `nickname` is left out of the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// Name to greet the new user by.
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Successful `POST /signup` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Welcome {
    pub message: String,
}
