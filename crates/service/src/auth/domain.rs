use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sign-in input; validated with the same rules as registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must have at least 8 characters"))]
    pub password: String,
}

/// Issued bearer token and its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub token: String,
    pub expires_in: u64,
}
