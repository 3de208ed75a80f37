use serde::{Deserialize, Serialize};
use validator::Validate;

use models::{address, user};

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must have at least 8 characters"))]
    pub password: String,
}

/// Partial update; absent fields stay as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must have at least 8 characters"))]
    pub password: Option<String>,
}

/// A user together with every address it owns.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithAddresses {
    #[serde(flatten)]
    pub user: user::Model,
    pub addresses: Vec<address::Model>,
}
