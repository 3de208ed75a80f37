//! Service layer providing business operations on top of models.
//! - Separates business logic from data access (repository traits per entity).
//! - Owns credential hashing, token issuance and the ownership guard.
//! - Every failure is a `ServiceError`; the HTTP layer maps it to a status.

pub mod errors;
pub mod credentials;
pub mod token;
pub mod ownership;
pub mod pagination;
pub mod domain;
pub mod users;
pub mod addresses;
pub mod auth;
pub mod storage;
#[cfg(test)]
pub mod test_support;
