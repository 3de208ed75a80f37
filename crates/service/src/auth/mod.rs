//! Auth module: credential sign-in on top of the users service.

pub mod domain;
pub mod service;

pub use service::AuthService;
