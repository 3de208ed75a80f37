//! Users module: domain types, repository abstraction, SeaORM repository and
//! the business service (email uniqueness, password hashing).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::UsersService;
