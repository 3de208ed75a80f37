//! Addresses module: every read is scoped to the caller and every mutation
//! passes the ownership guard first.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::AddressesService;
