//! SeaORM entities and connection helpers.
//!
//! Entities carry their own small write helpers (`create`) so the service
//! layer never has to assemble `ActiveModel`s by hand.

pub mod errors;
pub mod db;
pub mod user;
pub mod address;
