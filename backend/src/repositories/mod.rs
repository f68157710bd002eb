//! Database repositories
//!
//! Data access layer for the user and movie stores.

pub mod movie;
pub mod user;

pub use movie::MovieRepository;
pub use user::{UpdateUser, UserRepository};
