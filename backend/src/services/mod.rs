//! Business logic services
//!
//! Services encapsulate business logic and coordinate between the auth
//! components and the repositories. Movie reads are pass-through
//! queries, so their handlers call the repository directly.

pub mod user;

pub use user::UserService;
