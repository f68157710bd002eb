//! Authentication module
//!
//! Provides JWT-based authentication with argon2 password hashing:
//! credential verification against the user store, token issuance and
//! validation, and the request extractor that turns a bearer token into
//! an authenticated identity.

mod error;
mod jwt;
mod middleware;
mod password;
mod verifier;

pub use error::AuthError;
pub use jwt::{Claims, TokenService};
pub use middleware::AuthUser;
pub use password::PasswordService;
pub use verifier::CredentialVerifier;
