//! Input validation functions
//!
//! Validation rules applied to registration and profile-update input
//! before anything touches the credential store.

use regex_lite::Regex;
use std::sync::OnceLock;
use validator::ValidateEmail;

/// Compiled once; validation runs on every registration and update.
fn username_regex() -> &'static Regex {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    USERNAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap())
}

/// Validate username format
///
/// Usernames are the unique login identifier: at least 5 characters,
/// alphanumeric only.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < 5 {
        return Err("Username must be at least 5 characters".to_string());
    }
    if username.len() > 64 {
        return Err("Username too long".to_string());
    }
    if !username_regex().is_match(username) {
        return Err("Username may only contain letters and digits".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    if password.contains(char::is_whitespace) {
        return Err("Password cannot contain spaces".to_string());
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}
