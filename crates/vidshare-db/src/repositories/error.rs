//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use vidshare_core::DomainError;

const USERNAME_KEY: &str = "users_username_key";
const EMAIL_KEY: &str = "users_email_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Unique violations on the users table name the field that clashed
pub fn map_user_write_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(USERNAME_KEY) => DomainError::UsernameAlreadyExists,
                Some(EMAIL_KEY) => DomainError::EmailAlreadyExists,
                _ => DomainError::DatabaseError(db_err.message().to_string()),
            };
        }
    }
    map_db_error(e)
}

/// Check for a foreign key violation and return the caller's error, or fall back
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing();
        }
    }
    map_db_error(e)
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
