//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
///
/// `password_hash` is deliberately not part of the row; it is only ever
/// read through `get_password_hash`.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub subscribers: i64,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
