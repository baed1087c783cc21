//! User entity - an account that uploads, comments, and reacts

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

pub const DEFAULT_AVATAR_URL: &str = "https://randomuser.me/api/portraits/lego/1.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub subscribers: i64,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile changes requested by the account owner.
///
/// `Some` replaces the stored value, `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub avatar: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar.is_none()
    }
}

impl User {
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            avatar: DEFAULT_AVATAR_URL.to_string(),
            subscribers: 0,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merge(&mut self, patch: UserPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        self.updated_at = Utc::now();
    }
}
