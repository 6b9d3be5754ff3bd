use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// User entity - credentials plus the public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub public: UserPublic,
    pub time_created: DateTime<Utc>,
    pub time_updated: DateTime<Utc>,
}

/// The part of a user that may be shown to anyone. Never carries credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A user that has not been stored yet. The password is plain text until the store hashes it.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub public: UserPublic,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            public: UserPublic::default(),
        }
    }

    pub fn with_public(mut self, public: UserPublic) -> Self {
        self.public = public;
        self
    }
}
