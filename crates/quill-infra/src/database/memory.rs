//! In-memory authentication store - used when `DATABASE_URL` is not set.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use quill_core::domain::{NewUser, User, UserPublic};
use quill_core::error::RepoError;
use quill_core::ports::{AuthStore, PasswordService};

use super::credentials::{hash_password, verify_password};

#[derive(Default)]
struct Users {
    last_id: i64,
    by_id: HashMap<i64, User>,
}

/// Same contract as the PostgreSQL store, kept in a HashMap.
/// Note: Data is lost on process restart.
pub struct InMemoryAuthStore {
    users: RwLock<Users>,
    passwords: Arc<dyn PasswordService>,
}

impl InMemoryAuthStore {
    pub fn new(passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            users: RwLock::new(Users::default()),
            passwords,
        }
    }
}

#[async_trait]
impl AuthStore for InMemoryAuthStore {
    async fn create_user(&self, new_user: NewUser) -> Result<i64, RepoError> {
        let password_hash = hash_password(&self.passwords, new_user.password).await?;

        let mut users = self.users.write().await;
        if users.by_id.values().any(|u| u.username == new_user.username) {
            return Err(RepoError::Constraint("username already taken".to_string()));
        }

        users.last_id += 1;
        let id = users.last_id;
        let now = Utc::now();
        users.by_id.insert(
            id,
            User {
                id,
                username: new_user.username,
                password_hash,
                public: new_user.public,
                time_created: now,
                time_updated: now,
            },
        );

        Ok(id)
    }

    async fn get_user(&self, username: &str, password: &str) -> Result<User, RepoError> {
        let user = {
            let users = self.users.read().await;
            users
                .by_id
                .values()
                .find(|u| u.username == username)
                .cloned()
                .ok_or(RepoError::NotFound)?
        };

        let valid = verify_password(&self.passwords, password, &user.password_hash).await?;

        if valid { Ok(user) } else { Err(RepoError::NotFound) }
    }

    async fn get_user_data(&self, user_id: i64) -> Result<UserPublic, RepoError> {
        let users = self.users.read().await;
        users
            .by_id
            .get(&user_id)
            .map(|u| u.public.clone())
            .ok_or(RepoError::NotFound)
    }

    async fn update_user(
        &self,
        user_id: i64,
        update: UserPublic,
        time_updated: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let mut users = self.users.write().await;
        let user = users.by_id.get_mut(&user_id).ok_or(RepoError::NotFound)?;
        user.public = update;
        user.time_updated = time_updated;
        Ok(())
    }
}
