use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewUser, User, UserPublic};
use crate::error::RepoError;

/// Authentication store - user credentials and public profiles.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Store a new user and return the assigned id.
    ///
    /// Fails with [`RepoError::Constraint`] when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<i64, RepoError>;

    /// Look a user up by credentials. Unknown user and wrong password both yield
    /// [`RepoError::NotFound`].
    async fn get_user(&self, username: &str, password: &str) -> Result<User, RepoError>;

    async fn get_user_data(&self, user_id: i64) -> Result<UserPublic, RepoError>;

    /// Replace the public profile of a user.
    async fn update_user(
        &self,
        user_id: i64,
        update: UserPublic,
        time_updated: DateTime<Utc>,
    ) -> Result<(), RepoError>;
}
