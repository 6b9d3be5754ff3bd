//! PostgreSQL authentication store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, NotSet, QueryFilter, Set, SqlErr,
};

use quill_core::domain::{NewUser, User, UserPublic};
use quill_core::error::RepoError;
use quill_core::ports::{AuthStore, PasswordService};

use super::credentials::{hash_password, verify_password};
use super::entity::user::{self, Entity as UserEntity};

/// [`AuthStore`] over the `users` table. Passwords are hashed before they reach the database.
pub struct PostgresAuthStore {
    db: DbConn,
    passwords: Arc<dyn PasswordService>,
}

impl PostgresAuthStore {
    pub fn new(db: DbConn, passwords: Arc<dyn PasswordService>) -> Self {
        Self { db, passwords }
    }
}

fn query_error(e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match e {
            DbErr::Conn(err) => RepoError::Connection(err.to_string()),
            DbErr::ConnectionAcquire(err) => RepoError::Connection(err.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

#[async_trait]
impl AuthStore for PostgresAuthStore {
    async fn create_user(&self, new_user: NewUser) -> Result<i64, RepoError> {
        let password_hash = hash_password(&self.passwords, new_user.password).await?;
        let now = Utc::now();
        let public = new_user.public;

        let model = user::ActiveModel {
            id: NotSet,
            username: Set(new_user.username),
            password_hash: Set(password_hash),
            first_name: Set(public.first_name),
            last_name: Set(public.last_name),
            birth_date: Set(public.birth_date),
            email: Set(public.email),
            phone: Set(public.phone),
            time_created: Set(now.into()),
            time_updated: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match query_error(e) {
            RepoError::Constraint(_) => RepoError::Constraint("username already taken".to_string()),
            other => other,
        })?;

        tracing::debug!(user_id = model.id, "User created");
        Ok(model.id)
    }

    async fn get_user(&self, username: &str, password: &str) -> Result<User, RepoError> {
        let model = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        let valid = verify_password(&self.passwords, password, &model.password_hash).await?;
        if !valid {
            return Err(RepoError::NotFound);
        }

        Ok(model.into())
    }

    async fn get_user_data(&self, user_id: i64) -> Result<UserPublic, RepoError> {
        UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(|m| m.public())
            .ok_or(RepoError::NotFound)
    }

    async fn update_user(
        &self,
        user_id: i64,
        update: UserPublic,
        time_updated: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let time_updated: sea_orm::prelude::DateTimeWithTimeZone = time_updated.into();

        let result = UserEntity::update_many()
            .col_expr(user::Column::FirstName, Expr::value(update.first_name))
            .col_expr(user::Column::LastName, Expr::value(update.last_name))
            .col_expr(user::Column::BirthDate, Expr::value(update.birth_date))
            .col_expr(user::Column::Email, Expr::value(update.email))
            .col_expr(user::Column::Phone, Expr::value(update.phone))
            .col_expr(user::Column::TimeUpdated, Expr::value(time_updated))
            .filter(user::Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
