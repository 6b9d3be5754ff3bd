use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};

use quill_core::domain::{NewUser, UserPublic};
use quill_core::error::RepoError;
use quill_core::ports::{AuthStore, PasswordService};

use crate::auth::Argon2PasswordService;
use crate::database::entity::user;
use crate::database::postgres_repo::PostgresAuthStore;

fn passwords() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}

fn user_row(id: i64, username: &str, password_hash: String) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        username: username.to_owned(),
        password_hash,
        first_name: Some("Ada".to_owned()),
        last_name: None,
        birth_date: NaiveDate::from_ymd_opt(1815, 12, 10),
        email: Some("ada@example.com".to_owned()),
        phone: None,
        time_created: now.into(),
        time_updated: now.into(),
    }
}

#[tokio::test]
async fn test_create_user_returns_generated_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_row(17, "ada", "$argon2id$stub".to_owned())]])
        .into_connection();

    let store = PostgresAuthStore::new(db, passwords());
    let id = store
        .create_user(NewUser::new("ada", "analytical-engine"))
        .await
        .unwrap();

    assert_eq!(id, 17);
}

#[tokio::test]
async fn test_get_user_checks_password() {
    let passwords = passwords();
    let hash = passwords.hash("analytical-engine").unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            vec![user_row(17, "ada", hash.clone())],
            vec![user_row(17, "ada", hash)],
        ])
        .into_connection();
    let store = PostgresAuthStore::new(db, passwords);

    let user = store.get_user("ada", "analytical-engine").await.unwrap();
    assert_eq!(user.id, 17);
    assert_eq!(user.public.email.as_deref(), Some("ada@example.com"));

    let err = store.get_user("ada", "difference-engine").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_get_user_unknown_username() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();
    let store = PostgresAuthStore::new(db, passwords());

    let err = store.get_user("nobody", "whatever").await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_get_user_data_is_public_projection() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_row(17, "ada", "secret-hash".to_owned())]])
        .into_connection();
    let store = PostgresAuthStore::new(db, passwords());

    let public = store.get_user_data(17).await.unwrap();

    assert_eq!(
        public,
        UserPublic {
            first_name: Some("Ada".to_owned()),
            last_name: None,
            birth_date: NaiveDate::from_ymd_opt(1815, 12, 10),
            email: Some("ada@example.com".to_owned()),
            phone: None,
        }
    );
}

#[tokio::test]
async fn test_update_user_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();
    let store = PostgresAuthStore::new(db, passwords());

    store
        .update_user(17, UserPublic::default(), Utc::now())
        .await
        .unwrap();

    let err = store
        .update_user(18, UserPublic::default(), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_query_failure_is_reported() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![sea_orm::DbErr::Query(RuntimeErr::Internal(
            "relation \"users\" does not exist".to_owned(),
        ))])
        .into_connection();
    let store = PostgresAuthStore::new(db, passwords());

    let err = store.get_user_data(1).await.unwrap_err();
    assert!(matches!(err, RepoError::Query(msg) if msg.contains("does not exist")));
}
