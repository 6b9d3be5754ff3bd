//! Password hashing off the async executor.

use std::sync::Arc;

use quill_core::error::RepoError;
use quill_core::ports::PasswordService;

/// Hash `password` on the blocking pool.
pub(crate) async fn hash_password(
    passwords: &Arc<dyn PasswordService>,
    password: String,
) -> Result<String, RepoError> {
    let passwords = Arc::clone(passwords);
    tokio::task::spawn_blocking(move || passwords.hash(&password))
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?
        .map_err(|e| RepoError::Query(e.to_string()))
}

/// Check `password` against `hash` on the blocking pool.
pub(crate) async fn verify_password(
    passwords: &Arc<dyn PasswordService>,
    password: &str,
    hash: &str,
) -> Result<bool, RepoError> {
    let passwords = Arc::clone(passwords);
    let (password, hash) = (password.to_owned(), hash.to_owned());
    tokio::task::spawn_blocking(move || passwords.verify(&password, &hash))
        .await
        .map_err(|e| RepoError::Query(e.to_string()))?
        .map_err(|e| RepoError::Query(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    use quill_core::ports::AuthError;

    /// Records the thread each call ran on.
    #[derive(Default)]
    struct ThreadRecorder {
        threads: Mutex<Vec<ThreadId>>,
    }

    impl PasswordService for ThreadRecorder {
        fn hash(&self, password: &str) -> Result<String, AuthError> {
            self.threads.lock().unwrap().push(thread::current().id());
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
            self.threads.lock().unwrap().push(thread::current().id());
            Ok(hash == format!("hashed:{}", password))
        }
    }

    #[tokio::test]
    async fn test_hashing_runs_off_the_executor_thread() {
        let recorder = Arc::new(ThreadRecorder::default());
        let passwords: Arc<dyn PasswordService> = recorder.clone();

        let hash = hash_password(&passwords, "secret".to_string()).await.unwrap();
        assert_eq!(hash, "hashed:secret");
        assert!(verify_password(&passwords, "secret", &hash).await.unwrap());
        assert!(!verify_password(&passwords, "other", &hash).await.unwrap());

        let executor = thread::current().id();
        let threads = recorder.threads.lock().unwrap();
        assert_eq!(threads.len(), 3);
        assert!(threads.iter().all(|id| *id != executor));
    }

    #[tokio::test]
    async fn test_hashing_failure_is_query_error() {
        struct Broken;
        impl PasswordService for Broken {
            fn hash(&self, _: &str) -> Result<String, AuthError> {
                Err(AuthError::HashingError("out of memory".to_string()))
            }
            fn verify(&self, _: &str, _: &str) -> Result<bool, AuthError> {
                Err(AuthError::HashingError("bad hash".to_string()))
            }
        }

        let passwords: Arc<dyn PasswordService> = Arc::new(Broken);
        let err = hash_password(&passwords, "x".to_string()).await.unwrap_err();
        assert!(matches!(err, RepoError::Query(msg) if msg.contains("out of memory")));
    }
}
