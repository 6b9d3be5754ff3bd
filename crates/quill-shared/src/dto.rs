//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Body of create/update post requests. A missing `text` is taken as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostIdResponse {
    pub post_id: i64,
}

/// `{"status": "ok"}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// A post as shown to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub text: String,
    /// RFC 3339, second precision, UTC.
    pub time_updated: String,
}

impl PostResponse {
    pub fn new(id: i64, text: String, time_updated: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            time_updated: time_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPageResponse {
    pub page_num: i32,
    pub page_size: i32,
    pub posts: Vec<PostResponse>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub id: i64,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Public profile fields, used both to read and to replace a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn post_time_is_rfc3339_seconds_utc() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let post = PostResponse::new(1, "hi".to_string(), at);
        assert_eq!(post.time_updated, "2024-03-09T14:05:07Z");
    }

    #[test]
    fn sign_up_accepts_flat_profile_fields() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"username":"ada","password":"hunter2hunter2","email":"ada@example.com","birth_date":"1815-12-10"}"#,
        )
        .unwrap();

        assert_eq!(req.username, "ada");
        assert_eq!(req.profile.email.as_deref(), Some("ada@example.com"));
        assert_eq!(
            req.profile.birth_date,
            NaiveDate::from_ymd_opt(1815, 12, 10)
        );
        assert!(req.profile.phone.is_none());
    }

    #[test]
    fn empty_profile_serializes_to_empty_object() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
