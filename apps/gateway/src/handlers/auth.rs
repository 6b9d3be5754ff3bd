//! Sign-up and sign-in.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewUser, UserPublic};
use quill_core::error::RepoError;
use quill_shared::dto::{
    AuthResponse, SignInRequest, SignUpRequest, SignUpResponse, UserProfile,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn profile_to_public(profile: UserProfile) -> UserPublic {
    UserPublic {
        first_name: profile.first_name,
        last_name: profile.last_name,
        birth_date: profile.birth_date,
        email: profile.email,
        phone: profile.phone,
    }
}

/// POST /auth/sign-up
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.username.trim().is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            "password must be at least 8 characters",
        ));
    }

    let new_user =
        NewUser::new(req.username, req.password).with_public(profile_to_public(req.profile));
    let id = state.auth_store.create_user(new_user).await?;

    tracing::info!(user_id = id, "User signed up");
    Ok(HttpResponse::Created().json(SignUpResponse { id }))
}

/// POST /auth/sign-in
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = match state.auth_store.get_user(&req.username, &req.password).await {
        Ok(user) => user,
        Err(RepoError::NotFound) => {
            return Err(AppError::Unauthorized(
                "invalid username or password".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = user.id, "User signed in");
    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    }))
}
