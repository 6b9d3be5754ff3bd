//! The caller's own public profile.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::domain::UserPublic;
use quill_shared::dto::{StatusResponse, UserProfile};

use crate::handlers::auth::profile_to_public;
use crate::middleware::auth::CallerId;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn public_to_profile(public: UserPublic) -> UserProfile {
    UserProfile {
        first_name: public.first_name,
        last_name: public.last_name,
        birth_date: public.birth_date,
        email: public.email,
        phone: public.phone,
    }
}

/// GET /users/me
pub async fn get_me(caller: CallerId, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let public = state.auth_store.get_user_data(caller.0).await?;

    tracing::info!(user_id = caller.0, "Profile fetched");
    Ok(HttpResponse::Ok().json(public_to_profile(public)))
}

/// PUT /users/me - replaces the whole profile.
pub async fn update_me(
    caller: CallerId,
    state: web::Data<AppState>,
    body: web::Json<UserProfile>,
) -> AppResult<HttpResponse> {
    state
        .auth_store
        .update_user(caller.0, profile_to_public(body.into_inner()), Utc::now())
        .await?;

    tracing::info!(user_id = caller.0, "Profile updated");
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
