//! Profile handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::input::ProfileInput;
use ripple_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/profiles
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let profiles = state.profiles.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(profiles)))
}

/// GET /api/profiles/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let profile = state.profiles.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile)))
}

/// POST /api/profiles
///
/// Creates the caller's profile on first call, updates it afterwards.
pub async fn upsert(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileInput>,
) -> AppResult<HttpResponse> {
    let profile = state
        .profiles
        .upsert(body.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile)))
}

/// DELETE /api/profiles/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let profile = state
        .profiles
        .delete(path.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile)))
}
