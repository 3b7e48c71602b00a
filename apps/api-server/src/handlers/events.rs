//! Notification event handlers.

use actix_web::{HttpResponse, web};

use ripple_core::domain::{EventKind, EventLog};
use ripple_shared::dto::MarkReadRequest;
use ripple_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/events
///
/// The caller's notification log. Callers with no notifications yet get
/// an empty log rather than a 404.
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let caller = identity.into_caller();
    let log = state
        .notifications
        .events_for(caller.id)
        .await?
        .unwrap_or_else(|| EventLog::new(caller.id));
    Ok(HttpResponse::Ok().json(ApiResponse::ok(log)))
}

/// POST /api/events/read
///
/// Mark all entries for (post, kind) read, which reopens the
/// notification window for that pair.
pub async fn mark_read(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<MarkReadRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let kind = parse_kind(&req.kind)?;
    state
        .notifications
        .mark_read(identity.caller().id, req.post_id, kind)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({ "marked": true }))))
}

fn parse_kind(raw: &str) -> Result<EventKind, AppError> {
    match raw {
        "LIKE" => Ok(EventKind::Like),
        "COMMENT" => Ok(EventKind::Comment),
        other => Err(AppError::BadRequest(format!(
            "Unknown event kind: {other}"
        ))),
    }
}
