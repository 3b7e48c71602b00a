//! Post handlers: CRUD, likes, comments, search, and the live comment
//! stream.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::input::{CommentInput, PostInput, SearchFilter};
use ripple_core::ports::comment_channel;
use ripple_shared::dto::{BulkDeleteRequest, BulkDeleteResponse};
use ripple_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/search
pub async fn search(
    state: web::Data<AppState>,
    filter: web::Query<SearchFilter>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.search(&filter).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create(body.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(path.into_inner(), body.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .delete(path.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts/batch-delete
pub async fn delete_many(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<BulkDeleteRequest>,
) -> AppResult<HttpResponse> {
    let deleted = state
        .posts
        .delete_many(&body.post_ids, identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        BulkDeleteResponse { deleted },
        "Delete Successfully!",
    )))
}

/// POST /api/posts/{id}/likes
pub async fn add_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .add_like(path.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}/likes
pub async fn remove_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .remove_like(path.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts/{id}/likes/toggle
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .toggle_like(path.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentInput>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .add_comment(path.into_inner(), body.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}/comments/{comment_id}
pub async fn update_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentInput>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let post = state
        .posts
        .update_comment(post_id, comment_id, body.into_inner(), identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let post = state
        .posts
        .delete_comment(post_id, comment_id, identity.caller())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// GET /api/posts/{id}/comments/stream
///
/// Server-sent events. Each new comment on the post arrives as one
/// `data:` frame carrying the JSON payload published on the post's
/// comment channel.
pub async fn comment_stream(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    // Reject streams for unknown posts up front.
    state.posts.get(post_id).await?;

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    state
        .pubsub
        .subscribe(
            &comment_channel(post_id),
            Box::new(move |msg| {
                let tx = tx.clone();
                Box::pin(async move {
                    // A closed receiver means the client went away; report
                    // it so the listener shuts down.
                    tx.send(msg.payload).is_ok()
                })
            }),
        )
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        let payload = rx.recv().await?;
        let frame = web::Bytes::from(format!("data: {payload}\n\n"));
        Some((Ok::<_, actix_web::Error>(frame), rx))
    });

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream))
}
