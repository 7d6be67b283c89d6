use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    auth::AuthUser,
    error::{ApiError, ApiResult},
    handlers::ensure_owner_or_admin,
    models::{ApiResponse, Comment, CommentRequest},
    pagination::{PageParams, PagedResponse},
};

/// get_comments
///
/// [Public Route] Paginated comments under a post, newest first.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments",
    params(("post_id" = Uuid, Path, description = "Post ID"), PageParams),
    responses((status = 200, description = "Comments", body = PagedResponse<Comment>))
)]
pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Comment>>> {
    params.validate()?;
    require_post(&state, post_id).await?;
    let content = state
        .repo
        .comments_by_post(post_id, params.limit(), params.offset())
        .await?;
    let total = state.repo.count_comments_by_post(post_id).await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_comment
///
/// [Public Route] Single comment, addressed through its post. A comment
/// reached under the wrong post is a 400, not a 404.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments/{id}",
    params(
        ("post_id" = Uuid, Path, description = "Post ID"),
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Found", body = Comment),
        (status = 400, description = "Comment does not belong to post"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path((post_id, id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Comment>> {
    let comment = load_comment_of_post(&state, post_id, id).await?;
    Ok(Json(comment))
}

/// add_comment
///
/// [Authenticated Route] Posts a new comment under an existing post.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Created", body = Comment),
        (status = 404, description = "Post not found")
    )
)]
pub async fn add_comment(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    require_post(&state, post_id).await?;
    let comment = state
        .repo
        .create_comment(post_id, user_id, &payload.body)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// update_comment
///
/// [Authenticated Route] Overwrites a comment body. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/posts/{post_id}/comments/{id}",
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Updated", body = Comment),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_comment(
    principal: AuthUser,
    State(state): State<AppState>,
    Path((post_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CommentRequest>,
) -> ApiResult<Json<Comment>> {
    let comment = load_comment_of_post(&state, post_id, id).await?;
    ensure_owner_or_admin(comment.user_id, &principal)?;
    let updated = state
        .repo
        .update_comment(id, &payload.body)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment", id))?;
    Ok(Json(updated))
}

/// delete_comment
///
/// [Authenticated Route] Removes a comment. Owner-or-admin only.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/comments/{id}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_comment(
    principal: AuthUser,
    State(state): State<AppState>,
    Path((post_id, id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ApiResponse>> {
    let comment = load_comment_of_post(&state, post_id, id).await?;
    ensure_owner_or_admin(comment.user_id, &principal)?;
    state.repo.delete_comment(id).await?;
    Ok(Json(ApiResponse::ok("You successfully deleted comment")))
}

async fn require_post(state: &AppState, post_id: Uuid) -> ApiResult<()> {
    state
        .repo
        .get_post(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", post_id))?;
    Ok(())
}

/// Loads a comment and verifies it is addressed under its own post.
async fn load_comment_of_post(state: &AppState, post_id: Uuid, id: Uuid) -> ApiResult<Comment> {
    require_post(state, post_id).await?;
    let comment = state
        .repo
        .get_comment(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment", id))?;
    if comment.post_id != post_id {
        return Err(ApiError::BadRequest(
            "Comment does not belong to post".to_string(),
        ));
    }
    Ok(comment)
}
