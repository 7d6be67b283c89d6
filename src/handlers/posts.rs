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
    models::{ApiResponse, Post, PostRequest, PostResponse},
    pagination::{PageParams, PagedResponse},
};

/// get_posts
///
/// [Public Route] Paginated listing of all posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(PageParams),
    responses(
        (status = 200, description = "Posts", body = PagedResponse<Post>),
        (status = 400, description = "Bad pagination bounds")
    )
)]
pub async fn get_posts(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Post>>> {
    params.validate()?;
    let content = state.repo.list_posts(params.limit(), params.offset()).await?;
    let total = state.repo.count_posts().await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_post
///
/// [Public Route] Single post by ID, enriched with its tag names.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Found", body = PostResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PostResponse>> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    let tags = state.repo.get_post_tags(post.id).await?;
    Ok(Json(PostResponse { post, tags }))
}

/// get_posts_by_category
///
/// [Public Route] Paginated posts filed under a category. The category must
/// exist.
#[utoipa::path(
    get,
    path = "/api/posts/category/{id}",
    params(("id" = Uuid, Path, description = "Category ID"), PageParams),
    responses((status = 200, description = "Posts", body = PagedResponse<Post>))
)]
pub async fn get_posts_by_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Post>>> {
    params.validate()?;
    state
        .repo
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    let content = state
        .repo
        .posts_by_category(id, params.limit(), params.offset())
        .await?;
    let total = state.repo.count_posts_by_category(id).await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_posts_by_tag
///
/// [Public Route] Paginated posts carrying a tag. The tag must exist.
#[utoipa::path(
    get,
    path = "/api/posts/tag/{id}",
    params(("id" = Uuid, Path, description = "Tag ID"), PageParams),
    responses((status = 200, description = "Posts", body = PagedResponse<Post>))
)]
pub async fn get_posts_by_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Post>>> {
    params.validate()?;
    state
        .repo
        .get_tag(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag", id))?;
    let content = state
        .repo
        .posts_by_tag(id, params.limit(), params.offset())
        .await?;
    let total = state.repo.count_posts_by_tag(id).await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// create_post
///
/// [Authenticated Route] Submits a new post. The owner is taken from the
/// session, never from the body; missing tags are created on the fly.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Created", body = Post),
        (status = 404, description = "Category not found")
    )
)]
pub async fn create_post(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<PostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    if let Some(category_id) = payload.category_id {
        state
            .repo
            .get_category(category_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Category", category_id))?;
    }
    let post = state.repo.create_post(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// update_post
///
/// [Authenticated Route] Field-level overwrite of a post, including its tag
/// set. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    request_body = PostRequest,
    responses(
        (status = 200, description = "Updated", body = Post),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_post(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostRequest>,
) -> ApiResult<Json<Post>> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    ensure_owner_or_admin(post.user_id, &principal)?;
    if let Some(category_id) = payload.category_id {
        state
            .repo
            .get_category(category_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Category", category_id))?;
    }
    let updated = state
        .repo
        .update_post(id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    Ok(Json(updated))
}

/// delete_post
///
/// [Authenticated Route] Removes a post and, via cascade, its comments and
/// tag associations. Owner-or-admin only.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_post(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse>> {
    let post = state
        .repo
        .get_post(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", id))?;
    ensure_owner_or_admin(post.user_id, &principal)?;
    state.repo.delete_post(id).await?;
    Ok(Json(ApiResponse::ok("You successfully deleted post")))
}
