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
    models::{ApiResponse, Tag, TagRequest},
    pagination::{PageParams, PagedResponse},
};

/// get_tags
///
/// [Public Route] Paginated listing of tags.
#[utoipa::path(
    get,
    path = "/api/tags",
    params(PageParams),
    responses((status = 200, description = "Tags", body = PagedResponse<Tag>))
)]
pub async fn get_tags(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Tag>>> {
    params.validate()?;
    let content = state.repo.list_tags(params.limit(), params.offset()).await?;
    let total = state.repo.count_tags().await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_tag
///
/// [Public Route] Single tag by ID.
#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    params(("id" = Uuid, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Found", body = Tag),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Tag>> {
    let tag = state
        .repo
        .get_tag(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag", id))?;
    Ok(Json(tag))
}

/// add_tag
///
/// [Authenticated Route] Creates a tag (or returns the existing one with the
/// same name) owned by the caller.
#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = TagRequest,
    responses((status = 201, description = "Created", body = Tag))
)]
pub async fn add_tag(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<TagRequest>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    let tag = state.repo.create_tag(user_id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// update_tag
///
/// [Authenticated Route] Renames a tag. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    request_body = TagRequest,
    responses(
        (status = 200, description = "Updated", body = Tag),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_tag(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TagRequest>,
) -> ApiResult<Json<Tag>> {
    let tag = state
        .repo
        .get_tag(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag", id))?;
    ensure_owner_or_admin(tag.user_id, &principal)?;
    let updated = state
        .repo
        .update_tag(id, &payload.name)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag", id))?;
    Ok(Json(updated))
}

/// delete_tag
///
/// [Authenticated Route] Removes a tag and its post associations.
/// Owner-or-admin only.
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_tag(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse>> {
    let tag = state
        .repo
        .get_tag(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag", id))?;
    ensure_owner_or_admin(tag.user_id, &principal)?;
    state.repo.delete_tag(id).await?;
    Ok(Json(ApiResponse::ok("You successfully deleted tag")))
}
