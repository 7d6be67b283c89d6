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
    models::{ApiResponse, Photo, PhotoRequest},
    pagination::{PageParams, PagedResponse},
};

/// get_photos
///
/// [Public Route] Paginated listing of all photos, newest first.
#[utoipa::path(
    get,
    path = "/api/photos",
    params(PageParams),
    responses((status = 200, description = "Photos", body = PagedResponse<Photo>))
)]
pub async fn get_photos(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Photo>>> {
    params.validate()?;
    let content = state
        .repo
        .list_photos(params.limit(), params.offset())
        .await?;
    let total = state.repo.count_photos().await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_photo
///
/// [Public Route] Single photo by ID.
#[utoipa::path(
    get,
    path = "/api/photos/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Found", body = Photo),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Photo>> {
    let photo = state
        .repo
        .get_photo(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;
    Ok(Json(photo))
}

/// add_photo
///
/// [Authenticated Route] Adds a photo to an album. The album must exist and
/// belong to the caller (admins may target any album), since photo
/// authorization is resolved through the owning album.
#[utoipa::path(
    post,
    path = "/api/photos",
    request_body = PhotoRequest,
    responses(
        (status = 201, description = "Created", body = Photo),
        (status = 401, description = "Album belongs to someone else"),
        (status = 404, description = "Album not found")
    )
)]
pub async fn add_photo(
    principal: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<PhotoRequest>,
) -> ApiResult<(StatusCode, Json<Photo>)> {
    require_album_access(&state, payload.album_id, &principal).await?;
    let photo = state.repo.create_photo(payload).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// update_photo
///
/// [Authenticated Route] Overwrites a photo's fields. Requires owner-or-admin
/// on the current album, and on the target album if the photo is moved.
#[utoipa::path(
    put,
    path = "/api/photos/{id}",
    request_body = PhotoRequest,
    responses(
        (status = 200, description = "Updated", body = Photo),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_photo(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PhotoRequest>,
) -> ApiResult<Json<Photo>> {
    let photo = state
        .repo
        .get_photo(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;
    require_album_access(&state, photo.album_id, &principal).await?;
    if payload.album_id != photo.album_id {
        require_album_access(&state, payload.album_id, &principal).await?;
    }
    let updated = state
        .repo
        .update_photo(id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;
    Ok(Json(updated))
}

/// delete_photo
///
/// [Authenticated Route] Removes a photo. Requires owner-or-admin on the
/// owning album.
#[utoipa::path(
    delete,
    path = "/api/photos/{id}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_photo(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse>> {
    let photo = state
        .repo
        .get_photo(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;
    require_album_access(&state, photo.album_id, &principal).await?;
    state.repo.delete_photo(id).await?;
    Ok(Json(ApiResponse::ok("You successfully deleted photo")))
}

/// Resolves the album and applies the owner-or-admin rule through it.
async fn require_album_access(
    state: &AppState,
    album_id: Uuid,
    principal: &AuthUser,
) -> ApiResult<()> {
    let album = state
        .repo
        .get_album(album_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Album", album_id))?;
    ensure_owner_or_admin(album.user_id, principal)
}
