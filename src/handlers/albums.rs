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
    models::{Album, AlbumRequest, ApiResponse, Photo},
    pagination::{PageParams, PagedResponse},
};

/// get_albums
///
/// [Public Route] Paginated listing of all albums, newest first.
#[utoipa::path(
    get,
    path = "/api/albums",
    params(PageParams),
    responses(
        (status = 200, description = "Albums", body = PagedResponse<Album>),
        (status = 400, description = "Bad pagination bounds")
    )
)]
pub async fn get_albums(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Album>>> {
    params.validate()?;
    let content = state
        .repo
        .list_albums(params.limit(), params.offset())
        .await?;
    let total = state.repo.count_albums().await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_album
///
/// [Public Route] Single album by ID.
#[utoipa::path(
    get,
    path = "/api/albums/{id}",
    params(("id" = Uuid, Path, description = "Album ID")),
    responses(
        (status = 200, description = "Found", body = Album),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Album>> {
    let album = state
        .repo
        .get_album(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Album", id))?;
    Ok(Json(album))
}

/// get_album_photos
///
/// [Public Route] Paginated photos belonging to an album.
#[utoipa::path(
    get,
    path = "/api/albums/{id}/photos",
    params(("id" = Uuid, Path, description = "Album ID"), PageParams),
    responses((status = 200, description = "Photos", body = PagedResponse<Photo>))
)]
pub async fn get_album_photos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Photo>>> {
    params.validate()?;
    state
        .repo
        .get_album(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Album", id))?;
    let content = state
        .repo
        .photos_by_album(id, params.limit(), params.offset())
        .await?;
    let total = state.repo.count_photos_by_album(id).await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// add_album
///
/// [Authenticated Route] Creates an album owned by the caller. The owner is
/// taken from the session, never from the body.
#[utoipa::path(
    post,
    path = "/api/albums",
    request_body = AlbumRequest,
    responses((status = 201, description = "Created", body = Album))
)]
pub async fn add_album(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AlbumRequest>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    let album = state.repo.create_album(user_id, &payload.title).await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// update_album
///
/// [Authenticated Route] Retitles an album. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/albums/{id}",
    request_body = AlbumRequest,
    responses(
        (status = 200, description = "Updated", body = Album),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_album(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AlbumRequest>,
) -> ApiResult<Json<Album>> {
    let album = state
        .repo
        .get_album(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Album", id))?;
    ensure_owner_or_admin(album.user_id, &principal)?;
    let updated = state
        .repo
        .update_album(id, &payload.title)
        .await?
        .ok_or_else(|| ApiError::not_found("Album", id))?;
    Ok(Json(updated))
}

/// delete_album
///
/// [Authenticated Route] Removes an album and, via cascade, its photos.
/// Owner-or-admin only.
#[utoipa::path(
    delete,
    path = "/api/albums/{id}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_album(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse>> {
    let album = state
        .repo
        .get_album(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Album", id))?;
    ensure_owner_or_admin(album.user_id, &principal)?;
    state.repo.delete_album(id).await?;
    Ok(Json(ApiResponse::ok("You successfully deleted album")))
}
