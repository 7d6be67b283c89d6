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
    models::{ApiResponse, Category, CategoryRequest},
    pagination::{PageParams, PagedResponse},
};

/// get_categories
///
/// [Public Route] Paginated listing of categories.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(PageParams),
    responses((status = 200, description = "Categories", body = PagedResponse<Category>))
)]
pub async fn get_categories(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Category>>> {
    params.validate()?;
    let content = state
        .repo
        .list_categories(params.limit(), params.offset())
        .await?;
    let total = state.repo.count_categories().await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_category
///
/// [Public Route] Single category by ID.
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Found", body = Category),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Category>> {
    let category = state
        .repo
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    Ok(Json(category))
}

/// add_category
///
/// [Authenticated Route] Creates a category owned by the caller.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses((status = 201, description = "Created", body = Category))
)]
pub async fn add_category(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.repo.create_category(user_id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// update_category
///
/// [Authenticated Route] Renames a category. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Updated", body = Category),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_category(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<Json<Category>> {
    let category = state
        .repo
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    ensure_owner_or_admin(category.user_id, &principal)?;
    let updated = state
        .repo
        .update_category(id, &payload.name)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    Ok(Json(updated))
}

/// delete_category
///
/// [Authenticated Route] Removes a category; posts filed under it keep
/// existing with a cleared category. Owner-or-admin only.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_category(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse>> {
    let category = state
        .repo
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;
    ensure_owner_or_admin(category.user_id, &principal)?;
    state.repo.delete_category(id).await?;
    Ok(Json(ApiResponse::ok("You successfully deleted category")))
}
