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
    models::{ApiResponse, Todo, TodoRequest},
    pagination::{PageParams, PagedResponse},
};

/// get_todos
///
/// [Authenticated Route] Paginated listing of the caller's own todos. Todos
/// are private; there is no cross-user listing.
#[utoipa::path(
    get,
    path = "/api/todos",
    params(PageParams),
    responses(
        (status = 200, description = "My todos", body = PagedResponse<Todo>),
        (status = 400, description = "Bad pagination bounds")
    )
)]
pub async fn get_todos(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Todo>>> {
    params.validate()?;
    let content = state
        .repo
        .todos_by_user(user_id, params.limit(), params.offset())
        .await?;
    let total = state.repo.count_todos_by_user(user_id).await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_todo
///
/// [Authenticated Route] Single todo. Unlike the other entities, even reads
/// are restricted to the owner or an admin.
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo ID")),
    responses(
        (status = 200, description = "Found", body = Todo),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_todo(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Todo>> {
    let todo = load_owned_todo(&state, id, &principal).await?;
    Ok(Json(todo))
}

/// add_todo
///
/// [Authenticated Route] Creates a todo owned by the caller.
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = TodoRequest,
    responses((status = 201, description = "Created", body = Todo))
)]
pub async fn add_todo(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<TodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let todo = state.repo.create_todo(user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// update_todo
///
/// [Authenticated Route] Field-level overwrite of a todo. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/todos/{id}",
    request_body = TodoRequest,
    responses(
        (status = 200, description = "Updated", body = Todo),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_todo(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TodoRequest>,
) -> ApiResult<Json<Todo>> {
    load_owned_todo(&state, id, &principal).await?;
    let updated = state
        .repo
        .update_todo(id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo", id))?;
    Ok(Json(updated))
}

/// complete_todo
///
/// [Authenticated Route] Marks a todo as completed. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/todos/{id}/complete",
    responses(
        (status = 200, description = "Completed", body = Todo),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn complete_todo(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Todo>> {
    set_completed(&state, id, &principal, true).await
}

/// uncomplete_todo
///
/// [Authenticated Route] Marks a todo as not completed. Owner-or-admin only.
#[utoipa::path(
    put,
    path = "/api/todos/{id}/uncomplete",
    responses(
        (status = 200, description = "Uncompleted", body = Todo),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn uncomplete_todo(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Todo>> {
    set_completed(&state, id, &principal, false).await
}

/// delete_todo
///
/// [Authenticated Route] Removes a todo. Owner-or-admin only.
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not owner or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_todo(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse>> {
    load_owned_todo(&state, id, &principal).await?;
    state.repo.delete_todo(id).await?;
    Ok(Json(ApiResponse::ok("You successfully deleted todo")))
}

async fn set_completed(
    state: &AppState,
    id: Uuid,
    principal: &AuthUser,
    completed: bool,
) -> ApiResult<Json<Todo>> {
    load_owned_todo(state, id, principal).await?;
    let todo = state
        .repo
        .set_todo_completed(id, completed)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo", id))?;
    Ok(Json(todo))
}

async fn load_owned_todo(state: &AppState, id: Uuid, principal: &AuthUser) -> ApiResult<Todo> {
    let todo = state
        .repo
        .get_todo(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo", id))?;
    ensure_owner_or_admin(todo.user_id, principal)?;
    Ok(todo)
}
