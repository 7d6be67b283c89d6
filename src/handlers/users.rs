use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState,
    auth::{AuthUser, hash_password},
    error::{ApiError, ApiResult},
    handlers::ensure_owner_or_admin,
    models::{
        Album, ApiResponse, NewUser, Post, ROLE_ADMIN, ROLE_USER, User, UserIdentityAvailability,
        UserProfile, UserRequest, UserSummary,
    },
    pagination::{PageParams, PagedResponse},
};

/// Query parameter for the username availability probe. A missing parameter
/// is rejected by the extractor with 400.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct UsernameQuery {
    pub username: String,
}

/// Query parameter for the email availability probe.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct EmailQuery {
    pub email: String,
}

/// get_current_user
///
/// [Authenticated Route] Returns the caller's own summary.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses((status = 200, description = "Current user", body = UserSummary))
)]
pub async fn get_current_user(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<UserSummary>> {
    let user = state
        .repo
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;
    Ok(Json(UserSummary::from(user)))
}

/// check_username_availability
///
/// [Public Route] Reports whether a username is still free, for signup forms.
#[utoipa::path(
    get,
    path = "/api/users/check_username_availability",
    params(UsernameQuery),
    responses((status = 200, description = "Availability", body = UserIdentityAvailability))
)]
pub async fn check_username_availability(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> ApiResult<Json<UserIdentityAvailability>> {
    let taken = state.repo.username_exists(&query.username).await?;
    Ok(Json(UserIdentityAvailability { available: !taken }))
}

/// check_email_availability
///
/// [Public Route] Reports whether an email address is still free.
#[utoipa::path(
    get,
    path = "/api/users/check_email_availability",
    params(EmailQuery),
    responses((status = 200, description = "Availability", body = UserIdentityAvailability))
)]
pub async fn check_email_availability(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<UserIdentityAvailability>> {
    let taken = state.repo.email_exists(&query.email).await?;
    Ok(Json(UserIdentityAvailability { available: !taken }))
}

/// get_user_profile
///
/// [Public Route] Public profile of a user, with post and album counters.
#[utoipa::path(
    get,
    path = "/api/users/{username}/profile",
    params(("username" = String, Path, description = "Username")),
    responses((status = 200, description = "Profile", body = UserProfile))
)]
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    let user = find_by_username(&state, &username).await?;
    let post_count = state.repo.count_posts_by_user(user.id).await?;
    let album_count = state.repo.count_albums_by_user(user.id).await?;
    Ok(Json(UserProfile {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        joined_at: user.created_at,
        post_count,
        album_count,
    }))
}

/// get_user_posts
///
/// [Public Route] Paginated posts authored by the given user.
#[utoipa::path(
    get,
    path = "/api/users/{username}/posts",
    params(("username" = String, Path, description = "Username"), PageParams),
    responses((status = 200, description = "Posts", body = PagedResponse<Post>))
)]
pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Post>>> {
    params.validate()?;
    let user = find_by_username(&state, &username).await?;
    let content = state
        .repo
        .posts_by_user(user.id, params.limit(), params.offset())
        .await?;
    let total = state.repo.count_posts_by_user(user.id).await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// get_user_albums
///
/// [Public Route] Paginated albums owned by the given user.
#[utoipa::path(
    get,
    path = "/api/users/{username}/albums",
    params(("username" = String, Path, description = "Username"), PageParams),
    responses((status = 200, description = "Albums", body = PagedResponse<Album>))
)]
pub async fn get_user_albums(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<PagedResponse<Album>>> {
    params.validate()?;
    let user = find_by_username(&state, &username).await?;
    let content = state
        .repo
        .albums_by_user(user.id, params.limit(), params.offset())
        .await?;
    let total = state.repo.count_albums_by_user(user.id).await?;
    Ok(Json(PagedResponse::new(content, params, total)))
}

/// update_user
///
/// [Authenticated Route] Overwrites a user record. Permitted for the account
/// holder and for admins.
#[utoipa::path(
    put,
    path = "/api/users/{username}",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated", body = User),
        (status = 400, description = "Username or email taken"),
        (status = 401, description = "Not account holder or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_user(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<UserRequest>,
) -> ApiResult<Json<User>> {
    let target = find_by_username(&state, &username).await?;
    ensure_owner_or_admin(target.id, &principal)?;

    // Renames must not collide with another account.
    if payload.username != target.username && state.repo.username_exists(&payload.username).await? {
        return Err(ApiError::BadRequest("Username is already taken".to_string()));
    }
    if payload.email != target.email && state.repo.email_exists(&payload.email).await? {
        return Err(ApiError::BadRequest("Email is already taken".to_string()));
    }

    let password = hash_password(&payload.password)?;
    let updated = state
        .repo
        .update_user(
            target.id,
            NewUser {
                username: payload.username,
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                password,
                // Role changes go through grant/revoke, not the profile update.
                role: target.role.clone(),
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("User", target.id))?;
    Ok(Json(updated))
}

/// delete_user
///
/// [Authenticated Route] Removes an account and, via cascade, everything it
/// owns. Permitted for the account holder and for admins.
#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    responses(
        (status = 200, description = "Deleted", body = ApiResponse),
        (status = 401, description = "Not account holder or admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_user(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<ApiResponse>> {
    let target = find_by_username(&state, &username).await?;
    ensure_owner_or_admin(target.id, &principal)?;
    state.repo.delete_user(target.id).await?;
    Ok(Json(ApiResponse::ok(format!(
        "You successfully deleted profile of: {}",
        username
    ))))
}

/// add_user
///
/// [Admin Route] Directly creates a user account with the 'user' role.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 400, description = "Username or email taken"),
        (status = 401, description = "Not an admin")
    )
)]
pub async fn add_user(
    principal: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    require_admin(&principal)?;
    if state.repo.username_exists(&payload.username).await? {
        return Err(ApiError::BadRequest("Username is already taken".to_string()));
    }
    if state.repo.email_exists(&payload.email).await? {
        return Err(ApiError::BadRequest("Email is already taken".to_string()));
    }

    let password = hash_password(&payload.password)?;
    let user = state
        .repo
        .create_user(NewUser {
            username: payload.username,
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            password,
            role: ROLE_USER.to_string(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// grant_admin
///
/// [Admin Route] Promotes a user to the admin role.
#[utoipa::path(
    put,
    path = "/api/users/{username}/grant_admin",
    responses(
        (status = 200, description = "Granted", body = ApiResponse),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn grant_admin(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<ApiResponse>> {
    set_role(&principal, &state, &username, ROLE_ADMIN).await?;
    Ok(Json(ApiResponse::ok(format!(
        "You gave ADMIN role to user: {}",
        username
    ))))
}

/// revoke_admin
///
/// [Admin Route] Demotes a user back to the plain user role.
#[utoipa::path(
    put,
    path = "/api/users/{username}/revoke_admin",
    responses(
        (status = 200, description = "Revoked", body = ApiResponse),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn revoke_admin(
    principal: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<ApiResponse>> {
    set_role(&principal, &state, &username, ROLE_USER).await?;
    Ok(Json(ApiResponse::ok(format!(
        "You took ADMIN role from user: {}",
        username
    ))))
}

async fn set_role(
    principal: &AuthUser,
    state: &AppState,
    username: &str,
    role: &str,
) -> ApiResult<User> {
    require_admin(principal)?;
    let target = find_by_username(state, username).await?;
    state
        .repo
        .set_user_role(target.id, role)
        .await?
        .ok_or_else(|| ApiError::not_found("User", target.id))
}

fn require_admin(principal: &AuthUser) -> ApiResult<()> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(ApiError::no_permission())
    }
}

async fn find_by_username(state: &AppState, username: &str) -> ApiResult<User> {
    state
        .repo
        .get_user_by_username(username)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "User",
            field: "username",
            value: username.to_string(),
        })
}
