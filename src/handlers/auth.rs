use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    auth::{hash_password, sign_token, verify_password},
    error::{ApiError, ApiResult},
    models::{ApiResponse, JwtAuthenticationResponse, NewUser, ROLE_USER, SigninRequest, SignupRequest},
};

/// signin
///
/// [Public Route] Exchanges credentials for a bearer token. The identifier
/// field accepts either the username or the email address. Credential
/// failures are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Token issued", body = JwtAuthenticationResponse),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> ApiResult<Json<JwtAuthenticationResponse>> {
    let user = state
        .repo
        .get_user_by_username_or_email(&payload.username_or_email)
        .await?
        .ok_or_else(bad_credentials)?;

    if !verify_password(&payload.password, &user.password) {
        return Err(bad_credentials());
    }

    let token = sign_token(user.id, &state.config)?;
    Ok(Json(JwtAuthenticationResponse::bearer(token)))
}

/// signup
///
/// [Public Route] Registers a new account with the 'user' role. Username and
/// email must be unused; the password is Argon2id-hashed before persistence.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Registered", body = ApiResponse),
        (status = 400, description = "Username or email taken")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse>)> {
    if state.repo.username_exists(&payload.username).await? {
        return Err(ApiError::BadRequest("Username is already taken".to_string()));
    }
    if state.repo.email_exists(&payload.email).await? {
        return Err(ApiError::BadRequest("Email is already taken".to_string()));
    }

    let password = hash_password(&payload.password)?;
    state
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

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User registered successfully")),
    ))
}

fn bad_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid username or password".to_string())
}
