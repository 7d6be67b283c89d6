use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    error::ApiError,
    repository::RepositoryState,
};

/// Claims
///
/// The payload structure carried inside a JSON Web Token. Claims are signed
/// with the server's secret and validated on every authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the UUID of the user, used to re-fetch the user's
    /// current record and role on every request.
    pub sub: Uuid,
    /// Expiration Time (exp): timestamp after which the JWT must not be accepted.
    pub exp: usize,
    /// Issued At (iat): timestamp when the JWT was issued.
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request. Handlers use this struct
/// to retrieve the caller's ID and apply owner-or-admin authorization.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    /// The user's role, 'user' or 'admin'. Used for Role-Based Access Control.
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == crate::models::ROLE_ADMIN
    }
}

/// Signs a fresh access token for the given user ID, valid for
/// `config.jwt_expiry_secs` seconds.
pub fn sign_token(user_id: Uuid, config: &AppConfig) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        exp: (now + config.jwt_expiry_secs) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("token signing failed: {:?}", e);
        ApiError::Unauthorized("Could not issue access token".to_string())
    })
}

/// Hashes a plaintext password with Argon2id and a random salt, returning the
/// PHC string that is stored in the users table.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("password hashing failed: {:?}", e);
            ApiError::BadRequest("Invalid password".to_string())
        })
}

/// Verifies a plaintext password against a stored PHC hash. Any mismatch or
/// malformed hash reads as a failed verification.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any authenticated handler. This separates
/// authentication (extractor) from business logic (the handler).
///
/// The process:
/// 1. Dependency resolution: Repository and AppConfig from the app state.
/// 2. Local bypass: development-time access via the 'x-user-id' header.
/// 3. Token validation: Bearer token extraction and JWT decoding.
/// 4. DB lookup: fetching the user's current role and existence.
///
/// Rejection: 401 Unauthorized (as a structured ApiError body) on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        // Local Development Bypass Check
        // In Env::Local, authentication is allowed by providing a known user
        // UUID in the 'x-user-id' header. Guarded by the Env check alone.
        if config.env == Env::Local {
            if let Some(user_id_header) = parts.headers.get("x-user-id") {
                if let Ok(id_str) = user_id_header.to_str() {
                    if let Ok(user_id) = Uuid::parse_str(id_str) {
                        // The UUID must still map to an actual user so that the
                        // role is loaded from the database.
                        if let Ok(Some(user)) = repo.get_user(user_id).await {
                            return Ok(AuthUser {
                                id: user.id,
                                role: user.role,
                            });
                        }
                    }
                }
            }
        }
        // In Production, or if the bypass did not resolve a user, execution
        // falls through to the standard JWT validation flow.

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthenticated)?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                return Err(match e.kind() {
                    // The most common failure for a valid-but-old token.
                    ErrorKind::ExpiredSignature => {
                        ApiError::Unauthorized("Access token has expired".to_string())
                    }
                    // Bad signature, malformed token, etc.
                    _ => unauthenticated(),
                });
            }
        };

        // Final verification against the database. This denies access if the
        // user was deleted after the token was issued, and picks up role
        // changes (grant/revoke admin) immediately.
        let user = repo
            .get_user(token_data.claims.sub)
            .await?
            .ok_or_else(unauthenticated)?;

        Ok(AuthUser {
            id: user.id,
            role: user.role,
        })
    }
}

fn unauthenticated() -> ApiError {
    ApiError::Unauthorized("Full authentication is required to access this resource".to_string())
}
