use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// Role names used for RBAC checks throughout the handlers.
pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// Canonical identity record from the `users` table. The password hash is
/// never serialized into any response body.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2id PHC string. Excluded from all JSON output.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// The RBAC field: 'user' or 'admin'.
    pub role: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Post
///
/// A blog post from the `posts` table. Tags are attached through the
/// `post_tags` join table and loaded separately.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Post {
    pub id: Uuid,
    // FK to users.id (owner).
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub body: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Comment on a post, from the `comments` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    // FK to users.id (author).
    pub user_id: Uuid,
    pub body: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Category from the `categories` table. Owned by its creator.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Tag from the `tags` table. Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Tag {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Album from the `albums` table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Album {
    pub id: Uuid,
    // FK to users.id (owner).
    pub user_id: Uuid,
    pub title: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Photo from the `photos` table. Authorization for mutations is resolved
/// through the owning album.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Photo {
    pub id: Uuid,
    pub album_id: Uuid,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Todo from the `todos` table. Private: reads are restricted to the owner
/// (or an admin), unlike the other entities.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Todo {
    pub id: Uuid,
    // FK to users.id (owner).
    pub user_id: Uuid,
    pub title: String,
    pub completed: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// Credentials for POST /api/auth/signin. Accepts either the username or the
/// email address in the same field.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SigninRequest {
    pub username_or_email: String,
    pub password: String,
}

/// Input payload for POST /api/auth/signup.
///
/// The password is hashed with Argon2id before it ever reaches the repository;
/// the plaintext is never persisted or logged.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Input payload for POST /api/posts and PUT /api/posts/{id}.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PostRequest {
    pub title: String,
    pub body: String,
    pub category_id: Option<Uuid>,
    /// Tag names; missing tags are created on the fly.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input payload for comment creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CommentRequest {
    pub body: String,
}

/// Input payload for category creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CategoryRequest {
    pub name: String,
}

/// Input payload for tag creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TagRequest {
    pub name: String,
}

/// Input payload for album creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AlbumRequest {
    pub title: String,
}

/// Input payload for photo creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PhotoRequest {
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub album_id: Uuid,
}

/// Input payload for todo creation and update.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TodoRequest {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Input payload for updating a user record (PUT /api/users/{username} and
/// the admin POST /api/users).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// NewUser
///
/// Internal write model handed to the repository for user inserts and
/// overwrites. The password field always carries the Argon2id hash, never the
/// plaintext; handlers perform the hashing before constructing this.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String,
}

// --- Response Schemas (Output) ---

/// Generic acknowledgement body for mutations without a richer payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Bearer token issued on successful signin.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct JwtAuthenticationResponse {
    pub access_token: String,
    pub token_type: String,
}

impl JwtAuthenticationResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// Output schema for GET /api/users/me.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Output schema for the public profile endpoint, including content counters.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[ts(type = "string")]
    pub joined_at: DateTime<Utc>,
    pub post_count: i64,
    pub album_count: i64,
}

/// Output schema for the username/email availability probes.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UserIdentityAvailability {
    pub available: bool,
}

/// Post enriched with its tag names, as returned by the post read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct PostResponse {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            password: "$argon2id$secret".to_string(),
            ..User::default()
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn user_summary_drops_private_fields() {
        let user = User {
            username: "mariam".to_string(),
            email: "mariam@example.com".to_string(),
            ..User::default()
        };
        let summary = UserSummary::from(user);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("example.com"));
    }

    #[test]
    fn post_response_flattens_post_fields() {
        let response = PostResponse {
            post: Post {
                title: "Hello".to_string(),
                ..Post::default()
            },
            tags: vec!["rust".to_string()],
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["tags"][0], "rust");
    }
}
