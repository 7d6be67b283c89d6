use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in). These routes cover the blog's entire read surface
/// (posts, comments, categories, tags, albums, photos) plus the identity
/// gateway (signin/signup and availability checks).
///
/// The only read-only resource deliberately absent here is `todos`: those are
/// private to their owner and live behind the authenticated router.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // --- Identity Gateway ---
        // POST /api/auth/signin
        // Exchanges username-or-email + password for a Bearer JWT.
        .route("/api/auth/signin", post(handlers::auth::signin))
        // POST /api/auth/signup
        // New user registration. Uniqueness of username and email is enforced
        // in the handler before the password is hashed and persisted.
        .route("/api/auth/signup", post(handlers::auth::signup))
        // GET /api/users/check_username_availability?username=...
        // GET /api/users/check_email_availability?email=...
        // Pre-registration identity probes used by signup forms.
        .route(
            "/api/users/check_username_availability",
            get(handlers::users::check_username_availability),
        )
        .route(
            "/api/users/check_email_availability",
            get(handlers::users::check_email_availability),
        )
        // --- Public User Views ---
        // GET /api/users/{username}/profile
        // Public profile with post and album counts.
        .route(
            "/api/users/{username}/profile",
            get(handlers::users::get_user_profile),
        )
        // GET /api/users/{username}/posts and /albums
        // Paginated listings of content authored by a specific user.
        .route(
            "/api/users/{username}/posts",
            get(handlers::users::get_user_posts),
        )
        .route(
            "/api/users/{username}/albums",
            get(handlers::users::get_user_albums),
        )
        // --- Posts & Comments (read-only) ---
        .route("/api/posts", get(handlers::posts::get_posts))
        .route("/api/posts/{id}", get(handlers::posts::get_post))
        // GET /api/posts/category/{id} and /api/posts/tag/{id}
        // Listings scoped to a parent category or tag. A missing parent is a
        // 404, not an empty page.
        .route(
            "/api/posts/category/{id}",
            get(handlers::posts::get_posts_by_category),
        )
        .route("/api/posts/tag/{id}", get(handlers::posts::get_posts_by_tag))
        .route(
            "/api/posts/{post_id}/comments",
            get(handlers::comments::get_comments),
        )
        .route(
            "/api/posts/{post_id}/comments/{id}",
            get(handlers::comments::get_comment),
        )
        // --- Taxonomy (read-only) ---
        .route("/api/categories", get(handlers::categories::get_categories))
        .route(
            "/api/categories/{id}",
            get(handlers::categories::get_category),
        )
        .route("/api/tags", get(handlers::tags::get_tags))
        .route("/api/tags/{id}", get(handlers::tags::get_tag))
        // --- Media (read-only) ---
        .route("/api/albums", get(handlers::albums::get_albums))
        .route("/api/albums/{id}", get(handlers::albums::get_album))
        .route(
            "/api/albums/{id}/photos",
            get(handlers::albums::get_album_photos),
        )
        .route("/api/photos", get(handlers::photos::get_photos))
        .route("/api/photos/{id}", get(handlers::photos::get_photo))
}
