use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Authenticated Router Module
///
/// Defines the routes accessible to any user who has successfully passed the
/// authentication layer. This module implements all mutating blog features for
/// a standard user ('user' role) plus the private todo list.
///
/// Access Control Strategy:
/// Every handler in this module relies on the `AuthUser` extractor middleware being present
/// on the router layer above this module. This guarantees that all handlers receive a
/// validated `AuthUser` struct containing the user's ID and role, which is then used
/// for all Owner-or-Admin authorization checks (e.g., in `update_post` and `delete_album`).
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/users/me
        // Retrieves the currently authenticated user's summary.
        .route("/api/users/me", get(handlers::users::get_current_user))
        // PUT/DELETE /api/users/{username}
        // Profile update and account deletion. Restricted to the account owner
        // or an admin inside the handler.
        .route(
            "/api/users/{username}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        // --- Posts & Comments ---
        // POST /api/posts
        // Publishes a new post owned by the caller. Tags named in the request
        // are resolved or created on the fly.
        .route("/api/posts", post(handlers::posts::create_post))
        // PUT/DELETE /api/posts/{id}
        // Owner-or-admin check is enforced within the handler logic.
        .route(
            "/api/posts/{id}",
            put(handlers::posts::update_post).delete(handlers::posts::delete_post),
        )
        // POST /api/posts/{post_id}/comments
        // Adds a comment under an existing post.
        .route(
            "/api/posts/{post_id}/comments",
            post(handlers::comments::add_comment),
        )
        // PUT/DELETE /api/posts/{post_id}/comments/{id}
        // The handler additionally rejects comments addressed under the wrong
        // parent post.
        .route(
            "/api/posts/{post_id}/comments/{id}",
            put(handlers::comments::update_comment).delete(handlers::comments::delete_comment),
        )
        // --- Taxonomy ---
        .route("/api/categories", post(handlers::categories::add_category))
        .route(
            "/api/categories/{id}",
            put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route("/api/tags", post(handlers::tags::add_tag))
        .route(
            "/api/tags/{id}",
            put(handlers::tags::update_tag).delete(handlers::tags::delete_tag),
        )
        // --- Media ---
        .route("/api/albums", post(handlers::albums::add_album))
        .route(
            "/api/albums/{id}",
            put(handlers::albums::update_album).delete(handlers::albums::delete_album),
        )
        // Photo mutations authorize through the owning album.
        .route("/api/photos", post(handlers::photos::add_photo))
        .route(
            "/api/photos/{id}",
            put(handlers::photos::update_photo).delete(handlers::photos::delete_photo),
        )
        // --- Private Todos ---
        // The whole todo surface, reads included, is owner-or-admin only.
        .route(
            "/api/todos",
            get(handlers::todos::get_todos).post(handlers::todos::add_todo),
        )
        .route(
            "/api/todos/{id}",
            get(handlers::todos::get_todo)
                .put(handlers::todos::update_todo)
                .delete(handlers::todos::delete_todo),
        )
        .route(
            "/api/todos/{id}/complete",
            put(handlers::todos::complete_todo),
        )
        .route(
            "/api/todos/{id}/uncomplete",
            put(handlers::todos::uncomplete_todo),
        )
}
