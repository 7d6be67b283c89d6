use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{post, put},
};

/// Admin Router Module
///
/// Defines the routes exclusively accessible to users with the 'admin' role.
/// These endpoints provide account provisioning and role management.
///
/// Access Control:
/// This router is merged behind the same authentication layer as the
/// authenticated routes; the `role='admin'` check itself is performed inside
/// each handler (via `require_admin`) before the request is allowed to act.
/// This keeps the privileged surface explicit while preventing any anonymous
/// access to role management.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /api/users
        // Lets an administrator provision an account directly, bypassing the
        // public signup flow.
        .route("/api/users", post(handlers::users::add_user))
        // PUT /api/users/{username}/grant_admin
        // PUT /api/users/{username}/revoke_admin
        // Promote or demote a user. Demotion of the last admin is allowed;
        // operator discretion applies.
        .route(
            "/api/users/{username}/grant_admin",
            put(handlers::users::grant_admin),
        )
        .route(
            "/api/users/{username}/revoke_admin",
            put(handlers::users::revoke_admin),
        )
}
