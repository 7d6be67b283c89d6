//! Route handlers, one module per resource.
//!
//! Every handler resolves its dependencies from the shared `AppState` and
//! returns either a JSON payload or an `ApiError`. Ownership and role checks
//! happen here, after the entity has been loaded, so that a missing entity is
//! reported as 404 and a permission failure as 401.

use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
};

pub mod albums;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod photos;
pub mod posts;
pub mod tags;
pub mod todos;
pub mod users;

/// The owner-or-admin rule shared by every mutation handler.
pub(crate) fn ensure_owner_or_admin(owner_id: Uuid, principal: &AuthUser) -> ApiResult<()> {
    if owner_id == principal.id || principal.is_admin() {
        Ok(())
    } else {
        Err(ApiError::no_permission())
    }
}
