use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod repository;

// Module for routing segregation (Public, Authenticated, Admin).
pub mod routes;
use auth::AuthUser; // The resolved authenticated user identity.
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// This struct auto-generates the OpenAPI documentation (Swagger JSON) for the application.
/// It aggregates all API paths and data schemas that have been decorated with
/// the `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    // List all public handler functions here for documentation generation.
    paths(
        handlers::auth::signin, handlers::auth::signup,
        handlers::users::get_current_user, handlers::users::check_username_availability,
        handlers::users::check_email_availability, handlers::users::get_user_profile,
        handlers::users::get_user_posts, handlers::users::get_user_albums,
        handlers::users::update_user, handlers::users::delete_user, handlers::users::add_user,
        handlers::users::grant_admin, handlers::users::revoke_admin,
        handlers::posts::get_posts, handlers::posts::get_post,
        handlers::posts::get_posts_by_category, handlers::posts::get_posts_by_tag,
        handlers::posts::create_post, handlers::posts::update_post, handlers::posts::delete_post,
        handlers::comments::get_comments, handlers::comments::get_comment,
        handlers::comments::add_comment, handlers::comments::update_comment,
        handlers::comments::delete_comment,
        handlers::categories::get_categories, handlers::categories::get_category,
        handlers::categories::add_category, handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::tags::get_tags, handlers::tags::get_tag, handlers::tags::add_tag,
        handlers::tags::update_tag, handlers::tags::delete_tag,
        handlers::albums::get_albums, handlers::albums::get_album,
        handlers::albums::get_album_photos, handlers::albums::add_album,
        handlers::albums::update_album, handlers::albums::delete_album,
        handlers::photos::get_photos, handlers::photos::get_photo, handlers::photos::add_photo,
        handlers::photos::update_photo, handlers::photos::delete_photo,
        handlers::todos::get_todos, handlers::todos::get_todo, handlers::todos::add_todo,
        handlers::todos::update_todo, handlers::todos::complete_todo,
        handlers::todos::uncomplete_todo, handlers::todos::delete_todo,
    ),
    // List all models (schemas) used in the request/response bodies.
    components(
        schemas(
            models::User, models::Post, models::Comment, models::Category, models::Tag,
            models::Album, models::Photo, models::Todo,
            models::SigninRequest, models::SignupRequest, models::UserRequest,
            models::PostRequest, models::CommentRequest, models::CategoryRequest,
            models::TagRequest, models::AlbumRequest, models::PhotoRequest, models::TodoRequest,
            models::ApiResponse, models::JwtAuthenticationResponse, models::UserSummary,
            models::UserProfile, models::UserIdentityAvailability, models::PostResponse,
        )
    ),
    tags(
        (name = "blog-api", description = "Multi-entity blog REST API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**. This is the single, thread-safe, and immutable
/// container holding all essential application services and configuration.
/// The application state is shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: Abstracts database access via the PgPool connection.
    pub repo: RepositoryState,
    /// Configuration: The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow handlers to selectively pull components from the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// A middleware function that enforces authentication for the `authenticated_routes`
/// and `admin_routes`.
///
/// *Mechanism*: It attempts to extract `AuthUser` from the request. Since `AuthUser`
/// implements `FromRequestParts`, if authentication (JWT validation, DB lookup) fails,
/// the extractor immediately rejects the request with a 401 Unauthorized status,
/// preventing execution of the handler. If successful, it allows the request to proceed.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and scoped middleware,
/// and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Authenticated + Admin Routes: Protected by the `auth_middleware`.
        // The admin role check itself happens inside the admin handlers after
        // the request passes this authentication layer.
        .merge(
            authenticated::authenticated_routes()
                .merge(admin::admin_routes())
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: Generates a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: Wraps the entire request/response lifecycle in a tracing span.
                // Uses the `trace_span_logger` to include the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: Ensures the generated x-request-id header is
                // returned to the client and injected into subsequent service calls.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer (Applied last, allowing all traffic in/out after processing)
        .layer(cors)
}

/// trace_span_logger
///
/// Helper function used by `TraceLayer` to customize the tracing span creation.
/// It extracts the `x-request-id` header (if present) and includes it in the
/// structured logging metadata alongside the HTTP method and URI.
///
/// *Goal*: Ensure every log line for a single request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    // The structured log format used by the tracing macros.
    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
