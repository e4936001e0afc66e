//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Tally, built on the Axum
//! web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/login` - Login and receive a signed bearer token
//!
//! ## Accounts (`/api/accounts`)
//! - `GET /api/accounts/seed` - Seed the demo accounts
//!
//! ## Tasks (`/api/tasks`, `tasks` feature)
//! - `GET /api/accounts/{id}/tasks/seed` - Seed demo tasks for an account
//! - `GET /api/tasks` - List all tasks with their owners
//! - `POST /api/tasks` - Create a task
//! - `PATCH /api/tasks/{id}` - Update a task's title or status
//! - `DELETE /api/tasks/{id}` - Delete a task
//!
//! ## Health
//! - `GET /health` - Liveness probe
//!
//! # Authentication
//!
//! The task routes require a valid JWT in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! Login and the seed endpoints are public; seeding is a bootstrap surface.
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the full application router: health probe, `/api` routes, and
/// the tracing and CORS layers. Shared by the binary and the test suite
/// so there is exactly one authoritative route set.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", routes::create_router(state.auth_service.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// OpenAPI document for the Tally API.
#[cfg(feature = "swagger-ui")]
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::accounts::seed_accounts,
        handlers::tasks::seed_tasks,
        handlers::tasks::list_tasks,
        handlers::tasks::create_task,
        handlers::tasks::update_task,
        handlers::tasks::delete_task,
    ),
    components(schemas(
        crate::types::LoginRequest,
        crate::types::TokenResponse,
        crate::types::AccountSummary,
        crate::types::TaskStatus,
        crate::types::CreateTaskRequest,
        crate::types::UpdateTaskRequest,
        crate::types::TaskResponse,
    ))
)]
pub struct ApiDoc;
