use crate::auth::jwt::AuthService;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

#[cfg(feature = "tasks")]
use axum::{middleware, routing::patch};

pub fn create_router(auth_service: Arc<AuthService>) -> Router<AppState> {
    // Public routes (no auth required)
    let router = Router::new()
        .route("/auth/login", post(crate::api::handlers::auth::login))
        .route(
            "/accounts/seed",
            get(crate::api::handlers::accounts::seed_accounts),
        );

    #[cfg(feature = "tasks")]
    let router = {
        // Task CRUD requires a bearer token; the per-account task seeder
        // stays public alongside the account seeder.
        let protected_routes = Router::new()
            .route(
                "/tasks",
                get(crate::api::handlers::tasks::list_tasks)
                    .post(crate::api::handlers::tasks::create_task),
            )
            .route(
                "/tasks/{id}",
                patch(crate::api::handlers::tasks::update_task)
                    .delete(crate::api::handlers::tasks::delete_task),
            )
            .layer(middleware::from_fn(move |req, next| {
                crate::auth::middleware::auth_middleware(auth_service.clone(), req, next)
            }));

        router
            .route(
                "/accounts/{id}/tasks/seed",
                get(crate::api::handlers::tasks::seed_tasks),
            )
            .merge(protected_routes)
    };

    #[cfg(not(feature = "tasks"))]
    let _ = auth_service;

    router
}
