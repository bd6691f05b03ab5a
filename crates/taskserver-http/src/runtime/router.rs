//! HTTP router configuration.
//!
//! Route shapes follow the service's logical surface; the create route is
//! the only one behind the credential gate. The delete routes are
//! deliberately left ungated; DESIGN.md records the open question about
//! whether they should be.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::runtime::{
    HttpTaskRuntime, HttpRuntimeConfig,
    auth::require_basic_auth,
    handlers::{
        create_task, delete_all_tasks, delete_task, get_task, health_check, list_all_tasks,
        method_not_allowed, tasks_by_due_date, tasks_by_tag, unknown_path,
    },
};

impl HttpTaskRuntime {
    /// Create the axum router with default configuration.
    pub fn router(self) -> Router {
        self.router_with_config(HttpRuntimeConfig::default())
    }

    /// Create the axum router with custom configuration.
    pub fn router_with_config(self, config: HttpRuntimeConfig) -> Router {
        // Gated routes - require basic-auth credentials.
        // route_layer applies the middleware to these routes only.
        let gated_routes = Router::new()
            .route("/task/", post(create_task))
            .route_layer(middleware::from_fn_with_state(
                self.clone(),
                require_basic_auth,
            ));

        // Open routes - no authentication required.
        let open_routes = Router::new()
            .route("/task/", get(list_all_tasks).delete(delete_all_tasks))
            .route("/task/{id}", get(get_task).delete(delete_task))
            .route("/tag/{tag}", get(tasks_by_tag))
            .route("/due/{year}/{month}/{day}", get(tasks_by_due_date))
            .route("/health", get(health_check));

        let mut router = Router::new()
            .merge(gated_routes)
            .merge(open_routes)
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(unknown_path)
            .with_state(self)
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.max_body_size));

        if config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }
}
