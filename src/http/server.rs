//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Bind server to listener
//! - Stop on Ctrl+C or an explicit shutdown trigger

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers::{
    count_cars, create_car, delete_car, get_car, health, list_cars, update_car,
};
use crate::http::request::{RequestUuid, X_REQUEST_ID};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::observability::metrics;
use crate::security::{ConfiguredRoles, RoleProvider};
use crate::store::CarStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CarStore>,
    pub roles: Arc<dyn RoleProvider>,
    /// Role required to delete cars.
    pub admin_role: Arc<str>,
}

impl AppState {
    pub fn new(config: &ServiceConfig, store: Arc<dyn CarStore>) -> Self {
        Self {
            store,
            roles: Arc::new(ConfiguredRoles::new(&config.auth.users)),
            admin_role: Arc::from(config.auth.admin_role.as_str()),
        }
    }
}

/// HTTP server for the cars service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server over `store`.
    pub fn new(config: ServiceConfig, store: Arc<dyn CarStore>) -> Self {
        let state = AppState::new(&config, store);
        Self::with_state(config, state)
    }

    /// Create a server from prepared state, e.g. with a custom role provider.
    pub fn with_state(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let cars = Router::new()
            .route("/cars", get(list_cars).post(create_car))
            .route("/cars/count", get(count_cars))
            .route("/cars/{id}", get(get_car).put(update_car).delete(delete_car));

        Router::new()
            .route("/health", get(health))
            .merge(cars)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, RequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .map_request(|req: axum::http::Request<_>| req.map(axum::body::Body::new))
                    .layer(middleware::from_fn(metrics::track_requests)),
            )
    }

    /// Run the server until Ctrl+C or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
