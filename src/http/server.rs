//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, timeout, tracing, metrics)
//! - Serve the history-mode fallback for client routes
//! - Apply configuration updates to runtime title settings
//! - Shut down gracefully on signal

use arc_swap::ArcSwap;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, TitleConfig};
use crate::http::handlers;
use crate::http::request::{track_metrics, MakeRequestUuid};
use crate::routing::{RouteError, Router as RouteTable};

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Route table error: {0}")]
    Routes(#[from] RouteError),

    #[error("Failed to read index file {path:?}: {source}")]
    IndexFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RouteTable>,
    pub titles: Arc<ArcSwap<TitleConfig>>,
    pub index_html: Option<Arc<str>>,
}

impl AppState {
    /// Current default title length.
    pub fn max_title_length(&self) -> usize {
        self.titles.load().max_length
    }
}

/// HTTP server for the studio application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let route_table = Arc::new(RouteTable::app()?.with_base(&config.history.base));

        let index_html = match &config.history.index_file {
            Some(path) => {
                let html = std::fs::read_to_string(path).map_err(|source| ServerError::IndexFile {
                    path: path.clone(),
                    source,
                })?;
                Some(Arc::from(html))
            }
            None => None,
        };

        let state = AppState {
            router: route_table,
            titles: Arc::new(ArcSwap::from_pointee(config.titles.clone())),
            index_html,
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/routes", get(handlers::list_routes))
            .route("/api/routes/resolve", get(handlers::resolve_route))
            .route("/api/routes/{name}/href", get(handlers::route_href))
            .route("/api/titles/truncate", post(handlers::truncate_one))
            .route("/api/titles/truncate-many", post(handlers::truncate_many))
            .fallback(handlers::history_fallback)
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Configs received on `config_updates` replace the runtime title settings.
    /// Listener, history and timeout changes need a restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base = %self.state.router.base(),
            "HTTP server starting"
        );

        let titles = self.state.titles.clone();
        let current = self.config.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                if new_config.listener != current.listener
                    || new_config.history != current.history
                    || new_config.timeouts != current.timeouts
                {
                    tracing::warn!(
                        "Listener, history or timeout changes take effect after restart"
                    );
                }
                tracing::info!(
                    max_length = new_config.titles.max_length,
                    "Title settings reloaded"
                );
                titles.store(Arc::new(new_config.titles));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared state, for inspection in tests and embedding.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The assembled Axum router.
    pub fn into_router(self) -> Router {
        self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app(config: AppConfig) -> Router {
        HttpServer::new(config).unwrap().into_router()
    }

    #[tokio::test]
    async fn test_health_has_request_id() {
        let res = app(AppConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_fallback_redirect() {
        let res = app(AppConfig::default())
            .oneshot(Request::get("/brainstorm").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()["location"], "/");
    }

    #[tokio::test]
    async fn test_fallback_redirect_keeps_query() {
        let res = app(AppConfig::default())
            .oneshot(Request::get("/brainstorm?topic=tea").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()["location"], "/?topic=tea");
    }

    #[tokio::test]
    async fn test_truncate_uses_configured_length() {
        let mut config = AppConfig::default();
        config.titles.max_length = 5;
        let res = app(config)
            .oneshot(
                Request::post("/api/titles/truncate")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":"  hello world  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = to_bytes(res.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["title"], "hello");
    }

    #[test]
    fn test_missing_index_file() {
        let mut config = AppConfig::default();
        config.history.index_file = Some(PathBuf::from("/no/such/index.html"));
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::IndexFile { .. })
        ));
    }
}
