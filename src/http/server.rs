//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the content fallback handler
//! - Wire up middleware (tracing, request ID)
//! - Run the plaintext and TLS accept loops
//!
//! # Design Decisions
//! - Every path is content: a single fallback handler, no route table
//! - The interpreter and render engine are injected as trait objects so
//!   tests can substitute them

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Request};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::SiteConfig;
use crate::http::pipeline;
use crate::interp::{CommandInterpreter, Interpreter};
use crate::template::{PlaceholderEngine, RenderEngine};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub interpreter: Arc<dyn Interpreter>,
    pub engine: Arc<dyn RenderEngine>,
}

/// Request ID source: UUID v4 per request.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP server for the content tree.
pub struct HttpServer {
    router: Router,
    config: Arc<SiteConfig>,
}

impl HttpServer {
    /// Create a new server with the production interpreter and engine.
    pub fn new(config: SiteConfig) -> Self {
        Self::with_collaborators(
            config,
            Arc::new(CommandInterpreter),
            Arc::new(PlaceholderEngine),
        )
    }

    /// Create a server with substituted collaborators.
    pub fn with_collaborators(
        config: SiteConfig,
        interpreter: Arc<dyn Interpreter>,
        engine: Arc<dyn RenderEngine>,
    ) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            interpreter,
            engine,
        };
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(pipeline::serve_content)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The assembled router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run the plaintext accept loop on the given listener.
    pub async fn run_plain(&self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .clone()
            .into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app).await
    }

    /// Run the encrypted accept loop.
    pub async fn run_tls(&self, addr: SocketAddr, tls: RustlsConfig) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let app = self
            .router
            .clone()
            .into_make_service_with_connect_info::<SocketAddr>();
        axum_server::bind_rustls(addr, tls).serve(app).await
    }
}
