//! HTTP API server.
//!
//! ## Endpoints
//! - `POST /api/check-grammar` - grammar/spelling correction
//! - `POST /api/summarize` - extractive summarization
//! - `POST /api/synonyms` - synonym lookup
//! - `POST /api/users`, `GET/DELETE /api/users/:id`,
//!   `GET /api/users/:id/history` - users and their operation history
//! - `GET /health` - health check

mod error;
mod handlers;
pub mod schemas;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub use error::ApiError;

use crate::core::grammar::GrammarService;
use crate::core::summarize::Summarizer;
use crate::core::synonyms::Thesaurus;
use crate::database::Database;

/// Shared state for all handlers.
pub struct AppState {
    pub db: Database,
    pub grammar: Arc<GrammarService>,
    pub summarizer: Summarizer,
    pub thesaurus: Arc<Thesaurus>,
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/check-grammar", post(handlers::check_grammar))
        .route("/api/summarize", post(handlers::summarize))
        .route("/api/synonyms", post(handlers::synonyms))
        .route("/api/users", post(handlers::create_user))
        .route(
            "/api/users/:id",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .route("/api/users/:id/history", get(handlers::user_history))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// The API server. `start` spawns the serve loop; `stop` shuts it down
/// gracefully.
pub struct ApiServer {
    addr: SocketAddr,
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    pub fn new(addr: SocketAddr, state: Arc<AppState>) -> Self {
        Self {
            addr,
            state,
            shutdown_tx: None,
        }
    }

    /// Start serving. Fails if the listener cannot bind or the server is
    /// already running.
    pub async fn start(&mut self) -> Result<(), std::io::Error> {
        if self.shutdown_tx.is_some() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "server already running",
            ));
        }

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let app = build_router(self.state.clone());
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            info!("API server listening on http://{}", addr);
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                    info!("API server shutting down");
                })
                .await
            {
                error!("API server error: {e}");
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        Ok(())
    }

    /// Stop the server.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}
