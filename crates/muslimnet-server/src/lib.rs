//! MüslimNet Server - HTTP API server.
//!
//! This crate exposes the moderation core over HTTP.
//!
//! ## Endpoints
//!
//! - `POST /api/auth/register`, `POST /api/auth/login`, `POST /api/auth/logout`
//! - `GET /api/posts`, `POST /api/posts` - Public feed and submission
//! - `GET /api/posts/{id}/comments`, `POST /api/posts/{id}/comments`
//! - `POST /api/moderation/check` - Dry-run moderation
//! - `GET /api/admin/moderation/{posts,comments}` - Review queues
//! - `POST /api/admin/moderation/{posts,comments}/{id}` - Approve or remove
//! - `POST /api/admin/moderation/rescan`, `GET /api/admin/moderation/stats`
//! - `GET /api/admin/users`, `POST /api/admin/users/{id}/{ban,unban,activate,deactivate}`
//!
//! ## Example
//!
//! ```no_run
//! use muslimnet_server::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::new(ServerConfig::default()).await.unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

mod auth;
pub mod error;
mod handlers;
pub mod models;
pub mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use muslimnet_core::auth::{AuthManager, SESSION_TIMEOUT};
use muslimnet_core::{ContentModerator, ForbiddenWords, ModerationError, ModerationWorkflow};
use socket2::{Domain, Protocol, Socket, Type};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use muslimnet_storage::Database;

pub use auth::{AuthUser, ModeratorUser};
pub use error::{ApiError, Result};
pub use state::AppState;

/// Default server port.
pub const DEFAULT_PORT: u16 = 48780;

/// Default server host (localhost only).
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: 127.0.0.1).
    pub host: String,
    /// Port to bind to (default: 48780).
    pub port: u16,
    /// Database path (None = in-memory).
    pub db_path: Option<String>,
    /// Forbidden-word list file (None = builtin list).
    pub forbidden_words: Option<PathBuf>,
    /// Idle time after which a session token stops working.
    pub session_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: None,
            forbidden_words: None,
            session_timeout: SESSION_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Creates a config with a specific database path.
    pub fn with_db_path(path: impl Into<String>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Sets the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the forbidden-word list file.
    pub fn with_forbidden_words(mut self, path: impl Into<PathBuf>) -> Self {
        self.forbidden_words = Some(path.into());
        self
    }

    /// Sets the idle session timeout.
    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    /// Builds the session store this config describes.
    pub fn auth(&self) -> AuthManager {
        AuthManager::with_session_timeout(self.session_timeout)
    }

    /// Builds the moderation workflow this config describes.
    pub fn workflow(&self) -> std::result::Result<ModerationWorkflow, ModerationError> {
        let words = match &self.forbidden_words {
            Some(path) => ForbiddenWords::from_file(path)?,
            None => ForbiddenWords::builtin(),
        };
        info!(words = words.len(), "Forbidden-word list loaded");

        Ok(ModerationWorkflow::new(
            ContentModerator::new(words),
            Default::default(),
        ))
    }
}

/// Server error types.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind to {0}: {1}")]
    BindError(SocketAddr, std::io::Error),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] muslimnet_storage::StorageError),

    /// The moderation filters could not be built.
    #[error("moderation setup error: {0}")]
    Moderation(#[from] ModerationError),

    /// Server runtime error.
    #[error("server error: {0}")]
    Runtime(String),
}

/// Builds the API router over the given state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/posts/{id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route("/api/moderation/check", post(handlers::check_content))
        .route("/api/admin/moderation/posts", get(handlers::flagged_posts))
        .route("/api/admin/moderation/posts/{id}", post(handlers::review_post))
        .route(
            "/api/admin/moderation/comments",
            get(handlers::flagged_comments),
        )
        .route(
            "/api/admin/moderation/comments/{id}",
            post(handlers::review_comment),
        )
        .route("/api/admin/moderation/rescan", post(handlers::rescan))
        .route("/api/admin/moderation/stats", get(handlers::moderation_stats))
        .route("/api/admin/users", get(handlers::list_users))
        .route("/api/admin/users/{id}/ban", post(handlers::ban_user))
        .route("/api/admin/users/{id}/unban", post(handlers::unban_user))
        .route("/api/admin/users/{id}/activate", post(handlers::activate_user))
        .route(
            "/api/admin/users/{id}/deactivate",
            post(handlers::deactivate_user),
        )
        .layer(cors)
        .with_state(state)
}

/// The HTTP API server.
pub struct Server {
    router: Router,
    addr: SocketAddr,
}

impl Server {
    /// Creates a new server with the given configuration.
    pub async fn new(config: ServerConfig) -> std::result::Result<Self, ServerError> {
        let db = if let Some(ref path) = config.db_path {
            Database::with_path(path)?
        } else {
            Database::in_memory()?
        };

        Self::with_database(config, db)
    }

    /// Creates a server with an existing database.
    pub fn with_database(
        config: ServerConfig,
        db: Database,
    ) -> std::result::Result<Self, ServerError> {
        let state = AppState::with_parts(db, config.workflow()?, config.auth());
        Self::with_state(config, state)
    }

    /// Creates a server with custom application state.
    pub fn with_state(
        config: ServerConfig,
        state: AppState,
    ) -> std::result::Result<Self, ServerError> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| ServerError::Runtime(format!("invalid address: {}", e)))?;

        Ok(Self {
            router: router(state),
            addr,
        })
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs the server until shutdown.
    pub async fn run(self) -> std::result::Result<(), ServerError> {
        info!("Starting MüslimNet API server on {}", self.addr);

        let domain = if self.addr.is_ipv6() {
            Domain::IPV6
        } else {
            Domain::IPV4
        };
        let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        // Allow rebinding while old sockets linger in TIME_WAIT
        socket
            .set_reuse_address(true)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        socket
            .bind(&self.addr.into())
            .map_err(|e| ServerError::BindError(self.addr, e))?;
        socket
            .listen(128)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        // Set non-blocking for tokio
        socket
            .set_nonblocking(true)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        let std_listener: std::net::TcpListener = socket.into();
        let listener = tokio::net::TcpListener::from_std(std_listener)
            .map_err(|e| ServerError::BindError(self.addr, e))?;

        axum::serve(listener, self.router)
            .await
            .map_err(|e| ServerError::Runtime(e.to_string()))?;

        Ok(())
    }
}
