//! Axum server bootstrap - the composition root.
//!
//! This is the only place where configuration is turned into wired
//! infrastructure for the web adapter.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use runboard_core::{LogDirConfig, LogStore};

/// Default port for the dashboard server.
pub const DEFAULT_PORT: u16 = 8888;

/// Default cadence for tail polling and keepalives.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Layout of the log directory served by the dashboard.
    pub logs: LogDirConfig,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Cadence of the tail-polling loop for stream sessions. A tunable
    /// server constant, not a per-request parameter.
    pub poll_interval: Duration,
}

impl ServerConfig {
    /// Config serving the log directory at `log_dir` with the default
    /// port, naming convention, and cadence.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: DEFAULT_PORT,
            logs: LogDirConfig::new(log_dir),
            static_dir: None,
            cors: CorsConfig::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the HTTP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    /// Set the tail-polling cadence.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Application context for the Axum adapter.
///
/// Holds everything handlers need; shared across requests via
/// [`crate::state::AppState`].
pub struct AxumContext {
    /// Access to the on-disk log directory.
    pub store: LogStore,
    /// Cadence of the tail-polling loop for stream sessions.
    pub poll_interval: Duration,
}

/// Bootstrap the Axum server context.
///
/// The log directory is owned by the external writer and is not created
/// here; serving an absent directory is valid, and all listings and
/// snapshots stay empty until the writer appears.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let store = LogStore::new(config.logs.clone());
    let current = store.current_log();

    tracing::info!(
        target: "runboard.paths",
        log_dir = %config.logs.root.display(),
        current_log = %current.path().display(),
        "Axum bootstrap resolved paths"
    );

    if !config.logs.root.is_dir() {
        tracing::warn!(
            "Log directory {} does not exist yet; serving empty logs until the writer creates it",
            config.logs.root.display()
        );
    }

    Ok(AxumContext {
        store,
        poll_interval: config.poll_interval,
    })
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    if config.static_dir.is_some() {
        info!("runboard dashboard (with UI) listening on http://{}", addr);
    } else {
        info!("runboard dashboard (API only) listening on http://{}", addr);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
