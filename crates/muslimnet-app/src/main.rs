//! MüslimNet - community content moderation server.
//!
//! Opens the database, loads the forbidden-word list, optionally bootstraps
//! an admin account, and serves the HTTP API until shutdown.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use muslimnet_core::auth::AuthManager;
use muslimnet_server::{Server, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use muslimnet_storage::Database;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// MüslimNet - community content moderation server
#[derive(Parser, Debug)]
#[command(name = "muslimnet", version, about)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "MUSLIMNET_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind to
    #[arg(long, env = "MUSLIMNET_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Database file (default: platform data directory)
    #[arg(long, env = "MUSLIMNET_DB_PATH", conflicts_with = "in_memory")]
    db_path: Option<PathBuf>,

    /// Use an in-memory database; nothing survives a restart
    #[arg(long)]
    in_memory: bool,

    /// Forbidden-word list, one word per line (default: builtin list)
    #[arg(long, env = "MUSLIMNET_FORBIDDEN_WORDS")]
    forbidden_words: Option<PathBuf>,

    /// Minutes of inactivity after which a session token expires
    #[arg(long, env = "MUSLIMNET_SESSION_TIMEOUT_MINUTES", default_value_t = 60)]
    session_timeout_minutes: u64,

    /// Create or promote this account to admin at startup
    #[arg(long, env = "MUSLIMNET_ADMIN_USERNAME", requires = "admin_password")]
    admin_username: Option<String>,

    /// Password for a newly created admin account
    #[arg(
        long,
        env = "MUSLIMNET_ADMIN_PASSWORD",
        hide_env_values = true,
        requires = "admin_username"
    )]
    admin_password: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Get the logs directory path.
fn logs_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "muslimnet", "muslimnet").map(|dirs| dirs.data_dir().join("logs"))
}

/// Initialize logging to the console and, when possible, a rotating file.
fn init_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("muslimnet={},warn", log_level)));

    if let Some(log_dir) = logs_dir() {
        if std::fs::create_dir_all(&log_dir).is_ok() {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix("muslimnet")
                .filename_suffix("log")
                .build(&log_dir)
                .ok();

            if let Some(appender) = file_appender {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_writer(std::io::stdout))
                    .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                    .init();

                tracing::info!("Logging to {:?}", log_dir);
                return Some(guard);
            }
        }
    }

    // Fallback: console logging only
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::warn!("File logging unavailable, using console only");
    None
}

/// Open the database the arguments select.
fn open_database(args: &Args) -> anyhow::Result<Database> {
    let db = if args.in_memory {
        tracing::warn!("Using an in-memory database; data is lost on exit");
        Database::in_memory()?
    } else {
        let path = match &args.db_path {
            Some(path) => path.clone(),
            None => Database::default_db_path()?,
        };
        Database::with_path(&path)
            .with_context(|| format!("failed to open database at {}", path.display()))?
    };
    Ok(db)
}

/// Create or promote the admin account named on the command line.
fn bootstrap_admin(db: &Database, args: &Args) -> anyhow::Result<()> {
    let (Some(username), Some(password)) = (&args.admin_username, &args.admin_password) else {
        return Ok(());
    };

    let hash = AuthManager::new()
        .hash_password(password)
        .context("invalid admin password")?;
    let admin = db.ensure_admin(username.trim(), &hash)?;

    tracing::info!(user_id = admin.id, username = %admin.username, "Admin account ready");
    Ok(())
}

fn server_config(args: &Args) -> ServerConfig {
    let session_timeout = Duration::from_secs(args.session_timeout_minutes.saturating_mul(60));
    let mut config = ServerConfig::default()
        .with_host(args.host.clone())
        .with_port(args.port)
        .with_session_timeout(session_timeout);
    if let Some(path) = &args.db_path {
        config.db_path = Some(path.display().to_string());
    }
    if let Some(path) = &args.forbidden_words {
        config = config.with_forbidden_words(path);
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&args);

    tracing::info!("Starting MüslimNet...");

    let db = open_database(&args)?;
    bootstrap_admin(&db, &args)?;

    let server = Server::with_database(server_config(&args), db)?;
    server.run().await?;

    tracing::info!("MüslimNet shutting down");
    Ok(())
}
