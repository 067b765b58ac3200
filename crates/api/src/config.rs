use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running the tracker locally next
/// to its frontend build.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// SQLite connection URL (default: `sqlite://data/projects.db`).
    pub database_url: String,
    /// Directory holding the built single-page frontend.
    pub frontend_dir: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for the pool to close after the server stops (default: `5`).
    pub shutdown_timeout_secs: u64,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `HOST`                 | `127.0.0.1`                   |
    /// | `PORT`                 | `8080`                        |
    /// | `DATABASE_URL`         | `sqlite://data/projects.db`   |
    /// | `FRONTEND_DIR`         | `../frontend/dist`            |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                          |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `5`                           |
    /// | `LOG_FORMAT`           | `pretty` (or `json`)          |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Panics on unparsable numeric values; misconfiguration should fail at
    /// startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port: u16 = get("PORT", "8080")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = get("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = get("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = get("SHUTDOWN_TIMEOUT_SECS", "5")
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host: get("HOST", "127.0.0.1"),
            port,
            database_url: get("DATABASE_URL", "sqlite://data/projects.db"),
            frontend_dir: PathBuf::from(get("FRONTEND_DIR", "../frontend/dist")),
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            log_json: get("LOG_FORMAT", "pretty").eq_ignore_ascii_case("json"),
        }
    }
}
