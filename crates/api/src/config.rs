use checklist_core::upload::MAX_UPLOAD_BYTES;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for local development.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Runtime configuration for the checklist server and the seed command.
///
/// Every value can be left unset; the defaults run a local instance against
/// `checklists.db` in the working directory.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long to wait for the pool to close after shutdown.
    pub shutdown_timeout_secs: u64,
    /// Largest accepted CSV upload, in bytes.
    pub max_upload_bytes: usize,
    /// SQLite connection string.
    pub database_url: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    ///
    /// | Env Var                 | Default                            |
    /// |-------------------------|------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                          |
    /// | `PORT`                  | `3000`                             |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`            |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                               |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                               |
    /// | `MAX_UPLOAD_BYTES`      | `1048576`                          |
    /// | `DATABASE_URL`          | `sqlite://checklists.db?mode=rwc`  |
    /// | `LOG_FORMAT`            | `pretty` (`json` for JSON lines)   |
    ///
    /// Panics on values that do not parse, so a bad deployment fails at
    /// startup.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 3000),
            cors_origins: env_or("CORS_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: parse_env("SHUTDOWN_TIMEOUT_SECS", 30),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", MAX_UPLOAD_BYTES),
            database_url: env_or("DATABASE_URL", "sqlite://checklists.db?mode=rwc"),
            log_format: LogFormat::from_env_value(&env_or("LOG_FORMAT", "pretty")),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_accepts_json_in_any_case() {
        assert_eq!(LogFormat::from_env_value("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value(" json "), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value("anything"), LogFormat::Pretty);
    }
}
