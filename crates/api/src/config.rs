use std::time::Duration;

use catering_core::cache::DEFAULT_CACHE_TTL;

/// Which backing store the gallery reads from.
#[derive(Debug, Clone)]
pub enum StoreSettings {
    /// Direct PostgreSQL connection (`DATABASE_URL`).
    Postgres { database_url: String },
    /// Hosted REST query interface (`STORE_URL` + `STORE_API_KEY`).
    Rest { url: String, api_key: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except the store location has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Gallery cache time-to-live in seconds (default: `300`).
    pub cache_ttl_secs: u64,
    /// Base URL for transformed image URLs, if any.
    pub storage_public_url: Option<String>,
    pub store: StoreSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `GALLERY_CACHE_TTL_SECS` | `300`                      |
    /// | `STORAGE_PUBLIC_URL`     | `STORE_URL` if set         |
    /// | `DATABASE_URL`           | unset                      |
    /// | `STORE_URL`              | required without `DATABASE_URL` |
    /// | `STORE_API_KEY`          | required without `DATABASE_URL` |
    ///
    /// Panics if the store location is missing or a number does not parse.
    /// Both are startup misconfigurations with no sensible recovery.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cache_ttl_secs: u64 = std::env::var("GALLERY_CACHE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_CACHE_TTL.as_secs().to_string())
            .parse()
            .expect("GALLERY_CACHE_TTL_SECS must be a valid u64");

        let store = match non_empty_var("DATABASE_URL") {
            Some(database_url) => StoreSettings::Postgres { database_url },
            None => StoreSettings::Rest {
                url: non_empty_var("STORE_URL")
                    .expect("STORE_URL must be set when DATABASE_URL is not"),
                api_key: non_empty_var("STORE_API_KEY")
                    .expect("STORE_API_KEY must be set when DATABASE_URL is not"),
            },
        };

        let storage_public_url =
            non_empty_var("STORAGE_PUBLIC_URL").or_else(|| non_empty_var("STORE_URL"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cache_ttl_secs,
            storage_public_url,
            store,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" https://a.example , ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("").is_empty());
    }
}
