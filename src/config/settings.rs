//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_CORS_ALLOWED_ORIGINS, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_USE_IN_MEMORY_DATABASE,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Select the in-memory store instead of the relational one
    pub use_in_memory_database: bool,
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("use_in_memory_database", &self.use_in_memory_database)
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_in_memory_database: DEFAULT_USE_IN_MEMORY_DATABASE,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_allowed_origins: parse_origins(DEFAULT_CORS_ALLOWED_ORIGINS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let use_in_memory_database = match lookup("USE_IN_MEMORY_DATABASE") {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "USE_IN_MEMORY_DATABASE={:?} is not a boolean, using default {}",
                    raw,
                    DEFAULT_USE_IN_MEMORY_DATABASE
                );
                DEFAULT_USE_IN_MEMORY_DATABASE
            }),
            None => DEFAULT_USE_IN_MEMORY_DATABASE,
        };

        Self {
            use_in_memory_database,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            server_host: lookup("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: match lookup("SERVER_PORT") {
                Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                    tracing::warn!(
                        "SERVER_PORT={:?} is not a valid port, using default {}",
                        raw,
                        DEFAULT_SERVER_PORT
                    );
                    DEFAULT_SERVER_PORT
                }),
                None => DEFAULT_SERVER_PORT,
            },
            cors_allowed_origins: parse_origins(
                &lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.to_string()),
            ),
        }
    }

    /// Configuration backed by the in-memory store (tests, demos).
    pub fn in_memory() -> Self {
        Self {
            use_in_memory_database: true,
            ..Self::default()
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert!(config.use_in_memory_database);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_relational_selection() {
        let config = config_from(&[
            ("USE_IN_MEMORY_DATABASE", "False"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("SERVER_PORT", "9000"),
        ]);
        assert!(!config.use_in_memory_database);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.server_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_bool_keeps_default() {
        let config = config_from(&[("USE_IN_MEMORY_DATABASE", "maybe")]);
        assert_eq!(config.use_in_memory_database, DEFAULT_USE_IN_MEMORY_DATABASE);
    }

    #[test]
    fn test_invalid_port_keeps_default() {
        for raw in ["http", "70000", "-1", ""] {
            let config = config_from(&[("SERVER_PORT", raw)]);
            assert_eq!(config.server_port, DEFAULT_SERVER_PORT, "SERVER_PORT={:?}", raw);
        }

        let config = config_from(&[("SERVER_PORT", " 9090 ")]);
        assert_eq!(config.server_port, 9090);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test,"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = config_from(&[("DATABASE_URL", "postgres://user:secret@db/inventory")]);
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
