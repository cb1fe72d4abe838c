// Runtime configuration, read once at start-up. Environment variables:
// CLUBHOUSE_DATABASE_URL  SQLite connection string (sqlite://clubhouse.db?mode=rwc)
// CLUBHOUSE_HOST          bind address (127.0.0.1)
// CLUBHOUSE_PORT          bind port (3000)
// CLUBHOUSE_ADMIN_TOKEN   shared secret for the admin area; unset leaves it open
// CLUBHOUSE_LOG           tracing filter directive (info)
// CLUBHOUSE_LOG_FILE      write logs to this file instead of stdout
#[derive(Debug, Clone)]
pub struct Configuration {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_token: Option<String>,
    pub log_filter: String,
    pub log_file: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://clubhouse.db?mode=rwc";
    pub const DEFAULT_PORT: u16 = 3000;

    // Local database file, loopback port 3000, open admin area, info logging to stdout.
    pub fn new() -> Self {
        Self {
            database_url: Self::DEFAULT_DATABASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: Self::DEFAULT_PORT,
            admin_token: None,
            log_filter: "info".to_string(),
            log_file: None,
        }
    }

    // Unset variables keep their default. So does an unparseable port, reported later by `warnings`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Separated from the environment so it can be tested without touching process state.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            database_url: non_empty("CLUBHOUSE_DATABASE_URL").unwrap_or(defaults.database_url),
            host: non_empty("CLUBHOUSE_HOST").unwrap_or(defaults.host),
            port: non_empty("CLUBHOUSE_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            admin_token: non_empty("CLUBHOUSE_ADMIN_TOKEN"),
            log_filter: non_empty("CLUBHOUSE_LOG").unwrap_or(defaults.log_filter),
            log_file: non_empty("CLUBHOUSE_LOG_FILE"),
        }
    }

    // Problems with the raw environment that fell back to defaults.
    pub fn warnings() -> Vec<String> {
        let mut warnings = Vec::new();
        if let Ok(port) = std::env::var("CLUBHOUSE_PORT") {
            if !port.trim().is_empty() && port.trim().parse::<u16>().is_err() {
                warnings.push(format!("CLUBHOUSE_PORT={port} is not a port number, using {}", Self::DEFAULT_PORT));
            }
        }
        warnings
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_admin_gated(&self) -> bool {
        self.admin_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Configuration::from_lookup(lookup(&[]));
        assert_eq!(config.database_url, Configuration::DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(!config.is_admin_gated());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Configuration::from_lookup(lookup(&[
            ("CLUBHOUSE_HOST", "0.0.0.0"),
            ("CLUBHOUSE_PORT", "8080"),
            ("CLUBHOUSE_ADMIN_TOKEN", "hunter2"),
            ("CLUBHOUSE_LOG", "clubhouse=debug"),
        ]));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.admin_token.as_deref(), Some("hunter2"));
        assert_eq!(config.log_filter, "clubhouse=debug");
    }

    #[test]
    fn bad_port_and_blank_token_fall_back() {
        let config = Configuration::from_lookup(lookup(&[
            ("CLUBHOUSE_PORT", "eighty"),
            ("CLUBHOUSE_ADMIN_TOKEN", "   "),
        ]));
        assert_eq!(config.port, Configuration::DEFAULT_PORT);
        assert!(config.admin_token.is_none());
    }
}
