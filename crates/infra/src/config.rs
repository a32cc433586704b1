//! Configuration loading and representation.
//!
//! Connection settings come from the environment once, at process entry, and
//! are passed explicitly to the source. Nothing here is global.

use sqlx::mysql::MySqlConnectOptions;

pub const ENV_USER: &str = "MYSQL_UID";
pub const ENV_PASSWORD: &str = "MYSQL_PWD";
pub const ENV_HOST: &str = "MYSQL_HOST";
pub const ENV_PORT: &str = "MYSQL_PORT";
pub const ENV_DATABASE: &str = "MYSQL_DB";

pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PASSWORD: &str = "<YOUR_PASSWORD>";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_DATABASE: &str = "adventureworks";

/// Connection settings for the MySQL catalog database.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl SourceConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Defaults apply only to unset keys; a key set to an empty string keeps the
    /// empty value (e.g. a password-less account).
    ///
    /// `MYSQL_HOST` may carry a port (`db.internal:3307`); an explicit
    /// `MYSQL_PORT` wins over it.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let (host, host_port) = match lookup(ENV_HOST) {
            Some(raw) => split_host_port(&raw),
            None => (defaults.host, None),
        };

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "{ENV_PORT} is not a valid port; using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => host_port.unwrap_or(defaults.port),
        };

        let password = lookup(ENV_PASSWORD).unwrap_or_else(|| {
            tracing::warn!("{ENV_PASSWORD} not set; using placeholder password");
            defaults.password
        });

        Self {
            user: lookup(ENV_USER).unwrap_or(defaults.user),
            password,
            host,
            port,
            database: lookup(ENV_DATABASE).unwrap_or(defaults.database),
        }
    }

    /// `user@host:port/database`, safe to log.
    pub fn target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl core::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

fn split_host_port(raw: &str) -> (String, Option<u16>) {
    let raw = raw.trim();
    match raw.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && !host.contains(':') => match port.parse() {
            Ok(port) => (host.to_string(), Some(port)),
            Err(_) => (raw.to_string(), None),
        },
        _ => (raw.to_string(), None),
    }
}
