//! Server configuration loaded from the environment.
//!
//! Every variable is optional; unset variables fall back to the defaults
//! below. A variable that is set but unparsable is a configuration error.

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_GAME_URL_PREFIX: &str = "/play/lobby/";
pub const DEFAULT_HEARTBEAT_SECS: u64 = 20;
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix of the `start` event url; the room id and a `/` are appended.
    pub game_url_prefix: String,
    /// Interval between server pings on every socket.
    pub heartbeat_interval: Duration,
    /// Sockets silent for longer than this are closed.
    pub client_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            game_url_prefix: DEFAULT_GAME_URL_PREFIX.to_string(),
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            client_timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. `from_env` uses the process
    /// environment; tests pass a closure over a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("BACKEND_HOST").unwrap_or(defaults.host);

        let port = match var("BACKEND_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number"))?,
            None => defaults.port,
        };

        let game_url_prefix = var("GAME_URL_PREFIX").unwrap_or(defaults.game_url_prefix);
        if !game_url_prefix.ends_with('/') {
            return Err(AppError::config("GAME_URL_PREFIX must end with '/'"));
        }

        let heartbeat_interval =
            parse_secs(var("WS_HEARTBEAT_SECS"), "WS_HEARTBEAT_SECS")?
                .unwrap_or(defaults.heartbeat_interval);
        let client_timeout = parse_secs(var("WS_CLIENT_TIMEOUT_SECS"), "WS_CLIENT_TIMEOUT_SECS")?
            .unwrap_or(defaults.client_timeout);

        if client_timeout <= heartbeat_interval {
            return Err(AppError::config(
                "WS_CLIENT_TIMEOUT_SECS must be greater than WS_HEARTBEAT_SECS",
            ));
        }

        Ok(Self {
            host,
            port,
            game_url_prefix,
            heartbeat_interval,
            client_timeout,
        })
    }
}

fn parse_secs(raw: Option<String>, key: &str) -> Result<Option<Duration>, AppError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(AppError::config(format!(
            "{key} must be a positive number of seconds"
        ))),
    }
}
