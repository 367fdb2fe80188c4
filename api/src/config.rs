use std::env;
use std::time::Duration;

use crate::domain::feed::{DEFAULT_HOST, FEED_FILE_NAME};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    /// Dev server listen port
    pub port: u16,
    /// Feed file name, relative to the working directory and the upstream root
    pub feed_file: String,
    /// Host used for the upstream fetch when the request has no Host header
    pub default_host: String,
    /// Total timeout of the upstream fetch
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            feed_file: FEED_FILE_NAME.to_string(),
            default_host: DEFAULT_HOST.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            feed_file: env::var("FEED_FILE").unwrap_or_else(|_| FEED_FILE_NAME.to_string()),
            default_host: env::var("FEED_DEFAULT_HOST")
                .unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            fetch_timeout: Duration::from_secs(
                env::var("FEED_FETCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            ),
        }
    }
}
