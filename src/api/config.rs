//! Client configuration, read from the environment with defaults.
//!
//! | Variable | Default |
//! |---|---|
//! | `BRACKET_API_URL` | `http://localhost:8000/api` |
//! | `BRACKET_API_TIMEOUT_MS` | 10000 |
//! | `BRACKET_API_RETRIES` | 2 |
//! | `BRACKET_API_RETRY_DELAY_MS` | 1000 |
//! | `BRACKET_CACHE_SIZE` | 50 |
//! | `BRACKET_CACHE_TTL_SECS` | 300 |

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Settings for [`BracketApi`](super::BracketApi) and its cache.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApiConfig {
    /// Base URL without trailing slash; endpoints are appended as `/events/...`.
    pub base_url: String,
    /// Per-attempt request timeout.
    pub timeout: Duration,
    /// Extra attempts after the first one.
    pub retries: u32,
    /// Backoff unit: attempt n waits `retry_delay * n`.
    pub retry_delay: Duration,
    pub cache_max_size: usize,
    pub cache_ttl: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            retries: 2,
            retry_delay: Duration::from_secs(1),
            cache_max_size: 50,
            cache_ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl ApiConfig {
    /// Defaults with a different base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Load from `BRACKET_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from any variable source. Invalid values are logged and replaced by defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("BRACKET_API_URL")
                .map(normalize_base_url)
                .unwrap_or(defaults.base_url),
            timeout: Duration::from_millis(parse_or(&lookup, "BRACKET_API_TIMEOUT_MS", 10_000)),
            retries: parse_or(&lookup, "BRACKET_API_RETRIES", defaults.retries),
            retry_delay: Duration::from_millis(parse_or(&lookup, "BRACKET_API_RETRY_DELAY_MS", 1_000)),
            cache_max_size: parse_or(&lookup, "BRACKET_CACHE_SIZE", defaults.cache_max_size),
            cache_ttl: Duration::from_secs(parse_or(&lookup, "BRACKET_CACHE_TTL_SECS", 300)),
        }
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    match lookup(name) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring invalid {}={:?}, using default", name, raw);
                default
            }
        },
        None => default,
    }
}
