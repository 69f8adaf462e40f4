use anyhow::Context;
use reqwest::header::HeaderMap;
use std::{env, time::Duration};
use url::Url;

use crate::proxy::{
    ProviderTable, RetryPolicy,
    headers::{DEFAULT_USER_AGENT, default_headers},
    retry::{DEFAULT_BACKOFF_MS, DEFAULT_MAX_ATTEMPTS},
};

/// Default per-attempt timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Process-wide proxy configuration. Read-only after start.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    /// Path prefix for every proxied route, e.g. `/api/v1`. Empty by default.
    pub route_prefix: String,
    /// Per-attempt timeout for origin fetches.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Headers sent with every origin fetch.
    pub default_headers: HeaderMap,
    pub providers: ProviderTable,
    /// Origin of the fixed provider key route.
    pub provider_key_url: Option<Url>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            route_prefix: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            default_headers: default_headers(DEFAULT_USER_AGENT).unwrap_or_default(),
            providers: ProviderTable::default(),
            provider_key_url: None,
        }
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a port number")?;

        let route_prefix = normalize_prefix(&env::var("RELAY_ROUTE_PREFIX").unwrap_or_default());

        let timeout_secs: u64 = parse_var("RELAY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let max_attempts: u32 = parse_var("RELAY_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        let backoff_ms: u64 = parse_var("RELAY_BACKOFF_MS", DEFAULT_BACKOFF_MS)?;

        let user_agent =
            env::var("RELAY_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let default_headers =
            default_headers(&user_agent).context("RELAY_USER_AGENT is not a valid header")?;

        let providers = match env::var("RELAY_PROVIDERS") {
            Ok(json) if !json.trim().is_empty() => {
                ProviderTable::from_json(&json).context("invalid RELAY_PROVIDERS")?
            }
            _ => ProviderTable::default(),
        };

        let provider_key_url = match env::var("RELAY_PROVIDER_KEY_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Url::parse(raw.trim()).context("RELAY_PROVIDER_KEY_URL must be an absolute URL")?,
            ),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            route_prefix,
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy {
                max_attempts,
                backoff: Duration::from_millis(backoff_ms),
                ..RetryPolicy::default()
            },
            default_headers,
            providers,
            provider_key_url,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        _ => Ok(default),
    }
}

/// `api/v1/` -> `/api/v1`, `/` -> ``.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
