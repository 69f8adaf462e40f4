//! Declarative table of origin hosts that need special treatment.
//!
//! A provider matches by host (exact or any subdomain) and contributes extra
//! request headers, typically `Referer` and `Origin`, plus an optional
//! well-known key path whose keys are served through the fixed provider key
//! route instead of the generic key route.

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER};
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

/// Provider entry as written in configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSpec {
    pub host: String,
    #[serde(default)]
    pub referer: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub key_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Provider {
    pub host: String,
    pub headers: HeaderMap,
    pub key_path: Option<String>,
}

impl TryFrom<ProviderSpec> for Provider {
    type Error = anyhow::Error;

    fn try_from(spec: ProviderSpec) -> anyhow::Result<Self> {
        let host = spec.host.trim().trim_start_matches('.').to_ascii_lowercase();
        anyhow::ensure!(!host.is_empty(), "provider host must not be empty");

        let mut headers = HeaderMap::new();
        for (name, value) in &spec.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("invalid header name {:?} for {}", name, host))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("invalid header value for {} on {}", name, host))?;
            headers.insert(name, value);
        }
        if let Some(referer) = &spec.referer {
            headers.insert(REFERER, HeaderValue::from_str(referer)?);
        }
        if let Some(origin) = &spec.origin {
            headers.insert(ORIGIN, HeaderValue::from_str(origin)?);
        }

        Ok(Self {
            host,
            headers,
            key_path: spec.key_path.filter(|p| !p.is_empty()),
        })
    }
}

impl Provider {
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        host == self.host
            || host
                .strip_suffix(self.host.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
    }

    /// Whether `url` is this provider's well-known key resource.
    pub fn is_key_url(&self, url: &Url) -> bool {
        match &self.key_path {
            Some(path) => url.host_str().is_some_and(|h| self.matches_host(h))
                && url.path().ends_with(path.as_str()),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProviderTable {
    providers: Vec<Provider>,
}

impl ProviderTable {
    /// Parse a JSON array of [`ProviderSpec`].
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let specs: Vec<ProviderSpec> =
            serde_json::from_str(json).context("provider table is not valid JSON")?;
        let providers = specs
            .into_iter()
            .map(Provider::try_from)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { providers })
    }

    /// First provider whose host pattern matches `url`'s host.
    pub fn lookup(&self, url: &Url) -> Option<&Provider> {
        let host = url.host_str()?;
        self.providers.iter().find(|p| p.matches_host(host))
    }

    /// Whether `url` (absolute) is a provider's well-known key resource.
    pub fn is_provider_key(&self, url: &str) -> bool {
        let Ok(url) = Url::parse(url) else {
            return false;
        };
        self.providers.iter().any(|p| p.is_key_url(&url))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
