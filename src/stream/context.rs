use crate::{
    ProxyConfig, Result,
    resolve::{parse_base, resolve_against},
    route::{self, ProxiedRoute, Role},
};
use std::sync::Arc;
use url::Url;

/// Context for transforming a playlist.
#[derive(Debug, Clone)]
pub struct TransformContext {
    /// URL the playlist was fetched from; relative URIs resolve against it.
    pub base_url: Url,

    /// Caller-supplied request headers (base64url JSON), carried into every
    /// rewritten route.
    pub headers_param: Option<String>,

    config: Arc<ProxyConfig>,
}

impl TransformContext {
    pub fn new(base_url: &str, config: Arc<ProxyConfig>, headers_param: Option<String>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base(base_url)?,
            headers_param: headers_param.filter(|h| !h.is_empty()),
            config,
        })
    }

    /// Resolve a possibly relative URI against the playlist URL.
    pub fn resolve_url(&self, uri: &str) -> Result<String> {
        resolve_against(uri, &self.base_url)
    }

    /// Whether `uri` already points back at this proxy.
    pub fn is_proxied(&self, uri: &str) -> bool {
        route::is_proxied(uri, &self.config.route_prefix)
    }

    /// Build the proxied route for an absolute origin URL.
    pub fn build_route(&self, role: Role, target: &str) -> String {
        ProxiedRoute::new(role, target).render(&self.config.route_prefix, self.headers_param.as_deref())
    }

    /// The fixed provider key route.
    pub fn provider_key_route(&self) -> String {
        route::provider_key_route(&self.config.route_prefix)
    }

    /// Whether an absolute key URL belongs to a provider's well-known key path.
    pub fn is_provider_key(&self, target: &str) -> bool {
        self.config.providers.is_provider_key(target)
    }
}
