use crate::{ProxyConfig, Result, proxy::OriginFetcher};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: OriginFetcher,
    pub config: Arc<ProxyConfig>,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let config = Arc::new(config);
        Ok(Self {
            fetcher: OriginFetcher::new(config.clone())?,
            config,
        })
    }
}
