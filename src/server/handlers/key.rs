use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
};

use super::{ensure_success, fetch_ok};
use crate::{
    Error, Result,
    server::{params::ProxyQuery, response, state::AppState},
};

/// Handle GET /proxy/key requests.
pub async fn serve_key(
    State(state): State<AppState>,
    ProxyQuery(params): ProxyQuery,
) -> Result<Response> {
    let target = params.target()?;
    tracing::info!("key request: {}", target);

    let result = fetch_ok(&state, &target, &params).await?;
    let origin_headers = result.headers.clone();
    Ok(response::key(&origin_headers, result.into_bytes().await?))
}

/// Handle GET /proxy/provider-key requests. The origin is fixed by
/// configuration; provider headers are applied by the fetcher.
pub async fn serve_provider_key(State(state): State<AppState>) -> Result<Response> {
    let target = state
        .config
        .provider_key_url
        .as_ref()
        .ok_or(Error::ProviderKeyUnavailable)?;
    tracing::info!("provider key request");

    let result = state
        .fetcher
        .fetch(target.as_str(), &HeaderMap::new(), false)
        .await?;
    let result = ensure_success(result)?;
    let origin_headers = result.headers.clone();
    Ok(response::key(&origin_headers, result.into_bytes().await?))
}
