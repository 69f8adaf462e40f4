use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::Response,
};

use super::ensure_success;
use crate::{
    Result,
    server::{params::ProxyQuery, response, state::AppState},
};

/// Handle GET /proxy/segment requests.
///
/// The body is streamed from the origin. An inbound `Range` is forwarded and
/// the origin's status (200 or 206) is kept.
pub async fn serve_segment(
    State(state): State<AppState>,
    ProxyQuery(params): ProxyQuery,
    inbound: HeaderMap,
) -> Result<Response> {
    let target = params.target()?;
    tracing::info!("segment request: {}", target);
    let mut headers = params.headers()?;
    if let Some(range) = inbound.get(header::RANGE) {
        tracing::debug!("Forwarding range {:?} for {}", range, target);
        headers.insert(header::RANGE, range.clone());
    }

    let result = state.fetcher.fetch(target.as_str(), &headers, true).await?;
    let result = ensure_success(result)?;

    let status = result.status;
    let origin_headers = result.headers.clone();
    Ok(response::segment(status, &origin_headers, result.into_body()))
}
