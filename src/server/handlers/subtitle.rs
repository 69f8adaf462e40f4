use axum::{extract::State, response::Response};

use super::{classify, fetch_ok, rewrite_playlist};
use crate::{
    Result,
    server::{params::ProxyQuery, response, state::AppState},
    stream::ManifestKind,
};

/// Handle GET /proxy/subtitle requests.
///
/// WebVTT and unrecognised content pass through byte for byte; subtitle
/// playlists are rewritten as media playlists.
pub async fn serve_subtitle(
    State(state): State<AppState>,
    ProxyQuery(params): ProxyQuery,
) -> Result<Response> {
    let target = params.target()?;
    tracing::info!("subtitle request: {}", target);

    let body = fetch_ok(&state, &target, &params).await?.into_bytes().await?;

    match classify(&target, &body) {
        ManifestKind::Vtt => Ok(response::vtt(body)),
        ManifestKind::Opaque => Ok(response::plain_text(body)),
        ManifestKind::M3u8Master | ManifestKind::M3u8Media => {
            let rewritten =
                rewrite_playlist(&state, &target, &params, ManifestKind::M3u8Media, &body)?;
            Ok(response::playlist(rewritten))
        }
    }
}
