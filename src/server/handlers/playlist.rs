use axum::{extract::State, response::Response};

use super::{classify, fetch_ok, rewrite_playlist};
use crate::{
    Error, Result,
    route::Role,
    server::{
        params::{ProxyQuery, UrlParams},
        response,
        state::AppState,
    },
    stream::ManifestKind,
};

/// Handle GET /proxy/playlist requests.
pub async fn serve_playlist(
    State(state): State<AppState>,
    ProxyQuery(params): ProxyQuery,
) -> Result<Response> {
    serve(Role::Playlist, &state, &params).await
}

/// Handle GET /proxy/audio requests. Audio renditions are playlists too.
pub async fn serve_audio(
    State(state): State<AppState>,
    ProxyQuery(params): ProxyQuery,
) -> Result<Response> {
    serve(Role::Audio, &state, &params).await
}

async fn serve(role: Role, state: &AppState, params: &UrlParams) -> Result<Response> {
    let target = params.target()?;
    tracing::info!("{} request: {}", role, target);

    let body = fetch_ok(state, &target, params).await?.into_bytes().await?;

    match classify(&target, &body) {
        ManifestKind::Vtt => Ok(response::vtt(body)),
        ManifestKind::Opaque => Err(Error::NotAnM3u8(target.to_string())),
        kind => {
            let rewritten = rewrite_playlist(state, &target, params, kind, &body)?;
            Ok(response::playlist(rewritten))
        }
    }
}
