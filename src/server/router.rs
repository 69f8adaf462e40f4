use axum::{
    Json, Router,
    extract::State,
    http::{Method, header},
    routing::get,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handlers::{
        serve_audio, serve_key, serve_playlist, serve_provider_key, serve_segment, serve_subtitle,
    },
    state::AppState,
};
use crate::{
    ProxyConfig,
    route::{PROVIDER_KEY_PATH, Role},
};

/// Create the application router.
pub fn create_router(config: ProxyConfig) -> anyhow::Result<Router> {
    let state = AppState::new(config)?;
    let prefix = state.config.route_prefix.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::RANGE]);

    let path = |suffix: &str| format!("{}{}", prefix, suffix);

    let app = Router::new()
        .route(&path(Role::Playlist.path()), get(serve_playlist))
        .route(&path(Role::Segment.path()), get(serve_segment))
        .route(&path(Role::Key.path()), get(serve_key))
        .route(&path(Role::Audio.path()), get(serve_audio))
        .route(&path(Role::Subtitle.path()), get(serve_subtitle))
        .route(&path(PROVIDER_KEY_PATH), get(serve_provider_key))
        .route(&path("/docs"), get(docs))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn docs(State(state): State<AppState>) -> Json<serde_json::Value> {
    let prefix = &state.config.route_prefix;
    let routes: Vec<_> = Role::ALL
        .iter()
        .map(|role| {
            json!({
                "path": format!("{}{}", prefix, role.path()),
                "method": "GET",
                "role": role.to_string(),
                "query": {
                    "url": "percent-encoded absolute origin URL (required)",
                    "h": "base64url JSON object of extra origin request headers (optional)"
                }
            })
        })
        .chain(std::iter::once(json!({
            "path": format!("{}{}", prefix, PROVIDER_KEY_PATH),
            "method": "GET",
            "role": "provider-key",
            "query": {}
        })))
        .collect();

    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "routes": routes,
    }))
}
