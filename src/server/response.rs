//! Response shapes for each kind of proxied resource.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

pub const PLAYLIST_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";
pub const VTT_CONTENT_TYPE: &str = "text/vtt";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";
pub const SEGMENT_CONTENT_TYPE: &str = "video/mp2t";
pub const KEY_CONTENT_TYPE: &str = "application/octet-stream";

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";
const SEGMENT_CACHE: &str = "public, max-age=3600";
const SUBTITLE_CACHE: &str = "public, max-age=3600";
const KEY_CACHE: &str = "public, max-age=86400";

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, Range";

/// CORS headers carried by every proxied response.
pub fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
    ]
}

/// A rewritten playlist. Never cached.
pub fn playlist(body: String) -> Response {
    (
        cors_headers(),
        [
            (header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE),
            (header::CACHE_CONTROL, NO_CACHE),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        body,
    )
        .into_response()
}

/// A WebVTT file, passed through byte for byte.
pub fn vtt(body: Bytes) -> Response {
    subtitle_with_type(VTT_CONTENT_TYPE, body)
}

/// Subtitle content that is neither WebVTT nor a playlist, in whatever
/// encoding the origin used.
pub fn plain_text(body: Bytes) -> Response {
    subtitle_with_type(TEXT_CONTENT_TYPE, body)
}

fn subtitle_with_type(content_type: &'static str, body: Bytes) -> Response {
    (
        cors_headers(),
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, SUBTITLE_CACHE),
        ],
        body,
    )
        .into_response()
}

/// A media segment. `origin` holds the origin response headers; the length
/// and range headers are forwarded as they are so byte ranges line up.
pub fn segment(status: StatusCode, origin: &HeaderMap, body: Body) -> Response {
    let mut response = (
        status,
        cors_headers(),
        [
            (header::ACCEPT_RANGES, "bytes"),
            (header::CACHE_CONTROL, SEGMENT_CACHE),
        ],
        body,
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        content_type_or(origin, SEGMENT_CONTENT_TYPE),
    );
    for name in [header::CONTENT_LENGTH, header::CONTENT_RANGE] {
        if let Some(value) = origin.get(&name) {
            headers.insert(name, value.clone());
        }
    }
    response
}

/// An encryption key.
pub fn key(origin: &HeaderMap, body: Bytes) -> Response {
    let mut response = (
        cors_headers(),
        [(header::CACHE_CONTROL, KEY_CACHE)],
        body,
    )
        .into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        content_type_or(origin, KEY_CONTENT_TYPE),
    );
    response
}

fn content_type_or(origin: &HeaderMap, default: &'static str) -> HeaderValue {
    origin
        .get(header::CONTENT_TYPE)
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(default))
}
