pub mod key;
pub mod playlist;
pub mod segment;
pub mod subtitle;

pub use key::{serve_key, serve_provider_key};
pub use playlist::{serve_audio, serve_playlist};
pub use segment::serve_segment;
pub use subtitle::serve_subtitle;

use crate::{
    Error, Result,
    proxy::FetchResult,
    server::{params::UrlParams, state::AppState},
    stream::{ManifestClassifier, ManifestKind, ManifestRewriter, TransformContext},
};
use url::Url;

/// Buffered fetch of `target`; any non-2xx origin status becomes an error.
async fn fetch_ok(state: &AppState, target: &Url, params: &UrlParams) -> Result<FetchResult> {
    let headers = params.headers()?;
    let result = state.fetcher.fetch(target.as_str(), &headers, false).await?;
    ensure_success(result)
}

fn ensure_success(result: FetchResult) -> Result<FetchResult> {
    if result.status.is_success() {
        Ok(result)
    } else {
        Err(Error::OriginStatus {
            url: result.url,
            status: result.status,
        })
    }
}

/// Classify a fetched body. Bytes that are not UTF-8 can still be WebVTT
/// (by path) or opaque, never a playlist.
fn classify(target: &Url, body: &[u8]) -> ManifestKind {
    match std::str::from_utf8(body) {
        Ok(text) => ManifestClassifier::classify(target.as_str(), text),
        Err(_) => match ManifestClassifier::classify(target.as_str(), "") {
            ManifestKind::Vtt => ManifestKind::Vtt,
            _ => ManifestKind::Opaque,
        },
    }
}

/// Rewrite a playlist fetched from `target`.
fn rewrite_playlist(
    state: &AppState,
    target: &Url,
    params: &UrlParams,
    kind: ManifestKind,
    body: &[u8],
) -> Result<String> {
    let text = std::str::from_utf8(body).map_err(|_| Error::NotAnM3u8(target.to_string()))?;
    let context = TransformContext::new(target.as_str(), state.config.clone(), params.h.clone())?;
    let rewritten = ManifestRewriter::with_default_rules(context).rewrite(kind, text)?;
    tracing::debug!(
        "Rewrote {:?} playlist {} ({} -> {} bytes)",
        kind,
        target,
        text.len(),
        rewritten.len()
    );
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_non_utf8() {
        let target = Url::parse("https://h/subs/it.srt").unwrap();
        assert_eq!(classify(&target, b"perch\xe8\n"), ManifestKind::Opaque);

        let target = Url::parse("https://h/subs/it.vtt").unwrap();
        assert_eq!(classify(&target, b"WEBVTT\n\nperch\xe8\n"), ManifestKind::Vtt);

        let target = Url::parse("https://h/index.m3u8").unwrap();
        assert_eq!(classify(&target, b"#EXTM3U\n\xff"), ManifestKind::Opaque);
    }
}
