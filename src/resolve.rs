//! Resolution of URIs found inside playlists against the playlist URL.
//!
//! Resolution is pure string/URL work, no network access. A URI that already
//! carries a scheme is returned exactly as written.

use url::Url;

use crate::{Error, Result};

/// Resolve `uri` against `base`, returning an absolute URL string.
pub fn resolve(uri: &str, base: &str) -> Result<String> {
    let uri = uri.trim();
    if has_scheme(uri) {
        return Ok(uri.to_string());
    }
    let base_url = parse_base(base)?;
    resolve_against(uri, &base_url)
}

/// Resolve `uri` against an already validated base URL.
pub fn resolve_against(uri: &str, base: &Url) -> Result<String> {
    let uri = uri.trim();
    if has_scheme(uri) {
        return Ok(uri.to_string());
    }

    // Path-absolute: keep only scheme and authority of the base.
    if uri.starts_with('/') && !uri.starts_with("//") {
        let host = base
            .host_str()
            .ok_or_else(|| Error::MalformedBaseUrl(base.to_string()))?;
        let mut resolved = format!("{}://{}", base.scheme(), host);
        if let Some(port) = base.port() {
            resolved.push_str(&format!(":{}", port));
        }
        resolved.push_str(uri);
        return Ok(resolved);
    }

    base.join(uri)
        .map(String::from)
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", uri, e)))
}

/// Parse and validate a base URL. It must be absolute and carry a host.
pub fn parse_base(base: &str) -> Result<Url> {
    let url = Url::parse(base.trim()).map_err(|_| Error::MalformedBaseUrl(base.to_string()))?;
    if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
        return Err(Error::MalformedBaseUrl(base.to_string()));
    }
    Ok(url)
}

/// Whether `uri` starts with an RFC 3986 scheme token followed by `:`.
pub fn has_scheme(uri: &str) -> bool {
    let Some((scheme, _)) = uri.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
