use crate::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderName, HeaderValue, PRAGMA,
    USER_AGENT,
};
use std::collections::HashMap;

/// User-Agent of a current desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Codec for encoding/decoding headers as base64url JSON.
pub struct HeaderCodec;

impl HeaderCodec {
    /// Decode headers from base64url-encoded JSON string.
    pub fn decode(encoded: &str) -> Result<HashMap<String, String>> {
        let json_bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| Error::InvalidHeaderEncoding(e.to_string()))?;

        serde_json::from_slice(&json_bytes).map_err(|e| Error::InvalidHeaderEncoding(e.to_string()))
    }

    /// Encode headers to base64url-encoded JSON string.
    #[cfg(test)]
    pub fn encode(headers: &HashMap<String, String>) -> Result<String> {
        let json =
            serde_json::to_vec(headers).map_err(|e| Error::InvalidHeaderEncoding(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(&json))
    }

    /// Decode headers from optional parameter straight into a header map.
    pub fn decode_optional(encoded: Option<&str>) -> Result<HeaderMap> {
        match encoded {
            Some(s) if !s.is_empty() => to_header_map(&Self::decode(s)?),
            _ => Ok(HeaderMap::new()),
        }
    }
}

/// Convert a plain string map into a validated header map.
pub fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeaderEncoding(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeaderEncoding(format!("{}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Browser-like request headers sent with every origin fetch.
///
/// `Accept-Encoding` is left to the HTTP client so bodies arrive decoded.
pub fn default_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|e| Error::InvalidHeaderEncoding(e.to_string()))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    Ok(headers)
}

/// Overlay `overrides` on `base`; later layers replace earlier values.
pub fn merge_headers(base: &mut HeaderMap, overrides: &HeaderMap) {
    for (name, value) in overrides {
        base.insert(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut headers = HashMap::new();
        headers.insert("Referer".to_string(), "https://player.example.com/".to_string());
        headers.insert("Cookie".to_string(), "session=abc".to_string());

        let encoded = HeaderCodec::encode(&headers).unwrap();
        let decoded = HeaderCodec::decode(&encoded).unwrap();

        assert_eq!(headers, decoded);
    }

    #[test]
    fn test_decode_optional_none() {
        let result = HeaderCodec::decode_optional(None).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_decode_optional_empty() {
        let result = HeaderCodec::decode_optional(Some("")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_decode_garbage_is_rejected() {
        assert!(matches!(
            HeaderCodec::decode("!!!"),
            Err(Error::InvalidHeaderEncoding(_))
        ));
    }

    #[test]
    fn test_default_headers() {
        let headers = default_headers(DEFAULT_USER_AGENT).unwrap();
        assert_eq!(headers[USER_AGENT], DEFAULT_USER_AGENT);
        assert_eq!(headers[ACCEPT], "*/*");
        assert!(headers.get(reqwest::header::ACCEPT_ENCODING).is_none());
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = default_headers(DEFAULT_USER_AGENT).unwrap();
        let mut overrides = HeaderMap::new();
        overrides.insert(USER_AGENT, HeaderValue::from_static("custom/1.0"));

        merge_headers(&mut base, &overrides);

        assert_eq!(base[USER_AGENT], "custom/1.0");
        assert_eq!(base[ACCEPT], "*/*");
    }
}
