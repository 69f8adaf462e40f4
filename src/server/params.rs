use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use url::Url;

use crate::{Error, Result, proxy::HeaderCodec};

/// Query parameters shared by every URL-bearing proxy route.
#[derive(Debug, Default, Deserialize)]
pub struct UrlParams {
    /// Origin URL of the resource, percent-decoded once by the extractor.
    #[serde(default)]
    pub url: Option<String>,

    /// Base64url-encoded JSON headers for the origin fetch.
    #[serde(default)]
    pub h: Option<String>,
}

impl UrlParams {
    /// The validated absolute `http`/`https` origin URL.
    pub fn target(&self) -> Result<Url> {
        let raw = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(Error::MissingParameter("url"))?;

        let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(url),
            _ => Err(Error::InvalidUrl(format!(
                "{}: only absolute http(s) URLs can be proxied",
                raw
            ))),
        }
    }

    /// Caller-supplied origin headers.
    pub fn headers(&self) -> Result<HeaderMap> {
        HeaderCodec::decode_optional(self.h.as_deref())
    }
}

/// `Query<UrlParams>` whose rejection renders as a JSON [`Error`].
pub struct ProxyQuery(pub UrlParams);

impl<S> FromRequestParts<S> for ProxyQuery
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(params) = Query::<UrlParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::InvalidUrl(rejection.body_text()))?;
        Ok(Self(params))
    }
}
