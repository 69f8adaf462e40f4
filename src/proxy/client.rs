use crate::{Error, Result, config::ProxyConfig, proxy::headers::merge_headers};
use axum::body::Body;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::{Client, Method, Response, StatusCode, header::HeaderMap};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Body of an origin response: read up front, or still on the wire.
pub enum FetchBody {
    Buffered(Bytes),
    Streaming(Response),
}

/// Outcome of one origin fetch, scoped to a single request.
pub struct FetchResult {
    pub url: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: FetchBody,
}

impl FetchResult {
    /// Read the whole body.
    pub async fn into_bytes(self) -> Result<Bytes> {
        match self.body {
            FetchBody::Buffered(bytes) => Ok(bytes),
            FetchBody::Streaming(response) => response
                .bytes()
                .await
                .map_err(|source| Error::OriginUnreachable {
                    url: self.url,
                    source,
                }),
        }
    }

    /// Turn the body into a response body. Streaming bodies are forwarded
    /// chunk by chunk and dropped with the response.
    pub fn into_body(self) -> Body {
        match self.body {
            FetchBody::Buffered(bytes) => Body::from(bytes),
            FetchBody::Streaming(response) => {
                let url = self.url;
                Body::from_stream(
                    response
                        .bytes_stream()
                        .inspect_err(move |e| warn!("Origin stream for {} broke: {}", url, e)),
                )
            }
        }
    }
}

/// HTTP client for fetching resources from their origin.
#[derive(Clone)]
pub struct OriginFetcher {
    client: Client,
    config: Arc<ProxyConfig>,
}

impl OriginFetcher {
    pub fn new(config: Arc<ProxyConfig>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .read_timeout(config.timeout)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Default headers, then caller headers, then the matching provider's
    /// headers.
    pub fn request_headers(&self, url: &Url, extra: &HeaderMap) -> HeaderMap {
        let mut headers = self.config.default_headers.clone();
        merge_headers(&mut headers, extra);
        if let Some(provider) = self.config.providers.lookup(url) {
            debug!("Applying provider headers for {}", provider.host);
            merge_headers(&mut headers, &provider.headers);
        }
        headers
    }

    /// GET `url`. With `stream` the body is left unread for forwarding.
    pub async fn fetch(&self, url: &str, headers: &HeaderMap, stream: bool) -> Result<FetchResult> {
        let response = self.send_with_retry(Method::GET, url, headers, stream).await?;
        let status = response.status();
        let response_headers = response.headers().clone();

        let body = if stream {
            FetchBody::Streaming(response)
        } else {
            let bytes = response
                .bytes()
                .await
                .map_err(|source| Error::OriginUnreachable {
                    url: url.to_string(),
                    source,
                })?;
            FetchBody::Buffered(bytes)
        };

        Ok(FetchResult {
            url: url.to_string(),
            status,
            headers: response_headers,
            body,
        })
    }

    /// HEAD `url` and report the final status.
    pub async fn fetch_head(&self, url: &str, headers: &HeaderMap) -> Result<StatusCode> {
        let response = self.send_with_retry(Method::HEAD, url, headers, false).await?;
        Ok(response.status())
    }

    async fn send_with_retry(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        stream: bool,
    ) -> Result<Response> {
        let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        let request_headers = self.request_headers(&parsed, headers);
        let policy = &self.config.retry;
        let attempts = policy.attempts();
        let mut attempt = 1;

        loop {
            let mut request = self
                .client
                .request(method.clone(), parsed.clone())
                .headers(request_headers.clone());
            // Streaming bodies are bounded by the client's read timeout instead.
            if !stream {
                request = request.timeout(self.config.timeout);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if !policy.should_retry_status(status, attempt) {
                        if !status.is_success() {
                            warn!(
                                "Origin returned {} for {} (attempt {}/{})",
                                status, url, attempt, attempts
                            );
                        }
                        return Ok(response);
                    }
                    warn!(
                        "Origin returned {} for {} (attempt {}/{}), retrying",
                        status, url, attempt, attempts
                    );
                }
                Err(e) => {
                    if !policy.should_retry_error(attempt) {
                        warn!(
                            "Origin fetch failed for {} (attempt {}/{}): {}",
                            url, attempt, attempts, e
                        );
                        return Err(Error::OriginUnreachable {
                            url: url.to_string(),
                            source: e,
                        });
                    }
                    warn!(
                        "Origin fetch failed for {} (attempt {}/{}), retrying: {}",
                        url, attempt, attempts, e
                    );
                }
            }

            tokio::time::sleep(policy.backoff_for(attempt)).await;
            attempt += 1;
        }
    }
}
