use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed base URL: {0}")]
    MalformedBaseUrl(String),

    #[error("Not a valid M3U8 playlist: {0}")]
    NotAnM3u8(String),

    #[error("Invalid header encoding: {0}")]
    InvalidHeaderEncoding(String),

    #[error("Origin returned {status} for {url}")]
    OriginStatus { url: String, status: StatusCode },

    #[error("Origin unreachable: {url} - {source}")]
    OriginUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No provider key URL is configured")]
    ProviderKeyUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: String,
}

impl Error {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::MalformedBaseUrl(_) => "MALFORMED_BASE_URL",
            Self::NotAnM3u8(_) => "NOT_AN_M3U8",
            Self::InvalidHeaderEncoding(_) => "INVALID_HEADER_ENCODING",
            Self::OriginStatus { .. } => "ORIGIN_STATUS",
            Self::OriginUnreachable { .. } => "ORIGIN_UNREACHABLE",
            Self::ProviderKeyUnavailable => "PROVIDER_KEY_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_)
            | Self::InvalidUrl(_)
            | Self::MalformedBaseUrl(_)
            | Self::NotAnM3u8(_)
            | Self::InvalidHeaderEncoding(_) => StatusCode::BAD_REQUEST,
            // The client sees the true origin outcome.
            Self::OriginStatus { status, .. } => {
                if status.is_client_error() || status.is_server_error() {
                    *status
                } else {
                    StatusCode::BAD_GATEWAY
                }
            }
            Self::OriginUnreachable { source, .. } => {
                if source.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                }
            }
            Self::ProviderKeyUnavailable => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(code = self.error_code(), "{}", self);
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
