pub mod client;
pub mod headers;
pub mod provider;
pub mod retry;

pub use client::{FetchBody, FetchResult, OriginFetcher};
pub use headers::HeaderCodec;
pub use provider::{Provider, ProviderSpec, ProviderTable};
pub use retry::RetryPolicy;
