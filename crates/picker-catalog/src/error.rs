use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid search endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("catalog page fetch timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}
