use reqwest::StatusCode;
use thiserror::Error;

/// Rejection of a crawl request input, raised before any network activity.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("crawl request must be a JSON object")]
    NotAnObject,

    #[error("invalid crawl request: {0}")]
    Malformed(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid crawler config: {0}")]
    Config(String),

    /// The search page answered with something other than `200 OK`.
    #[error("request to {url} responded with {status}")]
    Fetch { url: String, status: StatusCode },

    #[error("cannot draw a proxy from an empty pool")]
    EmptyPool,

    /// The expected result container is absent from the page.
    #[error("page has no `{container}` result container")]
    MalformedPage { container: &'static str },

    /// No response was observed at all (proxy, DNS, connection or body failure).
    #[error("couldn't fetch {url} got: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
}

impl CrawlError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}
