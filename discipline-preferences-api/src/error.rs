use hyper::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid api url {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("api url has no host: {0}")]
    MissingHost(String),
    #[error("unsupported url scheme in {0}")]
    UnsupportedScheme(String),
    #[error("invalid dns name {0}")]
    InvalidDnsName(String),
    #[error("hyper {0}")]
    Hyper(#[from] hyper::Error),
    #[error("hyper http {0}")]
    HyperHttp(#[from] hyper::http::Error),
    #[error("io {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode query string {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
    #[error("failed to encode request body {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to parse response {0}")]
    Decode(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, ApiError>;
