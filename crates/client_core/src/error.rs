use thiserror::Error;

/// Failure talking to the registration API, classified by how far the
/// request got.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request was sent (or attempted) but no response came back.
    #[error("no response from server: {0}")]
    NoResponse(String),
    /// The server answered with a non-2xx status.
    #[error("server rejected request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("{0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::NoResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Rejected {
                status: status.as_u16(),
                message: None,
            }
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        Self::Unexpected(format!("invalid endpoint url: {err}"))
    }
}
