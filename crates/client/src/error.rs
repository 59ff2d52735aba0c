use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's `error` field.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("invalid API url: {0}")]
    InvalidUrl(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("unknown form field: {0}")]
    InvalidField(String),
}

impl ClientError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}
